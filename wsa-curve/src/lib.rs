//! Core types for water supply analysis.
//!
//! A supply curve is a handful of measured `(flow, pressure)` readings. From
//! the first two readings the [`extrapolate`](extrapolate::extrapolate)
//! function derives the flow available at 20 psi and at 0 psi residual
//! pressure using the Hazen-Williams exponent.

pub mod analysis;
pub mod curve;
pub mod error;
pub mod extrapolate;
pub mod point;
pub mod request;

pub use analysis::SupplyAnalysis;
pub use curve::Curve;
pub use error::{CurveError, Result};
pub use extrapolate::{extrapolate, DerivedPair};
pub use point::{AnnotatedPoint, Point};
pub use request::{SupplyInput, SupplyRequest};
