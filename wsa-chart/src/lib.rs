//! Chart rendering for water supply analysis.
//!
//! This crate turns a [`SupplyAnalysis`] into a chart image on the
//! hydraulic (N^1.85) flow axis and stores the result under a unique name.

pub mod artifact;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod render;
pub mod scale;

pub use artifact::{write_atomic, Artifact, ArtifactStore};
pub use error::{ChartError, Result};
pub use layout::ChartLayout;
pub use render::{ChartFormat, ChartRenderer, PngRenderer, SvgRenderer};

use wsa_curve::SupplyAnalysis;

/// Render an analysis and write it to the store in one step.
///
/// Nothing is written if rendering fails.
pub fn publish<R: ChartRenderer + ?Sized>(
    renderer: &R,
    store: &ArtifactStore,
    analysis: &SupplyAnalysis,
    layout: &ChartLayout,
) -> Result<Artifact> {
    let bytes = renderer.render(analysis, layout)?;
    store.store(&bytes, renderer.extension())
}
