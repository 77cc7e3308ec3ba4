use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CurveError;

/// A single reading on a supply curve.
///
/// Flow is the independent variable in gallons per minute and must be
/// non-negative; pressure is the residual pressure in psi. Both are finite.
/// On the wire a point is the two-element array `[flow, pressure]`.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Point {
    pub flow: f64,
    pub pressure: f64,
}

impl Point {
    pub fn new(flow: f64, pressure: f64) -> Result<Self, CurveError> {
        if !flow.is_finite() || !pressure.is_finite() {
            return Err(CurveError::MalformedInput(format!(
                "point ({}, {}) is not finite",
                flow, pressure
            )));
        }
        if flow < 0.0 {
            return Err(CurveError::MalformedInput(format!(
                "flow {} is negative",
                flow
            )));
        }
        Ok(Point { flow, pressure })
    }

    /// True for the `(0, 0)` placeholder the form submits for unused rows.
    pub fn is_origin(&self) -> bool {
        self.flow == 0.0 && self.pressure == 0.0
    }
}

impl TryFrom<(f64, f64)> for Point {
    type Error = CurveError;

    fn try_from(value: (f64, f64)) -> Result<Self, Self::Error> {
        Point::new(value.0, value.1)
    }
}

impl From<Point> for (f64, f64) {
    fn from(value: Point) -> Self {
        (value.flow, value.pressure)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            format_value(self.flow),
            format_value(self.pressure)
        )
    }
}

/// Whole numbers print without a fractional part ("567", not "567.0").
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// A point carrying a free-text marker label.
///
/// Labels may be in any script, right-to-left text included; the label is
/// stored as submitted and left to the renderer to lay out. On the wire this
/// is `{"flow": .., "pressure": .., "label": ..}`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(try_from = "AnnotatedPointFields", into = "AnnotatedPointFields")]
pub struct AnnotatedPoint {
    pub point: Point,
    pub label: String,
}

#[derive(Serialize, Deserialize)]
struct AnnotatedPointFields {
    flow: f64,
    pressure: f64,
    #[serde(default)]
    label: String,
}

impl TryFrom<AnnotatedPointFields> for AnnotatedPoint {
    type Error = CurveError;

    fn try_from(value: AnnotatedPointFields) -> Result<Self, Self::Error> {
        Ok(AnnotatedPoint {
            point: Point::new(value.flow, value.pressure)?,
            label: value.label,
        })
    }
}

impl From<AnnotatedPoint> for AnnotatedPointFields {
    fn from(value: AnnotatedPoint) -> Self {
        AnnotatedPointFields {
            flow: value.point.flow,
            pressure: value.point.pressure,
            label: value.label,
        }
    }
}
