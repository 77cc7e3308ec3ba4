use serde::{Deserialize, Serialize};

use crate::point::Point;

/// An ordered sequence of readings defining one supply line.
///
/// By convention point 0 is the static (lowest flow, highest pressure)
/// reading and point 1 a measured operating point.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Curve {
    points: Vec<Point>,
}

impl Curve {
    pub fn new(points: Vec<Point>) -> Self {
        Curve { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Append points in order, returning the extended curve.
    pub fn extended<I: IntoIterator<Item = Point>>(mut self, points: I) -> Self {
        self.points.extend(points);
        self
    }
}

impl From<Vec<Point>> for Curve {
    fn from(points: Vec<Point>) -> Self {
        Curve::new(points)
    }
}
