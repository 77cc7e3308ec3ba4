//! The hydraulic flow-axis scale.
//!
//! Supply charts are traditionally drawn on "N^1.85" paper so that the
//! Hazen-Williams curve straightens out. The presentational transform used
//! here is
//!
//! ```text
//! f(x) = max((x / 100) * 1.85, 1) * x
//! ```
//!
//! which is the identity up to the knee at `100 / 1.85` gpm and grows as
//! `0.0185 * x^2` beyond it, spreading out the high-flow end of the axis.
//!
//! [`ScaledAxis`] plugs the transform into plotters as a coordinate: values
//! are mapped linearly in transformed space and tick positions are plain
//! multiples of the configured major/minor spacing.

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use std::ops::Range;
use wsa_curve::extrapolate::HAZEN_WILLIAMS_EXPONENT;

/// Flow below which the transform is the identity.
pub const KNEE: f64 = 100.0 / HAZEN_WILLIAMS_EXPONENT;

/// Map a flow value into axis space.
pub fn forward(x: f64) -> f64 {
    ((x / 100.0) * HAZEN_WILLIAMS_EXPONENT).max(1.0) * x
}

/// Map an axis-space value back to flow. Exact inverse of [`forward`].
pub fn inverse(y: f64) -> f64 {
    if y <= KNEE {
        y
    } else {
        (y * 100.0 / HAZEN_WILLIAMS_EXPONENT).sqrt()
    }
}

pub fn forward_all(values: &[f64]) -> Vec<f64> {
    values.iter().map(|&x| forward(x)).collect()
}

pub fn inverse_all(values: &[f64]) -> Vec<f64> {
    values.iter().map(|&y| inverse(y)).collect()
}

/// Most labelled ticks an axis asks for, however wide its range.
pub const MAX_MAJOR_TICKS: usize = 64;

/// How many multiples of `step` lie within `[start, end]`, without building
/// them. Saturates at `u64::MAX` for absurdly fine spacing.
pub fn tick_count(start: f64, end: f64, step: f64) -> u64 {
    if !(step > 0.0) || !start.is_finite() || !end.is_finite() || end < start {
        return 0;
    }
    let first = (start / step).ceil();
    let last = (end / step).floor();
    (last - first + 1.0).max(0.0) as u64
}

/// Smallest of `step`, `2 * step`, `4 * step`, ... leaving at most `max`
/// ticks in `[start, end]`.
pub fn coarsen_step(start: f64, end: f64, step: f64, max: usize) -> Option<f64> {
    if max == 0 || !(step > 0.0) {
        return None;
    }
    let mut step = step;
    while tick_count(start, end, step) > max as u64 {
        step *= 2.0;
        if !step.is_finite() {
            return None;
        }
    }
    Some(step)
}

/// Multiples of `step` lying within `[start, end]`.
///
/// Allocates one entry per tick; bound the spacing with [`coarsen_step`]
/// first when the range is not known to be small.
pub fn ticks(start: f64, end: f64, step: f64) -> Vec<f64> {
    let count = tick_count(start, end, step);
    if count == 0 {
        return Vec::new();
    }
    let first = (start / step).ceil();
    (0..count).map(|i| (first + i as f64) * step).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisScale {
    Linear,
    Hydraulic,
}

impl AxisScale {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            AxisScale::Linear => value,
            AxisScale::Hydraulic => forward(value),
        }
    }
}

/// A plotters coordinate with a fixed tick spacing and an optional
/// hydraulic transform.
#[derive(Debug, Clone)]
pub struct ScaledAxis {
    range: Range<f64>,
    scale: AxisScale,
    major: f64,
    minor: f64,
}

impl ScaledAxis {
    pub fn linear(range: Range<f64>, major: f64, minor: f64) -> Self {
        ScaledAxis {
            range,
            scale: AxisScale::Linear,
            major,
            minor,
        }
    }

    pub fn hydraulic(range: Range<f64>, major: f64, minor: f64) -> Self {
        ScaledAxis {
            range,
            scale: AxisScale::Hydraulic,
            major,
            minor,
        }
    }

    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Number of major ticks on the axis, capped at [`MAX_MAJOR_TICKS`].
    pub fn major_count(&self) -> usize {
        let count = tick_count(self.range.start, self.range.end, self.major);
        count.min(MAX_MAJOR_TICKS as u64) as usize
    }

    /// Tick values for the requested spacing, coarsened by doubling until at
    /// most `max` remain.
    fn spaced_ticks(&self, step: f64, max: usize) -> Vec<f64> {
        match coarsen_step(self.range.start, self.range.end, step, max) {
            Some(step) => ticks(self.range.start, self.range.end, step),
            None => Vec::new(),
        }
    }
}

impl Ranged for ScaledAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let lo = self.scale.apply(self.range.start);
        let hi = self.scale.apply(self.range.end);
        if hi <= lo {
            return limit.0;
        }
        let fraction = (self.scale.apply(*value) - lo) / (hi - lo);
        limit.0 + ((limit.1 - limit.0) as f64 * fraction).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        let step = if hint.weight().allow_light_points() {
            self.minor
        } else {
            self.major
        };
        self.spaced_ticks(step, hint.max_num_points())
    }

    fn range(&self) -> Range<f64> {
        self.range.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_identity_below_knee() {
        assert_eq!(forward(0.0), 0.0);
        assert_eq!(forward(10.0), 10.0);
        assert_eq!(forward(50.0), 50.0);
    }

    #[test]
    fn test_forward_stretches_high_flow() {
        assert!((forward(100.0) - 185.0).abs() < 1e-9);
        assert!((forward(200.0) - 740.0).abs() < 1e-9);
        assert!((forward(1000.0) - 18500.0).abs() < 1e-9);
    }

    #[test]
    fn test_forward_is_monotonic() {
        let values: Vec<f64> = (0..=300).map(|i| i as f64 * 5.0).collect();
        let mapped = forward_all(&values);
        for pair in mapped.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_forward_continuous_at_knee() {
        assert!((forward(KNEE) - KNEE).abs() < 1e-9);
        assert!((forward(KNEE + 1e-6) - KNEE).abs() < 1e-4);
    }

    #[test]
    fn test_inverse_undoes_forward() {
        for x in [0.0, 12.0, KNEE, 75.0, 456.0, 1428.0] {
            assert!((inverse(forward(x)) - x).abs() < 1e-9, "x = {}", x);
        }
        let restored = inverse_all(&forward_all(&[30.0, 600.0]));
        assert!((restored[0] - 30.0).abs() < 1e-9);
        assert!((restored[1] - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_ticks() {
        assert_eq!(ticks(0.0, 650.0, 200.0), vec![0.0, 200.0, 400.0, 600.0]);
        assert_eq!(ticks(5.0, 31.0, 10.0), vec![10.0, 20.0, 30.0]);
        assert!(ticks(0.0, 100.0, 0.0).is_empty());
        assert!(ticks(10.0, 5.0, 1.0).is_empty());
    }

    #[test]
    fn test_tick_count_matches_ticks() {
        assert_eq!(tick_count(0.0, 650.0, 200.0), 4);
        assert_eq!(tick_count(5.0, 31.0, 10.0), 3);
        assert_eq!(tick_count(0.0, 100.0, 0.0), 0);
        assert_eq!(tick_count(0.0, f64::INFINITY, 10.0), 0);
        assert_eq!(tick_count(0.0, 1.5e13, 10.0), 1_500_000_000_001);
    }

    #[test]
    fn test_coarsen_step() {
        assert_eq!(coarsen_step(0.0, 1500.0, 200.0, 10), Some(200.0));
        assert_eq!(coarsen_step(0.0, 1500.0, 200.0, 4), Some(400.0));
        assert_eq!(coarsen_step(0.0, 1500.0, 200.0, 0), None);
        assert_eq!(coarsen_step(0.0, 1500.0, -1.0, 4), None);
    }

    #[test]
    fn test_huge_range_stays_bounded() {
        let axis = ScaledAxis::hydraulic(0.0..1.5e13, 200.0, 10.0);
        assert_eq!(axis.major_count(), MAX_MAJOR_TICKS);
        let points = axis.spaced_ticks(10.0, 40);
        assert!(!points.is_empty());
        assert!(points.len() <= 40);
        assert_eq!(points[0], 0.0);
    }

    #[test]
    fn test_hydraulic_map_positions() {
        let axis = ScaledAxis::hydraulic(0.0..1000.0, 200.0, 10.0);
        assert_eq!(axis.map(&0.0, (0, 3700)), 0);
        assert_eq!(axis.map(&1000.0, (0, 3700)), 3700);
        // 100 gpm sits at 185 / 18500 of the way along
        assert_eq!(axis.map(&100.0, (0, 3700)), 37);
        assert_eq!(axis.scale(), AxisScale::Hydraulic);
    }

    #[test]
    fn test_linear_map_positions() {
        let axis = ScaledAxis::linear(0.0..100.0, 10.0, 1.0);
        assert_eq!(axis.map(&50.0, (500, 0)), 250);
        assert_eq!(axis.major_count(), 11);
    }

    #[test]
    fn test_spaced_ticks_coarsen() {
        let axis = ScaledAxis::hydraulic(0.0..1500.0, 200.0, 10.0);
        assert_eq!(axis.spaced_ticks(200.0, 10).len(), 8);
        assert_eq!(axis.spaced_ticks(200.0, 4), vec![0.0, 400.0, 800.0, 1200.0]);
        assert!(axis.spaced_ticks(200.0, 0).is_empty());
    }
}
