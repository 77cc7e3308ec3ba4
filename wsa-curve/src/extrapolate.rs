use log::debug;
use serde::{Deserialize, Serialize};

use crate::{curve::Curve, error::CurveError, point::Point};

/// Hazen-Williams exponent relating flow to pressure loss.
pub const HAZEN_WILLIAMS_EXPONENT: f64 = 1.85;

/// Residual pressure (psi) at which the Q20 reference flow is read.
pub const Q20_RESIDUAL_PSI: f64 = 20.0;

/// The two reference points derived from a supply curve.
///
/// Serialized in the order `[[Q20, 20], [Q0, 0]]`: the 20 psi point comes
/// first.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "[Point; 2]", into = "[Point; 2]")]
pub struct DerivedPair {
    pub q20: Point,
    pub q0: Point,
}

impl DerivedPair {
    pub fn points(&self) -> [Point; 2] {
        [self.q20, self.q0]
    }
}

impl From<[Point; 2]> for DerivedPair {
    fn from(value: [Point; 2]) -> Self {
        DerivedPair {
            q20: value[0],
            q0: value[1],
        }
    }
}

impl From<DerivedPair> for [Point; 2] {
    fn from(value: DerivedPair) -> Self {
        value.points()
    }
}

/// Derive Q20 and Q0 from the first two readings of a curve.
///
/// With `(x1, y1)` the static reading and `(x2, y2)` the operating reading:
///
/// ```text
/// k   = x2 / (y1 - y2)^(1/n)
/// Q0  = floor(k * y1^(1/n))
/// Q20 = floor(k * (y1 - 20)^(1/n))
/// ```
///
/// Flows are truncated, not rounded. `x1` plays no part in the result.
///
/// # Example
///
/// ```rust
/// use wsa_curve::{extrapolate, Curve, Point};
///
/// let curve = Curve::new(vec![
///     Point::new(0.0, 80.0).unwrap(),
///     Point::new(456.0, 40.0).unwrap(),
/// ]);
/// let pair = extrapolate(&curve).unwrap();
/// assert_eq!(pair.q20.flow, 567.0);
/// assert_eq!(pair.q0.flow, 663.0);
/// ```
pub fn extrapolate(curve: &Curve) -> Result<DerivedPair, CurveError> {
    let (static_reading, operating) = match curve.points() {
        [first, second, ..] => (first, second),
        points => {
            return Err(CurveError::MalformedInput(format!(
                "supply curve needs at least 2 points, got {}",
                points.len()
            )))
        }
    };
    let y1 = static_reading.pressure;
    let x2 = operating.flow;
    let y2 = operating.pressure;

    if y1 <= y2 {
        return Err(CurveError::InvalidCurve(format!(
            "pressure must drop from the static reading ({} psi) to the operating reading ({} psi)",
            y1, y2
        )));
    }
    if y1 <= Q20_RESIDUAL_PSI {
        return Err(CurveError::InvalidCurve(format!(
            "static pressure {} psi must exceed {} psi to derive Q20",
            y1, Q20_RESIDUAL_PSI
        )));
    }

    let inv_n = 1.0 / HAZEN_WILLIAMS_EXPONENT;
    let k = x2 / (y1 - y2).powf(inv_n);
    let q0 = (k * y1.powf(inv_n)).floor();
    let q20 = (k * (y1 - Q20_RESIDUAL_PSI).powf(inv_n)).floor();
    debug!("k = {}, Q20 = {}, Q0 = {}", k, q20, q0);

    if !(k.is_finite() && q0.is_finite() && q20.is_finite()) {
        return Err(CurveError::InvalidCurve(format!(
            "derived flows overflow for an operating flow of {} gpm over a {} psi drop",
            x2,
            y1 - y2
        )));
    }

    Ok(DerivedPair {
        q20: Point::new(q20, Q20_RESIDUAL_PSI)?,
        q0: Point::new(q0, 0.0)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(points: &[(f64, f64)]) -> Curve {
        Curve::new(
            points
                .iter()
                .map(|&(flow, pressure)| Point::new(flow, pressure).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_reference_values() {
        let pair = extrapolate(&curve(&[(0.0, 80.0), (456.0, 40.0)])).unwrap();

        let inv_n = 1.0 / 1.85;
        let k = 456.0 / 40f64.powf(inv_n);
        let expected_q20 = (k * 60f64.powf(inv_n)).floor();
        let expected_q0 = (k * 80f64.powf(inv_n)).floor();

        assert_eq!(pair.q20.flow, expected_q20);
        assert_eq!(pair.q0.flow, expected_q0);
        assert_eq!(pair.q20.flow, 567.0);
        assert_eq!(pair.q0.flow, 663.0);
    }

    #[test]
    fn test_hydrant_flow_test() {
        let pair = extrapolate(&curve(&[(0.0, 75.0), (699.0, 55.0)])).unwrap();
        assert_eq!(pair.points(), [
            Point::new(1207.0, 20.0).unwrap(),
            Point::new(1428.0, 0.0).unwrap(),
        ]);
    }

    #[test]
    fn test_derived_pressures_and_ordering() {
        for y1 in [21.0, 35.0, 60.0, 80.0, 125.0] {
            for drop in [0.5, 5.0, 15.0] {
                for x2 in [0.0, 10.0, 250.0, 1500.0] {
                    let pair = extrapolate(&curve(&[(0.0, y1), (x2, y1 - drop)])).unwrap();
                    assert_eq!(pair.q20.pressure, 20.0);
                    assert_eq!(pair.q0.pressure, 0.0);
                    assert!(pair.q0.flow >= pair.q20.flow, "y1={} drop={} x2={}", y1, drop, x2);
                    assert!(pair.q20.flow >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let input = curve(&[(0.0, 62.5), (830.0, 41.0)]);
        assert_eq!(extrapolate(&input).unwrap(), extrapolate(&input).unwrap());
    }

    #[test]
    fn test_equal_pressures_rejected() {
        let err = extrapolate(&curve(&[(0.0, 50.0), (400.0, 50.0)])).unwrap_err();
        assert!(matches!(err, CurveError::InvalidCurve(_)));
    }

    #[test]
    fn test_rising_pressure_rejected() {
        let err = extrapolate(&curve(&[(0.0, 40.0), (400.0, 55.0)])).unwrap_err();
        assert!(matches!(err, CurveError::InvalidCurve(_)));
    }

    #[test]
    fn test_low_static_pressure_rejected() {
        let err = extrapolate(&curve(&[(0.0, 20.0), (300.0, 10.0)])).unwrap_err();
        assert!(matches!(err, CurveError::InvalidCurve(_)));
        let err = extrapolate(&curve(&[(0.0, 15.0), (300.0, 10.0)])).unwrap_err();
        assert!(matches!(err, CurveError::InvalidCurve(_)));
    }

    #[test]
    fn test_overflowing_flows_are_invalid_curve() {
        // tiny pressure drop blows up k
        let err = extrapolate(&curve(&[(0.0, 80.0), (1e308, 79.999999)])).unwrap_err();
        assert!(matches!(err, CurveError::InvalidCurve(_)), "{:?}", err);
        // finite k, but Q0 overflows
        let err = extrapolate(&curve(&[(0.0, 80.0), (1e308, 79.0)])).unwrap_err();
        assert!(matches!(err, CurveError::InvalidCurve(_)), "{:?}", err);
    }

    #[test]
    fn test_large_but_finite_flow_is_accepted() {
        let pair = extrapolate(&curve(&[(0.0, 80.0), (1e13, 40.0)])).unwrap();
        assert!(pair.q0.flow.is_finite());
        assert!(pair.q0.flow > pair.q20.flow);
    }

    #[test]
    fn test_short_curve_is_malformed() {
        let err = extrapolate(&curve(&[(0.0, 80.0)])).unwrap_err();
        assert!(matches!(err, CurveError::MalformedInput(_)));
    }

    #[test]
    fn test_pair_serialization_order() {
        let pair = extrapolate(&curve(&[(0.0, 80.0), (456.0, 40.0)])).unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "[[567.0,20.0],[663.0,0.0]]");
    }
}
