//! Print the derived reference points for a curve.

use serde::Serialize;
use wsa_curve::{extrapolate, Curve, DerivedPair};

#[derive(Debug, Serialize)]
pub struct CalcOutput {
    pub first_line_points: Curve,
    pub derived_points: DerivedPair,
}

pub fn calculate(curve: Curve) -> anyhow::Result<CalcOutput> {
    let derived = extrapolate(&curve)?;
    Ok(CalcOutput {
        first_line_points: curve.extended(derived.points()),
        derived_points: derived,
    })
}

pub fn run_calc(curve: Curve) -> anyhow::Result<()> {
    let output = calculate(curve)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wsa_curve::{CurveError, Point};

    #[test]
    fn test_calculate() {
        let curve = Curve::new(vec![
            Point::new(0.0, 80.0).unwrap(),
            Point::new(456.0, 40.0).unwrap(),
        ]);
        let output = calculate(curve).unwrap();
        assert_eq!(output.derived_points.q20.flow, 567.0);
        assert_eq!(output.first_line_points.len(), 4);
    }

    #[test]
    fn test_calculate_reports_curve_error() {
        let curve = Curve::new(vec![
            Point::new(0.0, 40.0).unwrap(),
            Point::new(456.0, 40.0).unwrap(),
        ]);
        let err = calculate(curve).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CurveError>(),
            Some(CurveError::InvalidCurve(_))
        ));
    }
}
