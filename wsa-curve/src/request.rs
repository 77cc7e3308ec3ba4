//! Raw request bodies and their validation.
//!
//! Form submissions arrive as loosely typed JSON: numbers may be strings, and
//! a blank input field becomes `null`. Everything is kept as
//! [`serde_json::Value`] until [`SupplyRequest::validate`] so that a bad field
//! is reported as [`CurveError::MalformedInput`] naming the offending entry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    curve::Curve,
    error::{CurveError, Result},
    point::{AnnotatedPoint, Point},
};

/// Maximum number of labelled marker points per request.
pub const MAX_ANNOTATIONS: usize = 2;

/// A request as submitted by the form or an API caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyRequest {
    #[serde(default)]
    pub first_line_points: Vec<Value>,
    #[serde(default)]
    pub second_line_points: Vec<Value>,
    #[serde(default)]
    pub optional_points: Vec<Value>,
}

/// A validated request.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyInput {
    /// The supply curve the reference points are derived from (2+ points).
    pub primary: Curve,
    /// A second line drawn for comparison, possibly empty.
    pub secondary: Curve,
    pub annotations: Vec<AnnotatedPoint>,
}

impl SupplyRequest {
    pub fn validate(&self) -> Result<SupplyInput> {
        let primary = parse_curve(&self.first_line_points, "first_line_points")?;
        if primary.len() < 2 {
            return Err(CurveError::MalformedInput(format!(
                "first_line_points needs at least 2 points, got {}",
                primary.len()
            )));
        }
        let secondary = parse_curve(&self.second_line_points, "second_line_points")?;

        if self.optional_points.len() > MAX_ANNOTATIONS {
            return Err(CurveError::MalformedInput(format!(
                "at most {} optional_points are allowed, got {}",
                MAX_ANNOTATIONS,
                self.optional_points.len()
            )));
        }
        let annotations = self
            .optional_points
            .iter()
            .enumerate()
            .map(|(i, value)| parse_annotation(value, &format!("optional_points[{}]", i)))
            .collect::<Result<Vec<_>>>()?;

        Ok(SupplyInput {
            primary,
            secondary,
            annotations,
        })
    }
}

fn parse_curve(values: &[Value], field: &str) -> Result<Curve> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| parse_point(value, &format!("{}[{}]", field, i)))
        .collect::<Result<Vec<_>>>()
        .map(Curve::new)
}

/// Accepts `[flow, pressure]` or `{"flow": .., "pressure": ..}`.
fn parse_point(value: &Value, context: &str) -> Result<Point> {
    match value {
        Value::Array(items) if items.len() == 2 => {
            let flow = parse_number(&items[0], &format!("{} flow", context))?;
            let pressure = parse_number(&items[1], &format!("{} pressure", context))?;
            Point::new(flow, pressure).map_err(|e| annotate(e, context))
        }
        Value::Object(fields) => {
            let flow = field_number(fields, "flow", context)?;
            let pressure = field_number(fields, "pressure", context)?;
            Point::new(flow, pressure).map_err(|e| annotate(e, context))
        }
        other => Err(CurveError::MalformedInput(format!(
            "{}: expected [flow, pressure], got {}",
            context, other
        ))),
    }
}

fn parse_annotation(value: &Value, context: &str) -> Result<AnnotatedPoint> {
    let fields = value.as_object().ok_or_else(|| {
        CurveError::MalformedInput(format!(
            "{}: expected an object with flow, pressure and label",
            context
        ))
    })?;
    let point = parse_point(value, context)?;
    let label = match fields.get("label") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => {
            return Err(CurveError::MalformedInput(format!(
                "{}: label must be text, got {}",
                context, other
            )))
        }
    };
    Ok(AnnotatedPoint { point, label })
}

fn field_number(
    fields: &serde_json::Map<String, Value>,
    name: &str,
    context: &str,
) -> Result<f64> {
    let value = fields.get(name).ok_or_else(|| {
        CurveError::MalformedInput(format!("{}: missing {}", context, name))
    })?;
    parse_number(value, &format!("{} {}", context, name))
}

fn parse_number(value: &Value, context: &str) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(CurveError::MalformedInput(format!(
            "{}: expected a number, got {}",
            context, value
        ))),
    }
}

fn annotate(error: CurveError, context: &str) -> CurveError {
    match error {
        CurveError::MalformedInput(msg) => {
            CurveError::MalformedInput(format!("{}: {}", context, msg))
        }
        other => other,
    }
}
