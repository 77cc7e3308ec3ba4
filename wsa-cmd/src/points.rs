//! Reading curve points from the command line or a CSV file.

use log::info;
use std::path::Path;
use wsa_curve::{Curve, Point};

/// Parse a `FLOW,PRESSURE` argument.
pub fn parse_point_arg(s: &str) -> Result<Point, String> {
    let (flow, pressure) = s
        .split_once(',')
        .ok_or_else(|| format!("expected FLOW,PRESSURE, got '{}'", s))?;
    let flow: f64 = flow
        .trim()
        .parse()
        .map_err(|_| format!("invalid flow '{}'", flow.trim()))?;
    let pressure: f64 = pressure
        .trim()
        .parse()
        .map_err(|_| format!("invalid pressure '{}'", pressure.trim()))?;
    Point::new(flow, pressure).map_err(|e| e.to_string())
}

/// Read a headerless `flow,pressure` CSV into a curve.
pub fn read_points_csv(path: &Path) -> anyhow::Result<Curve> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut points = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result?;
        let (flow, pressure) = match (record.get(0), record.get(1)) {
            (Some(flow), Some(pressure)) => (flow, pressure),
            _ => anyhow::bail!("{} line {}: expected flow,pressure", path.display(), line + 1),
        };
        let point = parse_point_arg(&format!("{},{}", flow, pressure))
            .map_err(|e| anyhow::anyhow!("{} line {}: {}", path.display(), line + 1, e))?;
        points.push(point);
    }
    info!("Read {} points from {}", points.len(), path.display());
    Ok(Curve::new(points))
}

/// Use the CSV file when given, otherwise the `--point` arguments.
pub fn load_curve(points: Vec<Point>, csv_path: Option<&Path>) -> anyhow::Result<Curve> {
    match csv_path {
        Some(path) => read_points_csv(path),
        None => Ok(Curve::new(points)),
    }
}
