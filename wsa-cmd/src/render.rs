//! Render a chart straight to a file, without the HTTP service.

use log::info;
use std::path::Path;
use wsa_chart::{write_atomic, ChartFormat, ChartLayout};
use wsa_curve::{Curve, Point, SupplyAnalysis, SupplyInput};

/// Chart format implied by a file name: SVG for `.svg`, PNG otherwise.
pub fn format_for(output: &Path) -> ChartFormat {
    match output.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => ChartFormat::Svg,
        _ => ChartFormat::Png,
    }
}

pub fn run_render(
    curve: Curve,
    second_points: Vec<Point>,
    output: &Path,
    layout: &ChartLayout,
    format: ChartFormat,
) -> anyhow::Result<()> {
    let analysis = SupplyAnalysis::run(SupplyInput {
        primary: curve,
        secondary: Curve::new(second_points),
        annotations: Vec::new(),
    })?;
    let bytes = format.renderer().render(&analysis, layout)?;
    write_atomic(output, &bytes)?;

    info!(
        "Q20 = {} gpm, Q0 = {} gpm; {} chart written to {}",
        analysis.derived.q20.flow,
        analysis.derived.q0.flow,
        format,
        output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrant_curve() -> Curve {
        Curve::new(vec![
            Point::new(0.0, 75.0).unwrap(),
            Point::new(699.0, 55.0).unwrap(),
        ])
    }

    #[test]
    fn test_format_for() {
        assert_eq!(format_for(Path::new("out/supply.svg")), ChartFormat::Svg);
        assert_eq!(format_for(Path::new("supply.SVG")), ChartFormat::Svg);
        assert_eq!(format_for(Path::new("supply.png")), ChartFormat::Png);
        assert_eq!(format_for(Path::new("supply")), ChartFormat::Png);
    }

    #[test]
    fn test_run_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("supply.svg");
        let layout = ChartLayout::default().with_flow_ticks(100.0, 10.0);
        run_render(hydrant_curve(), Vec::new(), &output, &layout, ChartFormat::Svg).unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("(1207, 20)"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_run_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("supply.png");
        run_render(
            hydrant_curve(),
            Vec::new(),
            &output,
            &ChartLayout::default(),
            ChartFormat::Png,
        )
        .unwrap();

        let png = std::fs::read(&output).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_run_render_rejects_bad_curve() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("supply.svg");
        let curve = Curve::new(vec![
            Point::new(0.0, 18.0).unwrap(),
            Point::new(100.0, 10.0).unwrap(),
        ]);
        let layout = ChartLayout::default();
        assert!(run_render(curve, Vec::new(), &output, &layout, ChartFormat::Svg).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("taken");
        std::fs::create_dir(&output).unwrap();
        std::fs::write(output.join("keep"), b"x").unwrap();

        let layout = ChartLayout::default();
        assert!(run_render(hydrant_curve(), Vec::new(), &output, &layout, ChartFormat::Svg).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
