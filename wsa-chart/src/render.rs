//! Drawing a supply analysis with plotters.

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::{borrow::Cow, fmt, fs, str::FromStr};
use wsa_curve::{point::format_value, Curve, SupplyAnalysis};

use crate::{
    error::{drawing_error, Result},
    fonts::{register_fonts, visual_order},
    layout::{ChartLayout, FLOW_LABEL, PRESSURE_LABEL, TITLE},
    scale::ScaledAxis,
};

const PRIMARY_COLOR: RGBColor = BLUE;
const SECONDARY_COLOR: RGBColor = RED;
const ANNOTATION_COLOR: RGBColor = RGBColor(0, 128, 0);

type SupplyChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<ScaledAxis, ScaledAxis>>;

/// Something that turns an analysis into image bytes.
pub trait ChartRenderer {
    /// File extension of the produced image, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, analysis: &SupplyAnalysis, layout: &ChartLayout) -> Result<Vec<u8>>;
}

/// How label text reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOrder {
    /// Logical order; the viewer applies the bidi algorithm (SVG).
    Logical,
    /// Display order; right-to-left runs are reversed before drawing, for
    /// backends that place glyphs strictly left to right (bitmaps).
    Visual,
}

/// Renders charts as PNG images.
///
/// Glyphs come from the bundled font, and right-to-left labels are put in
/// display order before rasterizing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngRenderer;

impl ChartRenderer for PngRenderer {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn render(&self, analysis: &SupplyAnalysis, layout: &ChartLayout) -> Result<Vec<u8>> {
        // the bitmap encoder only writes to paths
        let scratch = tempfile::tempdir()?;
        let path = scratch.path().join("chart.png");
        {
            let root = BitMapBackend::new(&path, (layout.width, layout.height))
                .into_drawing_area();
            draw_analysis(&root, analysis, layout, LabelOrder::Visual)?;
            root.present().map_err(drawing_error)?;
        }
        let png = fs::read(&path)?;
        debug!("Rendered {} bytes of PNG", png.len());
        Ok(png)
    }
}

/// Renders charts as standalone SVG documents.
///
/// Text is emitted as SVG `<text>` in logical order and shaped by the viewer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl ChartRenderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, analysis: &SupplyAnalysis, layout: &ChartLayout) -> Result<Vec<u8>> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (layout.width, layout.height))
                .into_drawing_area();
            draw_analysis(&root, analysis, layout, LabelOrder::Logical)?;
            root.present().map_err(drawing_error)?;
        }
        debug!("Rendered {} bytes of SVG", svg.len());
        Ok(svg.into_bytes())
    }
}

/// Image format of stored charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartFormat {
    #[default]
    Png,
    Svg,
}

impl ChartFormat {
    pub fn renderer(self) -> Box<dyn ChartRenderer + Send + Sync> {
        match self {
            ChartFormat::Png => Box::new(PngRenderer),
            ChartFormat::Svg => Box::new(SvgRenderer),
        }
    }
}

impl FromStr for ChartFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ChartFormat::Png),
            "svg" => Ok(ChartFormat::Svg),
            other => Err(format!("unknown chart format '{}' (expected png or svg)", other)),
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartFormat::Png => write!(f, "png"),
            ChartFormat::Svg => write!(f, "svg"),
        }
    }
}

/// Draw the full chart onto any plotters drawing area.
pub fn draw_analysis<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    analysis: &SupplyAnalysis,
    layout: &ChartLayout,
    order: LabelOrder,
) -> Result<()> {
    register_fonts()?;
    root.fill(&WHITE).map_err(drawing_error)?;

    let flow_max = layout.flow_limit(&analysis.primary);
    let pressure_max = layout.pressure_limit(&analysis.primary);
    let x_axis = ScaledAxis::hydraulic(0.0..flow_max, layout.flow_major, layout.flow_minor);
    let y_axis = ScaledAxis::linear(
        0.0..pressure_max,
        layout.pressure_major,
        layout.pressure_minor,
    );
    let x_labels = x_axis.major_count().max(2);
    let y_labels = y_axis.major_count().max(2);

    let mut chart = ChartBuilder::on(root)
        .caption(TITLE, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_axis, y_axis)
        .map_err(drawing_error)?;

    chart
        .configure_mesh()
        .x_desc(FLOW_LABEL)
        .y_desc(PRESSURE_LABEL)
        .x_labels(x_labels)
        .y_labels(y_labels)
        .x_label_formatter(&|x| format_value(*x))
        .y_label_formatter(&|y| format_value(*y))
        .bold_line_style(BLACK.mix(0.6))
        .light_line_style(BLACK.mix(0.08))
        .draw()
        .map_err(drawing_error)?;

    draw_curve(&mut chart, &analysis.primary, PRIMARY_COLOR)?;
    if !analysis.secondary.is_empty() {
        draw_curve(&mut chart, &analysis.secondary, SECONDARY_COLOR)?;
    }

    let label_style = label_style();
    chart
        .draw_series(analysis.annotations.iter().map(|annotation| {
            let point = annotation.point;
            let text = if annotation.label.is_empty() {
                point.to_string()
            } else {
                let label = match order {
                    LabelOrder::Logical => Cow::Borrowed(annotation.label.as_str()),
                    LabelOrder::Visual => visual_order(&annotation.label),
                };
                format!("{} {}", label, point)
            };
            EmptyElement::at((point.flow, point.pressure))
                + TriangleMarker::new((0, 0), 6, ANNOTATION_COLOR.filled())
                + Text::new(text, (10, 0), label_style.clone())
        }))
        .map_err(drawing_error)?;

    Ok(())
}

/// A line through the curve's points, with a marker and a `(flow, pressure)`
/// label on every point except the origin.
fn draw_curve<DB: DrawingBackend>(
    chart: &mut SupplyChart<'_, DB>,
    curve: &Curve,
    color: RGBColor,
) -> Result<()> {
    let coords: Vec<(f64, f64)> = curve
        .points()
        .iter()
        .map(|p| (p.flow, p.pressure))
        .collect();
    chart
        .draw_series(LineSeries::new(coords, color.stroke_width(2)))
        .map_err(drawing_error)?;

    let label_style = label_style();
    chart
        .draw_series(curve.points().iter().map(|p| {
            let text = if p.is_origin() {
                String::new()
            } else {
                p.to_string()
            };
            EmptyElement::at((p.flow, p.pressure))
                + Circle::new((0, 0), 4, color.filled())
                + Text::new(text, (8, 0), label_style.clone())
        }))
        .map_err(drawing_error)?;
    Ok(())
}

fn label_style() -> TextStyle<'static> {
    TextStyle::from(("sans-serif", 14).into_font()).pos(Pos::new(HPos::Left, VPos::Center))
}
