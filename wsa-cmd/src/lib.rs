//! Command implementations for the WSA CLI.
//!
//! Provides subcommands to run the chart service, compute the Q20/Q0
//! reference points, and render a chart straight to a file.

use clap::Subcommand;
use std::{net::IpAddr, path::PathBuf};
use wsa_chart::{ChartFormat, ChartLayout};
use wsa_curve::Point;

pub mod calc;
pub mod points;
pub mod render;
pub mod serve;

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP chart service
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short = 'p', long, default_value_t = wsa_server::config::DEFAULT_PORT)]
        port: u16,

        /// Directory rendered charts are written to and served from
        #[arg(short = 'd', long, default_value = wsa_server::config::DEFAULT_ARTIFACT_DIR)]
        artifact_dir: PathBuf,

        /// Spacing of major flow ticks (gpm)
        #[arg(long, default_value_t = 200.0)]
        flow_major: f64,

        /// Spacing of minor flow ticks (gpm)
        #[arg(long, default_value_t = 10.0)]
        flow_minor: f64,

        /// Image format of stored charts (png or svg)
        #[arg(long, default_value_t = ChartFormat::Png)]
        format: ChartFormat,
    },

    /// Print Q20 and Q0 for a supply curve as JSON
    Calc {
        /// Curve reading as FLOW,PRESSURE (repeat; the first is the static reading)
        #[arg(short = 'p', long = "point", value_parser = points::parse_point_arg)]
        points: Vec<Point>,

        /// Headerless flow,pressure CSV to read the curve from instead
        #[arg(long, conflicts_with = "points")]
        points_csv: Option<PathBuf>,
    },

    /// Render a supply chart to a PNG or SVG file
    Render {
        /// Curve reading as FLOW,PRESSURE (repeat; the first is the static reading)
        #[arg(short = 'p', long = "point", value_parser = points::parse_point_arg)]
        points: Vec<Point>,

        /// Headerless flow,pressure CSV to read the curve from instead
        #[arg(long, conflicts_with = "points")]
        points_csv: Option<PathBuf>,

        /// Reading on the comparison line as FLOW,PRESSURE (repeat)
        #[arg(short = 's', long = "second-point", value_parser = points::parse_point_arg)]
        second_points: Vec<Point>,

        /// Output path for the chart
        #[arg(short = 'o', long)]
        output: PathBuf,

        /// Image format (png or svg); taken from the output extension if omitted
        #[arg(long)]
        format: Option<ChartFormat>,

        /// Spacing of major flow ticks (gpm)
        #[arg(long, default_value_t = 200.0)]
        flow_major: f64,

        /// Spacing of minor flow ticks (gpm)
        #[arg(long, default_value_t = 10.0)]
        flow_minor: f64,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            host,
            port,
            artifact_dir,
            flow_major,
            flow_minor,
            format,
        } => {
            let layout = flow_layout(flow_major, flow_minor)?;
            serve::run_serve(host, port, artifact_dir, layout, format).await
        }
        Command::Calc { points, points_csv } => {
            let curve = points::load_curve(points, points_csv.as_deref())?;
            calc::run_calc(curve)
        }
        Command::Render {
            points,
            points_csv,
            second_points,
            output,
            format,
            flow_major,
            flow_minor,
        } => {
            let layout = flow_layout(flow_major, flow_minor)?;
            let format = format.unwrap_or_else(|| render::format_for(&output));
            let curve = points::load_curve(points, points_csv.as_deref())?;
            render::run_render(curve, second_points, &output, &layout, format)
        }
    }
}

/// Default chart layout with the given flow tick spacing.
pub fn flow_layout(flow_major: f64, flow_minor: f64) -> anyhow::Result<ChartLayout> {
    if !(flow_major > 0.0 && flow_minor > 0.0) {
        anyhow::bail!(
            "tick spacing must be positive (got {} / {})",
            flow_major,
            flow_minor
        );
    }
    Ok(ChartLayout::default().with_flow_ticks(flow_major, flow_minor))
}
