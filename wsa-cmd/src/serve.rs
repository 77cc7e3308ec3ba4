use log::info;
use std::{net::IpAddr, path::PathBuf};
use wsa_chart::{ChartFormat, ChartLayout};
use wsa_server::ServerConfig;

/// Start the chart service with the given listen address and layout.
pub async fn run_serve(
    host: IpAddr,
    port: u16,
    artifact_dir: PathBuf,
    layout: ChartLayout,
    format: ChartFormat,
) -> anyhow::Result<()> {
    let config = ServerConfig {
        host,
        port,
        artifact_dir,
        layout,
        format,
    };
    info!(
        "Flow ticks every {} gpm (minor {})",
        config.layout.flow_major, config.layout.flow_minor
    );
    wsa_server::serve(config).await
}
