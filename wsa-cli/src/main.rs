//! WSA CLI - compute Q0/Q20 for a water supply curve and render its chart.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "wsa-cli",
    version,
    about = "Water supply analysis: Q0/Q20 extrapolation and N^1.85 charts"
)]
struct Cli {
    #[command(subcommand)]
    command: wsa_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    wsa_cmd::run(cli.command).await
}
