//! HTTP service for water supply analysis charts.
//!
//! Routes:
//! - `GET /` serves the input form
//! - `POST /generate_plot` takes the measured points as JSON, derives Q20/Q0,
//!   renders the chart, and answers with the image path and the points
//! - `GET /static/<file>` serves rendered charts
//!
//! # Example
//! ```no_run
//! use wsa_server::{serve, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     serve(ServerConfig::default()).await
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod routes;

pub use config::ServerConfig;

use log::info;
use std::{net::SocketAddr, sync::Arc};
use wsa_chart::{ArtifactStore, ChartFormat, ChartLayout, ChartRenderer};

/// Shared, read-only state handed to every request.
pub struct AppContext {
    pub store: ArtifactStore,
    pub layout: ChartLayout,
    pub renderer: Box<dyn ChartRenderer + Send + Sync>,
}

impl AppContext {
    pub fn new(store: ArtifactStore, layout: ChartLayout, format: ChartFormat) -> Self {
        AppContext {
            store,
            layout,
            renderer: format.renderer(),
        }
    }
}

/// Run the service until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let store = ArtifactStore::new(config.artifact_dir.clone(), routes::STATIC_PREFIX);
    store.ensure_dir()?;
    let context = Arc::new(AppContext::new(store, config.layout.clone(), config.format));

    let addr = SocketAddr::new(config.host, config.port);
    info!(
        "Server running on http://{} ({} charts in {})",
        addr,
        config.format,
        config.artifact_dir.display()
    );
    warp::serve(routes::routes(context)).run(addr).await;
    Ok(())
}
