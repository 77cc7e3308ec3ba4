use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};
use wsa_chart::{ChartFormat, ChartLayout};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ARTIFACT_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Where rendered charts are written and served from.
    pub artifact_dir: PathBuf,
    pub layout: ChartLayout,
    /// Image format of stored charts; PNG unless configured otherwise.
    pub format: ChartFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            layout: ChartLayout::default(),
            format: ChartFormat::default(),
        }
    }
}
