//! Server configuration from command-line flags and environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::catalog::DEFAULT_FILE_PREFIX;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, about = "In-memory car catalog HTTP service")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "CATALOG_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
    /// Port to listen on
    #[arg(long, short, env = "PORT", default_value_t = 3000)]
    pub port: u16,
    /// Directory holding the per-brand JSON files
    #[arg(long, env = "CATALOG_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,
    /// File-name prefix of brand files; `CarToyota.json` is brand `toyota`
    #[arg(long, env = "CATALOG_FILE_PREFIX", default_value = DEFAULT_FILE_PREFIX)]
    pub file_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            data_dir: PathBuf::from("."),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
