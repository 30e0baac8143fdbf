//! Employee directory server entry point

use clap::Parser;
use directory::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Serve the employee directory over HTTP
#[derive(Debug, Parser)]
#[command(name = "employee-directory", version, about)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "DIRECTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Dataset file, overrides `data.path`
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Bind host, overrides `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides `server.port`
    #[arg(short, long)]
    port: Option<u16>,

    /// Static UI directory, overrides `static_dir`
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<DirectoryConfig> {
        let mut config = match &self.config {
            Some(path) => DirectoryConfig::from_yaml_file(&path.to_string_lossy())?,
            None => DirectoryConfig::default(),
        };

        if let Some(data) = self.data {
            config.data.path = data;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = Some(static_dir);
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config()?;
    tracing::info!(
        data = %config.data.path.display(),
        address = %config.server.address(),
        "Starting employee directory"
    );

    ServerBuilder::new()
        .with_config(config)
        .load_dataset()
        .await
        .serve()
        .await
}
