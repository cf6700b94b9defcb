use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::gateway::run_gateway;
use crate::preview::PreviewService;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// `--config FILE` when given, otherwise `~/.linkaccent/config.toml` (created on first run).
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load_or_init(),
    }
}

pub async fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    match cli.command {
        Commands::Serve { host, port, .. } => {
            if let Some(host) = host {
                config.gateway.host = host;
            }
            if let Some(port) = port {
                config.gateway.port = port;
            }
            run_gateway(Arc::new(config)).await
        }
        Commands::Preview { url, .. } => {
            let service = PreviewService::new(&config.preview)?;
            let payload = service
                .preview(&url)
                .await
                .with_context(|| format!("preview {url}"))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("serialize preview")?
            );
            Ok(())
        }
    }
}
