use super::super::{FaviconConfig, GatewayConfig, PreviewConfig};
use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub preview: PreviewConfig,

    #[serde(default)]
    pub favicon: FaviconConfig,
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    pub fn tracing_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.parse::<Level>().is_err() {
            return Err(ConfigError::Validation(format!(
                "log_level must be one of trace, debug, info, warn, error (got {:?})",
                self.log_level
            )));
        }
        if self.preview.page_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "preview.page_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.preview.max_image_bytes == 0 || self.preview.max_html_bytes == 0 {
            return Err(ConfigError::Validation(
                "preview byte limits must be greater than zero".into(),
            ));
        }
        if self.preview.cache_max_entries == 0 || self.favicon.cache_max_entries == 0 {
            return Err(ConfigError::Validation(
                "cache_max_entries must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());

        Self {
            config_path: home.join(".linkaccent").join("config.toml"),
            log_level: default_log_level(),
            gateway: GatewayConfig::default(),
            preview: PreviewConfig::default(),
            favicon: FaviconConfig::default(),
        }
    }
}
