use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `linkaccent` - link previews with an accent palette taken from the page.
#[derive(Parser, Debug)]
#[command(name = "linkaccent")]
#[command(version = "0.1.0")]
#[command(about = "Link preview and accent color service.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to (overrides [gateway] host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, 0 for a random available port (overrides [gateway] port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Config file to use instead of ~/.linkaccent/config.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Build one preview and print it as JSON
    Preview {
        /// Absolute http(s) URL of the page
        url: String,

        /// Config file to use instead of ~/.linkaccent/config.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Commands {
    pub fn config_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Serve { config, .. } | Self::Preview { config, .. } => config.as_ref(),
        }
    }
}
