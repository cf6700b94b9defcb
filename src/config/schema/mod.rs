mod core;
mod gateway;
mod preview;

pub use core::Config;
pub use gateway::GatewayConfig;
pub use preview::{FaviconConfig, PreviewConfig};
