pub mod schema;

pub use schema::{Config, FaviconConfig, GatewayConfig, PreviewConfig};
