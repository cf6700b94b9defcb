use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Chrome on macOS. Several CDNs serve a stripped page (or a 403) to anything
/// that does not look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Budget for each upstream fetch: page, image, favicon and manifest (default: 8000)
    #[serde(default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,
    /// HTML beyond this many bytes is discarded before parsing (default: 2 MiB)
    #[serde(default = "default_max_html_bytes")]
    pub max_html_bytes: usize,
    /// Images larger than this are rejected (default: 4 MiB)
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
    /// How long a generated preview is served from cache (default: 30 min)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_page_timeout_ms() -> u64 {
    8_000
}

fn default_max_html_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_max_image_bytes() -> usize {
    4 * 1024 * 1024
}

fn default_cache_ttl_secs() -> u64 {
    30 * 60
}

fn default_cache_max_entries() -> usize {
    10_000
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.into()
}

impl PreviewConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            page_timeout_ms: default_page_timeout_ms(),
            max_html_bytes: default_max_html_bytes(),
            max_image_bytes: default_max_image_bytes(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaviconConfig {
    /// How long a resolved favicon URL is remembered per host (default: 24 h)
    #[serde(default = "default_favicon_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
}

fn default_favicon_cache_ttl_secs() -> u64 {
    24 * 60 * 60
}

impl FaviconConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for FaviconConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_favicon_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
        }
    }
}
