//! Per-host favicon resolution behind `GET /api/favicon`.

use super::fetcher::{Fetcher, Overflow};
use super::metadata::extract_metadata;
use super::target::{default_favicon, parse_site_root};
use super::types::FaviconLookup;
use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::Config;
use crate::error::PreviewError;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

#[derive(Debug)]
pub struct FaviconService {
    fetcher: Fetcher,
    cache: TtlCache<FaviconLookup>,
    page_timeout: Duration,
    max_html_bytes: usize,
    ttl: Duration,
}

impl FaviconService {
    pub fn new(config: &Config, fetcher: Fetcher) -> Self {
        Self::with_clock(config, fetcher, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &Config, fetcher: Fetcher, clock: Arc<dyn Clock>) -> Self {
        Self {
            fetcher,
            cache: TtlCache::with_clock(config.favicon.cache_max_entries, clock),
            page_timeout: config.preview.page_timeout(),
            max_html_bytes: config.preview.max_html_bytes,
            ttl: config.favicon.cache_ttl(),
        }
    }

    /// Resolves the best icon for `domain` (a bare host or any URL on the site).
    /// Only an unparseable `domain` is an error; an unreachable site still gets
    /// `/favicon.ico`.
    pub async fn lookup(&self, domain: &str) -> Result<FaviconLookup, PreviewError> {
        let root = parse_site_root(domain)?;
        let key = root.origin().ascii_serialization();

        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(origin = %key, "favicon cache hit");
            return Ok(hit);
        }

        let favicon = self.resolve(&root).await;
        let lookup = FaviconLookup {
            domain: root.host_str().unwrap_or_default().to_string(),
            favicon: favicon.map(String::from),
        };
        self.cache.insert(key, lookup.clone(), self.ttl);
        Ok(lookup)
    }

    async fn resolve(&self, root: &Url) -> Option<Url> {
        match self
            .fetcher
            .fetch_body(
                root,
                self.page_timeout,
                None,
                self.max_html_bytes,
                Overflow::Truncate,
            )
            .await
        {
            Ok(page) => {
                let html = String::from_utf8_lossy(&page.body);
                extract_metadata(&html, &page.final_url)
                    .favicon
                    .or_else(|| default_favicon(&page.final_url))
            }
            Err(e) => {
                tracing::warn!(url = %root, error = %e, "favicon page fetch failed, using /favicon.ico");
                default_favicon(root)
            }
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
