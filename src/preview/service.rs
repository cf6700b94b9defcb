use super::candidates::{choose_base, gather_candidates};
use crate::cache::{Clock, SystemClock, TtlCache};
use crate::color::create_palette;
use crate::config::PreviewConfig;
use crate::error::PreviewError;
use crate::links::target::default_favicon;
use crate::links::{
    Fetcher, LinkPreviewPayload, Overflow, PageMetadata, extract_metadata, parse_target_url,
};
use std::sync::Arc;

/// Builds link previews and remembers them for `cache_ttl_secs`.
#[derive(Debug)]
pub struct PreviewService {
    fetcher: Fetcher,
    cache: TtlCache<LinkPreviewPayload>,
    config: PreviewConfig,
}

impl PreviewService {
    pub fn new(config: &PreviewConfig) -> Result<Self, PreviewError> {
        let fetcher = Fetcher::new(config)?;
        Ok(Self::with_fetcher(config, fetcher, Arc::new(SystemClock)))
    }

    pub fn with_fetcher(config: &PreviewConfig, fetcher: Fetcher, clock: Arc<dyn Clock>) -> Self {
        Self {
            fetcher,
            cache: TtlCache::with_clock(config.cache_max_entries, clock),
            config: config.clone(),
        }
    }

    /// The HTTP client, for services that should share its connection pool.
    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Produces the preview for `raw_url`.
    ///
    /// Errors only for an invalid URL or when the page itself cannot be
    /// fetched. Image, favicon and manifest failures degrade to fewer color
    /// candidates, down to the fallback accent.
    pub async fn preview(&self, raw_url: &str) -> Result<LinkPreviewPayload, PreviewError> {
        let url = parse_target_url(raw_url)?;
        let key = url.as_str();

        if let Some(hit) = self.cache.get(key) {
            tracing::debug!(url = %key, "preview cache hit");
            return Ok(hit);
        }

        let page = self
            .fetcher
            .fetch_body(
                &url,
                self.config.page_timeout(),
                None,
                self.config.max_html_bytes,
                Overflow::Truncate,
            )
            .await?;
        let final_url = page.final_url;

        let metadata: PageMetadata = {
            let html = String::from_utf8_lossy(&page.body);
            extract_metadata(&html, &final_url)
        };
        let favicon = metadata
            .favicon
            .clone()
            .or_else(|| default_favicon(&final_url));

        let candidates = gather_candidates(
            &self.fetcher,
            &self.config,
            &final_url,
            &metadata,
            favicon.as_ref(),
        )
        .await;
        let base = choose_base(candidates);
        let palette = create_palette(base.color);

        tracing::info!(
            url = %key,
            final_url = %final_url,
            source = %base.source,
            accent = %palette.primary,
            "link preview generated"
        );

        let payload = LinkPreviewPayload {
            url: url.to_string(),
            domain: final_url.host_str().unwrap_or_default().to_string(),
            final_url: final_url.to_string(),
            title: metadata.title,
            description: metadata.description,
            image: metadata.image.map(String::from),
            favicon: favicon.map(String::from),
            accent: palette.primary.to_hex(),
            accent_secondary: palette.secondary.to_hex(),
            accent_highlight: palette.highlight.to_hex(),
            foreground: palette.foreground.to_hex(),
            muted_foreground: palette.muted.to_hex(),
            color_source: base.source,
        };

        self.cache
            .insert(key, payload.clone(), self.config.cache_ttl());
        Ok(payload)
    }
}
