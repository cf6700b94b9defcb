use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `linkaccent`.
///
/// Only [`PreviewError::InvalidUrl`] and [`PreviewError::Fetch`] ever reach an
/// HTTP caller. Sub-resource failures ([`ExtractError`] and fetch errors on
/// images, favicons or manifests) are logged and turned into a missing color
/// candidate. Startup code uses `anyhow::Result` for ad-hoc context chains,
/// with [`ConfigError`] at the bottom of the chain for rejected settings.
#[derive(Debug, Error)]
pub enum PreviewError {
    // ── Input ───────────────────────────────────────────────────────────
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    // ── Upstream page ───────────────────────────────────────────────────
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),
}

impl PreviewError {
    /// True when the caller supplied a bad request rather than the upstream failing.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidUrl(_))
    }
}

// ─── Fetch errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} exceeds the {limit} byte limit")]
    TooLarge { url: String, limit: usize },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),
}

// ─── Color extraction errors ─────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("fetch: {0}")]
    Fetch(#[from] FetchError),

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("svg render failed: {0}")]
    Svg(String),

    #[error("manifest parse failed: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("extraction task aborted: {0}")]
    Join(#[from] tokio::task::JoinError),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}
