use crate::error::PreviewError;
use url::Url;

/// Parses the `url` query parameter. Only absolute `http`/`https` URLs are
/// accepted; the canonical serialization doubles as the cache key.
pub fn parse_target_url(raw: &str) -> Result<Url, PreviewError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PreviewError::InvalidUrl("empty url".into()));
    }
    let url = Url::parse(trimmed).map_err(|e| PreviewError::InvalidUrl(format!("{trimmed}: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        scheme => Err(PreviewError::InvalidUrl(format!(
            "unsupported scheme {scheme:?} in {trimmed}"
        ))),
    }
}

/// Accepts either a bare host (`example.com`) or a full URL and returns the
/// site root to look favicons up on.
pub fn parse_site_root(raw: &str) -> Result<Url, PreviewError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}/")
    };
    let mut url = parse_target_url(&candidate)?;
    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// `{origin}/favicon.ico`, the location browsers probe when a page declares no icon.
pub fn default_favicon(page: &Url) -> Option<Url> {
    page.join("/favicon.ico").ok()
}

/// Resolves an attribute value (`href`, `content`) against the page URL.
/// Anything that does not resolve to `http`/`https` is dropped.
pub fn resolve_http_url(base: &Url, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let url = base.join(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}
