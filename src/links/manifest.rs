//! Web app manifest colors.

use super::fetcher::{Fetcher, Overflow};
use crate::color::score::best_declared_color;
use crate::color::{Rgb, parse_color};
use crate::config::PreviewConfig;
use crate::error::ExtractError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use url::Url;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The few manifest members we read. A member of the wrong JSON type is
/// treated as absent instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebManifest {
    #[serde(default, deserialize_with = "lenient_string")]
    pub theme_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub background_color: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}

impl WebManifest {
    pub fn parse(bytes: &[u8]) -> Result<Self, ExtractError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        // A derived struct would also accept a JSON array positionally.
        let value: serde_json::Value = serde_json::from_slice(bytes)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("manifest is not a JSON object").into());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// `theme_color` and `background_color`, scored like `<meta name="theme-color">`.
    pub fn best_color(&self) -> Option<Rgb> {
        best_declared_color(
            [&self.theme_color, &self.background_color]
                .into_iter()
                .flatten()
                .filter_map(|value| parse_color(value)),
        )
    }
}

pub async fn fetch_manifest_color(
    fetcher: &Fetcher,
    manifest_url: &Url,
    page_url: &Url,
    config: &PreviewConfig,
) -> Result<Option<Rgb>, ExtractError> {
    let fetched = fetcher
        .fetch_body(
            manifest_url,
            config.page_timeout(),
            Some(page_url),
            config.max_html_bytes,
            Overflow::Reject,
        )
        .await?;
    Ok(WebManifest::parse(&fetched.body)?.best_color())
}
