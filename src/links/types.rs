use crate::color::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the winning accent color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSource {
    Image,
    Favicon,
    Theme,
    Manifest,
    Fallback,
}

impl ColorSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Favicon => "favicon",
            Self::Theme => "theme",
            Self::Manifest => "manifest",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ColorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A color hypothesis from one source, before scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCandidate {
    pub color: Rgb,
    pub source: ColorSource,
}

/// JSON body of `GET /api/link-preview`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkPreviewPayload {
    pub url: String,
    pub final_url: String,
    pub domain: String,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub favicon: Option<String>,
    pub accent: String,
    pub accent_secondary: String,
    pub accent_highlight: String,
    pub foreground: String,
    pub muted_foreground: String,
    pub color_source: ColorSource,
}

/// JSON body of `GET /api/favicon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaviconLookup {
    pub domain: String,
    pub favicon: Option<String>,
}
