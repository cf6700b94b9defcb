//! Title, description, image, icon and color hints scraped from a page's `<head>`.

use super::target::resolve_http_url;
use crate::color::score::best_declared_color;
use crate::color::{Rgb, parse_color};
use crate::utils::text::clean_text;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;
use url::Url;

const TITLE_KEYS: &[&str] = &["og:title", "twitter:title", "title"];
const DESCRIPTION_KEYS: &[&str] = &["og:description", "twitter:description", "description"];
const IMAGE_KEYS: &[&str] = &[
    "og:image",
    "og:image:url",
    "twitter:image",
    "twitter:image:src",
    "image",
];
const TILE_COLOR_KEYS: &[&str] = &["msapplication-tilecolor", "msapplication-navbutton-color"];

static META: LazyLock<Selector> = LazyLock::new(|| selector("meta"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("link[rel][href]"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub image: Option<Url>,
    /// Best declared icon. `None` means the page declares none.
    pub favicon: Option<Url>,
    pub theme_color: Option<Rgb>,
    pub manifest: Option<Url>,
}

/// A declared `<link rel=...icon>`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IconLink {
    href: Url,
    mask: bool,
    area: u64,
}

pub fn extract_metadata(html: &str, base: &Url) -> PageMetadata {
    let document = Html::parse_document(html);
    let meta = MetaIndex::build(&document);

    let title = meta
        .first_of(TITLE_KEYS)
        .map(clean_text)
        .filter(|t| !t.is_empty())
        .or_else(|| document_title(&document))
        .unwrap_or_else(|| base.host_str().unwrap_or_default().to_string());

    let description = meta
        .first_of(DESCRIPTION_KEYS)
        .map(clean_text)
        .unwrap_or_default();

    let image = meta
        .first_of(IMAGE_KEYS)
        .and_then(|raw| resolve_http_url(base, raw));

    let theme_color = best_declared_color(
        meta.all("theme-color")
            .iter()
            .filter_map(|value| parse_color(value)),
    )
    .or_else(|| {
        TILE_COLOR_KEYS
            .iter()
            .flat_map(|key| meta.all(key))
            .find_map(|value| parse_color(value))
    });

    let links = link_elements(&document);
    let favicon = select_favicon(&links, base);
    let manifest = links
        .iter()
        .find(|(rel, _)| rel.iter().any(|token| token == "manifest"))
        .and_then(|(_, el)| el.value().attr("href"))
        .and_then(|href| resolve_http_url(base, href));

    PageMetadata {
        title,
        description,
        image,
        favicon,
        theme_color,
        manifest,
    }
}

/// `<meta>` content grouped by lowercased `property`/`name`, in document order.
struct MetaIndex<'a> {
    values: HashMap<String, Vec<&'a str>>,
}

impl<'a> MetaIndex<'a> {
    fn build(document: &'a Html) -> Self {
        let mut values: HashMap<String, Vec<&'a str>> = HashMap::new();
        for el in document.select(&META) {
            let attrs = el.value();
            let Some(content) = attrs.attr("content") else {
                continue;
            };
            for key in [attrs.attr("property"), attrs.attr("name")]
                .into_iter()
                .flatten()
            {
                values
                    .entry(key.trim().to_ascii_lowercase())
                    .or_default()
                    .push(content);
            }
        }
        Self { values }
    }

    fn all(&self, key: &str) -> &[&'a str] {
        self.values.get(key).map_or(&[], Vec::as_slice)
    }

    /// First non-blank value of the highest-priority key present.
    fn first_of(&self, keys: &[&str]) -> Option<&'a str> {
        keys.iter()
            .find_map(|key| {
                self.all(key)
                    .iter()
                    .copied()
                    .find(|value| !value.trim().is_empty())
            })
    }
}

fn document_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn link_elements(document: &Html) -> Vec<(Vec<String>, ElementRef<'_>)> {
    document
        .select(&LINK)
        .filter_map(|el| {
            let rel = el.value().attr("rel")?;
            let tokens = rel
                .split_ascii_whitespace()
                .map(str::to_ascii_lowercase)
                .collect();
            Some((tokens, el))
        })
        .collect()
}

/// Non-mask icons beat mask icons, then larger declared area wins.
/// Equal candidates keep document order.
fn select_favicon(links: &[(Vec<String>, ElementRef<'_>)], base: &Url) -> Option<Url> {
    let mut icons: Vec<IconLink> = links
        .iter()
        .filter_map(|(rel, el)| {
            let mask = rel.iter().any(|t| t == "mask-icon");
            let icon = mask || rel.iter().any(|t| t.contains("icon"));
            if !icon {
                return None;
            }
            let href = resolve_http_url(base, el.value().attr("href")?)?;
            let area = el.value().attr("sizes").map_or(0, parse_sizes_area);
            Some(IconLink { href, mask, area })
        })
        .collect();

    icons.sort_by(|a, b| a.mask.cmp(&b.mask).then(b.area.cmp(&a.area)));
    icons.into_iter().next().map(|icon| icon.href)
}

/// Largest `WxH` area in a `sizes` attribute. `any` and junk count as zero.
fn parse_sizes_area(sizes: &str) -> u64 {
    sizes
        .split_ascii_whitespace()
        .filter_map(|token| {
            let (w, h) = token.to_ascii_lowercase().split_once('x').map(|(w, h)| {
                (w.parse::<u64>().ok(), h.parse::<u64>().ok())
            })?;
            Some(w?.saturating_mul(h?))
        })
        .max()
        .unwrap_or(0)
}
