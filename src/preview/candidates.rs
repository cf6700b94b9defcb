//! Color candidates from the four sources and the scoring that picks one.

use crate::color::score::candidate_score;
use crate::color::{FALLBACK_ACCENT, Rgb, extract_color_from_bytes};
use crate::config::PreviewConfig;
use crate::error::ExtractError;
use crate::links::manifest::fetch_manifest_color;
use crate::links::{ColorCandidate, ColorSource, Fetcher, Overflow, PageMetadata};
use std::future::Future;
use url::Url;

/// Awaits one source and turns its outcome into an optional candidate.
/// Failures are logged and count as "no color from this source".
pub async fn settle<F>(source: ColorSource, attempt: F) -> Option<ColorCandidate>
where
    F: Future<Output = Result<Option<Rgb>, ExtractError>>,
{
    match attempt.await {
        Ok(Some(color)) => {
            tracing::debug!(%source, color = %color, "color candidate");
            Some(ColorCandidate { color, source })
        }
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(%source, error = %e, "color source failed");
            None
        }
    }
}

/// Downloads an image (raster or SVG) and extracts its representative color
/// off the async runtime.
pub async fn fetch_image_color(
    fetcher: &Fetcher,
    image_url: &Url,
    page_url: &Url,
    config: &PreviewConfig,
) -> Result<Option<Rgb>, ExtractError> {
    let fetched = fetcher
        .fetch_body(
            image_url,
            config.page_timeout(),
            Some(page_url),
            config.max_image_bytes,
            Overflow::Reject,
        )
        .await?;

    tokio::task::spawn_blocking(move || {
        extract_color_from_bytes(fetched.content_type.as_deref(), &fetched.body)
    })
    .await?
}

/// Gathers every source concurrently and waits for all of them.
/// The result is in source priority order: image, favicon, theme, manifest.
pub async fn gather_candidates(
    fetcher: &Fetcher,
    config: &PreviewConfig,
    page_url: &Url,
    metadata: &PageMetadata,
    favicon: Option<&Url>,
) -> Vec<ColorCandidate> {
    let image = async {
        match &metadata.image {
            Some(url) => fetch_image_color(fetcher, url, page_url, config).await,
            None => Ok(None),
        }
    };
    let icon = async {
        match favicon {
            Some(url) => fetch_image_color(fetcher, url, page_url, config).await,
            None => Ok(None),
        }
    };
    let manifest = async {
        match &metadata.manifest {
            Some(url) => fetch_manifest_color(fetcher, url, page_url, config).await,
            None => Ok(None),
        }
    };

    let (image, icon, manifest) = tokio::join!(
        settle(ColorSource::Image, image),
        settle(ColorSource::Favicon, icon),
        settle(ColorSource::Manifest, manifest),
    );
    let theme = metadata.theme_color.map(|color| ColorCandidate {
        color,
        source: ColorSource::Theme,
    });

    [image, icon, theme, manifest].into_iter().flatten().collect()
}

/// Highest [`candidate_score`] wins; on a tie the earlier candidate is kept.
pub fn pick_winner(candidates: impl IntoIterator<Item = ColorCandidate>) -> Option<ColorCandidate> {
    candidates
        .into_iter()
        .fold(None, |best: Option<(ColorCandidate, f64)>, candidate| {
            let score = candidate_score(candidate.color);
            match best {
                Some((_, best_score)) if score <= best_score => best,
                _ => Some((candidate, score)),
            }
        })
        .map(|(candidate, _)| candidate)
}

/// The winning candidate, or the neutral fallback when no source produced a color.
pub fn choose_base(candidates: impl IntoIterator<Item = ColorCandidate>) -> ColorCandidate {
    pick_winner(candidates).unwrap_or(ColorCandidate {
        color: FALLBACK_ACCENT,
        source: ColorSource::Fallback,
    })
}
