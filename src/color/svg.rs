//! Color of an SVG icon: declared paint first, rendered pixels second.

use super::model::{Rgb, parse_color};
use super::raster::dominant_color;
use crate::error::ExtractError;
use regex::Regex;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use std::sync::LazyLock;

/// Longest side, in pixels, of the fallback rasterization.
const RASTER_SIZE: f32 = 64.0;

static PAINT_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s(?:fill|stroke|stop-color)\s*=\s*["']([^"']*)["']"#)
        .expect("paint attribute pattern is valid")
});

pub fn looks_like_svg(content_type: Option<&str>, bytes: &[u8]) -> bool {
    if content_type.is_some_and(|ct| ct.contains("image/svg")) {
        return true;
    }
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
    let head = head.trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

/// First `fill`, `stroke` or `stop-color` value, in document order, that is a real color.
pub fn first_paint_color(svg: &str) -> Option<Rgb> {
    PAINT_ATTRIBUTE
        .captures_iter(svg)
        .filter_map(|caps| caps.get(1))
        .find_map(|value| parse_color(value.as_str()))
}

pub fn extract_from_bytes(bytes: &[u8]) -> Result<Option<Rgb>, ExtractError> {
    let text = String::from_utf8_lossy(bytes);
    if let Some(color) = first_paint_color(&text) {
        return Ok(Some(color));
    }

    let pixels = rasterize(bytes)?;
    Ok(dominant_color(&pixels))
}

/// Renders the document small and returns its visible pixels, un-premultiplied.
fn rasterize(bytes: &[u8]) -> Result<Vec<Rgb>, ExtractError> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| ExtractError::Svg(e.to_string()))?;

    let size = tree.size();
    let scale = RASTER_SIZE / size.width().max(size.height());
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (width, height) = (
        ((size.width() * scale).ceil() as u32).max(1),
        ((size.height() * scale).ceil() as u32).max(1),
    );

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| ExtractError::Svg(format!("cannot allocate {width}x{height} pixmap")))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap
        .pixels()
        .iter()
        .filter(|p| p.alpha() > 0)
        .map(|p| {
            let c = p.demultiply();
            Rgb::new(c.red(), c.green(), c.blue())
        })
        .collect())
}
