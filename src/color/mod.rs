pub mod model;
pub mod palette;
pub mod raster;
pub mod score;
pub mod svg;

pub use model::{Hsl, Rgb, contrast_ratio, normalize_color, parse_color};
pub use palette::{AccentPalette, FALLBACK_ACCENT, create_palette};

/// Decodes an image body (raster or SVG) and returns its representative color.
pub fn extract_color_from_bytes(
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<Option<Rgb>, crate::error::ExtractError> {
    if svg::looks_like_svg(content_type, bytes) {
        svg::extract_from_bytes(bytes)
    } else {
        raster::extract_from_bytes(bytes)
    }
}
