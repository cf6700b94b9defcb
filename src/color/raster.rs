//! Representative color of a raster image via a weighted hue histogram.

use super::model::Rgb;
use crate::error::ExtractError;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageReader, Limits};
use std::io::Cursor;

/// Images are sampled at no more than this many pixels per side.
pub const MAX_SAMPLE_DIMENSION: u32 = 96;

/// Larger images are refused before any pixel buffer is allocated.
pub const MAX_DECODE_DIMENSION: u32 = 4096;

const HUE_BUCKETS: usize = 36;
const HUE_BUCKET_DEGREES: f64 = 360.0 / HUE_BUCKETS as f64;

const MIN_SATURATION: f64 = 0.12;
const MIN_LIGHTNESS: f64 = 0.07;
const MAX_LIGHTNESS: f64 = 0.93;

#[derive(Debug, Default, Clone, Copy)]
struct HueBucket {
    weight: f64,
    r: f64,
    g: f64,
    b: f64,
}

/// Decodes `bytes` and returns its representative color. CPU bound; callers on
/// the async runtime should run it via `spawn_blocking`.
pub fn extract_from_bytes(bytes: &[u8]) -> Result<Option<Rgb>, ExtractError> {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_DECODE_DIMENSION);
    limits.max_image_height = Some(MAX_DECODE_DIMENSION);

    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?;
    reader.limits(limits);
    let decoded = reader.decode()?;
    Ok(representative_color(&decoded))
}

pub fn representative_color(image: &DynamicImage) -> Option<Rgb> {
    let sampled = downscale(image);
    let rgb = sampled.to_rgb8();
    let pixels: Vec<Rgb> = rgb.pixels().map(|p| Rgb::new(p[0], p[1], p[2])).collect();

    hue_histogram_color(&pixels).or_else(|| dominant_color(&pixels))
}

fn downscale(image: &DynamicImage) -> DynamicImage {
    if image.width() > MAX_SAMPLE_DIMENSION || image.height() > MAX_SAMPLE_DIMENSION {
        image.resize(MAX_SAMPLE_DIMENSION, MAX_SAMPLE_DIMENSION, FilterType::Triangle)
    } else {
        image.clone()
    }
}

/// Vivid, mid-lightness pixels dominate; near-greys and near-black/white are ignored.
pub fn pixel_weight(pixel: Rgb) -> Option<(usize, f64)> {
    let hsl = pixel.to_hsl();
    if hsl.s < MIN_SATURATION || hsl.l < MIN_LIGHTNESS || hsl.l > MAX_LIGHTNESS {
        return None;
    }
    let weight = hsl.s.powf(1.5) * (1.0 - (hsl.l - 0.5).abs() * 1.4);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bucket = ((hsl.h / HUE_BUCKET_DEGREES) as usize) % HUE_BUCKETS;
    Some((bucket, weight))
}

/// Weighted-average color of the heaviest 10° hue bucket, or `None` when every
/// pixel was classified as background.
pub fn hue_histogram_color(pixels: &[Rgb]) -> Option<Rgb> {
    let mut buckets = [HueBucket::default(); HUE_BUCKETS];

    for &pixel in pixels {
        let Some((index, weight)) = pixel_weight(pixel) else {
            continue;
        };
        let bucket = &mut buckets[index];
        bucket.weight += weight;
        bucket.r += f64::from(pixel.r) * weight;
        bucket.g += f64::from(pixel.g) * weight;
        bucket.b += f64::from(pixel.b) * weight;
    }

    let winner = buckets
        .iter()
        .copied()
        .fold(None::<HueBucket>, |best, bucket| match best {
            Some(best) if best.weight >= bucket.weight => Some(best),
            _ if bucket.weight > 0.0 => Some(bucket),
            _ => best,
        })?;

    Some(Rgb::new(
        channel_mean(winner.r, winner.weight),
        channel_mean(winner.g, winner.weight),
        channel_mean(winner.b, winner.weight),
    ))
}

/// Mean color of the most populated cell of a 16×16×16 RGB grid.
pub fn dominant_color(pixels: &[Rgb]) -> Option<Rgb> {
    const LEVELS: usize = 16;
    let mut counts = vec![0_u32; LEVELS * LEVELS * LEVELS];
    let mut sums = vec![[0_u64; 3]; LEVELS * LEVELS * LEVELS];

    for pixel in pixels {
        let index = (usize::from(pixel.r >> 4) * LEVELS + usize::from(pixel.g >> 4)) * LEVELS
            + usize::from(pixel.b >> 4);
        counts[index] += 1;
        sums[index][0] += u64::from(pixel.r);
        sums[index][1] += u64::from(pixel.g);
        sums[index][2] += u64::from(pixel.b);
    }

    let (index, &count) = counts
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|(_, count)| **count)?;
    if count == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = |sum: u64| channel_mean(sum as f64, f64::from(count));
    Some(Rgb::new(
        mean(sums[index][0]),
        mean(sums[index][1]),
        mean(sums[index][2]),
    ))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_mean(sum: f64, weight: f64) -> u8 {
    (sum / weight).round().clamp(0.0, 255.0) as u8
}
