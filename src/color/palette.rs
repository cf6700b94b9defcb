use super::model::{Hsl, Rgb, blend, contrast_ratio};

/// Near-black text tone.
pub const DARK_FOREGROUND: Rgb = Rgb::new(0x0F, 0x17, 0x2A);
/// Near-white text tone.
pub const LIGHT_FOREGROUND: Rgb = Rgb::new(0xF8, 0xFA, 0xFC);
/// Base used when no source produced a color. Sits inside the clamp window,
/// so the derived primary equals it exactly.
pub const FALLBACK_ACCENT: Rgb = Rgb::new(0x4C, 0x5F, 0x8A);

pub const MIN_FOREGROUND_CONTRAST: f64 = 4.0;
const MUTED_FOREGROUND_ALPHA: f64 = 0.45;

const SECONDARY_HUE_SHIFT: f64 = 12.0;
const HIGHLIGHT_HUE_SHIFT: f64 = -20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentPalette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub highlight: Rgb,
    pub foreground: Rgb,
    pub muted: Rgb,
}

/// Derives the accent triad and a readable text pair from a single base color.
pub fn create_palette(base: Rgb) -> AccentPalette {
    let hsl = base.to_hsl();
    let s = hsl.s.clamp(0.25, 0.80);
    let l = hsl.l.clamp(0.32, 0.68);
    let s_pts = s * 100.0;
    let l_pts = l * 100.0;

    let primary = Hsl::new(hsl.h, s, l).to_rgb();
    let secondary = Hsl::new(
        hsl.h + SECONDARY_HUE_SHIFT,
        (s_pts - 8.0).clamp(18.0, 78.0) / 100.0,
        (l_pts - 10.0).clamp(22.0, 62.0) / 100.0,
    )
    .to_rgb();
    let highlight = Hsl::new(
        hsl.h + HIGHLIGHT_HUE_SHIFT,
        (s_pts + 10.0).clamp(28.0, 88.0) / 100.0,
        (l_pts + 14.0).clamp(40.0, 86.0) / 100.0,
    )
    .to_rgb();

    let foreground = pick_foreground(primary);
    let muted = blend(foreground, primary, MUTED_FOREGROUND_ALPHA);

    AccentPalette {
        primary,
        secondary,
        highlight,
        foreground,
        muted,
    }
}

fn pick_foreground(background: Rgb) -> Rgb {
    let dark = contrast_ratio(DARK_FOREGROUND, background);
    let light = contrast_ratio(LIGHT_FOREGROUND, background);
    let (chosen, ratio, alternate) = if dark >= light {
        (DARK_FOREGROUND, dark, LIGHT_FOREGROUND)
    } else {
        (LIGHT_FOREGROUND, light, DARK_FOREGROUND)
    };

    if ratio < MIN_FOREGROUND_CONTRAST {
        alternate
    } else {
        chosen
    }
}
