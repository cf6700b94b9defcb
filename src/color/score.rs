//! Vividness scores used to rank colors from different sources.

use super::model::Rgb;

/// Ranks candidates from different sources against each other.
pub fn candidate_score(color: Rgb) -> f64 {
    let hsl = color.to_hsl();
    hsl.s * (1.0 - (hsl.l - 0.5).abs())
}

/// Ranks several declared colors (theme-color metas, manifest fields) from the
/// same page. Punishes extreme lightness harder than [`candidate_score`].
pub fn declared_color_score(color: Rgb) -> f64 {
    let hsl = color.to_hsl();
    hsl.s * (1.0 - (hsl.l - 0.5).abs() * 1.2)
}

/// Highest scoring color; ties keep the earlier one.
pub fn best_declared_color(colors: impl IntoIterator<Item = Rgb>) -> Option<Rgb> {
    colors
        .into_iter()
        .fold(None::<(Rgb, f64)>, |best, color| {
            let score = declared_color_score(color);
            match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((color, score)),
            }
        })
        .map(|(color, _)| color)
}
