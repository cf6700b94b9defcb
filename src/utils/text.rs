/// Collapses every run of whitespace to a single space and trims both ends.
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes the handful of entities that survive in scraped meta content.
/// `&amp;` goes last so `&amp;lt;` becomes `&lt;` rather than `<`.
#[must_use]
pub fn decode_basic_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Entity-decoded, whitespace-normalized text.
#[must_use]
pub fn clean_text(s: &str) -> String {
    collapse_whitespace(&decode_basic_entities(s))
}
