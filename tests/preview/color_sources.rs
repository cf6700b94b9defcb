use super::site::{Site, png, service, service_with, test_config};
use linkaccent::links::ColorSource;

#[tokio::test]
async fn vivid_og_image_beats_grey_theme() {
    let site = Site::start().await;
    site.page(
        "/",
        r##"<meta property="og:image" content="/cover.png">
            <meta name="theme-color" content="#777777">"##,
    )
    .await;
    site.bytes("/cover.png", "image/png", png([0x33, 0x66, 0xCC], 32))
        .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();

    assert_eq!(payload.image, Some(site.url("/cover.png")));
    assert_eq!(payload.color_source, ColorSource::Image);
    assert_eq!(payload.accent, "#3366CC");
}

#[tokio::test]
async fn image_request_carries_page_as_referer() {
    let site = Site::start().await;
    site.page("/post", r#"<meta property="og:image" content="/cover.png">"#)
        .await;
    site.bytes("/cover.png", "image/png", png([200, 30, 30], 8))
        .await;

    let (previews, _) = service();
    previews.preview(&site.url("/post")).await.unwrap();

    let requests = site.server.received_requests().await.unwrap();
    let image = requests
        .iter()
        .find(|r| r.url.path() == "/cover.png")
        .unwrap();
    assert_eq!(
        image.headers.get("referer").unwrap().to_str().unwrap(),
        site.url("/post")
    );
}

#[tokio::test]
async fn oversized_image_degrades_to_next_source() {
    let site = Site::start().await;
    site.page(
        "/",
        r##"<meta property="og:image" content="/huge.png">
            <meta name="theme-color" content="#112233">"##,
    )
    .await;
    site.bytes("/huge.png", "image/png", vec![0_u8; 8 * 1024])
        .await;

    let mut config = test_config();
    config.max_image_bytes = 1024;
    let (previews, _) = service_with(&config);
    let payload = previews.preview(&site.url("/")).await.unwrap();

    assert_eq!(payload.color_source, ColorSource::Theme);
    assert_eq!(payload.image, Some(site.url("/huge.png")));
}

#[tokio::test]
async fn undecodable_image_and_missing_icon_are_ignored() {
    let site = Site::start().await;
    site.page(
        "/",
        r##"<meta property="og:image" content="/broken.jpg">
            <link rel="icon" href="/missing.png">
            <meta name="theme-color" content="#ff6600">"##,
    )
    .await;
    site.bytes("/broken.jpg", "image/jpeg", b"definitely not a jpeg".to_vec())
        .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();

    assert_eq!(payload.color_source, ColorSource::Theme);
    assert_eq!(payload.favicon, Some(site.url("/missing.png")));
}

#[tokio::test]
async fn manifest_theme_color_is_a_candidate() {
    let site = Site::start().await;
    site.page("/", r#"<link rel="manifest" href="/site.webmanifest">"#)
        .await;
    site.bytes(
        "/site.webmanifest",
        "application/manifest+json",
        br##"{"name":"Demo","theme_color":"#e91e63","background_color":"#ffffff"}"##.to_vec(),
    )
    .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();

    assert_eq!(payload.color_source, ColorSource::Manifest);
    assert_eq!(payload.title, "127.0.0.1");
}

#[tokio::test]
async fn malformed_manifest_falls_back() {
    let site = Site::start().await;
    site.page("/", r#"<link rel="manifest" href="/site.webmanifest">"#)
        .await;
    site.bytes("/site.webmanifest", "application/json", b"{not json".to_vec())
        .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();
    assert_eq!(payload.color_source, ColorSource::Fallback);
}

#[tokio::test]
async fn svg_favicon_fill_is_used() {
    let site = Site::start().await;
    site.page(
        "/",
        r#"<link rel="icon" type="image/svg+xml" href="/icon.svg">"#,
    )
    .await;
    site.bytes(
        "/icon.svg",
        "image/svg+xml",
        br##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 16 16"><circle cx="8" cy="8" r="8" fill="#0a84ff"/></svg>"##.to_vec(),
    )
    .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();

    assert_eq!(payload.color_source, ColorSource::Favicon);
    assert_eq!(payload.favicon, Some(site.url("/icon.svg")));
}

#[tokio::test]
async fn undeclared_favicon_ico_is_probed() {
    let site = Site::start().await;
    site.page("/", "<title>Icons</title>").await;
    site.bytes(
        "/favicon.ico",
        "image/x-icon",
        png([0x10, 0xB9, 0x81], 16),
    )
    .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();

    assert_eq!(payload.color_source, ColorSource::Favicon);
    assert_eq!(payload.favicon, Some(site.url("/favicon.ico")));
}

#[tokio::test]
async fn equal_scores_prefer_image_over_favicon() {
    let site = Site::start().await;
    site.page(
        "/",
        r#"<meta property="og:image" content="/a.png"><link rel="icon" href="/b.png">"#,
    )
    .await;
    site.bytes("/a.png", "image/png", png([0xCC, 0x33, 0x66], 8))
        .await;
    site.bytes("/b.png", "image/png", png([0xCC, 0x33, 0x66], 8))
        .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();
    assert_eq!(payload.color_source, ColorSource::Image);
}
