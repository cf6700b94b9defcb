use super::site::{Site, is_upper_hex, service, service_with, test_config};
use linkaccent::color::Rgb;
use linkaccent::links::ColorSource;
use linkaccent::{FetchError, PreviewError};
use std::time::{Duration, Instant};
use wiremock::matchers::path;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn theme_color_only_page_reports_theme_source() {
    let site = Site::start().await;
    site.page(
        "/",
        r##"<html><head><meta name="theme-color" content="#112233"></head></html>"##,
    )
    .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();

    assert_eq!(payload.color_source, ColorSource::Theme);
    // #112233 has its lightness lifted to the clamp floor but keeps its hue
    assert_eq!(payload.accent, "#29527A");
    let accent = Rgb::from_hex(&payload.accent).unwrap().to_hsl();
    assert!((accent.h - 210.0).abs() < 1.0);
    assert!((accent.l - 0.32).abs() < 0.01);
    assert_eq!(payload.foreground, "#F8FAFC");
}

#[tokio::test]
async fn og_title_and_orange_theme() {
    let site = Site::start().await;
    site.page(
        "/",
        r##"<html><head>
            <title>ignored</title>
            <meta property="og:title" content="Example">
            <meta name="theme-color" content="#ff6600">
        </head><body></body></html>"##,
    )
    .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();

    assert_eq!(payload.title, "Example");
    assert_eq!(payload.description, "");
    assert_eq!(payload.image, None);
    assert_eq!(payload.color_source, ColorSource::Theme);
    let hue = Rgb::from_hex(&payload.accent).unwrap().to_hsl().h;
    assert!((19.0..=29.0).contains(&hue), "hue {hue}");
    assert_eq!(payload.foreground, "#0F172A");
}

#[tokio::test]
async fn page_without_color_sources_uses_fallback() {
    let site = Site::start().await;
    site.page("/", "<html><body><p>plain</p></body></html>").await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();

    assert_eq!(payload.color_source, ColorSource::Fallback);
    assert_eq!(payload.accent, "#4C5F8A");
    assert_eq!(payload.accent_secondary, "#404463");
    assert_eq!(payload.accent_highlight, "#639BBA");
    assert_eq!(payload.foreground, "#F8FAFC");
    assert_eq!(payload.muted_foreground, "#99A5BD");
    assert_eq!(payload.title, "127.0.0.1");
    // the default icon location is still reported and was probed
    assert_eq!(payload.favicon, Some(site.url("/favicon.ico")));
    assert_eq!(site.requests_to("/favicon.ico").await, 1);
}

#[tokio::test]
async fn every_color_is_uppercase_hex() {
    let site = Site::start().await;
    site.page(
        "/",
        r##"<meta name="theme-color" content="rgb(10, 200, 120)">"##,
    )
    .await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/")).await.unwrap();
    for value in [
        &payload.accent,
        &payload.accent_secondary,
        &payload.accent_highlight,
        &payload.foreground,
        &payload.muted_foreground,
    ] {
        assert!(is_upper_hex(value), "{value}");
    }
}

#[tokio::test]
async fn cached_preview_skips_the_network_until_expiry() {
    let site = Site::start().await;
    Mock::given(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string(r#"<meta property="og:title" content="Cached">"#),
        )
        .expect(2)
        .mount(&site.server)
        .await;

    let (previews, clock) = service();
    let url = site.url("/article");

    let first = previews.preview(&url).await.unwrap();
    clock.advance(Duration::from_secs(29 * 60));
    let second = previews.preview(&url).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(site.requests_to("/article").await, 1);
    assert_eq!(previews.cached_len(), 1);

    clock.advance(Duration::from_secs(2 * 60));
    let third = previews.preview(&url).await.unwrap();
    assert_eq!(third.title, "Cached");
    assert_eq!(site.requests_to("/article").await, 2);
}

#[tokio::test]
async fn cache_key_is_the_requested_url_not_the_redirect_target() {
    let site = Site::start().await;
    Mock::given(path("/short"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", site.url("/long/post").as_str()),
        )
        .mount(&site.server)
        .await;
    site.page("/long/post", "<title>Long post</title>").await;

    let (previews, _) = service();
    let payload = previews.preview(&site.url("/short")).await.unwrap();
    assert_eq!(payload.url, site.url("/short"));
    assert_eq!(payload.final_url, site.url("/long/post"));
    assert_eq!(payload.domain, "127.0.0.1");

    previews.preview(&site.url("/short")).await.unwrap();
    assert_eq!(site.requests_to("/short").await, 1);
}

#[tokio::test]
async fn slow_page_times_out_as_fetch_error() {
    let site = Site::start().await;
    Mock::given(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<title>late</title>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&site.server)
        .await;

    let mut config = test_config();
    config.page_timeout_ms = 200;
    let (previews, _) = service_with(&config);

    let started = Instant::now();
    let err = previews.preview(&site.url("/slow")).await.unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(matches!(
        err,
        PreviewError::Fetch(FetchError::Timeout { timeout_ms: 200, .. })
    ));
    assert_eq!(previews.cached_len(), 0);
}

#[tokio::test]
async fn upstream_error_status_fails_the_request() {
    let site = Site::start().await;
    Mock::given(path("/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&site.server)
        .await;

    let (previews, _) = service();
    let err = previews.preview(&site.url("/gone")).await.unwrap_err();
    assert!(!err.is_input_error());
    assert!(matches!(
        err,
        PreviewError::Fetch(FetchError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn invalid_url_never_touches_the_network() {
    let site = Site::start().await;
    let (previews, _) = service();

    for raw in ["", "not a url", "/relative", "ftp://127.0.0.1/file"] {
        let err = previews.preview(raw).await.unwrap_err();
        assert!(err.is_input_error(), "{raw}");
    }
    assert!(site.server.received_requests().await.unwrap().is_empty());
}
