use super::site::Site;
use linkaccent::config::Config;
use linkaccent::gateway::run_gateway_with_listener;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::path;
use wiremock::{Mock, ResponseTemplate};

struct GatewayTestServer {
    port: u16,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl GatewayTestServer {
    async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let mut config = Config::default();
        config.preview.page_timeout_ms = 500;
        config.gateway.port = port;

        let handle =
            tokio::spawn(async move { run_gateway_with_listener(listener, Arc::new(config)).await });

        wait_until_gateway_ready(port).await;

        Self { port, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn wait_until_gateway_ready(port: u16) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .expect("reqwest client should be built");

    for _ in 0..80 {
        let health = client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await;
        if matches!(health, Ok(resp) if resp.status() == StatusCode::OK) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("gateway did not become ready on port {port}");
}

async fn get_json(url: &str, query: &[(&str, &str)]) -> (StatusCode, Value) {
    let response = reqwest::Client::new()
        .get(url)
        .query(query)
        .send()
        .await
        .expect("gateway should answer");
    let status = response.status();
    let body = response.json().await.expect("body should be JSON");
    (status, body)
}

#[tokio::test]
async fn missing_or_invalid_url_is_400() {
    let server = GatewayTestServer::start().await;

    for query in [
        vec![],
        vec![("url", "")],
        vec![("url", "not a url")],
        vec![("url", "javascript:alert(1)")],
    ] {
        let (status, body) = get_json(&server.url("/api/link-preview"), &query).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query:?}");
        assert_eq!(body, serde_json::json!({"error": "Missing or invalid url parameter"}));
    }
}

#[tokio::test]
async fn preview_is_served_as_camel_case_json() {
    let site = Site::start().await;
    site.page(
        "/",
        r##"<meta property="og:title" content="Example">
            <meta property="og:description" content="An &amp;amp; B">
            <meta name="theme-color" content="#ff6600">"##,
    )
    .await;
    let server = GatewayTestServer::start().await;

    let (status, body) =
        get_json(&server.url("/api/link-preview"), &[("url", site.url("/").as_str())]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Example");
    assert_eq!(body["description"], "An & B");
    assert_eq!(body["colorSource"], "theme");
    assert_eq!(body["domain"], "127.0.0.1");
    assert_eq!(body["finalUrl"], site.url("/"));
    for key in [
        "accent",
        "accentSecondary",
        "accentHighlight",
        "foreground",
        "mutedForeground",
    ] {
        assert!(body[key].as_str().unwrap().starts_with('#'), "{key}");
    }

    let (_, health) = get_json(&server.url("/health"), &[]).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["cachedPreviews"], 1);
}

#[tokio::test]
async fn upstream_failure_is_500_with_generic_body() {
    let site = Site::start().await;
    Mock::given(path("/down"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&site.server)
        .await;
    Mock::given(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&site.server)
        .await;
    let server = GatewayTestServer::start().await;

    for upstream in ["/down", "/slow"] {
        let (status, body) =
            get_json(&server.url("/api/link-preview"), &[("url", site.url(upstream).as_str())]).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{upstream}");
        assert_eq!(body, serde_json::json!({"error": "Failed to generate link preview"}));
    }
}

#[tokio::test]
async fn favicon_endpoint_resolves_declared_icon() {
    let site = Site::start().await;
    site.page("/", r#"<link rel="icon" href="/img/fav.png" sizes="48x48">"#)
        .await;
    let server = GatewayTestServer::start().await;

    let (status, body) = get_json(&server.url("/api/favicon"), &[("domain", site.url("/").as_str())]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["domain"], "127.0.0.1");
    assert_eq!(body["favicon"], site.url("/img/fav.png"));

    let (status, body) = get_json(&server.url("/api/favicon"), &[]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
