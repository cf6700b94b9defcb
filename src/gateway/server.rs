use super::handlers::{handle_favicon, handle_health, handle_link_preview};
use super::{AppState, MAX_BODY_SIZE, REQUEST_TIMEOUT_SECS};

use crate::config::Config;
use crate::links::FaviconService;
use crate::preview::PreviewService;
use anyhow::{Context, Result};
use axum::{Router, http::StatusCode, routing::get};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Returns true when the bind address is not a loopback address.
fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

/// Bind `[gateway] host:port` and serve until Ctrl-C.
pub async fn run_gateway(config: Arc<Config>) -> Result<()> {
    let host = config.gateway.host.as_str();
    if is_public_bind(host) && !config.gateway.allow_public_bind {
        anyhow::bail!(
            "Refusing to bind to {host}: the preview endpoint fetches arbitrary URLs.\n\
             Fix: use --host 127.0.0.1 (default), put a reverse proxy in front, or set\n\
             [gateway] allow_public_bind = true in config.toml."
        );
    }

    let host = host.trim_start_matches('[').trim_end_matches(']');
    let listener = tokio::net::TcpListener::bind((host, config.gateway.port))
        .await
        .with_context(|| format!("bind gateway socket {host}:{}", config.gateway.port))?;

    run_gateway_with_listener(listener, config).await
}

/// Serve from a pre-bound listener.
pub async fn run_gateway_with_listener(
    listener: tokio::net::TcpListener,
    config: Arc<Config>,
) -> Result<()> {
    let local_addr = listener.local_addr().context("read gateway address")?;

    let previews =
        PreviewService::new(&config.preview).context("build preview HTTP client")?;
    let favicons = FaviconService::new(&config, previews.fetcher().clone());
    let state = AppState {
        previews: Arc::new(previews),
        favicons: Arc::new(favicons),
    };

    print_gateway_banner(&local_addr.to_string());
    tracing::info!(addr = %local_addr, "gateway listening");

    let app = build_app(state, &config.gateway.cors_origins);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    tracing::info!("gateway stopped");
    Ok(())
}

fn print_gateway_banner(display_addr: &str) {
    println!("Gateway listening on {display_addr}");
    println!("  GET  /api/link-preview?url=");
    println!("  GET  /api/favicon?domain=");
    println!("  GET  /health");
    println!("  Press Ctrl+C to stop.\n");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

pub fn build_app(state: AppState, cors_origins: &[String]) -> Router {
    let mut app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/link-preview", get(handle_link_preview))
        .route("/api/favicon", get(handle_favicon))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        ));

    if !cors_origins.is_empty() {
        let origins: Vec<_> = cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([axum::http::Method::GET])
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        );
    }

    app
}
