//! Axum HTTP surface: body limits, request timeouts and optional CORS in
//! front of the preview and favicon services.

mod handlers;
mod server;

pub use server::{build_app, run_gateway, run_gateway_with_listener};

use crate::links::FaviconService;
use crate::preview::PreviewService;
use serde::Deserialize;
use std::sync::Arc;

/// Maximum request body size (64KB). Every route is a GET.
pub const MAX_BODY_SIZE: usize = 65_536;
/// Request timeout (30s), comfortably above the upstream page budget.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Shared state for all axum handlers
#[derive(Clone)]
pub struct AppState {
    pub previews: Arc<PreviewService>,
    pub favicons: Arc<FaviconService>,
}

/// `GET /api/link-preview` query params
#[derive(Debug, Deserialize)]
pub struct LinkPreviewQuery {
    pub url: Option<String>,
}

/// `GET /api/favicon` query params
#[derive(Debug, Deserialize)]
pub struct FaviconQuery {
    pub domain: Option<String>,
}
