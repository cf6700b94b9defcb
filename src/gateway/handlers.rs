use super::{AppState, FaviconQuery, LinkPreviewQuery};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

const INVALID_URL_MESSAGE: &str = "Missing or invalid url parameter";
const PREVIEW_FAILED_MESSAGE: &str = "Failed to generate link preview";
const INVALID_DOMAIN_MESSAGE: &str = "Missing or invalid domain parameter";

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// GET /health
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "cachedPreviews": state.previews.cached_len(),
    }))
}

/// GET /api/link-preview?url=
pub(super) async fn handle_link_preview(
    State(state): State<AppState>,
    Query(query): Query<LinkPreviewQuery>,
) -> Response {
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE);
    };

    match state.previews.preview(&url).await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) if e.is_input_error() => {
            tracing::debug!(%url, error = %e, "rejected link preview request");
            error_response(StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE)
        }
        Err(e) => {
            tracing::error!(%url, error = %e, "link preview failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, PREVIEW_FAILED_MESSAGE)
        }
    }
}

/// GET /api/favicon?domain=
pub(super) async fn handle_favicon(
    State(state): State<AppState>,
    Query(query): Query<FaviconQuery>,
) -> Response {
    let Some(domain) = query.domain.filter(|d| !d.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, INVALID_DOMAIN_MESSAGE);
    };

    match state.favicons.lookup(&domain).await {
        Ok(lookup) => Json(lookup).into_response(),
        Err(e) => {
            tracing::debug!(%domain, error = %e, "rejected favicon request");
            error_response(StatusCode::BAD_REQUEST, INVALID_DOMAIN_MESSAGE)
        }
    }
}
