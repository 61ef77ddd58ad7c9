//! Operational HTTP endpoints.
//!
//! - `/health`   : liveness
//! - `/api/ping` : liveness with a millisecond timestamp
//! - `/version`  : build labels
//! - `/metrics`  : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use techstore_core::error::StoreError;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::obs::metrics::TEXT_CONTENT_TYPE;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn ping(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "ok": true, "pong": state.pong_millis() }))
}

pub async fn version(State(state): State<AppState>) -> impl IntoResponse {
    let build = &state.cfg().build;
    Json(json!({ "version": build.version, "git_sha": build.git_sha }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "no route");
    ApiError(StoreError::NotFound("Not found".into()))
}
