//! HTTP mapping for `StoreError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use techstore_core::error::{ClientCode, StoreError};

/// Handler error: a `StoreError` rendered as `{"error", "code"}` JSON.
#[derive(Debug)]
pub struct ApiError(pub StoreError);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(e)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::NotFound => StatusCode::NOT_FOUND,
            ClientCode::Validation | ClientCode::BadRequest => StatusCode::BAD_REQUEST,
            ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, code = code.as_str(), "request rejected");
        }

        let body = json!({ "error": self.0.to_string(), "code": code.as_str() });
        (status, Json(body)).into_response()
    }
}
