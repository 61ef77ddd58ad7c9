//! Shared error type across TechStore crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Unknown product, route or resource.
    NotFound,
    /// Request body failed schema validation.
    Validation,
    /// Request was well-formed but not acceptable.
    BadRequest,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Validation => "VALIDATION_ERROR",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("Product not found")]
    ProductNotFound(u32),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("metric already registered: {0}")]
    DuplicateMetricName(String),
    #[error("metric {name} expects {expected} label values, got {got}")]
    LabelCardinality {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid histogram buckets: {0}")]
    InvalidBuckets(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl StoreError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            StoreError::NotFound(_) | StoreError::ProductNotFound(_) => ClientCode::NotFound,
            StoreError::Validation(_) => ClientCode::Validation,
            StoreError::BadRequest(_) => ClientCode::BadRequest,
            StoreError::DuplicateMetricName(_)
            | StoreError::LabelCardinality { .. }
            | StoreError::InvalidBuckets(_)
            | StoreError::Internal(_) => ClientCode::Internal,
        }
    }
}
