use axum::http::HeaderMap;

/// Maps an inbound request to the session id that partitions cart state.
pub trait SessionResolver: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> String;
}

/// Reads the session id from a single request header.
///
/// Missing, empty, or non-visible-ASCII values fall back to `default_id`.
#[derive(Debug, Clone)]
pub struct HeaderSessionResolver {
    header: String,
    default_id: String,
}

impl HeaderSessionResolver {
    pub fn new(header: impl Into<String>, default_id: impl Into<String>) -> Self {
        Self {
            header: header.into().to_ascii_lowercase(),
            default_id: default_id.into(),
        }
    }
}

impl SessionResolver for HeaderSessionResolver {
    fn resolve(&self, headers: &HeaderMap) -> String {
        headers
            .get(self.header.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.default_id.clone())
    }
}
