use serde::Deserialize;
use techstore_core::error::{Result, StoreError};

use crate::obs::metrics::DEFAULT_BUCKETS;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub build: BuildSection,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            build: BuildSection::default(),
            session: SessionSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(StoreError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.session.validate()?;
        self.metrics.validate()?;
        Ok(())
    }

    /// Apply `PORT`, `APP_VERSION` and `GIT_SHA` from `lookup`.
    ///
    /// Empty values are ignored, like unset ones.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| StoreError::BadRequest(format!("invalid PORT {port:?}: {e}")))?;
        }
        if let Some(v) = get("APP_VERSION") {
            self.build.version = v;
        }
        if let Some(v) = get("GIT_SHA") {
            self.build.git_sha = v;
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(StoreError::BadRequest("server.port must not be 0".into()));
        }
        if self.host.trim().is_empty() {
            return Err(StoreError::BadRequest("server.host must not be empty".into()));
        }
        Ok(())
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3000
}

/// Values carried by the `app_build_info` gauge and `/version`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    #[serde(default = "default_build_label")]
    pub version: String,

    #[serde(default = "default_build_label")]
    pub git_sha: String,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            version: default_build_label(),
            git_sha: default_build_label(),
        }
    }
}

fn default_build_label() -> String {
    "dev".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSection {
    #[serde(default = "default_session_header")]
    pub header: String,

    #[serde(default = "default_session_id")]
    pub default_id: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            header: default_session_header(),
            default_id: default_session_id(),
        }
    }
}

impl SessionSection {
    pub fn validate(&self) -> Result<()> {
        if axum::http::HeaderName::from_bytes(self.header.as_bytes()).is_err() {
            return Err(StoreError::BadRequest(format!(
                "session.header is not a valid header name: {:?}",
                self.header
            )));
        }
        if self.default_id.is_empty() {
            return Err(StoreError::BadRequest("session.default_id must not be empty".into()));
        }
        Ok(())
    }
}

fn default_session_header() -> String {
    "x-session-id".into()
}
fn default_session_id() -> String {
    "default".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Latency histogram bucket bounds, in seconds.
    #[serde(default = "default_buckets")]
    pub buckets: Vec<f64>,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            buckets: default_buckets(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if self.buckets.is_empty() {
            return Err(StoreError::BadRequest("metrics.buckets must not be empty".into()));
        }
        if self.buckets.iter().any(|b| !b.is_finite() || *b <= 0.0) {
            return Err(StoreError::BadRequest(
                "metrics.buckets must be finite and positive".into(),
            ));
        }
        if self.buckets.windows(2).any(|w| w[0] >= w[1]) {
            return Err(StoreError::BadRequest(
                "metrics.buckets must be strictly ascending".into(),
            ));
        }
        Ok(())
    }
}

fn default_buckets() -> Vec<f64> {
    DEFAULT_BUCKETS.to_vec()
}
