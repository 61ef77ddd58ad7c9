//! Service config loader (strict parsing, env overrides).

pub mod schema;

use std::fs;

use techstore_core::error::{Result, StoreError};

pub use schema::{AppConfig, BuildSection, MetricsSection, ServerSection, SessionSection};

/// Env var naming an optional YAML config file.
pub const CONFIG_PATH_ENV: &str = "TECHSTORE_CONFIG";

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| StoreError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| StoreError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// File named by `TECHSTORE_CONFIG` (or defaults), then process env overrides.
pub fn load() -> Result<AppConfig> {
    load_with(|k| std::env::var(k).ok())
}

pub fn load_with<F>(lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match lookup(CONFIG_PATH_ENV) {
        Some(path) => {
            tracing::info!(%path, "loading config file");
            load_from_file(&path)?
        }
        None => AppConfig::default(),
    };
    cfg.apply_env(&lookup)?;
    cfg.validate()?;
    Ok(cfg)
}
