//! Shared application state for the TechStore service.
//!
//! Owns the catalog, cart store, metrics and session resolver. Everything is
//! created here at startup and dropped with the last clone of `AppState`;
//! there are no process globals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use techstore_core::catalog::Catalog;
use techstore_core::error::Result;

use crate::config::AppConfig;
use crate::context::{HeaderSessionResolver, SessionResolver};
use crate::obs::HttpMetrics;
use crate::store::CartStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<HttpMetrics>,
    carts: Arc<CartStore>,
}

struct AppStateInner {
    cfg: AppConfig,
    catalog: Arc<Catalog>,
    sessions: Box<dyn SessionResolver>,
    last_pong_ms: AtomicU64,
    order_seq: AtomicU64,
}

impl AppState {
    /// Build state with the built-in catalog.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: AppConfig) -> Result<Self> {
        Self::with_catalog(cfg, Catalog::builtin())
    }

    pub fn with_catalog(cfg: AppConfig, catalog: Catalog) -> Result<Self> {
        let sessions = HeaderSessionResolver::new(
            cfg.session.header.clone(),
            cfg.session.default_id.clone(),
        );
        Self::with_parts(cfg, catalog, Box::new(sessions))
    }

    pub fn with_parts(
        cfg: AppConfig,
        catalog: Catalog,
        sessions: Box<dyn SessionResolver>,
    ) -> Result<Self> {
        // Duplicate metric names or bad buckets abort startup here.
        let metrics = HttpMetrics::new(&cfg.metrics.buckets)?;
        metrics.set_build_info(&cfg.build.version, &cfg.build.git_sha);

        let catalog = Arc::new(catalog);
        let carts = CartStore::new(Arc::clone(&catalog));

        tracing::info!(
            products = catalog.len(),
            version = %cfg.build.version,
            git_sha = %cfg.build.git_sha,
            "app state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                catalog,
                sessions,
                last_pong_ms: AtomicU64::new(0),
                order_seq: AtomicU64::new(1),
            }),
            metrics: Arc::new(metrics),
            carts: Arc::new(carts),
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn sessions(&self) -> &dyn SessionResolver {
        self.inner.sessions.as_ref()
    }

    pub fn metrics(&self) -> Arc<HttpMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn carts(&self) -> &CartStore {
        &self.carts
    }

    /// Wall-clock epoch millis, never lower than a value already handed out.
    pub fn pong_millis(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        let prev = self.inner.last_pong_ms.fetch_max(now, Ordering::Relaxed);
        prev.max(now)
    }

    pub fn next_order_id(&self) -> String {
        let n = self.inner.order_seq.fetch_add(1, Ordering::Relaxed);
        format!("ORD-{n:06}")
    }
}
