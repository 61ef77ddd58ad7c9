//! Request instrumentation and build metadata.

use std::sync::Arc;

use techstore_core::error::Result;

use super::metrics::{CounterVec, GaugeVec, HistogramVec, Registry};
use super::process::ProcessCollector;

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const BUILD_INFO: &str = "app_build_info";

const REQUEST_LABELS: [&str; 3] = ["route", "method", "status"];

/// Registry plus handles to the service's own instruments.
pub struct HttpMetrics {
    registry: Registry,
    requests: Arc<CounterVec>,
    duration: Arc<HistogramVec>,
    build_info: Arc<GaugeVec>,
}

impl HttpMetrics {
    /// Register request and build-info families plus the process collector.
    ///
    /// Any registration failure is a startup error.
    pub fn new(buckets: &[f64]) -> Result<Self> {
        let requests = Arc::new(CounterVec::new(
            REQUESTS_TOTAL,
            "Total HTTP requests",
            &REQUEST_LABELS,
        ));
        let duration = Arc::new(HistogramVec::new(
            REQUEST_DURATION,
            "Request duration in seconds",
            &REQUEST_LABELS,
            buckets,
        )?);
        let build_info = Arc::new(GaugeVec::new(
            BUILD_INFO,
            "Build metadata as labels",
            &["version", "git_sha"],
        ));

        let mut registry = Registry::new();
        registry.register(Arc::clone(&requests))?;
        registry.register(Arc::clone(&duration))?;
        registry.register(Arc::clone(&build_info))?;
        registry.add_collector(ProcessCollector::new())?;

        Ok(Self {
            registry,
            requests,
            duration,
            build_info,
        })
    }

    /// Count one finished request and record its latency.
    pub fn observe_request(&self, route: &str, method: &str, status: u16, secs: f64) {
        let status = status.to_string();
        let labels = [route, method, status.as_str()];
        if let Err(e) = self.requests.inc(&labels) {
            tracing::warn!(error = %e, "request counter update failed");
        }
        if let Err(e) = self.duration.observe(&labels, secs) {
            tracing::warn!(error = %e, "request histogram update failed");
        }
    }

    /// Set `app_build_info{version, git_sha}` to 1.
    ///
    /// Earlier label tuples keep their series; each tuple is last-write-wins.
    pub fn set_build_info(&self, version: &str, git_sha: &str) {
        if let Err(e) = self.build_info.set(&[version, git_sha], 1.0) {
            tracing::warn!(error = %e, "build info update failed");
        }
    }

    pub fn requests(&self) -> &CounterVec {
        &self.requests
    }

    pub fn duration(&self) -> &HistogramVec {
        &self.duration
    }

    pub fn build_info(&self) -> &GaugeVec {
        &self.build_info
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn render(&self) -> String {
        self.registry.render()
    }
}
