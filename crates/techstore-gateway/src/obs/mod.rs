//! In-process metrics.
//!
//! A small Prometheus-compatible registry (counters, gauges, histograms with
//! declared label names), the process collector merged into every scrape, the
//! request instruments, and the middleware that feeds them.

pub mod http;
pub mod metrics;
pub mod middleware;
pub mod process;

pub use http::HttpMetrics;
pub use metrics::{Collector, CounterVec, GaugeVec, HistogramVec, Instrument, Registry};
