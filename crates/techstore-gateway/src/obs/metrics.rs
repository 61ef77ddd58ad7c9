//! Metrics registry and instruments.
//!
//! Counter/gauge/histogram families with dynamic label values backed by
//! `DashMap`. Each family declares its label names up front; callers pass
//! label values in that same order, and the rendered output always uses the
//! declared order. Series are sorted by label values at render time so the
//! exposition is deterministic.

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use techstore_core::error::{Result, StoreError};

/// Content type for the text exposition format.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// f64 stored as raw bits so it can live in an atomic.
#[derive(Default)]
struct AtomicF64(AtomicU64);

impl AtomicF64 {
    fn new(v: f64) -> Self {
        Self(AtomicU64::new(v.to_bits()))
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, v: f64) {
        self.0.store(v.to_bits(), Ordering::Relaxed);
    }

    fn add(&self, delta: f64) {
        let _ = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some((f64::from_bits(bits) + delta).to_bits())
            });
    }
}

/// Name, help text and declared label names of one family.
#[derive(Debug, Clone)]
pub struct Desc {
    pub name: String,
    pub help: String,
    pub label_names: Vec<String>,
}

impl Desc {
    fn new(name: &str, help: &str, label_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            label_names: label_names.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn key(&self, values: &[&str]) -> Result<Vec<String>> {
        if values.len() != self.label_names.len() {
            return Err(StoreError::LabelCardinality {
                name: self.name.clone(),
                expected: self.label_names.len(),
                got: values.len(),
            });
        }
        Ok(values.iter().map(|v| v.to_string()).collect())
    }

    /// `k1="v1",k2="v2"` in declared order.
    fn label_pairs(&self, values: &[String]) -> String {
        self.label_names
            .iter()
            .zip(values)
            .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn header(&self, kind: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, escape_help(&self.help));
        let _ = writeln!(out, "# TYPE {} {}", self.name, kind);
    }
}

fn braces(labels: &str) -> String {
    if labels.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", labels)
    }
}

fn sorted_keys<V>(map: &DashMap<Vec<String>, V>) -> Vec<Vec<String>> {
    let mut keys: Vec<Vec<String>> = map.iter().map(|r| r.key().clone()).collect();
    keys.sort();
    keys
}

/// Monotonic counter family.
pub struct CounterVec {
    desc: Desc,
    map: DashMap<Vec<String>, AtomicU64>,
}

impl CounterVec {
    pub fn new(name: &str, help: &str, label_names: &[&str]) -> Self {
        Self {
            desc: Desc::new(name, help, label_names),
            map: DashMap::new(),
        }
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    /// Increment by 1.
    pub fn inc(&self, values: &[&str]) -> Result<()> {
        self.inc_by(values, 1)
    }

    /// Increment by an arbitrary value.
    pub fn inc_by(&self, values: &[&str], v: u64) -> Result<()> {
        let key = self.desc.key(values)?;
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Current value, zero for a series never touched.
    pub fn get(&self, values: &[&str]) -> Result<u64> {
        let key = self.desc.key(values)?;
        Ok(self
            .map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0))
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, out: &mut String) {
        self.desc.header("counter", out);
        for key in sorted_keys(&self.map) {
            let Some(val) = self.map.get(&key).map(|c| c.load(Ordering::Relaxed)) else {
                continue;
            };
            let labels = self.desc.label_pairs(&key);
            let _ = writeln!(out, "{}{} {}", self.desc.name, braces(&labels), val);
        }
    }
}

/// Last-write-wins gauge family.
pub struct GaugeVec {
    desc: Desc,
    map: DashMap<Vec<String>, AtomicF64>,
}

impl GaugeVec {
    pub fn new(name: &str, help: &str, label_names: &[&str]) -> Self {
        Self {
            desc: Desc::new(name, help, label_names),
            map: DashMap::new(),
        }
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    pub fn set(&self, values: &[&str], v: f64) -> Result<()> {
        let key = self.desc.key(values)?;
        self.map
            .entry(key)
            .or_insert_with(AtomicF64::default)
            .store(v);
        Ok(())
    }

    pub fn get(&self, values: &[&str]) -> Result<Option<f64>> {
        let key = self.desc.key(values)?;
        Ok(self.map.get(&key).map(|g| g.load()))
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, out: &mut String) {
        self.desc.header("gauge", out);
        for key in sorted_keys(&self.map) {
            let Some(val) = self.map.get(&key).map(|g| g.load()) else {
                continue;
            };
            let labels = self.desc.label_pairs(&key);
            let _ = writeln!(out, "{}{} {}", self.desc.name, braces(&labels), val);
        }
    }
}

/// Default request latency buckets, in seconds.
pub const DEFAULT_BUCKETS: [f64; 8] = [0.01, 0.05, 0.1, 0.2, 0.5, 1.0, 2.0, 5.0];

struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicF64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum: AtomicF64::new(0.0),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

/// Point-in-time view of one histogram series.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper bound, cumulative count)` per declared bucket.
    pub buckets: Vec<(f64, u64)>,
    pub count: u64,
    pub sum: f64,
}

/// Histogram family with fixed cumulative buckets.
pub struct HistogramVec {
    desc: Desc,
    bounds: Vec<f64>,
    map: DashMap<Vec<String>, AtomicHistogram>,
}

impl HistogramVec {
    /// Buckets must be non-empty, finite and strictly ascending.
    pub fn new(name: &str, help: &str, label_names: &[&str], buckets: &[f64]) -> Result<Self> {
        validate_buckets(buckets)?;
        Ok(Self {
            desc: Desc::new(name, help, label_names),
            bounds: buckets.to_vec(),
            map: DashMap::new(),
        })
    }

    pub fn desc(&self) -> &Desc {
        &self.desc
    }

    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Record one observation.
    pub fn observe(&self, values: &[&str], v: f64) -> Result<()> {
        let key = self.desc.key(values)?;
        let n = self.bounds.len();
        let hist = self.map.entry(key).or_insert_with(|| AtomicHistogram::new(n));

        // Cumulative buckets: bump every bucket whose bound covers the value.
        for (i, &le) in self.bounds.iter().enumerate() {
            if v <= le {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
        hist.sum.add(v);
        hist.count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn snapshot(&self, values: &[&str]) -> Result<Option<HistogramSnapshot>> {
        let key = self.desc.key(values)?;
        Ok(self.map.get(&key).map(|h| self.snapshot_of(&h)))
    }

    fn snapshot_of(&self, hist: &AtomicHistogram) -> HistogramSnapshot {
        HistogramSnapshot {
            buckets: self
                .bounds
                .iter()
                .zip(&hist.buckets)
                .map(|(&le, c)| (le, c.load(Ordering::Relaxed)))
                .collect(),
            count: hist.count.load(Ordering::Relaxed),
            sum: hist.sum.load(),
        }
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, out: &mut String) {
        self.desc.header("histogram", out);
        let name = &self.desc.name;
        for key in sorted_keys(&self.map) {
            let Some(snap) = self.map.get(&key).map(|h| self.snapshot_of(&h)) else {
                continue;
            };
            let labels = self.desc.label_pairs(&key);
            let prefix = if labels.is_empty() {
                String::new()
            } else {
                format!("{},", labels)
            };

            for (le, count) in &snap.buckets {
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, snap.count);
            let _ = writeln!(out, "{}_sum{} {}", name, braces(&labels), snap.sum);
            let _ = writeln!(out, "{}_count{} {}", name, braces(&labels), snap.count);
        }
    }
}

fn validate_buckets(buckets: &[f64]) -> Result<()> {
    if buckets.is_empty() {
        return Err(StoreError::InvalidBuckets("at least one bucket is required".into()));
    }
    if buckets.iter().any(|b| !b.is_finite()) {
        return Err(StoreError::InvalidBuckets("bucket bounds must be finite".into()));
    }
    if buckets.windows(2).any(|w| w[0] >= w[1]) {
        return Err(StoreError::InvalidBuckets("bucket bounds must be strictly ascending".into()));
    }
    Ok(())
}

/// A registered metric family.
#[derive(Clone)]
pub enum Instrument {
    Counter(Arc<CounterVec>),
    Gauge(Arc<GaugeVec>),
    Histogram(Arc<HistogramVec>),
}

impl Instrument {
    pub fn name(&self) -> &str {
        match self {
            Instrument::Counter(c) => &c.desc.name,
            Instrument::Gauge(g) => &g.desc.name,
            Instrument::Histogram(h) => &h.desc.name,
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            Instrument::Counter(c) => c.render(out),
            Instrument::Gauge(g) => g.render(out),
            Instrument::Histogram(h) => h.render(out),
        }
    }
}

impl From<Arc<CounterVec>> for Instrument {
    fn from(c: Arc<CounterVec>) -> Self {
        Instrument::Counter(c)
    }
}

impl From<Arc<GaugeVec>> for Instrument {
    fn from(g: Arc<GaugeVec>) -> Self {
        Instrument::Gauge(g)
    }
}

impl From<Arc<HistogramVec>> for Instrument {
    fn from(h: Arc<HistogramVec>) -> Self {
        Instrument::Histogram(h)
    }
}

/// Source of metric families computed at scrape time (process stats etc).
pub trait Collector: Send + Sync {
    /// Family names this collector emits, used for duplicate detection.
    fn names(&self) -> Vec<&'static str>;
    /// Append families in text exposition format.
    fn collect(&self, out: &mut String);
}

/// Process-wide set of uniquely named instruments plus default collectors.
///
/// Built during startup (`&mut self` registration) and shared read-only
/// afterwards; instrument values mutate through their own atomics.
#[derive(Default)]
pub struct Registry {
    instruments: Vec<Instrument>,
    collectors: Vec<Box<dyn Collector>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_taken(&self, name: &str) -> bool {
        self.instruments.iter().any(|i| i.name() == name)
            || self
                .collectors
                .iter()
                .any(|c| c.names().iter().any(|n| *n == name))
    }

    /// Add an instrument. Fails if any family already uses its name.
    pub fn register(&mut self, instrument: impl Into<Instrument>) -> Result<()> {
        let instrument = instrument.into();
        if self.is_taken(instrument.name()) {
            return Err(StoreError::DuplicateMetricName(instrument.name().to_string()));
        }
        tracing::debug!(metric = %instrument.name(), "metric registered");
        self.instruments.push(instrument);
        Ok(())
    }

    /// Add a default collector. Fails if any of its families collide.
    pub fn add_collector(&mut self, collector: impl Collector + 'static) -> Result<()> {
        if let Some(dup) = collector.names().into_iter().find(|n| self.is_taken(n)) {
            return Err(StoreError::DuplicateMetricName(dup.to_string()));
        }
        self.collectors.push(Box::new(collector));
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.instruments.iter().map(Instrument::name).collect()
    }

    /// Render every family in text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for i in &self.instruments {
            i.render(&mut out);
        }
        for c in &self.collectors {
            c.collect(&mut out);
        }
        out
    }
}
