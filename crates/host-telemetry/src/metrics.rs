//! Prometheus metrics for host startup.
//!
//! All metrics follow the naming convention: `host_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge,
    IntGaugeVec, Opts, Registry, TextEncoder,
};
use std::time::Instant;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Duration of each startup stage
    pub static ref STARTUP_STAGE_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "host_startup_stage_duration_seconds",
            "Time spent in each startup stage"
        ).buckets(exponential_buckets(0.0001, 2.0, 16).expect("bucket parameters are valid")),
        &["stage"]
    ).expect("metric creation failed");

    /// Startup failures by stage
    pub static ref STARTUP_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("host_startup_failures_total", "Aborted startups by failing stage"),
        &["stage"]
    ).expect("metric creation failed");

    /// Registrations in the finalized registry by lifetime
    pub static ref REGISTRATIONS: IntGaugeVec = IntGaugeVec::new(
        Opts::new("host_registrations", "Service registrations by lifetime"),
        &["lifetime"]
    ).expect("metric creation failed");

    /// Singletons constructed during finalize
    pub static ref SINGLETONS_CONSTRUCTED: IntGauge = IntGauge::new(
        "host_singletons_constructed",
        "Singleton instances constructed eagerly at startup"
    ).expect("metric creation failed");

    /// Environment label (value is always 1)
    pub static ref ENVIRONMENT_INFO: IntGaugeVec = IntGaugeVec::new(
        Opts::new("host_environment_info", "Environment the host was classified as"),
        &["environment"]
    ).expect("metric creation failed");

    /// Configuration layers by outcome
    pub static ref CONFIGURATION_SOURCES: IntGaugeVec = IntGaugeVec::new(
        Opts::new("host_configuration_sources", "Configuration layers by status"),
        &["status"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(STARTUP_STAGE_DURATION.clone()),
        Box::new(STARTUP_FAILURES.clone()),
        Box::new(REGISTRATIONS.clone()),
        Box::new(SINGLETONS_CONSTRUCTED.clone()),
        Box::new(ENVIRONMENT_INFO.clone()),
        Box::new(CONFIGURATION_SOURCES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for a startup stage. Observation happens on drop.
pub struct StageTimer {
    stage: &'static str,
    start: Instant,
}

impl StageTimer {
    pub fn start(stage: &'static str) -> Self {
        Self {
            stage,
            start: Instant::now(),
        }
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        STARTUP_STAGE_DURATION
            .with_label_values(&[self.stage])
            .observe(self.start.elapsed().as_secs_f64());
    }
}

pub fn record_stage_failure(stage: &str) {
    STARTUP_FAILURES.with_label_values(&[stage]).inc();
}

pub fn record_registrations(lifetime: &str, count: usize) {
    REGISTRATIONS
        .with_label_values(&[lifetime])
        .set(i64::try_from(count).unwrap_or(i64::MAX));
}

pub fn record_singletons(count: usize) {
    SINGLETONS_CONSTRUCTED.set(i64::try_from(count).unwrap_or(i64::MAX));
}

pub fn record_environment(label: &str) {
    ENVIRONMENT_INFO.reset();
    ENVIRONMENT_INFO.with_label_values(&[label]).set(1);
}

pub fn record_configuration_sources(loaded: usize, skipped: usize) {
    CONFIGURATION_SOURCES
        .with_label_values(&["loaded"])
        .set(i64::try_from(loaded).unwrap_or(i64::MAX));
    CONFIGURATION_SOURCES
        .with_label_values(&["skipped"])
        .set(i64::try_from(skipped).unwrap_or(i64::MAX));
}
