//! # Prometheus Metrics
//!
//! Prometheus registry and HTTP middleware for the VRM API.
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Domain-level gauges (vendor counts per risk level, assessment
//! workflow counts, average security score) are updated on each `/metrics`
//! scrape (pull model): see the metrics handler in `lib.rs`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    core::Collector, Encoder, Gauge, GaugeVec, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    // -- HTTP middleware metrics (push model) --
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    // -- Domain gauges (pull model, updated on /metrics scrape) --
    vendors_total: GaugeVec,
    assessments_pending: Gauge,
    assessments_overdue: Gauge,
    security_score_avg: Gauge,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("vrm_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "vrm_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new("vrm_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let vendors_total = GaugeVec::new(
            Opts::new("vrm_vendors_total", "Total vendors by risk level"),
            &["risk_level"],
        )
        .expect("metric can be created");

        let assessments_pending = Gauge::new(
            "vrm_assessments_pending",
            "Vendors whose assessment is pending",
        )
        .expect("metric can be created");

        let assessments_overdue = Gauge::new(
            "vrm_assessments_overdue",
            "Vendors whose assessment is overdue",
        )
        .expect("metric can be created");

        let security_score_avg = Gauge::new(
            "vrm_security_score_avg",
            "Average security score across all vendors",
        )
        .expect("metric can be created");

        // Register all metrics.
        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(vendors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(assessments_pending.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(assessments_overdue.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(security_score_avg.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                vendors_total,
                assessments_pending,
                assessments_overdue,
                security_score_avg,
            }),
        }
    }

    /// Return current total request count (sum across all labels).
    pub fn requests(&self) -> u64 {
        let mut total = 0u64;
        let families = self.inner.http_requests_total.collect();
        for mf in &families {
            for m in mf.get_metric() {
                total += m.get_counter().get_value() as u64;
            }
        }
        total
    }

    /// Return current total error count (sum across all labels).
    pub fn errors(&self) -> u64 {
        let mut total = 0u64;
        let families = self.inner.http_errors_total.collect();
        for mf in &families {
            for m in mf.get_metric() {
                total += m.get_counter().get_value() as u64;
            }
        }
        total
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    // -- Domain gauge accessors (used by the /metrics handler) --

    /// Access the per-risk-level vendor gauge for updating.
    pub fn vendors_total(&self) -> &GaugeVec {
        &self.inner.vendors_total
    }

    /// Access the pending assessments gauge for updating.
    pub fn assessments_pending(&self) -> &Gauge {
        &self.inner.assessments_pending
    }

    /// Access the overdue assessments gauge for updating.
    pub fn assessments_overdue(&self) -> &Gauge {
        &self.inner.assessments_overdue
    }

    /// Access the average security score gauge for updating.
    pub fn security_score_avg(&self) -> &Gauge {
        &self.inner.security_score_avg
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a request path by replacing UUID segments with `{id}`.
///
/// Prevents cardinality explosion in Prometheus labels. UUIDs are detected
/// as 32-hex-char strings with optional hyphens (standard UUID format).
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            // Match standard UUID: 8-4-4-4-12 hex chars with hyphens
            if segment.len() == 36
                && segment.chars().enumerate().all(|(i, c)| {
                    if i == 8 || i == 13 || i == 18 || i == 23 {
                        c == '-'
                    } else {
                        c.is_ascii_hexdigit()
                    }
                })
            {
                "{id}"
            } else if segment.len() == 32 && segment.chars().all(|c| c.is_ascii_hexdigit()) {
                // UUID without hyphens
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Middleware that records HTTP request metrics via Prometheus.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        let status = response.status().as_u16();
        m.record_request(&method, &path, status, duration);
    }

    response
}
