//! Prometheus metrics collection and the `/metrics` endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct HttpMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
}

static HTTP_METRICS: OnceLock<Option<HttpMetrics>> = OnceLock::new();

/// Counts a request as in flight until dropped.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let tracked = metrics().is_some_and(|metrics| {
            metrics.requests_in_flight.inc();
            true
        });

        Self { tracked }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    }

    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static HttpMetrics> {
    HTTP_METRICS.get_or_init(build_metrics).as_ref()
}

fn register<C>(registry: &Registry, name: &str, collector: C) -> Option<C>
where
    C: Collector + Clone + 'static,
{
    match registry.register(Box::new(collector.clone())) {
        Ok(()) => Some(collector),
        Err(source) => {
            error!("failed to register {name} metric: {source}");
            None
        }
    }
}

fn build_metrics() -> Option<HttpMetrics> {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new(
            "platter_json_http_requests_total",
            "Total HTTP requests partitioned by method, route, status class, and status code.",
        ),
        &["method", "route", "status_class", "status_code"],
    )
    .inspect_err(|source| error!("failed to create requests_total metric: {source}"))
    .ok()?;

    let request_duration_seconds = HistogramVec::new(
        HistogramOpts::new(
            "platter_json_http_request_duration_seconds",
            "HTTP request duration in seconds partitioned by method and route.",
        )
        .buckets(DURATION_BUCKETS.to_vec()),
        &["method", "route"],
    )
    .inspect_err(|source| error!("failed to create request_duration metric: {source}"))
    .ok()?;

    let requests_in_flight = IntGauge::with_opts(Opts::new(
        "platter_json_http_requests_in_flight",
        "Current number of in-flight HTTP requests.",
    ))
    .inspect_err(|source| error!("failed to create in-flight gauge metric: {source}"))
    .ok()?;

    Some(HttpMetrics {
        requests_total: register(&registry, "requests_total", requests_total)?,
        request_duration_seconds: register(
            &registry,
            "request_duration",
            request_duration_seconds,
        )?,
        requests_in_flight: register(&registry, "in-flight", requests_in_flight)?,
        registry,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
