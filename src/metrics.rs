//! Prometheus metrics, following the `try_create_*`-then-register pattern of
//! `runtime/runtime/src/metrics.rs` (there layered on `near_o11y::metrics`;
//! reimplemented directly against the `prometheus` crate here since this
//! crate is standalone). These are process-wide, matching the teacher's
//! convention of one global registry per metric name rather than one
//! registry per `Scheduler` instance.

use std::sync::LazyLock;

use prometheus::{Histogram, HistogramOpts, IntCounter, IntGauge};

fn try_create_int_counter(name: &str, help: &str) -> prometheus::Result<IntCounter> {
    let counter = IntCounter::new(name, help)?;
    prometheus::register(Box::new(counter.clone()))?;
    Ok(counter)
}

fn try_create_int_gauge(name: &str, help: &str) -> prometheus::Result<IntGauge> {
    let gauge = IntGauge::new(name, help)?;
    prometheus::register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

fn try_create_histogram(name: &str, help: &str) -> prometheus::Result<Histogram> {
    let histogram = Histogram::with_opts(HistogramOpts::new(name, help))?;
    prometheus::register(Box::new(histogram.clone()))?;
    Ok(histogram)
}

pub static REQUESTS_ARRIVED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    try_create_int_counter(
        "sstf_requests_arrived_total",
        "Number of requests handed to the scheduler via add_request",
    )
    .unwrap()
});

pub static REQUESTS_DISPATCHED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    try_create_int_counter(
        "sstf_requests_dispatched_total",
        "Number of requests submitted to the consumer via dispatch",
    )
    .unwrap()
});

pub static DISPATCH_BATCHES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    try_create_int_counter(
        "sstf_dispatch_batches_total",
        "Number of dispatch() calls that performed a non-empty drain",
    )
    .unwrap()
});

pub static REAL_SEEK_TOTAL: LazyLock<IntGauge> = LazyLock::new(|| {
    try_create_int_gauge(
        "sstf_real_seek_total",
        "Cumulative SSTF head movement in sectors, across all dispatches",
    )
    .unwrap()
});

pub static SIM_SEEK_TOTAL: LazyLock<IntGauge> = LazyLock::new(|| {
    try_create_int_gauge(
        "sstf_sim_seek_total",
        "Cumulative FCFS-simulated head movement in sectors, across all arrivals",
    )
    .unwrap()
});

pub static DISPATCH_DURATION_SECONDS: LazyLock<Histogram> = LazyLock::new(|| {
    try_create_histogram(
        "sstf_dispatch_duration_seconds",
        "Wall-clock time spent inside a single dispatch() drain loop",
    )
    .unwrap()
});
