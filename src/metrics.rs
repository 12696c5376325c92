use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("friendcard_requests_total", "Total number of card requests").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("friendcard_rate_limited_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref RENDER_FAILURES: Counter =
        register_counter!("friendcard_render_failures_total", "Admitted requests that failed to render").unwrap();
    pub static ref SWEPT_RECORDS: Counter =
        register_counter!("friendcard_swept_records_total", "Rate limit records evicted by sweeps").unwrap();
    pub static ref RENDER_LATENCY: Histogram = register_histogram!(
        "friendcard_render_latency_seconds",
        "Card render latency in seconds"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: Gauge =
        register_gauge!("friendcard_tracked_clients", "Current number of rate limit records").unwrap();
}
