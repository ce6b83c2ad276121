//! Request timing middleware.

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

/// Response header carrying the handling time in seconds.
pub const PROCESS_TIME_HEADER: &str = "x-process-time";

/// Requests slower than this are logged at `warn`.
const SLOW_REQUEST: Duration = Duration::from_millis(500);

/// Time the rest of the stack and report it in [`PROCESS_TIME_HEADER`].
pub async fn track_time(request: Request, next: Next) -> Response {
    let uri = request.uri().clone();
    let started = Instant::now();

    let mut response = next.run(request).await;

    let elapsed = started.elapsed();
    if let Ok(value) = HeaderValue::from_str(&format!("{:.6}", elapsed.as_secs_f64())) {
        response.headers_mut().insert(PROCESS_TIME_HEADER, value);
    }
    if elapsed > SLOW_REQUEST {
        warn!(%uri, elapsed_ms = elapsed.as_millis() as u64, "slow request");
    }

    response
}
