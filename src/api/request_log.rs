use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Log one line per request with its status and latency.
pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = started.elapsed();
    if status.is_server_error() {
        log::warn!("{method} {path} -> {status} in {elapsed:?}");
    } else {
        log::info!("{method} {path} -> {status} in {elapsed:?}");
    }

    response
}
