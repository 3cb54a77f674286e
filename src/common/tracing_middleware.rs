//! Structured request logging
//!
//! Every request gets a request ID (taken from `X-Request-ID` when the caller
//! supplies one), a span carrying that ID, and a start/completion log line.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderValue, Request, Response},
    middleware::Next,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Generate a new unique request ID
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Middleware that adds a request ID and structured logging to each request
pub async fn request_tracing_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let start = Instant::now();

    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(generate_request_id);

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
        client_ip = %client_ip,
    );

    async move {
        info!("Request started");

        let mut response = next.run(request).await;

        let duration = start.elapsed();
        let status = response.status();

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        if status.is_success() {
            info!(
                status = %status.as_u16(),
                duration_ms = %duration.as_millis(),
                "Request completed"
            );
        } else if status.is_client_error() {
            warn!(
                status = %status.as_u16(),
                duration_ms = %duration.as_millis(),
                "Client error"
            );
        } else {
            warn!(
                status = %status.as_u16(),
                duration_ms = %duration.as_millis(),
                "Server error"
            );
        }

        response
    }
    .instrument(span)
    .await
}
