//! HTTP API for the control server
//!
//! A single resource at `/`:
//! - `GET /` returns the quorum value, or `-1` with a 500 when there is none
//! - `POST /` replicates the decimal value in the body
//!
//! Every other method or path is a 404.

use crate::common::tracing_middleware::request_tracing_middleware;
use crate::common::{Error, Result};
use crate::coordinator::control::ControlPlane;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Body returned by `GET /` when no value has a majority
pub const NO_VALUE: &str = "-1";

#[derive(Clone)]
pub struct CoordState {
    pub control: Arc<ControlPlane>,
}

/// Creates the HTTP router
pub fn create_router(state: CoordState) -> Router {
    Router::new()
        .route(
            "/",
            get(read_value)
                .post(write_value)
                .head(not_found)
                .fallback(not_found),
        )
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_tracing_middleware)),
        )
        .with_state(state)
}

/// Reads the current value from a majority of vaults.
async fn read_value(State(state): State<CoordState>) -> impl IntoResponse {
    let control = state.control.clone();
    match detached(async move { control.read().await }).await {
        Ok(value) => (StatusCode::OK, value.to_string()),
        Err(e) => (e.to_http_status(), NO_VALUE.to_string()),
    }
}

/// Writes the body value to every vault; 200 only when a majority acknowledged.
async fn write_value(
    State(state): State<CoordState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    // An unreadable or oversized body is as invalid as a non-integer one
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let e = Error::InvalidInput(rejection.body_text());
            tracing::warn!("Could not read body: {}", rejection);
            return (e.to_http_status(), e.to_string());
        }
    };

    let control = state.control.clone();
    match detached(async move { control.write(&body).await }).await {
        Ok(receipt) if receipt.committed => (StatusCode::OK, receipt.message()),
        Ok(receipt) => (StatusCode::INTERNAL_SERVER_ERROR, receipt.message()),
        Err(e) => (e.to_http_status(), e.to_string()),
    }
}

async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}

/// Run a request's quorum work on its own task so a client hanging up does
/// not cancel vault calls or a pending commit.
async fn detached<T, F>(work: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(work)
        .await
        .map_err(|e| Error::Internal(format!("request task failed: {}", e)))?
}
