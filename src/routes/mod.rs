//! Routers. [`app`] is what the binary serves.

mod api;
mod service;

pub use api::api_routes;
pub use service::service_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// API routes plus health/readiness, with request tracing and a body size limit.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(service_routes(state.clone()))
        .merge(api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES)),
        )
}
