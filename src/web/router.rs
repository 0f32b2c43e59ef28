//! Web application router setup.

use crate::metrics::PlugMetrics;
use crate::web::handlers;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the axum application serving the exposition endpoint.
pub fn create_app(metrics: Arc<PlugMetrics>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/metrics", get(handlers::metrics))
        .with_state(metrics)
        .layer(TraceLayer::new_for_http())
}
