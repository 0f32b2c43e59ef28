//! HTTP handlers for the exporter endpoints.

use crate::metrics::PlugMetrics;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;
use tracing::error;

/// Render every registered gauge in Prometheus text exposition format.
///
/// Purely a read of the registry; never triggers a poll. Rendering is total
/// over the fixed metric set, so a failure here indicates an encoder bug.
pub async fn metrics(State(metrics): State<Arc<PlugMetrics>>) -> Response {
    match metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, metrics.format_type())],
            body,
        )
            .into_response(),
        Err(err) => {
            error!("failed to encode metrics: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Minimal landing page pointing scrapers (and humans) at `/metrics`.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Shelly Plug Exporter</title>
</head>
<body>
    <h1>Shelly Plug Exporter</h1>
    <p><a href="/metrics">Metrics</a></p>
</body>
</html>
"#;
