//! Web server exposing the Prometheus scrape endpoint.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;

use crate::error::{ExporterError, Result};
use crate::metrics::PlugMetrics;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Start the web server and serve until the process terminates.
pub async fn start_web_server(config: WebConfig, metrics: Arc<PlugMetrics>) -> Result<()> {
    let app = create_app(metrics);

    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| ExporterError::config_error(format!("Invalid bind address: {e}")))?;

    info!("Starting exporter web server on http://{addr}");
    info!("Scrape endpoint: http://{addr}/metrics");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::web_server_error(format!("Server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_failure_is_an_io_error() {
        // Occupy a port, then ask the server to bind the same one.
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let metrics = Arc::new(PlugMetrics::new().unwrap());
        let config = WebConfig::new("127.0.0.1", port);
        let result = start_web_server(config, metrics).await;

        assert!(matches!(result, Err(ExporterError::Io(_))));
    }

    #[tokio::test]
    async fn test_invalid_bind_address_is_a_config_error() {
        let metrics = Arc::new(PlugMetrics::new().unwrap());
        let config = WebConfig::new("not-an-address", 0);
        let result = start_web_server(config, metrics).await;

        assert!(matches!(result, Err(ExporterError::Config(_))));
    }
}
