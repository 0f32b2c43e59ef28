//! Web server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the metrics web server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Host to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_METRICS_PORT,
        }
    }
}

impl WebConfig {
    /// Create a new web configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Set the host for the web server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port for the web server.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Get the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WebConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, crate::DEFAULT_METRICS_PORT);
    }

    #[test]
    fn test_bind_address() {
        let config = WebConfig::new("127.0.0.1", 9100);
        assert_eq!(config.bind_address(), "127.0.0.1:9100");
    }

    #[test]
    fn test_builder_methods() {
        let config = WebConfig::default()
            .with_host("192.168.1.10")
            .with_port(9781);
        assert_eq!(config.bind_address(), "192.168.1.10:9781");
    }
}
