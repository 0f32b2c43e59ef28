//! # Shelly Plug Exporter
//!
//! A small Prometheus exporter for Shelly Plug smart plugs (Gen2 RPC API).
//! A background task polls the device's local `Shelly.GetStatus` endpoint on
//! a fixed interval and records power, voltage, current, energy, temperature,
//! relay state, and firmware-update availability into labeled gauges, which
//! are served in text exposition format at `/metrics`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use shellyplug_exporter::{start_web_server, DeviceClient, PlugMetrics, Poller, WebConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let metrics = Arc::new(PlugMetrics::new()?);
//!     let client = DeviceClient::new("http://192.168.1.50")?;
//!
//!     let shutdown = CancellationToken::new();
//!     tokio::spawn(Poller::new(client, metrics.clone()).run(shutdown.clone()));
//!
//!     start_web_server(WebConfig::default(), metrics).await?;
//!     shutdown.cancel();
//!     Ok(())
//! }
//! ```

pub mod device;
pub mod error;
pub mod metrics;
pub mod web;

// Re-export public API
pub use device::{DeviceClient, DeviceStatus};
pub use error::{ExporterError, Result};
pub use metrics::{PlugMetrics, Poller};
pub use web::{start_web_server, WebConfig};

/// The default poll interval in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// The default web server port
pub const DEFAULT_METRICS_PORT: u16 = 2112;

/// Name of the environment variable holding the device base URL
pub const DEVICE_URL_ENV: &str = "SHELLYPLUG_URL";
