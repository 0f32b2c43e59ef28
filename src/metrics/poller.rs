//! Fixed-interval device polling loop.

use crate::device::DeviceClient;
use crate::error::Result;
use crate::metrics::registry::PlugMetrics;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Polls a device on a fixed interval and records each status into the
/// shared gauge registry.
///
/// Failed cycles are logged and skipped; there is no retry or backoff within
/// a cycle, and the gauges keep their previous values until the device is
/// reachable again. The sleep is not adjusted for request latency.
pub struct Poller {
    client: DeviceClient,
    metrics: Arc<PlugMetrics>,
    interval: Duration,
}

impl Poller {
    /// Create a poller with the default interval.
    pub fn new(client: DeviceClient, metrics: Arc<PlugMetrics>) -> Self {
        Self {
            client,
            metrics,
            interval: Duration::from_secs(crate::DEFAULT_POLL_INTERVAL_SECS),
        }
    }

    /// Override the poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Run one fetch-decode-record cycle.
    pub async fn poll_once(&self) -> Result<()> {
        let status = self.client.fetch_status().await?;
        self.metrics.record_status(&status);
        debug!(mac = %status.sys.mac, "recorded device status");
        Ok(())
    }

    /// Run the polling loop until `shutdown` is cancelled.
    ///
    /// The token is checked at the top of each cycle and also interrupts the
    /// inter-cycle sleep, so the loop stops promptly when cancelled.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            device = %self.client.base_url(),
            interval_secs = self.interval.as_secs(),
            "starting device poller"
        );

        loop {
            if shutdown.is_cancelled() {
                break;
            }

            if let Err(err) = self.poll_once().await {
                warn!("device poll failed, skipping cycle: {err}");
            }

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = time::sleep(self.interval) => {}
            }
        }

        info!("device poller stopped");
    }
}
