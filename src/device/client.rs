//! HTTP client for the device's local RPC API.

use crate::device::status::DeviceStatus;
use crate::error::{ExporterError, Result};
use std::time::Duration;
use tracing::debug;

/// RPC path of the full status endpoint.
pub const STATUS_PATH: &str = "/rpc/Shelly.GetStatus";

/// Per-request timeout for device calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one Shelly Plug device, addressed by its base URL.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    base_url: String,
    http: reqwest::Client,
}

impl DeviceClient {
    /// Create a client for the device at `base_url` (e.g. `http://192.168.1.50`).
    ///
    /// Fails with a configuration error when the URL is empty; there is no
    /// recovery path for a missing device address.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(ExporterError::config_error("device base URL is empty"));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ExporterError::device_error(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// The device base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and decode the current device status.
    ///
    /// Any non-success status code (>= 300) is treated as a failed fetch.
    pub async fn fetch_status(&self) -> Result<DeviceStatus> {
        let url = format!("{}{}", self.base_url, STATUS_PATH);
        debug!("requesting device status from {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ExporterError::device_error(format!("request to {url} failed: {e}")))?;

        let code = response.status();
        if code.as_u16() >= 300 {
            return Err(ExporterError::device_error(format!(
                "device returned status code {code}"
            )));
        }

        response
            .json::<DeviceStatus>()
            .await
            .map_err(|e| ExporterError::decode_error(e.to_string()))
    }
}
