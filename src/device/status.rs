//! Data structures for the device status response.
//!
//! The Gen2 RPC status response carries far more than this exporter needs
//! (wifi, cloud, mqtt, bluetooth, ...); only the fields below are decoded
//! and everything else is ignored. Every field defaults when absent so a
//! partial response still decodes.

use serde::{Deserialize, Serialize};

/// Decoded subset of a `Shelly.GetStatus` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Relay/measurement state of the first (and only) switch channel
    #[serde(rename = "switch:0", default)]
    pub switch: SwitchStatus,
    /// Device-level system information
    #[serde(default)]
    pub sys: SysStatus,
}

/// Readings for one switch channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwitchStatus {
    /// Whether the output relay is currently on
    #[serde(default)]
    pub output: bool,
    /// Instantaneous active power in W
    #[serde(default)]
    pub apower: f64,
    /// Supply voltage in V
    #[serde(default)]
    pub voltage: f64,
    /// Current in A
    #[serde(default)]
    pub current: f64,
    /// Accumulated energy counter
    #[serde(default)]
    pub aenergy: EnergyCounter,
    /// Internal device temperature
    #[serde(default)]
    pub temperature: Temperature,
}

/// Accumulated energy counter for a switch channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnergyCounter {
    /// Total energy consumed in Wh
    #[serde(default)]
    pub total: f64,
}

/// Internal device temperature reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Temperature {
    /// Temperature in °C
    #[serde(rename = "tC", default)]
    pub celsius: f64,
}

/// Device-level system information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SysStatus {
    /// Device MAC address, used as the identity label on every metric
    #[serde(default)]
    pub mac: String,
    /// Firmware update availability
    #[serde(default)]
    pub available_updates: AvailableUpdates,
}

/// Firmware update availability as reported by the device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableUpdates {
    #[serde(default)]
    pub stable: UpdateChannel,
}

/// A single firmware release channel entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateChannel {
    /// Version string, empty when the device is up to date
    #[serde(default)]
    pub version: String,
}

impl DeviceStatus {
    /// The pending stable firmware version, if the device reports one.
    pub fn update_version(&self) -> Option<&str> {
        let version = self.sys.available_updates.stable.version.as_str();
        if version.is_empty() {
            None
        } else {
            Some(version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_payload() {
        let body = r#"{
            "switch:0": {
                "output": true,
                "apower": 12.5,
                "voltage": 230.1,
                "current": 0.054,
                "aenergy": {"total": 100.2},
                "temperature": {"tC": 41.3}
            },
            "sys": {"mac": "AA:BB:CC", "available_updates": {}}
        }"#;

        let status: DeviceStatus = serde_json::from_str(body).unwrap();
        assert!(status.switch.output);
        assert_eq!(status.switch.apower, 12.5);
        assert_eq!(status.switch.voltage, 230.1);
        assert_eq!(status.switch.current, 0.054);
        assert_eq!(status.switch.aenergy.total, 100.2);
        assert_eq!(status.switch.temperature.celsius, 41.3);
        assert_eq!(status.sys.mac, "AA:BB:CC");
        assert_eq!(status.update_version(), None);
    }

    #[test]
    fn test_decode_with_pending_update() {
        let body = r#"{
            "sys": {
                "mac": "AA:BB:CC",
                "available_updates": {"stable": {"version": "1.2.3"}}
            }
        }"#;

        let status: DeviceStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.update_version(), Some("1.2.3"));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let status: DeviceStatus = serde_json::from_str("{}").unwrap();
        assert!(!status.switch.output);
        assert_eq!(status.switch.apower, 0.0);
        assert_eq!(status.switch.aenergy.total, 0.0);
        assert_eq!(status.switch.temperature.celsius, 0.0);
        assert!(status.sys.mac.is_empty());
        assert_eq!(status.update_version(), None);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // Real devices return many more sections than the exporter reads.
        let body = r#"{
            "ble": {},
            "cloud": {"connected": false},
            "wifi": {"sta_ip": "192.168.1.50", "rssi": -54},
            "switch:0": {
                "id": 0,
                "source": "HTTP",
                "output": false,
                "apower": 0.0,
                "aenergy": {"total": 3.2, "by_minute": [0.0, 0.0], "minute_ts": 1}
            },
            "sys": {"mac": "AA:BB:CC", "uptime": 1234}
        }"#;

        let status: DeviceStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.switch.aenergy.total, 3.2);
        assert_eq!(status.sys.mac, "AA:BB:CC");
    }
}
