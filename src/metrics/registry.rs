//! Gauge registry for the exported plug metrics.
//!
//! All gauges live in one explicit [`prometheus::Registry`] owned by
//! [`PlugMetrics`], which is constructed once at startup and shared between
//! the poller (writer) and the exposition handler (reader). Individual gauge
//! reads and writes are atomic; no cross-gauge snapshot consistency is
//! promised to scrapers.

use crate::device::DeviceStatus;
use crate::error::Result;
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::time::{SystemTime, UNIX_EPOCH};

/// Label row reported when no firmware update is pending.
const VERSION_CURRENT: &str = "current";

/// The fixed set of gauges this exporter maintains.
pub struct PlugMetrics {
    registry: Registry,
    apower: GaugeVec,
    voltage: GaugeVec,
    current: GaugeVec,
    aenergy_total: GaugeVec,
    temperature: GaugeVec,
    output: GaugeVec,
    available_updates: GaugeVec,
    last_updated: GaugeVec,
}

impl PlugMetrics {
    /// Create the registry and register every gauge.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let apower = GaugeVec::new(
            Opts::new("shellyplug_apower", "Instantaneous power in W"),
            &["mac"],
        )?;
        let voltage = GaugeVec::new(Opts::new("shellyplug_voltage", "Voltage in V"), &["mac"])?;
        let current = GaugeVec::new(Opts::new("shellyplug_current", "Current in A"), &["mac"])?;
        let aenergy_total = GaugeVec::new(
            Opts::new("shellyplug_aenergy_total", "Total energy so far in Wh"),
            &["mac"],
        )?;
        let temperature = GaugeVec::new(
            Opts::new("shellyplug_temperature", "Temperature of Shellyplug in °C"),
            &["mac"],
        )?;
        let output = GaugeVec::new(
            Opts::new(
                "shellyplug_output",
                "1 if the output channel is currently on, 0 otherwise",
            ),
            &["mac"],
        )?;
        let available_updates = GaugeVec::new(
            Opts::new(
                "shellyplug_available_updates_info",
                "Information about available updates",
            ),
            &["mac", "version"],
        )?;
        let last_updated = GaugeVec::new(
            Opts::new(
                "shellyplug_last_updated",
                "Unix timestamp of the last successful device poll",
            ),
            &["mac"],
        )?;

        registry.register(Box::new(apower.clone()))?;
        registry.register(Box::new(voltage.clone()))?;
        registry.register(Box::new(current.clone()))?;
        registry.register(Box::new(aenergy_total.clone()))?;
        registry.register(Box::new(temperature.clone()))?;
        registry.register(Box::new(output.clone()))?;
        registry.register(Box::new(available_updates.clone()))?;
        registry.register(Box::new(last_updated.clone()))?;

        Ok(Self {
            registry,
            apower,
            voltage,
            current,
            aenergy_total,
            temperature,
            output,
            available_updates,
            last_updated,
        })
    }

    /// Record one successfully decoded status into the gauges.
    ///
    /// The update-availability vec is fully cleared before the single active
    /// row is written, so a version row from before a firmware update never
    /// lingers after the update is applied.
    pub fn record_status(&self, status: &DeviceStatus) {
        let mac = status.sys.mac.as_str();

        self.apower.with_label_values(&[mac]).set(status.switch.apower);
        self.voltage
            .with_label_values(&[mac])
            .set(status.switch.voltage);
        self.current
            .with_label_values(&[mac])
            .set(status.switch.current);
        self.aenergy_total
            .with_label_values(&[mac])
            .set(status.switch.aenergy.total);
        self.temperature
            .with_label_values(&[mac])
            .set(status.switch.temperature.celsius);
        self.output
            .with_label_values(&[mac])
            .set(if status.switch.output { 1.0 } else { 0.0 });

        self.available_updates.reset();
        let version = status.update_version().unwrap_or(VERSION_CURRENT);
        self.available_updates
            .with_label_values(&[mac, version])
            .set(1.0);

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.last_updated.with_label_values(&[mac]).set(now as f64);
    }

    /// Gather the current state of every registered metric family.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render all metrics in Prometheus text exposition format.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Content type of the text exposition format.
    pub fn format_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}
