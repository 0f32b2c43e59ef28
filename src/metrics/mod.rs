//! Exported gauges and the background poller that feeds them.

pub mod poller;
pub mod registry;

// Re-export commonly used items
pub use poller::Poller;
pub use registry::PlugMetrics;
