//! Device-side types: the RPC status schema and the HTTP client that reads it.

pub mod client;
pub mod status;

// Re-export commonly used items
pub use client::{DeviceClient, STATUS_PATH};
pub use status::DeviceStatus;
