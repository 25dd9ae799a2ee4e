//! Domain Layer
//!
//! Response value objects and the ports the health service depends on.
//!
//! - **Model** (`model.rs`) - Typed endpoint responses and the system info snapshot
//! - **Ports** (`ports.rs`) - Trait abstractions for the clock and host metrics

pub mod model;
pub mod ports;

pub use model::{
    Banner, DetailedHealth, HealthStatus, SimpleHealth, SystemInfo, SystemInfoReport,
    SYSTEM_INFO_UNAVAILABLE,
};
pub use ports::{Clock, SystemInfoProvider};
