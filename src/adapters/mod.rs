//! Infrastructure Adapters
//!
//! Adapter implementations for the domain ports, following the
//! Port/Adapter (Hexagonal) architecture pattern.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            Ports (crate::domain)             │
//! │        Clock │ SystemInfoProvider            │
//! └─────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │           Adapters (This Module)             │
//! │  SystemClock │ HostSystemInfoProvider        │
//! └─────────────────────────────────────────────┘
//! ```

mod clock;
mod host;

pub use clock::SystemClock;
pub use host::{
    disk_usage_percent, filesystem_space, DiskSpace, HostSystemInfoProvider, RUNTIME_VERSION,
};
