//! Domain Ports
//!
//! Trait abstractions for the host-facing collaborators of the health
//! service. Adapters in [`crate::adapters`] provide the real implementations;
//! tests swap in failing ones.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               HealthService                  │
//! │      ┌─────────┐        ┌──────────────────┐ │
//! │      │  Clock  │        │SystemInfoProvider│ │
//! │      └─────────┘        └──────────────────┘ │
//! └──────────────────────────────────────────────┘
//!              │                   │
//!              ▼                   ▼
//!       SystemClock        HostSystemInfoProvider
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::model::SystemInfo;
use crate::error::Result;

// =============================================================================
// Clock Port
// =============================================================================

/// Source of wall-clock time.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> Result<DateTime<Utc>>;
}

// =============================================================================
// System Info Port
// =============================================================================

/// Port for host metric collection.
///
/// # Example
///
/// ```ignore
/// struct FixedProvider(SystemInfo);
///
/// #[async_trait]
/// impl SystemInfoProvider for FixedProvider {
///     async fn gather(&self) -> Result<SystemInfo> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait SystemInfoProvider: Send + Sync {
    /// Query the host for a fresh snapshot.
    async fn gather(&self) -> Result<SystemInfo>;
}
