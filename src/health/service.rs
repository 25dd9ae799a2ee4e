//! Health Service
//!
//! Assembles the responses of the three read-only endpoints. Each call is
//! independent: it reads the clock, optionally queries the host, and returns
//! a freshly built value.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use futures::FutureExt;
use tracing::{error, info, warn};

use crate::adapters::{HostSystemInfoProvider, SystemClock};
use crate::domain::ports::{Clock, SystemInfoProvider};
use crate::domain::{Banner, DetailedHealth, HealthStatus, SimpleHealth, SystemInfoReport};
use crate::error::Result;

/// Service name reported by the banner
pub const SERVICE_NAME: &str = "Health API Service";

/// API version reported by the banner
pub const API_VERSION: &str = "1.0.0";

/// Path of the interactive API documentation
pub const DOCS_PATH: &str = "/docs";

/// Collect host metrics, degrading to the unavailable marker on failure.
///
/// Provider errors and panics are logged here and never reach the caller.
pub async fn collect_system_info(provider: &dyn SystemInfoProvider) -> SystemInfoReport {
    match AssertUnwindSafe(provider.gather()).catch_unwind().await {
        Ok(Ok(info)) => SystemInfoReport::Available(info),
        Ok(Err(e)) => {
            error!("Error gathering system info: {}", e);
            SystemInfoReport::unavailable()
        }
        Err(_) => {
            error!("Error gathering system info: provider panicked");
            SystemInfoReport::unavailable()
        }
    }
}

/// Format a UTC instant as ISO-8601 with microseconds and `+00:00` offset.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Health responder shared by all request handlers.
#[derive(Clone)]
pub struct HealthService {
    clock: Arc<dyn Clock>,
    provider: Arc<dyn SystemInfoProvider>,
}

impl HealthService {
    /// Create a service with explicit collaborators.
    pub fn new(clock: Arc<dyn Clock>, provider: Arc<dyn SystemInfoProvider>) -> Self {
        Self { clock, provider }
    }

    /// Create a service backed by the host clock and host metrics.
    pub fn host() -> Self {
        Self::new(
            Arc::new(SystemClock),
            Arc::new(HostSystemInfoProvider::new()),
        )
    }

    /// Static service banner.
    pub fn banner(&self) -> Banner {
        Banner {
            message: SERVICE_NAME.to_string(),
            version: API_VERSION.to_string(),
            docs: DOCS_PATH.to_string(),
        }
    }

    /// Detailed health with embedded host metrics.
    pub async fn detailed_health(&self) -> Result<DetailedHealth> {
        info!("Health check requested");

        let timestamp = format_timestamp(self.clock.now()?);
        let system_info = collect_system_info(self.provider.as_ref()).await;
        if !system_info.is_available() {
            warn!("Returning degraded health response");
        }

        let response = DetailedHealth {
            status: HealthStatus::Healthy,
            timestamp,
            system_info,
        };

        info!("Health check completed successfully");
        Ok(response)
    }

    /// Minimal health: status and timestamp only.
    pub fn simple_health(&self) -> Result<SimpleHealth> {
        Ok(SimpleHealth {
            status: HealthStatus::Healthy,
            timestamp: format_timestamp(self.clock.now()?),
        })
    }
}

impl Default for HealthService {
    fn default() -> Self {
        Self::host()
    }
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SystemInfo, SYSTEM_INFO_UNAVAILABLE};
    use crate::error::Error;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> Result<DateTime<Utc>> {
            Ok(self.0)
        }
    }

    struct BrokenClock;

    impl Clock for BrokenClock {
        fn now(&self) -> Result<DateTime<Utc>> {
            Err(Error::Clock("injected clock failure".to_string()))
        }
    }

    struct FixedProvider;

    #[async_trait]
    impl SystemInfoProvider for FixedProvider {
        async fn gather(&self) -> Result<SystemInfo> {
            Ok(SystemInfo {
                runtime_version: "rustc 1.80.0".to_string(),
                platform: "Linux-6.1.0-x86_64".to_string(),
                cpu_count: 4,
                memory_total: 8_000,
                memory_available: 2_000,
                disk_usage: 12.5,
            })
        }
    }

    struct PanickingProvider;

    #[async_trait]
    impl SystemInfoProvider for PanickingProvider {
        async fn gather(&self) -> Result<SystemInfo> {
            panic!("sysinfo exploded")
        }
    }

    struct BrokenProvider;

    #[async_trait]
    impl SystemInfoProvider for BrokenProvider {
        async fn gather(&self) -> Result<SystemInfo> {
            Err(Error::SystemInfo("injected provider failure".to_string()))
        }
    }

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 13, 10, 30, 0).unwrap()
    }

    fn service(clock: impl Clock + 'static, provider: impl SystemInfoProvider + 'static) -> HealthService {
        HealthService::new(Arc::new(clock), Arc::new(provider))
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(fixed_instant()),
            "2025-01-13T10:30:00.000000+00:00"
        );
    }

    #[test]
    fn test_banner() {
        let banner = service(FixedClock(fixed_instant()), FixedProvider).banner();
        assert_eq!(banner.message, "Health API Service");
        assert_eq!(banner.version, "1.0.0");
        assert_eq!(banner.docs, "/docs");
    }

    #[test]
    fn test_simple_health() {
        let svc = service(FixedClock(fixed_instant()), FixedProvider);
        let health = svc.simple_health().unwrap();
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.timestamp, "2025-01-13T10:30:00.000000+00:00");
    }

    #[test]
    fn test_simple_health_clock_failure() {
        let svc = service(BrokenClock, FixedProvider);
        assert_matches!(svc.simple_health(), Err(Error::Clock(_)));
    }

    #[tokio::test]
    async fn test_detailed_health() {
        let svc = service(FixedClock(fixed_instant()), FixedProvider);
        let health = svc.detailed_health().await.unwrap();

        assert!(!health.is_degraded());
        assert_eq!(health.system_info.system_info().unwrap().cpu_count, 4);
    }

    #[tokio::test]
    async fn test_detailed_health_degrades_on_provider_failure() {
        let svc = service(FixedClock(fixed_instant()), BrokenProvider);
        let health = svc.detailed_health().await.unwrap();

        assert!(health.is_degraded());
        assert_eq!(
            health.system_info,
            SystemInfoReport::Unavailable {
                error: SYSTEM_INFO_UNAVAILABLE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_detailed_health_clock_failure() {
        let svc = service(BrokenClock, FixedProvider);
        let err = svc.detailed_health().await.unwrap_err();
        assert!(err.to_string().contains("injected clock failure"));
    }

    #[test]
    fn test_collect_swallows_errors() {
        let report = tokio_test::block_on(collect_system_info(&BrokenProvider));
        assert_eq!(report, SystemInfoReport::unavailable());

        let report = tokio_test::block_on(collect_system_info(&FixedProvider));
        assert!(report.is_available());
    }

    #[tokio::test]
    async fn test_collect_swallows_panics() {
        let report = collect_system_info(&PanickingProvider).await;
        assert_eq!(report, SystemInfoReport::unavailable());
    }

    #[tokio::test]
    async fn test_detailed_health_degrades_on_provider_panic() {
        let svc = service(FixedClock(fixed_instant()), PanickingProvider);
        let health = svc.detailed_health().await.unwrap();
        assert!(health.is_degraded());
    }
}
