//! Domain Value Objects
//!
//! Typed response shapes for the health endpoints. Every value is created
//! fresh per request and serialized once at the HTTP boundary.

use serde::{Deserialize, Serialize};

/// Marker text embedded when host metrics cannot be collected
pub const SYSTEM_INFO_UNAVAILABLE: &str = "Unable to gather system information";

// =============================================================================
// Health Status
// =============================================================================

/// Health status reported by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Service is up and answering
    Healthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "Healthy"),
        }
    }
}

// =============================================================================
// System Info
// =============================================================================

/// Point-in-time snapshot of host metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Version of the toolchain the service was built with
    pub runtime_version: String,
    /// Platform identifier (e.g., Linux-6.1.0-x86_64)
    pub platform: String,
    /// Logical CPU count
    pub cpu_count: usize,
    /// Total memory in bytes
    pub memory_total: u64,
    /// Available memory in bytes, never above `memory_total`
    pub memory_available: u64,
    /// Root filesystem usage, percent in [0, 100]
    pub disk_usage: f64,
}

/// Outcome of a system info collection.
///
/// Serializes either as the plain snapshot or as
/// `{"error": "Unable to gather system information"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemInfoReport {
    /// Metrics were collected
    Available(SystemInfo),
    /// Collection failed; the response is degraded
    Unavailable { error: String },
}

impl SystemInfoReport {
    /// Degraded marker
    pub fn unavailable() -> Self {
        SystemInfoReport::Unavailable {
            error: SYSTEM_INFO_UNAVAILABLE.to_string(),
        }
    }

    /// Check if the report carries real metrics
    pub fn is_available(&self) -> bool {
        matches!(self, SystemInfoReport::Available(_))
    }

    /// Get the snapshot, if any
    pub fn system_info(&self) -> Option<&SystemInfo> {
        match self {
            SystemInfoReport::Available(info) => Some(info),
            SystemInfoReport::Unavailable { .. } => None,
        }
    }
}

impl From<SystemInfo> for SystemInfoReport {
    fn from(info: SystemInfo) -> Self {
        SystemInfoReport::Available(info)
    }
}

// =============================================================================
// Endpoint Responses
// =============================================================================

/// Response of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub message: String,
    pub version: String,
    pub docs: String,
}

/// Response of `GET /health/simple`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleHealth {
    pub status: HealthStatus,
    /// ISO-8601 UTC timestamp with explicit offset
    pub timestamp: String,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedHealth {
    pub status: HealthStatus,
    /// ISO-8601 UTC timestamp with explicit offset
    pub timestamp: String,
    pub system_info: SystemInfoReport,
}

impl DetailedHealth {
    /// Check if metrics could not be collected
    pub fn is_degraded(&self) -> bool {
        !self.system_info.is_available()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_info() -> SystemInfo {
        SystemInfo {
            runtime_version: "rustc 1.80.0".to_string(),
            platform: "Linux-6.1.0-x86_64".to_string(),
            cpu_count: 8,
            memory_total: 16_000_000_000,
            memory_available: 8_000_000_000,
            disk_usage: 42.5,
        }
    }

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(serde_json::to_value(HealthStatus::Healthy).unwrap(), json!("Healthy"));
        assert_eq!(format!("{}", HealthStatus::Healthy), "Healthy");
    }

    #[test]
    fn test_unavailable_marker_shape() {
        let report = SystemInfoReport::unavailable();
        assert!(!report.is_available());
        assert!(report.system_info().is_none());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"error": "Unable to gather system information"})
        );
    }

    #[test]
    fn test_available_report_is_flat() {
        let report = SystemInfoReport::from(sample_info());
        let value = serde_json::to_value(&report).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();

        assert_eq!(keys.len(), 6);
        for key in [
            "runtime_version",
            "platform",
            "cpu_count",
            "memory_total",
            "memory_available",
            "disk_usage",
        ] {
            assert!(keys.contains(&key), "missing {}", key);
        }
    }

    #[test]
    fn test_detailed_health_degraded() {
        let health = DetailedHealth {
            status: HealthStatus::Healthy,
            timestamp: "2025-01-13T00:00:00.000000+00:00".to_string(),
            system_info: SystemInfoReport::unavailable(),
        };
        assert!(health.is_degraded());

        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["status"], "Healthy");
        assert_eq!(value["system_info"]["error"], SYSTEM_INFO_UNAVAILABLE);
    }

    #[test]
    fn test_untagged_deserialization() {
        let report: SystemInfoReport =
            serde_json::from_value(serde_json::to_value(sample_info()).unwrap()).unwrap();
        assert_eq!(report.system_info(), Some(&sample_info()));

        let report: SystemInfoReport =
            serde_json::from_value(json!({"error": SYSTEM_INFO_UNAVAILABLE})).unwrap();
        assert_eq!(report, SystemInfoReport::unavailable());
    }
}
