//! Host System Info Adapter
//!
//! Implements the `SystemInfoProvider` port on top of the `sysinfo` crate.
//! Filesystem usage comes from `statvfs(3)` on unix so that blocks reserved
//! for root are counted neither as used nor as available.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sysinfo::System;
use tracing::debug;

use crate::domain::ports::SystemInfoProvider;
use crate::domain::SystemInfo;
use crate::error::{Error, Result};

/// Compiler version captured by the build script.
pub const RUNTIME_VERSION: &str = env!("HEALTH_API_RUSTC_VERSION");

/// Mount point whose usage is reported.
const ROOT_MOUNT: &str = "/";

/// Live host metrics provider.
///
/// Every call queries the OS afresh; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct HostSystemInfoProvider {
    runtime_version: String,
    disk_path: PathBuf,
}

impl HostSystemInfoProvider {
    /// Create a provider reporting usage of the root filesystem.
    pub fn new() -> Self {
        Self {
            runtime_version: RUNTIME_VERSION.to_string(),
            disk_path: PathBuf::from(ROOT_MOUNT),
        }
    }

    /// Create a provider reporting usage of the filesystem holding `path`.
    pub fn with_disk_path(path: impl Into<PathBuf>) -> Self {
        Self {
            disk_path: path.into(),
            ..Self::new()
        }
    }

    /// Blocking collection of all metrics.
    pub fn snapshot(&self) -> Result<SystemInfo> {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();

        let memory_total = sys.total_memory();
        if memory_total == 0 {
            return Err(Error::SystemInfo(
                "memory statistics unavailable".to_string(),
            ));
        }
        let memory_available = sys.available_memory().min(memory_total);

        let space = filesystem_space(&self.disk_path)?;

        let info = SystemInfo {
            runtime_version: self.runtime_version.clone(),
            platform: platform_string(),
            cpu_count: sys.cpus().len(),
            memory_total,
            memory_available,
            disk_usage: space.usage_percent(),
        };

        debug!(
            cpu_count = info.cpu_count,
            memory_total = info.memory_total,
            disk_usage = info.disk_usage,
            "Collected system info"
        );

        Ok(info)
    }

    /// Path whose filesystem usage is reported.
    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }
}

impl Default for HostSystemInfoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemInfoProvider for HostSystemInfoProvider {
    async fn gather(&self) -> Result<SystemInfo> {
        let provider = self.clone();
        tokio::task::spawn_blocking(move || provider.snapshot())
            .await
            .map_err(|e| Error::SystemInfo(format!("collection task failed: {}", e)))?
    }
}

/// Platform identifier in `<os>-<kernel>-<arch>` form.
fn platform_string() -> String {
    let os = os_family();
    match System::kernel_version() {
        Some(kernel) => format!("{}-{}-{}", os, kernel, std::env::consts::ARCH),
        None => format!("{}-{}", os, std::env::consts::ARCH),
    }
}

/// Kernel family name (e.g., Linux), not the distribution name.
fn os_family() -> String {
    match std::env::consts::OS {
        "linux" => "Linux".to_string(),
        "macos" => "macOS".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => System::name().unwrap_or_default(),
            }
        }
    }
}

// =============================================================================
// Filesystem Space
// =============================================================================

/// Byte counts of one filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskSpace {
    /// Size of the filesystem
    pub total: u64,
    /// Free bytes, including blocks reserved for root
    pub free: u64,
    /// Bytes available to unprivileged users
    pub available: u64,
}

impl DiskSpace {
    /// Used share, see [`disk_usage_percent`].
    pub fn usage_percent(&self) -> f64 {
        disk_usage_percent(self.total, self.free, self.available)
    }
}

/// Query the filesystem holding `path`.
#[cfg(unix)]
pub fn filesystem_space(path: &Path) -> Result<DiskSpace> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|e| {
        Error::SystemInfo(format!("invalid filesystem path {}: {}", path.display(), e))
    })?;

    // SAFETY: `statvfs` is plain old data, and the call only writes into it
    // through a valid pointer while `c_path` is a NUL-terminated string.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
    if rc != 0 {
        return Err(Error::SystemInfo(format!(
            "statvfs({}) failed: {}",
            path.display(),
            std::io::Error::last_os_error()
        )));
    }

    let fragment = if stat.f_frsize > 0 {
        u64::from(stat.f_frsize)
    } else {
        u64::from(stat.f_bsize)
    };

    Ok(DiskSpace {
        total: u64::from(stat.f_blocks).saturating_mul(fragment),
        free: u64::from(stat.f_bfree).saturating_mul(fragment),
        available: u64::from(stat.f_bavail).saturating_mul(fragment),
    })
}

/// Query the filesystem holding `path`.
#[cfg(not(unix))]
pub fn filesystem_space(path: &Path) -> Result<DiskSpace> {
    let disks = sysinfo::Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .filter(|d| path.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
        .map(|d| DiskSpace {
            total: d.total_space(),
            free: d.available_space(),
            available: d.available_space(),
        })
        .ok_or_else(|| {
            Error::SystemInfo(format!("no filesystem mounted at {}", path.display()))
        })
}

/// Used share of a filesystem, percent rounded to one decimal.
///
/// `used / (used + available)` with `used = total - free`, so root-reserved
/// blocks drop out of both sides.
pub fn disk_usage_percent(total: u64, free: u64, available: u64) -> f64 {
    let used = total.saturating_sub(free) as f64;
    let denominator = used + available as f64;
    if denominator == 0.0 {
        return 0.0;
    }
    let percent = used / denominator * 100.0;
    ((percent * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

// =============================================================================
// Tests
// =============================================================================
