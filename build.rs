//! Build script for the Health API Service
//!
//! Captures the version of the compiler that built the service so the
//! detailed health report can expose it as the runtime version.
//!
//! # Environment Variables
//!
//! - `RUSTC` - Compiler used for the build (set by cargo, default: rustc)

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-env-changed=RUSTC");
    println!("cargo:rerun-if-changed=build.rs");

    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    let version = Command::new(&rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| {
            println!("cargo:warning=Could not determine rustc version via {}", rustc);
            "rustc unknown".to_string()
        });

    println!("cargo:rustc-env=HEALTH_API_RUSTC_VERSION={}", version);
}
