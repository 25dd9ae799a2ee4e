//! Health API Service
//!
//! A minimal HTTP service exposing liveness information and basic host
//! metrics.
//!
//! # Architecture
//!
//! ```text
//! HTTP request → Router → HealthService → Clock
//!                                       → SystemInfoProvider (host metrics)
//! ```
//!
//! # Endpoints
//!
//! - `GET /` - Service banner
//! - `GET /health` - Detailed health with system information
//! - `GET /health/simple` - Status and timestamp only
//! - `GET /docs`, `GET /redoc`, `GET /openapi.json` - API documentation
//!
//! # Modules
//!
//! - [`adapters`] - Host clock and `sysinfo`-backed metrics provider
//! - [`domain`] - Response value objects and ports
//! - [`error`] - Error types
//! - [`health`] - Health responder
//! - [`server`] - HTTP boundary: routing, error normalization, accept loop

pub mod adapters;
pub mod domain;
pub mod error;
pub mod health;
pub mod server;

// Re-export commonly used types
pub use adapters::{HostSystemInfoProvider, SystemClock};
pub use domain::{
    Banner, Clock, DetailedHealth, HealthStatus, SimpleHealth, SystemInfo, SystemInfoProvider,
    SystemInfoReport,
};
pub use error::{ApiError, Error, Result};
pub use health::HealthService;
pub use server::{Router, ServerConfig};
