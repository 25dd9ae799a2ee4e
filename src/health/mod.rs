//! Health Responder
//!
//! Builds the banner, detailed health and simple health responses from the
//! clock and the system info provider.

mod service;

pub use service::{
    collect_system_info, format_timestamp, HealthService, API_VERSION, DOCS_PATH, SERVICE_NAME,
};
