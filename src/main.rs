//! Health API Service
//!
//! Serves liveness information and basic host metrics over HTTP.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                Health API Service             │
//! ├───────────────────────────────────────────────┤
//! │  ┌──────────┐    ┌───────────────┐            │
//! │  │  Router  │───▶│ HealthService │──▶ Clock   │
//! │  │ (hyper)  │    │               │──▶ sysinfo │
//! │  └──────────┘    └───────────────┘            │
//! └───────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use health_api::adapters::RUNTIME_VERSION;
use health_api::error::Result;
use health_api::server::{self, DEFAULT_HOST, DEFAULT_PORT};
use health_api::{HealthService, Router, ServerConfig};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Health API Service - liveness and host metrics over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Host to bind
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting Health API Service");
    info!("  Bind: {}:{}", args.host, args.port);
    info!("  Runtime: {}", RUNTIME_VERSION);

    let config = ServerConfig::new(args.host.clone(), args.port);
    let listener = server::bind(&config).await.map_err(|e| {
        error!("{}", e);
        e
    })?;

    let router = Router::new(Arc::new(HealthService::host()));

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    server::serve(listener, router, shutdown).await?;

    info!("Health API Service shutdown complete");
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let mut filter = EnvFilter::from_default_env().add_directive(level.into());
    if let Ok(directive) = "hyper=warn".parse() {
        filter = filter.add_directive(directive);
    }

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

// =============================================================================
// Shutdown
// =============================================================================

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
