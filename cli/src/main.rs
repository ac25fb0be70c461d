//! Court booking service CLI server
//!
//! ```sh
//! # Run with default config (~/.config/court-booking/config.toml)
//! court-booking
//!
//! # Custom config path
//! court-booking --config /etc/court-booking/config.toml
//!
//! # Keep bookings in memory on another port
//! court-booking --storage memory --api-port 9090
//!
//! # Validate config without starting
//! court-booking --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use court_booking::config::{AppConfig, StorageBackend};
use court_booking::server::{init_tracing, ServerHandle, ServerOptions};

/// Court booking service: REST API for reserving the tennis court.
#[derive(Parser, Debug)]
#[command(
    name = "court-booking",
    version,
    about = "Tennis court reservation service",
    long_about = "REST API and WebSocket notification server for booking a single \
                  tennis court within opening hours.\n\n\
                  Default config: ~/.config/court-booking/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "COURT_BOOKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override the storage backend (database, memory).
    #[arg(long)]
    storage: Option<StorageBackend>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(court_booking::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => return Err(e.into()),
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(backend) = cli.storage {
        config.storage.backend = backend;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("✅ Configuration is valid");
        println!("   Config file   : {}", config_path.display());
        println!("   API address   : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Storage       : {:?}", config.storage.backend);
        println!("   Database      : {}", config.database.url);
        println!(
            "   Opening hours : {} - {}",
            config.opening_hours.opening_time, config.opening_hours.closing_time
        );
        println!("   Log level     : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    };

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
