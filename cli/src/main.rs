//! Escola Service — CLI server
//!
//! Headless school-management REST backend, suitable for a systemd
//! service, a container or a standalone process.
//!
//! ```sh
//! # Run with the default config (~/.config/escola-service/config.toml)
//! escola-cli
//!
//! # Custom config path and port
//! escola-cli --config /etc/escola/config.toml --port 9090
//!
//! # Validate config without starting
//! escola-cli --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use escola::config::{AppConfig, CONFIG_ENV_VAR};
use escola::server::{init_tracing, ServerHandle, ServerOptions};

/// Escola Service — students, classes and school reports over REST.
#[derive(Parser, Debug)]
#[command(
    name = "escola-cli",
    version,
    about = "School management REST backend",
    long_about = "Escola Service — REST API for students, classes, code tables \
                  and paged student / academic / financial reports.\n\n\
                  Default config: ~/.config/escola-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Override the listen address.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

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
    let config_path = cli.config.unwrap_or_else(escola::default_config_path);

    let loaded = AppConfig::load(&config_path);

    if cli.check {
        return match loaded {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!("   Config file : {}", config_path.display());
                println!("   Address     : {}", config.server.address());
                println!("   Database    : {}", config.database.url);
                println!("   Log level   : {}", config.logging.level);
                println!(
                    "   Page limit  : {} (max {})",
                    config.pagination.default_limit, config.pagination.max_limit
                );
                Ok(())
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        };
    }

    let (mut config, load_error) = match loaded {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    if let Some(host) = cli.host {
        info!("CLI override: host = {}", host);
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
