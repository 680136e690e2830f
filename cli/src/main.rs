//! User service — CLI server
//!
//! ```sh
//! # Run with default config (~/.config/user-service/config.toml)
//! user-service
//!
//! # Custom config path and port
//! user-service --config /etc/user-service/config.toml --port 9090
//!
//! # Validate config without starting
//! user-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use user_service::config::AppConfig;
use user_service::server::{init_tracing, ServerHandle, ServerOptions};

/// REST user service protected by HTTP Basic authentication.
#[derive(Parser, Debug)]
#[command(name = "user-service", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "USER_SERVICE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(user_service::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Address     : {}", config.server.address());
        println!("   Log level   : {}", config.logging.level);
        println!("   Realm       : {}", config.security.realm);
        println!("   Accounts    : {}", config.security.accounts.len());
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions { config }).await?;
    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
