//! Server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: credential store, router,
//! listener, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::UserService;
use crate::auth::CredentialStore;
use crate::config::{AppConfig, ConfigError};
use crate::interfaces::http::middleware::AuthState;
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::{ShutdownCoordinator, ShutdownSignal};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to hash configured passwords: {0}")]
    Credentials(#[from] bcrypt::BcryptError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Options for starting the service.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    pub config: AppConfig,
}

/// Handle to a running server.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
}

impl ServerHandle {
    /// Validate config, build the credential store and router, bind and
    /// start serving.
    pub async fn start(opts: ServerOptions) -> Result<Self, ServerError> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting user service...");

        let security = &app_cfg.security;
        let cost = security.bcrypt_cost;
        let accounts = security.accounts.clone();
        let credentials =
            tokio::task::spawn_blocking(move || CredentialStore::from_accounts(&accounts, cost))
                .await
                .map_err(|e| ServerError::Io(std::io::Error::other(e)))??;
        info!(
            "Loaded {} account(s) for realm '{}'",
            security.accounts.len(),
            security.realm
        );

        let api_router = create_api_router(ApiState {
            users: Arc::new(UserService::new()),
            auth: AuthState::new(credentials, security.realm.as_str()),
            docs_enabled: app_cfg.server.docs_enabled,
        });

        let addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        if app_cfg.server.docs_enabled {
            info!("OpenAPI document at http://{}/api-doc/openapi.json", local_addr);
        }

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            local_addr,
            shutdown,
            api_task,
        })
    }

    /// Address actually bound (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered,
    /// giving in-flight requests up to the configured timeout.
    pub async fn wait(self) {
        let timeout = self.shutdown.timeout();
        match tokio::time::timeout(timeout, self.api_task).await {
            Ok(Ok(())) => info!("REST API server stopped"),
            Ok(Err(e)) => error!("REST API server task panicked: {}", e),
            Err(_) => warn!("Graceful shutdown timed out after {}s", timeout.as_secs()),
        }
        info!("User service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down user service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
