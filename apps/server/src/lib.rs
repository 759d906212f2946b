//! # Teaser Server
//!
//! HTTP front of the teaser gate: an `Axum` router over the teasing slice, backed
//! by an in-memory forum store and a type-safe event bus.
//!
//! ## Example
//! ```no_run
//! use teaser_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .port(4583)
//!         .teasing(true)
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;

use anyhow::{Context, Result, anyhow};
use axum::Router;
use axum_server::Handle;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use teaser::domain::config::ApiConfig;
use teaser::kernel::config::load_config;
use teaser::kernel::server::ApiState;
use teaser::kernel::store::{ForumStore, MemoryForum};
use teaser_event_bus::EventBus;
use teaser_logger::Logger;
use tokio::signal;
use tracing::{error, info};

/// Loads the configuration at `path`, installs the logger it describes and
/// records the effective settings through it.
///
/// Keep the returned [`Logger`] alive for as long as logs should be written.
///
/// # Errors
/// Fails if the configuration cannot be read or the logger cannot be installed.
pub fn bootstrap(path: impl AsRef<Path>) -> Result<(ApiConfig, Logger)> {
    let path = path.as_ref();
    let cfg: ApiConfig = load_config(Some(path)).context("Critical: Configuration is malformed")?;

    let logging = &cfg.logging;
    let mut builder = Logger::builder(env!("CARGO_PKG_NAME")).level_name(&logging.level).json(logging.json);
    if let Some(filter) = &logging.filter {
        builder = builder.directives(filter);
    }
    if let Some(directory) = &logging.directory {
        builder = builder.directory(directory);
    }
    let logger = builder.init()?;

    info!(
        path = %path.display(),
        address = %cfg.server.address,
        port = cfg.server.port,
        teasing = cfg.teaser.dl_teaser_enabled,
        seed = ?cfg.seed,
        "Configuration loaded"
    );
    Ok((cfg, logger))
}

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
    forum: Option<MemoryForum>,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.cfg.server.port = port;
        self
    }

    /// Initial state of the global `dl_teaser_enabled` flag.
    pub fn teasing(mut self, enabled: bool) -> Self {
        self.cfg.teaser.dl_teaser_enabled = enabled;
        self
    }

    /// Serves this forum instead of the configured seed file.
    pub fn forum(mut self, forum: MemoryForum) -> Self {
        self.forum = Some(forum);
        self
    }

    fn init_forum(&mut self, events: &EventBus) -> Result<MemoryForum> {
        let forum = match (self.forum.take(), &self.cfg.seed) {
            (Some(forum), _) => forum,
            (None, Some(seed)) => MemoryForum::load_seed(seed)
                .with_context(|| format!("Failed to load forum seed {}", seed.display()))?,
            (None, None) => {
                info!("No forum seed configured; starting with an empty forum");
                MemoryForum::new()
            },
        };
        Ok(forum.with_events(events.clone()))
    }

    fn validate_ssl_config(&self) -> Result<()> {
        if let Some(ssl) = &self.cfg.server.ssl {
            if !ssl.cert.exists() {
                anyhow::bail!("SSL certificate not found at: {}", ssl.cert.display());
            }
            if !ssl.key.exists() {
                anyhow::bail!("SSL key not found at: {}", ssl.key.display());
            }

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let metadata = ssl.key.metadata()?;
                if metadata.permissions().mode() & 0o077 != 0 {
                    tracing::warn!(
                        "SECURITY: SSL Private Key {} has insecure permissions (should be 600)",
                        ssl.key.display()
                    );
                }
            }
        }
        Ok(())
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Process
    /// 1. Validates the TLS files when SSL is configured
    /// 2. Loads the forum (explicit, seed file or empty) and attaches the event bus
    /// 3. Initializes every feature slice
    /// 4. Constructs application state
    ///
    /// Must run inside a Tokio runtime; the teasing registry starts its listener here.
    ///
    /// # Errors
    /// Returns an error if:
    /// * SSL certificate/key files are missing
    /// * The seed file cannot be read or parsed
    /// * A feature slice fails to initialize
    #[allow(clippy::unused_async)]
    pub async fn build(mut self) -> Result<Server> {
        self.validate_ssl_config()?;

        let address = SocketAddr::new(self.cfg.server.address, self.cfg.server.port);
        info!(address = %address, "Initializing server");

        let events = EventBus::new();
        let store: Arc<dyn ForumStore> = Arc::new(self.init_forum(&events)?);

        let slices = teaser::init(&self.cfg, &store, &events)
            .map_err(|e| anyhow!("Platform bootstrap failed: {e}"))?;

        let state = ApiState::builder()
            .config(self.cfg)
            .store(store)
            .events(events)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;
        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The complete application router, OpenAPI UI included.
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the server fails to bind to the configured address
    /// or if SSL/TLS setup fails.
    pub async fn run(self) -> Result<()> {
        let cfg = self.state.config.clone();
        let address = SocketAddr::new(cfg.server.address, cfg.server.port);

        info!(
            address = %address,
            ssl = cfg.server.ssl.is_some(),
            teasing = cfg.teaser.dl_teaser_enabled,
            "Starting server"
        );

        let app = self.router();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();
        let events = self.state.events.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(std::time::Duration::from_secs(30)));
        });

        if let Some(ssl_config) = &cfg.server.ssl {
            info!("Starting HTTPS server on https://{address}");

            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                &ssl_config.cert,
                &ssl_config.key,
            )
            .await
            .context("Failed to load SSL/TLS certificates")?;

            axum_server::bind_rustls(address, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
        } else {
            info!("Starting HTTP server on http://{address}");

            axum_server::bind(address)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .context("HTTP server failed")?;
        }

        let closed = events.shutdown();
        info!(channels = closed, "Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
