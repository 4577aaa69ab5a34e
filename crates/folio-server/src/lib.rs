//! HTTP gateway for the portfolio site
//!
//! Serves one of two surfaces over axum. The dashboard surface proxies
//! authentication and content administration to the backend with status
//! passthrough. The frontend surface serves the public site: chat relay,
//! SEO metadata, content reads with demo fallback, sitemap and robots.

pub mod error;
pub mod routes;

pub use error::{Result, ServerError};

use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use folio_core::{
    Backend, ChatService, ContentService, FallbackCatalog, FolioConfig, HttpBackend, SeoTable,
    ServerSection, SiteConfig, Surface,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Configuration for the HTTP listener.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Which route set to serve
    pub surface: Surface,
    /// Enable CORS
    pub enable_cors: bool,
    /// CORS allowed origins (if None, allows any origin)
    pub cors_origins: Option<Vec<String>>,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
    /// Enable request logging
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            surface: Surface::Frontend,
            enable_cors: true,
            cors_origins: None,
            max_body_size: 10 * 1024 * 1024,
            enable_logging: true,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_section(section: &ServerSection) -> Result<Self> {
        let mut config = Self::new()
            .with_bind_addr(section.socket_addr()?)
            .with_surface(section.surface)
            .with_max_body_size(section.max_body_size)
            .with_logging(section.enable_logging);
        if !section.cors_origins.is_empty() {
            config = config.with_cors_origins(section.cors_origins.clone());
        }
        Ok(config)
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Parse and set the bind address from a string.
    pub fn with_bind_addr_str(mut self, addr: &str) -> Result<Self> {
        self.bind_addr = addr
            .parse()
            .map_err(|e| ServerError::config_error(format!("Invalid bind address: {}", e)))?;
        Ok(self)
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }
}

/// Immutable state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub chat: ChatService,
    pub content: ContentService,
    pub seo: Arc<SeoTable>,
    pub site: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>, site: SiteConfig, content_timeout: Duration) -> Result<Self> {
        let catalog = FallbackCatalog::bundled(&site)?;
        Ok(Self {
            chat: ChatService::new(backend.clone()),
            content: ContentService::new(backend.clone(), Arc::new(catalog), content_timeout),
            seo: Arc::new(SeoTable::from_site(&site)),
            site: Arc::new(site),
            backend,
        })
    }

    pub fn from_config(config: &FolioConfig) -> Result<Self> {
        let backend = HttpBackend::from_config(&config.backend)?;
        match backend.base_url() {
            Some(url) => log::info!("Backend base URL: {}", url),
            None => log::warn!(
                "No backend URL configured; proxy routes will fail and public content uses demo data"
            ),
        }
        Self::new(
            Arc::new(backend),
            config.site.clone(),
            config.backend.content_timeout(),
        )
    }
}

/// The portfolio gateway server.
pub struct FolioServer {
    state: AppState,
    config: ServerConfig,
}

impl FolioServer {
    pub fn new(state: AppState) -> Self {
        Self::with_config(state, ServerConfig::default())
    }

    pub fn with_config(state: AppState, config: ServerConfig) -> Self {
        Self { state, config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the Axum router for the configured surface, with middleware.
    pub fn build_router(&self) -> Router {
        let routes = match self.config.surface {
            Surface::Frontend => routes::frontend_router(),
            Surface::Dashboard => routes::dashboard_router(),
        };

        let mut router = routes
            .fallback(routes::not_found)
            .layer(DefaultBodyLimit::max(self.config.max_body_size))
            .with_state(self.state.clone());

        if self.config.enable_logging {
            router = router.layer(middleware::from_fn(
                |request: axum::http::Request<axum::body::Body>, next: axum::middleware::Next| async {
                    let request_id = uuid::Uuid::new_v4().to_string();
                    let method = request.method().clone();
                    let uri = request.uri().clone();
                    log::info!("Request {} {} {}", request_id, method, uri);

                    let start = std::time::Instant::now();
                    let response = next.run(request).await;
                    log::info!(
                        "Response {} {} completed in {:?}",
                        request_id,
                        response.status(),
                        start.elapsed()
                    );

                    response
                },
            ));
        }

        router = router.layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors_layer = if let Some(ref origins) = self.config.cors_origins {
                let origins: std::result::Result<Vec<_>, _> =
                    origins.iter().map(|s| s.parse()).collect();
                match origins {
                    Ok(origins) => CorsLayer::new()
                        .allow_origin(origins)
                        .allow_methods(Any)
                        .allow_headers(Any),
                    Err(_) => {
                        log::warn!("Invalid CORS origin configured, allowing any origin");
                        CorsLayer::permissive()
                    }
                }
            } else {
                CorsLayer::permissive()
            };
            router = router.layer(cors_layer);
        }

        router
    }

    async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind(self.config.bind_addr).await.map_err(|e| {
            ServerError::config_error(format!(
                "Failed to bind to {}: {}",
                self.config.bind_addr, e
            ))
        })
    }

    /// Start the server and listen until the process is stopped.
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server, shutting down gracefully once `shutdown_signal`
    /// resolves.
    pub async fn serve_with_shutdown<F>(self, shutdown_signal: F) -> Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let listener = self.bind().await?;

        log::info!(
            "folio {} surface listening on http://{}",
            self.config.surface,
            self.config.bind_addr
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ServerError::internal(format!("Server error: {}", e)))?;

        log::info!("folio server shut down gracefully");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            log::info!("Received SIGTERM, shutting down...");
        },
    }
}
