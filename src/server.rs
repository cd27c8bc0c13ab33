//! HTTP server for the catalog page.
//!
//! ```text
//! GET /            → catalog page for the state in the query string
//! GET /healthz     → "ok"
//! GET /<anything>  → file from the public directory, 404 when missing
//! ```
//!
//! The inventory and metadata are read on every page request, on the
//! blocking pool, so edits to `public/` show up on the next reload without a
//! restart. The config is loaded once at startup and shared read-only.

use crate::config::{self, ConfigError, SiteConfig};
use crate::render;
use crate::scan::{self, ScanError};
use crate::state::CatalogState;
use axum::Router;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use maud::Markup;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid bind address: {0}")]
    Addr(#[from] std::net::AddrParseError),
}

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(root: impl Into<PathBuf>, config: SiteConfig) -> Self {
        Self {
            root: root.into(),
            config: Arc::new(config),
        }
    }

    /// Load `config.toml` from `root` and build the state.
    pub fn load(root: &Path) -> Result<Self, ServeError> {
        let config = config::load_config(root)?;
        Ok(Self::new(root, config))
    }
}

pub fn build_router(state: AppState) -> Router {
    let public = ServeDir::new(state.config.public_dir(&state.root));

    Router::new()
        .route("/", get(page_handler))
        .route("/healthz", get(healthz_handler))
        .fallback_service(public)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn page_handler(
    State(app): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let root = app.root.clone();
    let config = Arc::clone(&app.config);

    let rendered = tokio::task::spawn_blocking(move || -> Result<Markup, ScanError> {
        let catalog = scan::load_catalog(&root, &config)?;
        let state = CatalogState::from_query(&params, &catalog);
        Ok(render::render_page(&config, &catalog, &state))
    })
    .await;

    match rendered {
        Ok(Ok(page)) => page.into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "failed to load catalog");
            (StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable").into_response()
        }
        Err(e) => {
            error!(error = %e, "render task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
        }
    }
}

async fn healthz_handler() -> &'static str {
    "ok"
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let response = next.run(req).await;

    debug!(
        %method,
        %uri,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request complete"
    );
    response
}

/// Bind `bind` and serve until Ctrl-C.
pub async fn serve(state: AppState, bind: &str) -> Result<(), ServeError> {
    let addr: SocketAddr = bind.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        root = %state.root.display(),
        "apas listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl-C, serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
