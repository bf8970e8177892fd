use crate::config::Config;
use crate::streaming;
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use hlsvault_common::AssetKind;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

mod error;
pub mod routes_assets;

pub use error::AppError;

/// Prefix all API routes are nested under.
pub const API_PREFIX: &str = "/api";

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Cancelled on shutdown; kills running encodes
    pub cancel: CancellationToken,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            cancel: CancellationToken::new(),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        .nest(API_PREFIX, api_routes(&ctx))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn api_routes(ctx: &AppContext) -> Router<AppContext> {
    Router::new()
        .route("/assets", get(routes_assets::list_vod))
        .route(
            "/assets/upload",
            post(routes_assets::upload)
                .layer(DefaultBodyLimit::max(ctx.config.upload.max_bytes)),
        )
        .route("/live", get(routes_assets::list_live))
        .merge(streaming::stream_router(AssetKind::Vod))
        .merge(streaming::stream_router(AssetKind::Live))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Create the storage roots if configured to.
pub async fn prepare_roots(config: &Config) -> Result<()> {
    if !config.storage.create_roots {
        return Ok(());
    }

    for kind in [AssetKind::Vod, AssetKind::Live] {
        let root = config.storage.root(kind);
        tokio::fs::create_dir_all(root)
            .await
            .with_context(|| format!("Failed to create {} root {:?}", kind, root))?;
        tracing::debug!("Using {} root {:?}", kind, root);
    }

    Ok(())
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    prepare_roots(&config).await?;

    let ctx = AppContext::new(config);
    let cancel = ctx.cancel.clone();
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            cancel.cancel();
        })
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling running encodes");
}
