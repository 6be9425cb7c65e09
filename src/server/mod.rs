//! HTTP surface for the feedback service
//!
//! Routes the JSON API under `/api`, serves the evaluation form from the
//! public directory, and answers everything else with a JSON 404.

mod handlers;
mod response;

pub use handlers::HealthStatus;
pub use response::{status_for, ApiError, ErrorBody};

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    handler::HandlerWithoutStateExt,
    routing::{get, get_service, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::intake::FeedbackService;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FeedbackService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: Arc<FeedbackService>) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    // Misses and non-GET requests fall through to the JSON 404
    let assets = ServeDir::new(&config.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(handlers::not_found.into_service());
    let index = ServeFile::new(config.public_dir.join(&config.index_file));

    Router::new()
        .route("/api/feedback", post(handlers::submit_feedback))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/check-submission/{employee_number}",
            get(handlers::check_submission),
        )
        .route("/api/employees", get(handlers::list_employees))
        .route("/api/admin/feedback", get(handlers::admin_feedback))
        .route("/api/health", get(handlers::health_check))
        .route("/", get_service(index))
        .fallback_service(assets)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Feedback HTTP server
pub struct FeedbackServer {
    config: ServerConfig,
    service: Arc<FeedbackService>,
}

impl FeedbackServer {
    pub fn new(config: ServerConfig, service: Arc<FeedbackService>) -> Self {
        Self { config, service }
    }

    pub fn router(&self) -> Router {
        build_router(AppState::new(self.service.clone()), &self.config)
    }

    /// Bind the configured address and serve until ctrl-c or SIGTERM
    pub async fn start(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!("Feedback server listening on http://{}", addr);
        info!("Evaluation form: http://{}/", addr);
        info!("Admin API: http://{}/api/admin/feedback", addr);

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
            .context("Server error")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutting down gracefully");
}
