//! Application startup: state, router construction, and server lifecycle.

use crate::config::TutorConfig;
use crate::handlers::{
    chat::chat, description::generate_description, explain::explain,
    flashcards::generate_flashcards, grouping::group_flashcards, health::health_check, quiz::quiz,
};
use crate::services::metrics::get_metrics;
use crate::services::providers::{CompletionProvider, OpenAiConfig, OpenAiProvider};
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use service_core::error::AppError;
use service_core::middleware::request_id_middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state. The completion provider is constructed once at
/// startup and injected here; handlers never reach for a global client.
#[derive(Clone)]
pub struct AppState {
    pub config: TutorConfig,
    pub completions: Arc<dyn CompletionProvider>,
}

async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/chat", post(chat))
        .route("/api/generate-flashcards", post(generate_flashcards))
        .route("/api/explain", post(explain))
        .route("/api/generate-description", post(generate_description))
        .route("/api/group-flashcards", post(group_flashcards))
        .route("/api/quiz", post(quiz))
        .route("/metrics", get(metrics_endpoint))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the OpenAI-backed completion provider.
    pub async fn build(config: TutorConfig) -> Result<Self, AppError> {
        let completions: Arc<dyn CompletionProvider> = Arc::new(OpenAiProvider::new(OpenAiConfig {
            api_key: config.openai.api_key.clone(),
            base_url: config.openai.base_url.clone(),
        }));

        tracing::info!(
            model = %config.openai.chat_model,
            "Initialized completion provider"
        );

        Self::with_provider(config, completions).await
    }

    /// Build the application with an explicitly injected provider. Tests use
    /// this with the mock provider.
    pub async fn with_provider(
        config: TutorConfig,
        completions: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            completions,
        };

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("tutor-service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
