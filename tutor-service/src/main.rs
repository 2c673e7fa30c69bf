use service_core::observability::init_tracing;
use tutor_service::config::TutorConfig;
use tutor_service::services::metrics::init_metrics;
use tutor_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = TutorConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    // Initialize tracing; OTLP export only when a collector is configured
    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing(
        "tutor-service",
        &config.common.log_level,
        otlp_endpoint.as_deref(),
    );

    // Initialize metrics
    init_metrics();

    if config.openai.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set; completion requests will fail upstream");
    }

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
