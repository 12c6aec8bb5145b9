use recognition_service::{config::RecognitionConfig, services, startup::Application};
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = RecognitionConfig::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    // Initialize metrics recorder (must be before any metrics are recorded)
    services::init_metrics();

    tracing::info!(
        service = %config.service_name,
        upstream = %config.baidu.api_base_url,
        "Starting recognition relay service"
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}
