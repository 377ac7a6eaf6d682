use billbook_service::{config::BillbookConfig, startup::Application};
use service_core::observability::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = BillbookConfig::load()?;

    init_tracing("billbook-service", &config.common.log_level);

    tracing::info!(
        database = %config.mongodb.database,
        "Starting billbook service"
    );

    let app = Application::build(config).await?;

    app.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}
