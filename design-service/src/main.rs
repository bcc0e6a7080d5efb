use design_service::config::Settings;
use design_service::services::metrics::init_metrics;
use design_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "design-service",
        &settings.log_level,
        settings.otlp_endpoint.as_deref(),
    );

    init_metrics()?;

    let app = Application::build(settings).await?;
    app.run_until_stopped().await?;

    tracing::info!("Design service stopped");
    Ok(())
}
