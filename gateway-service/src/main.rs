use gateway_service::config::GatewayConfig;
use gateway_service::services::init_metrics;
use gateway_service::startup::Application;
use service_core::config::Config;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let common = Config::load().map_err(|e| std::io::Error::other(e.to_string()))?;

    // Initialize tracing before the config gate so its diagnostics are logged
    init_tracing(
        "gateway-service",
        &common.log_level,
        common.otlp_endpoint.as_deref(),
    );

    init_metrics();

    let config = GatewayConfig::load(common).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start gateway: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    app.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}
