use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use leadbook::config::AppConfig;
use leadbook::handlers;
use leadbook::services::submission::http::HttpSubmissionDelegate;
use leadbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    anyhow::ensure!(
        !config.lead_endpoint_url.is_empty(),
        "LEAD_ENDPOINT_URL must be set"
    );
    tracing::info!(
        "submitting bookings to {} (timeout {}s)",
        config.lead_endpoint_url,
        config.lead_timeout_secs
    );

    let delegate = HttpSubmissionDelegate::new(
        config.lead_endpoint_url.clone(),
        config.lead_endpoint_token.clone(),
        Duration::from_secs(config.lead_timeout_secs),
    )?;

    let state = Arc::new(AppState::new(config.clone(), Box::new(delegate)));
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting widget host on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
