use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use detailing_ui::api::http::HttpBookingApi;
use detailing_ui::config::AppConfig;
use detailing_ui::handlers;
use detailing_ui::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(!config.backend_url.trim().is_empty(), "BACKEND_URL must not be empty");
    tracing::info!("using booking backend at {}", config.backend_url);

    let api = HttpBookingApi::new(&config.backend_url);
    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(config, Arc::new(api)));
    let app = handlers::router(state);

    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
