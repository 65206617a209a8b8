// =============================================================================
// NEOX HOTEL EXPERIENCE - Gateway Entry Point
// =============================================================================
// Serves the in-room dashboard page and its JSON API:
// - guest profile and preferences (sample store)
// - simulated room environment readings
// - weather from OpenWeather, or demo/fallback data
// - Prometheus metrics
// =============================================================================

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neox_experience::config::Config;
use neox_experience::metrics::setup_metrics;
use neox_experience::store::SampleGuestStore;
use neox_experience::weather::{OpenWeatherClient, WeatherProvider, WeatherService};
use neox_experience::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    // JSON logs, level from RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,neox_experience=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting NEOX Hotel Experience gateway...");

    let config = Config::from_env()?;
    info!(
        port = config.port,
        default_city = %config.default_city,
        weather_demo = config.weather_api_key.is_none(),
        "Configuration loaded"
    );

    let metrics_handle = setup_metrics()?;
    info!("Prometheus metrics initialized");

    let provider = config.weather_api_key.as_ref().map(|key| {
        Arc::new(OpenWeatherClient::new(&config.weather_base_url, key)) as Arc<dyn WeatherProvider>
    });

    let state = Arc::new(AppState {
        store: Arc::new(SampleGuestStore::new()),
        weather: WeatherService::new(provider, config.default_city.clone()),
        metrics_handle,
    });

    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(address = %addr, "Gateway is listening");
    info!("Dashboard: http://localhost:{}/", config.port);
    info!("Health check: http://localhost:{}/api/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
