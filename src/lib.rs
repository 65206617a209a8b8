// =============================================================================
// NEOX HOTEL EXPERIENCE
// =============================================================================
// In-room dashboard for hotel TVs.
//
// - The gateway (src/main.rs) serves guest, room environment, weather and
//   preference data as JSON, plus the dashboard page itself.
// - The kiosk (src/bin/kiosk.rs) polls the gateway on fixed intervals and
//   renders the dashboard in a terminal.
//
// Both sides follow one rule: the display never goes blank. Failures are
// replaced by complete substitute data (see `fallback`).
// =============================================================================

pub mod config;
pub mod dashboard;
pub mod environment;
pub mod error;
pub mod fallback;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod store;
pub mod weather;

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::store::GuestStore;
use crate::weather::WeatherService;

// -----------------------------------------------------------------------------
// APPLICATION STATE
// -----------------------------------------------------------------------------
// Built once at startup and only read afterwards; requests share nothing
// mutable.
pub struct AppState {
    pub store: Arc<dyn GuestStore>,

    pub weather: WeatherService,

    pub metrics_handle: PrometheusHandle,
}

/// All routes plus the middleware stack.
pub fn build_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::index))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/api/health", get(handlers::health_check))
        .route("/api/guest/:room_number", get(handlers::get_guest))
        .route(
            "/api/room-environment/:room_number",
            get(handlers::get_room_environment),
        )
        .route("/api/weather", get(handlers::get_weather))
        .route("/api/weather/:city", get(handlers::get_weather))
        .route(
            "/api/preferences/:room_number",
            get(handlers::get_preferences).post(handlers::update_preferences),
        )
        // Wrong method on a known path gets the same JSON 404 as an unknown
        // path, never axum's empty 405
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .with_state(state);

    middleware::apply(routes)
}
