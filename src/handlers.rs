// =============================================================================
// HANDLERS MODULE
// =============================================================================
// HTTP request handlers for the dashboard gateway.
//
// Every JSON endpoint answers with the `ApiResponse` envelope. Guest and
// preference endpoints fail with `{success:false}`; the weather endpoint
// never fails, it degrades to demo or fallback data instead.
// =============================================================================

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode},
    response::Html,
    Json,
};
use chrono::Utc;
use serde_json::Value;

use crate::environment;
use crate::error::{AppError, AppResult};
use crate::metrics;
use crate::models::{
    ApiResponse, GuestPreferences, GuestProfile, HealthResponse, RoomEnvironment, WeatherSnapshot,
};
use crate::AppState;

// =============================================================================
// PAGE, HEALTH, METRICS
// =============================================================================
// The page is compiled into the binary, so the gateway has no static-file
// directory to deploy. The kiosk polls /api/health as its connectivity
// signal; Prometheus scrapes /metrics.

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Liveness probe.
///
/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "NEOX Hotel Experience API is running".to_string(),
        timestamp: Utc::now(),
    })
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}

/// Anything no route matched, including a known path with the wrong method.
pub async fn not_found(method: Method) -> AppError {
    let err = AppError::NotFound;
    metrics::record_http_request(method.as_str(), "unmatched", err.status_code().as_u16(), 0.0);
    err
}

// =============================================================================
// GUEST
// =============================================================================
// Read-only view of the checked-in guest. Store failures become a 500
// envelope with a fixed message; the display then shows its own fallback.

/// GET /api/guest/:room_number
pub async fn get_guest(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> AppResult<Json<ApiResponse<GuestProfile>>> {
    let start = Instant::now();

    let result = state
        .store
        .guest_profile(&room)
        .await
        .map(|guest| Json(ApiResponse::ok(guest)))
        .map_err(AppError::store("Error fetching guest data"));

    record_outcome("GET", "/api/guest/:room_number", start, &result);
    result
}

// =============================================================================
// ROOM ENVIRONMENT
// =============================================================================
// There are no physical sensors behind this endpoint: each call synthesizes a
// plausible reading (see `environment`). It cannot fail.

/// Fresh simulated reading on every call.
///
/// GET /api/room-environment/:room_number
pub async fn get_room_environment(Path(room): Path<String>) -> Json<ApiResponse<RoomEnvironment>> {
    let start = Instant::now();

    let reading = environment::synthesize(&room);

    metrics::record_environment_reading();
    metrics::record_http_request(
        "GET",
        "/api/room-environment/:room_number",
        200,
        start.elapsed().as_secs_f64(),
    );
    Json(ApiResponse::ok(reading))
}

// =============================================================================
// WEATHER
// =============================================================================
// All provider handling lives in `WeatherService`; the handler only labels
// the answer with its source and counts it.

/// Always 200. `source` tells live, demo and fallback data apart; fallback
/// responses also carry a `note`.
///
/// GET /api/weather
/// GET /api/weather/:city
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    city: Option<Path<String>>,
) -> Json<ApiResponse<WeatherSnapshot>> {
    let start = Instant::now();
    let city = city.map(|Path(c)| c);

    // Demo, live or fallback; never an error
    let report = state.weather.report(city.as_deref()).await;

    tracing::info!(
        city = %report.snapshot.current.location,
        source = ?report.provenance,
        "Weather served"
    );
    metrics::record_weather_fetch(report.provenance);
    metrics::record_http_request("GET", "/api/weather/:city", 200, start.elapsed().as_secs_f64());

    let note = report.note();
    Json(
        ApiResponse::ok(report.snapshot)
            .with_source(report.provenance)
            .with_note(note),
    )
}

// =============================================================================
// PREFERENCES
// =============================================================================
// Reads come from the store. Writes are validated against `GuestPreferences`
// and handed to the store, and the client gets its own body back as
// confirmation.

/// GET /api/preferences/:room_number
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> AppResult<Json<ApiResponse<GuestPreferences>>> {
    let start = Instant::now();

    let result = state
        .store
        .preferences(&room)
        .await
        .map(|prefs| Json(ApiResponse::ok(prefs)))
        .map_err(AppError::store("Error fetching guest preferences"));

    record_outcome("GET", "/api/preferences/:room_number", start, &result);
    result
}

/// Accepts new preferences and echoes the request body back unchanged.
///
/// The body must still parse as `GuestPreferences`, but the echo is the raw
/// JSON: number forms are preserved and extra fields come back too.
/// Whether a later GET sees the change depends on the store; the sample
/// store drops it.
///
/// POST /api/preferences/:room_number
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Value>>> {
    let start = Instant::now();

    let result = store_preferences(&state, &room, payload).await;

    record_outcome("POST", "/api/preferences/:room_number", start, &result);
    result
}

async fn store_preferences(
    state: &AppState,
    room: &str,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Value>>> {
    // Body must be JSON at all...
    let Json(raw) = payload
        .map_err(|rejection| AppError::BadRequest(format!("Invalid preferences: {}", rejection.body_text())))?;

    // ...and carry every preference field
    let prefs: GuestPreferences = serde_json::from_value(raw.clone())
        .map_err(|err| AppError::BadRequest(format!("Invalid preferences: {err}")))?;

    // Hand the typed value to the store; the echo stays the raw body
    state
        .store
        .set_preferences(room, prefs)
        .await
        .map_err(AppError::store("Error updating preferences"))?;

    Ok(Json(
        ApiResponse::ok(raw).with_message("Preferences updated successfully"),
    ))
}

// -----------------------------------------------------------------------------
// REQUEST METRICS
// -----------------------------------------------------------------------------
// Failures are counted too, under the status the client actually receives,
// so error rates can be read straight off http_requests_total.

fn record_outcome<T>(method: &str, endpoint: &str, start: Instant, result: &AppResult<T>) {
    let status = match result {
        Ok(_) => StatusCode::OK,
        Err(err) => err.status_code(),
    };
    metrics::record_http_request(method, endpoint, status.as_u16(), start.elapsed().as_secs_f64());
}
