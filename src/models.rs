// =============================================================================
// MODELS MODULE
// =============================================================================
// Data structures exchanged between the gateway and the in-room display.
//
// Field names on the wire are camelCase (guestName, airQualityIndex, ...)
// because the dashboard page reads them directly.
// =============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::weather::WeatherIcon;

// =============================================================================
// GUEST
// =============================================================================

/// Guest profile shown in the welcome banner.
///
/// Created at check-in by an external system; this service only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestProfile {
    pub guest_name: String,
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub preferences: GuestPreferences,
}

/// Comfort preferences for a stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPreferences {
    /// e.g. "Soft", "Medium", "Firm"
    pub pillow_type: String,
    pub mattress_type: String,
    /// Target room temperature in °C, kept in the number form the client
    /// sent so `22` is never rewritten as `22.0`
    pub temperature: serde_json::Number,
    /// e.g. "Warm", "Cool", "Dimmed"
    pub lighting: String,
}

// =============================================================================
// ROOM ENVIRONMENT
// =============================================================================

/// A single reading of the room's climate sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomEnvironment {
    /// °C
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: u8,
    pub air_quality: AirQuality,
    pub air_quality_index: u8,
    pub last_updated: DateTime<Utc>,
}

/// Air quality category derived from the index.
///
/// Only one category exists today because readings never leave the
/// 85-100 band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AirQuality {
    Excellent,
}

// =============================================================================
// WEATHER
// =============================================================================

/// Normalized weather as the display consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentWeather,
    /// At most three upcoming entries, in provider order
    pub forecast: Vec<ForecastEntry>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temp: i32,
    /// Title-cased, e.g. "Light Rain"
    pub description: String,
    pub icon: WeatherIcon,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// 24-hour "HH:MM"
    pub time: String,
    pub temp: i32,
    pub icon: WeatherIcon,
}

/// A concierge suggestion derived from the current conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Font Awesome class, e.g. "fas fa-umbrella"
    pub icon: String,
    pub text: String,
}

impl Recommendation {
    pub fn new(icon: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            text: text.into(),
        }
    }
}

/// Where a weather snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Fetched from the provider and normalized
    Live,
    /// No provider credential configured
    Demo,
    /// Provider call failed; static substitute
    Fallback,
}

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================
// Every JSON endpoint answers with the same envelope:
//   { "success": true,  "data": ... }
//   { "success": false, "message": "..." }

/// API response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Set when the data is a substitute for the real thing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Provenance>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            note: None,
            source: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_source(mut self, source: Provenance) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            note: None,
            source: None,
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
