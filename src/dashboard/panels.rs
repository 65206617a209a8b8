// =============================================================================
// DASHBOARD PANELS
// =============================================================================
// What the screen shows, one panel per data category, as ready-to-print
// text.
//
// Two levels of defaulting:
// - per field: a gateway answer with a missing field still produces a
//   complete panel (`from_record`)
// - per category: a failed fetch replaces the whole panel (`fallback`)
// =============================================================================

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::config::DEFAULT_CITY;

const MISSING: &str = "--";

// =============================================================================
// GATEWAY RECORDS
// =============================================================================
// Lenient mirrors of the gateway models: every field optional so one missing
// value never discards the rest of the answer.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GuestRecord {
    pub guest_name: Option<String>,
    pub room_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvironmentRecord {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub air_quality: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WeatherRecord {
    pub current: Option<CurrentRecord>,
    pub forecast: Vec<ForecastRecord>,
    pub recommendations: Vec<RecommendationRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrentRecord {
    pub temp: Option<i64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastRecord {
    pub time: Option<String>,
    pub temp: Option<i64>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecommendationRecord {
    pub icon: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferencesRecord {
    pub pillow_type: Option<String>,
    pub mattress_type: Option<String>,
}

fn or_default(value: Option<&String>, default: impl FnOnce() -> String) -> String {
    match value.map(|v| v.trim()) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default(),
    }
}

fn room_label(room: &str) -> String {
    format!("Room {room}")
}

fn celsius(value: Option<String>) -> String {
    format!("{}°C", value.as_deref().unwrap_or(MISSING))
}

// =============================================================================
// PANELS
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ClockPanel {
    /// "HH:MM", 24-hour
    pub time: String,
    /// e.g. "Friday, October 16, 2026"
    pub date: String,
}

impl ClockPanel {
    pub fn at(now: NaiveDateTime) -> Self {
        Self {
            time: now.format("%H:%M").to_string(),
            date: now.format("%A, %B %-d, %Y").to_string(),
        }
    }
}

impl Default for ClockPanel {
    fn default() -> Self {
        Self {
            time: "--:--".to_string(),
            date: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuestPanel {
    pub guest_name: String,
    pub room_label: String,
}

impl GuestPanel {
    pub fn from_record(record: &GuestRecord, room: &str) -> Self {
        Self {
            guest_name: or_default(record.guest_name.as_ref(), || "Distinguished Guest".to_string()),
            room_label: or_default(record.room_number.as_ref(), || room_label(room)),
        }
    }

    pub fn fallback(room: &str) -> Self {
        Self {
            guest_name: "Welcome Guest".to_string(),
            room_label: room_label(room),
        }
    }

    /// Shown before the first answer arrives.
    pub fn loading(room: &str) -> Self {
        Self {
            guest_name: "Welcome".to_string(),
            room_label: room_label(room),
        }
    }
}

/// Temperature band shown next to the room reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comfort {
    Optimal,
    Good,
    Excellent,
}

impl Comfort {
    pub fn for_temperature(celsius: f64) -> Self {
        if (20.0..=24.0).contains(&celsius) {
            Comfort::Optimal
        } else if (18.0..=26.0).contains(&celsius) {
            Comfort::Good
        } else {
            Comfort::Excellent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Comfort::Optimal => "optimal",
            Comfort::Good => "good",
            Comfort::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentPanel {
    pub temperature: String,
    pub humidity: String,
    pub air_quality: String,
    pub comfort: Option<Comfort>,
}

impl EnvironmentPanel {
    pub fn from_record(record: &EnvironmentRecord) -> Self {
        Self {
            temperature: celsius(record.temperature.map(|t| t.to_string())),
            humidity: format!(
                "{}%",
                record.humidity.map(|h| h.to_string()).as_deref().unwrap_or(MISSING)
            ),
            air_quality: or_default(record.air_quality.as_ref(), || MISSING.to_string()),
            comfort: record.temperature.map(Comfort::for_temperature),
        }
    }

    pub fn fallback() -> Self {
        Self {
            temperature: "22°C".to_string(),
            humidity: "45%".to_string(),
            air_quality: "Excellent".to_string(),
            comfort: None,
        }
    }

    pub fn loading() -> Self {
        Self {
            temperature: celsius(None),
            humidity: format!("{MISSING}%"),
            air_quality: MISSING.to_string(),
            comfort: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastLine {
    pub time: String,
    pub temperature: String,
    /// Font Awesome class as sent by the gateway
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationLine {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherPanel {
    pub temperature: String,
    pub description: String,
    pub location: String,
    pub icon: String,
    pub forecast: Vec<ForecastLine>,
    pub recommendations: Vec<RecommendationLine>,
}

impl WeatherPanel {
    pub fn from_record(record: &WeatherRecord, city: &str) -> Self {
        let current = record.current.clone().unwrap_or_default();

        Self {
            temperature: celsius(current.temp.map(|t| t.to_string())),
            description: or_default(current.description.as_ref(), String::new),
            location: or_default(current.location.as_ref(), || city.to_string()),
            icon: or_default(current.icon.as_ref(), String::new),
            forecast: record
                .forecast
                .iter()
                .map(|f| ForecastLine {
                    time: or_default(f.time.as_ref(), || "--:--".to_string()),
                    temperature: celsius(f.temp.map(|t| t.to_string())),
                    icon: or_default(f.icon.as_ref(), String::new),
                })
                .collect(),
            recommendations: record
                .recommendations
                .iter()
                .filter_map(|r| {
                    let text = r.text.as_ref()?.trim();
                    (!text.is_empty()).then(|| RecommendationLine {
                        icon: or_default(r.icon.as_ref(), String::new),
                        text: text.to_string(),
                    })
                })
                .collect(),
        }
    }

    /// Current conditions only; forecast and recommendations stay empty.
    /// A blank city shows the default one.
    pub fn fallback(city: &str) -> Self {
        let location = match city.trim() {
            "" => DEFAULT_CITY,
            city => city,
        };
        Self {
            temperature: "24°C".to_string(),
            description: "Pleasant".to_string(),
            location: location.to_string(),
            icon: String::new(),
            forecast: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub fn loading(city: &str) -> Self {
        Self {
            temperature: celsius(None),
            description: String::new(),
            location: city.to_string(),
            icon: String::new(),
            forecast: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesPanel {
    pub pillow_type: String,
    pub mattress_type: String,
}

impl PreferencesPanel {
    pub fn from_record(record: &PreferencesRecord) -> Self {
        Self {
            pillow_type: or_default(record.pillow_type.as_ref(), || "Soft".to_string()),
            mattress_type: or_default(record.mattress_type.as_ref(), || "Firm".to_string()),
        }
    }

    pub fn fallback() -> Self {
        Self::from_record(&PreferencesRecord::default())
    }
}

/// Everything on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub clock: ClockPanel,
    pub guest: GuestPanel,
    pub environment: EnvironmentPanel,
    pub weather: WeatherPanel,
    pub preferences: PreferencesPanel,
    /// Last connectivity probe failed
    pub offline: bool,
}

impl DashboardView {
    pub fn loading(room: &str, city: &str) -> Self {
        Self {
            clock: ClockPanel::default(),
            guest: GuestPanel::loading(room),
            environment: EnvironmentPanel::loading(),
            weather: WeatherPanel::loading(city),
            preferences: PreferencesPanel::fallback(),
            offline: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_guest_field_defaults_are_independent() {
        let record = GuestRecord {
            guest_name: None,
            room_number: Some("Presidential Suite 401".to_string()),
        };
        let panel = GuestPanel::from_record(&record, "401");
        assert_eq!(panel.guest_name, "Distinguished Guest");
        assert_eq!(panel.room_label, "Presidential Suite 401");

        let record = GuestRecord {
            guest_name: Some("Ms. Novak".to_string()),
            room_number: Some("  ".to_string()),
        };
        let panel = GuestPanel::from_record(&record, "205");
        assert_eq!(panel.guest_name, "Ms. Novak");
        assert_eq!(panel.room_label, "Room 205");
    }

    #[test]
    fn test_guest_fallback_differs_from_field_default() {
        assert_eq!(GuestPanel::fallback("401").guest_name, "Welcome Guest");
        assert_eq!(GuestPanel::fallback("401").room_label, "Room 401");
    }

    #[test]
    fn test_environment_from_partial_json() {
        let record: EnvironmentRecord =
            serde_json::from_str(r#"{ "temperature": 23.4, "airQuality": "Excellent" }"#).unwrap();
        let panel = EnvironmentPanel::from_record(&record);

        assert_eq!(panel.temperature, "23.4°C");
        assert_eq!(panel.humidity, "--%");
        assert_eq!(panel.air_quality, "Excellent");
        assert_eq!(panel.comfort, Some(Comfort::Optimal));
    }

    #[test]
    fn test_comfort_bands() {
        assert_eq!(Comfort::for_temperature(20.0), Comfort::Optimal);
        assert_eq!(Comfort::for_temperature(24.0), Comfort::Optimal);
        assert_eq!(Comfort::for_temperature(25.5), Comfort::Good);
        assert_eq!(Comfort::for_temperature(18.0), Comfort::Good);
        assert_eq!(Comfort::for_temperature(30.0), Comfort::Excellent);
    }

    #[test]
    fn test_weather_panel_from_gateway_json() {
        let record: WeatherRecord = serde_json::from_value(serde_json::json!({
            "current": { "temp": 24, "description": "Sunny", "icon": "fas fa-sun", "location": "Budapest" },
            "forecast": [
                { "time": "12:00", "temp": 26, "icon": "fas fa-cloud-sun" },
                { "time": "15:00", "icon": "fas fa-sun" }
            ],
            "recommendations": [
                { "icon": "fas fa-walking", "text": "Ideal temperature for exploring the city on foot" },
                { "icon": "fas fa-question" }
            ]
        }))
        .unwrap();

        let panel = WeatherPanel::from_record(&record, "Budapest");
        assert_eq!(panel.temperature, "24°C");
        assert_eq!(panel.forecast.len(), 2);
        assert_eq!(panel.forecast[1].temperature, "--°C");
        assert_eq!(panel.recommendations.len(), 1);
    }

    #[test]
    fn test_weather_without_current_uses_city() {
        let panel = WeatherPanel::from_record(&WeatherRecord::default(), "Graz");
        assert_eq!(panel.location, "Graz");
        assert_eq!(panel.temperature, "--°C");
    }

    #[test]
    fn test_weather_fallback_names_configured_city() {
        let panel = WeatherPanel::fallback("Vienna");
        assert_eq!(panel.location, "Vienna");
        assert_eq!(panel.temperature, "24°C");
        assert_eq!(panel.description, "Pleasant");
        assert!(panel.forecast.is_empty());

        assert_eq!(WeatherPanel::fallback("  ").location, "Budapest");
    }

    #[test]
    fn test_clock_format() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 16)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        let clock = ClockPanel::at(at);
        assert_eq!(clock.time, "07:05");
        assert_eq!(clock.date, "Friday, October 16, 2026");
    }

    #[test]
    fn test_preferences_defaults() {
        let panel = PreferencesPanel::from_record(&PreferencesRecord {
            pillow_type: Some("Feather".to_string()),
            mattress_type: None,
        });
        assert_eq!(panel.pillow_type, "Feather");
        assert_eq!(panel.mattress_type, "Firm");
    }
}
