// =============================================================================
// WEATHER NORMALIZATION
// =============================================================================
// Turns provider payloads into the fixed `WeatherSnapshot` shape and holds
// the two static snapshots (demo and fallback).
// =============================================================================

use chrono::{DateTime, FixedOffset, Offset, Utc};

use super::icons::WeatherIcon;
use super::provider::{CurrentConditions, Forecast, ProviderError};
use crate::models::{CurrentWeather, ForecastEntry, Recommendation, WeatherSnapshot};

/// Forecast entries kept for the display
pub const FORECAST_LEN: usize = 3;

/// Note attached to responses carrying `fallback_snapshot`
pub const FALLBACK_NOTE: &str = "Using fallback weather data";

/// Builds a snapshot from the two provider responses.
///
/// Fails only when the payload is structurally unusable, e.g. a current
/// reading without any condition entry.
pub fn normalize(current: &CurrentConditions, forecast: &Forecast) -> Result<WeatherSnapshot, ProviderError> {
    let condition = current
        .weather
        .first()
        .ok_or_else(|| ProviderError::Malformed("current conditions carry no weather entry".into()))?;

    let temp = round_temp(current.main.temp);
    let offset = forecast
        .city
        .as_ref()
        .and_then(|city| FixedOffset::east_opt(city.timezone))
        .unwrap_or_else(|| Utc.fix());

    let entries = forecast
        .list
        .iter()
        .take(FORECAST_LEN)
        .map(|point| {
            let icon = point
                .weather
                .first()
                .map(|c| WeatherIcon::from_code(&c.icon))
                .unwrap_or(WeatherIcon::DEFAULT);
            Ok(ForecastEntry {
                time: clock_time(point.dt, offset)?,
                temp: round_temp(point.main.temp),
                icon,
            })
        })
        .collect::<Result<Vec<_>, ProviderError>>()?;

    Ok(WeatherSnapshot {
        current: CurrentWeather {
            temp,
            description: title_case(&condition.description),
            icon: WeatherIcon::from_code(&condition.icon),
            location: current.name.clone(),
        },
        forecast: entries,
        recommendations: recommendations(temp, &condition.main),
    })
}

fn round_temp(celsius: f64) -> i32 {
    celsius.round() as i32
}

/// "HH:MM" for a unix timestamp seen from `offset`.
fn clock_time(unix: i64, offset: FixedOffset) -> Result<String, ProviderError> {
    let at = DateTime::from_timestamp(unix, 0)
        .ok_or_else(|| ProviderError::Malformed(format!("forecast timestamp {unix} out of range")))?;
    Ok(at.with_timezone(&offset).format("%H:%M").to_string())
}

/// Upper-cases the first letter of every space-separated word.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// -----------------------------------------------------------------------------
// RECOMMENDATIONS
// -----------------------------------------------------------------------------
// Rules are keyed on the rounded temperature and the condition's main
// keyword ("Rain", "Clear", ...), matched case-insensitively. Temperature
// bands are exclusive of each other; condition rules add on top.
/// Concierge suggestions for the rounded temperature and a condition keyword.
///
/// At most one temperature-band entry, then rain, then clear/sun. With no
/// match a single generic concierge entry is returned.
pub fn recommendations(temp: i32, condition: &str) -> Vec<Recommendation> {
    let condition = condition.to_lowercase();
    let mut out = Vec::new();

    // Temperature band: warm, mild or cold (15..20 has no entry)
    if temp >= 25 {
        out.push(Recommendation::new(
            "fas fa-swimming-pool",
            "Perfect weather for our rooftop pool and terrace",
        ));
    } else if temp >= 20 {
        out.push(Recommendation::new(
            "fas fa-walking",
            "Ideal temperature for exploring the city on foot",
        ));
    } else if temp < 15 {
        out.push(Recommendation::new(
            "fas fa-coffee",
            "Cozy weather - perfect for our spa and wellness center",
        ));
    }

    if condition.contains("rain") {
        out.push(Recommendation::new(
            "fas fa-umbrella",
            "Umbrella available at the concierge desk",
        ));
    }

    if condition.contains("clear") || condition.contains("sun") {
        out.push(Recommendation::new(
            "fas fa-camera",
            "Great visibility for sightseeing tours",
        ));
    }

    // Never send an empty list to the display
    if out.is_empty() {
        out.push(Recommendation::new(
            "fas fa-concierge-bell",
            "Ask our concierge for local activity recommendations",
        ));
    }

    out
}

// -----------------------------------------------------------------------------
// STATIC SNAPSHOTS
// -----------------------------------------------------------------------------
// Demo data is what an unconfigured install shows; fallback data is what a
// configured install shows while the provider is failing.

/// Shown when no provider credential is configured.
pub fn demo_snapshot(city: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        current: CurrentWeather {
            temp: 24,
            description: "Sunny".to_string(),
            icon: WeatherIcon::Sun,
            location: city.to_string(),
        },
        forecast: vec![
            entry("12:00", 26, WeatherIcon::CloudSun),
            entry("15:00", 28, WeatherIcon::Sun),
            entry("18:00", 25, WeatherIcon::Cloud),
        ],
        recommendations: vec![Recommendation::new(
            "fas fa-umbrella-beach",
            "Perfect weather for exploring the city",
        )],
    }
}

/// Shown when the provider is configured but could not be used.
pub fn fallback_snapshot(city: &str) -> WeatherSnapshot {
    WeatherSnapshot {
        current: CurrentWeather {
            temp: 22,
            description: "Pleasant".to_string(),
            icon: WeatherIcon::CloudSun,
            location: city.to_string(),
        },
        forecast: vec![
            entry("12:00", 24, WeatherIcon::CloudSun),
            entry("15:00", 26, WeatherIcon::Sun),
            entry("18:00", 23, WeatherIcon::Cloud),
        ],
        recommendations: vec![Recommendation::new(
            "fas fa-concierge-bell",
            "Ask our concierge for weather updates and recommendations",
        )],
    }
}

fn entry(time: &str, temp: i32, icon: WeatherIcon) -> ForecastEntry {
    ForecastEntry {
        time: time.to_string(),
        temp,
        icon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::provider::{Condition, ForecastCity, ForecastPoint, MainReadings};

    fn condition(main: &str, description: &str, icon: &str) -> Condition {
        Condition {
            main: main.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }

    fn point(dt: i64, temp: f64, icon: &str) -> ForecastPoint {
        ForecastPoint {
            dt,
            main: MainReadings { temp },
            weather: vec![condition("Clouds", "few clouds", icon)],
        }
    }

    fn icons(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.icon.as_str()).collect()
    }

    #[test]
    fn test_hot_and_clear() {
        let recs = recommendations(26, "clear sky");
        assert_eq!(icons(&recs), vec!["fas fa-swimming-pool", "fas fa-camera"]);
    }

    #[test]
    fn test_cold_and_rainy() {
        let recs = recommendations(14, "light rain");
        assert_eq!(icons(&recs), vec!["fas fa-coffee", "fas fa-umbrella"]);
    }

    #[test]
    fn test_mild_and_cloudy() {
        let recs = recommendations(22, "clouds");
        assert_eq!(icons(&recs), vec!["fas fa-walking"]);
    }

    #[test]
    fn test_no_match_gives_concierge() {
        // 15..20 has no temperature band
        let recs = recommendations(17, "Clouds");
        assert_eq!(icons(&recs), vec!["fas fa-concierge-bell"]);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(icons(&recommendations(25, "mist")), vec!["fas fa-swimming-pool"]);
        assert_eq!(icons(&recommendations(20, "mist")), vec!["fas fa-walking"]);
        assert_eq!(icons(&recommendations(15, "mist")), vec!["fas fa-concierge-bell"]);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let recs = recommendations(30, "Rain");
        assert_eq!(icons(&recs), vec!["fas fa-swimming-pool", "fas fa-umbrella"]);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("light intensity drizzle"), "Light Intensity Drizzle");
        assert_eq!(title_case("clear sky"), "Clear Sky");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_normalize_live_payload() {
        let current = CurrentConditions {
            name: "Budapest".to_string(),
            main: MainReadings { temp: 25.6 },
            weather: vec![condition("Clear", "clear sky", "01d")],
        };
        let forecast = Forecast {
            // 2024-01-20 11:00, 14:00, 17:00, 20:00 UTC
            list: vec![
                point(1_705_748_400, 24.4, "02d"),
                point(1_705_759_200, 26.5, "01d"),
                point(1_705_770_000, 22.0, "04n"),
                point(1_705_780_800, 18.0, "01n"),
            ],
            city: Some(ForecastCity { timezone: 3600 }),
        };

        let snapshot = normalize(&current, &forecast).unwrap();

        assert_eq!(snapshot.current.temp, 26);
        assert_eq!(snapshot.current.description, "Clear Sky");
        assert_eq!(snapshot.current.icon, WeatherIcon::Sun);
        assert_eq!(snapshot.current.location, "Budapest");

        let times: Vec<_> = snapshot.forecast.iter().map(|f| f.time.as_str()).collect();
        assert_eq!(times, vec!["12:00", "15:00", "18:00"]);
        assert_eq!(snapshot.forecast[1].temp, 27);
        assert_eq!(snapshot.forecast[2].icon, WeatherIcon::Cloud);

        assert_eq!(icons(&snapshot.recommendations), vec!["fas fa-swimming-pool", "fas fa-camera"]);
    }

    #[test]
    fn test_forecast_without_city_uses_utc() {
        let current = CurrentConditions {
            name: "Reykjavik".to_string(),
            main: MainReadings { temp: 2.0 },
            weather: vec![condition("Snow", "light snow", "13d")],
        };
        let forecast = Forecast {
            list: vec![point(1_705_748_400, 1.0, "13d")],
            city: None,
        };

        let snapshot = normalize(&current, &forecast).unwrap();
        assert_eq!(snapshot.forecast.len(), 1);
        assert_eq!(snapshot.forecast[0].time, "11:00");
    }

    #[test]
    fn test_missing_condition_is_malformed() {
        let current = CurrentConditions {
            name: "Budapest".to_string(),
            main: MainReadings { temp: 20.0 },
            weather: vec![],
        };
        let forecast = Forecast { list: vec![], city: None };

        assert!(matches!(normalize(&current, &forecast), Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn test_static_snapshots_echo_city() {
        assert_eq!(demo_snapshot("Prague").current.location, "Prague");
        assert_eq!(fallback_snapshot("Prague").current.location, "Prague");
        assert_eq!(fallback_snapshot("Prague").forecast.len(), FORECAST_LEN);
    }
}
