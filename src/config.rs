// =============================================================================
// CONFIGURATION MODULE
// =============================================================================
// Process configuration, read once at startup and never mutated.
//
// Gateway variables:
//   PORT                  listening port (default 3000)
//   OPENWEATHER_API_KEY   provider credential; unset, empty or "demo_key"
//                         switches the weather endpoint to demo data
//   DEFAULT_CITY          city used when a request names none (Budapest)
//   OPENWEATHER_BASE_URL  provider base URL
//
// Kiosk variables:
//   DASHBOARD_URL         page URL, e.g. http://localhost:3000/?room=512
//   WEATHER_CITY          city shown on the weather panel (Budapest)
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CITY: &str = "Budapest";
pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";
pub const DEFAULT_DASHBOARD_URL: &str = "http://localhost:3000/";
pub const DEFAULT_ROOM: &str = "401";

/// Placeholder credential from the sample .env
const DEMO_KEY: &str = "demo_key";

// -----------------------------------------------------------------------------
// GATEWAY CONFIG
// -----------------------------------------------------------------------------
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,

    /// `None` means demo weather
    pub weather_api_key: Option<String>,

    pub default_city: String,

    pub weather_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().context("Failed to parse PORT as a number")?,
            None => DEFAULT_PORT,
        };

        let weather_api_key = lookup("OPENWEATHER_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != DEMO_KEY);

        let default_city = lookup("DEFAULT_CITY")
            .filter(|city| !city.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string());

        let weather_base_url = lookup("OPENWEATHER_BASE_URL")
            .unwrap_or_else(|| DEFAULT_WEATHER_BASE_URL.to_string());
        Url::parse(&weather_base_url).context("OPENWEATHER_BASE_URL is not a valid URL")?;

        Ok(Self {
            port,
            weather_api_key,
            default_city,
            weather_base_url,
        })
    }
}

// -----------------------------------------------------------------------------
// KIOSK CONFIG
// -----------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq)]
pub struct KioskConfig {
    /// Origin of the dashboard URL; API paths are joined onto it
    pub gateway: Url,
    pub room: String,
    pub city: String,
}

impl KioskConfig {
    /// `url_arg` (first CLI argument) wins over `DASHBOARD_URL`.
    pub fn from_env(url_arg: Option<String>) -> Result<Self> {
        let url = url_arg
            .or_else(|| std::env::var("DASHBOARD_URL").ok())
            .unwrap_or_else(|| DEFAULT_DASHBOARD_URL.to_string());
        let city = std::env::var("WEATHER_CITY").ok();
        Self::from_url(&url, city)
    }

    /// Reads the room from the `room` or `roomNumber` query parameter.
    pub fn from_url(url: &str, city: Option<String>) -> Result<Self> {
        let page = Url::parse(url).with_context(|| format!("Invalid dashboard URL {url:?}"))?;

        let query_value = |name: &str| {
            page.query_pairs()
                .find(|(key, value)| key == name && !value.is_empty())
                .map(|(_, value)| value.into_owned())
        };
        let room = query_value("room")
            .or_else(|| query_value("roomNumber"))
            .unwrap_or_else(|| DEFAULT_ROOM.to_string());

        let mut gateway = page.clone();
        gateway.set_query(None);
        gateway.set_fragment(None);
        gateway.set_path("/");

        Ok(Self {
            gateway,
            room,
            city: city
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CITY.to_string()),
        })
    }
}
