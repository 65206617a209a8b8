// =============================================================================
// WEATHER PROVIDER
// =============================================================================
// The third-party weather source, seen only through its request/response
// contract. `OpenWeatherClient` talks to the OpenWeather 2.5 REST API; tests
// substitute their own `WeatherProvider`.
// =============================================================================

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

/// Forecast points requested per call (3-hour steps, one day)
const FORECAST_POINTS: &str = "8";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("weather provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider answered {0}")]
    Status(u16),

    #[error("malformed weather payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Malformed(err.to_string())
    }
}

// -----------------------------------------------------------------------------
// RESPONSE SHAPES
// -----------------------------------------------------------------------------
// Only the fields the normalizer reads. Anything else in the payload is
// ignored by serde.

/// `GET /weather`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    /// City name as the provider resolved it
    pub name: String,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
}

/// `GET /forecast`
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub list: Vec<ForecastPoint>,
    #[serde(default)]
    pub city: Option<ForecastCity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPoint {
    /// Unix seconds, UTC
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastCity {
    /// Offset from UTC in seconds
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    /// °C (requested with units=metric)
    pub temp: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    /// Group keyword, e.g. "Rain", "Clear", "Clouds"
    pub main: String,
    /// e.g. "light rain"
    pub description: String,
    /// e.g. "10d"
    pub icon: String,
}

// -----------------------------------------------------------------------------
// PROVIDER TRAIT
// -----------------------------------------------------------------------------
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Result<CurrentConditions, ProviderError>;

    async fn forecast(&self, city: &str) -> Result<Forecast, ProviderError>;
}

// -----------------------------------------------------------------------------
// OPENWEATHER CLIENT
// -----------------------------------------------------------------------------
/// OpenWeather over HTTP. No timeout beyond reqwest's defaults and no retry.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        city: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .query(extra)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<CurrentConditions, ProviderError> {
        self.get("weather", city, &[]).await
    }

    async fn forecast(&self, city: &str) -> Result<Forecast, ProviderError> {
        self.get("forecast", city, &[("cnt", FORECAST_POINTS)]).await
    }
}
