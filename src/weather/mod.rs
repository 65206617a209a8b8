// =============================================================================
// WEATHER MODULE
// =============================================================================
// Picks one of three sources for a city's weather, in priority order:
// 1. demo data, when no provider credential is configured (no network call)
// 2. the live provider, normalized
// 3. the fallback snapshot, when the provider call fails in any way
//
// Nothing is cached between requests and nothing is retried.
// =============================================================================

mod icons;
mod normalize;
mod provider;

use std::sync::Arc;

pub use icons::{ConditionCode, UnknownCondition, WeatherIcon};
pub use normalize::{
    demo_snapshot, fallback_snapshot, normalize, recommendations, title_case, FALLBACK_NOTE,
    FORECAST_LEN,
};
pub use provider::{
    Condition, CurrentConditions, Forecast, ForecastCity, ForecastPoint, MainReadings,
    OpenWeatherClient, ProviderError, WeatherProvider,
};

use crate::fallback::{fetch_with_fallback, Outcome};
use crate::models::{Provenance, WeatherSnapshot};

/// A snapshot together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub snapshot: WeatherSnapshot,
    pub provenance: Provenance,
}

impl WeatherReport {
    /// Provenance note for the response envelope, if any.
    pub fn note(&self) -> Option<String> {
        match self.provenance {
            Provenance::Fallback => Some(FALLBACK_NOTE.to_string()),
            Provenance::Live | Provenance::Demo => None,
        }
    }
}

#[derive(Clone)]
pub struct WeatherService {
    /// `None` means demo mode
    provider: Option<Arc<dyn WeatherProvider>>,
    default_city: String,
}

impl WeatherService {
    pub fn new(provider: Option<Arc<dyn WeatherProvider>>, default_city: impl Into<String>) -> Self {
        Self {
            provider,
            default_city: default_city.into(),
        }
    }

    pub fn is_demo(&self) -> bool {
        self.provider.is_none()
    }

    /// Weather for `city`, or for the default city when absent or blank.
    /// Never fails.
    pub async fn report(&self, city: Option<&str>) -> WeatherReport {
        let city = match city.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => self.default_city.clone(),
        };

        let Some(provider) = &self.provider else {
            tracing::debug!(city = %city, "No weather credential, serving demo data");
            return WeatherReport {
                snapshot: demo_snapshot(&city),
                provenance: Provenance::Demo,
            };
        };

        let outcome = fetch_with_fallback(
            "weather",
            fetch_live(provider.as_ref(), &city),
            || fallback_snapshot(&city),
        )
        .await;

        match outcome {
            Outcome::Live(snapshot) => WeatherReport {
                snapshot,
                provenance: Provenance::Live,
            },
            Outcome::Fallback(snapshot) => WeatherReport {
                snapshot,
                provenance: Provenance::Fallback,
            },
        }
    }
}

/// Current conditions and forecast, requested concurrently. Either failing
/// fails the whole fetch.
async fn fetch_live(provider: &dyn WeatherProvider, city: &str) -> Result<WeatherSnapshot, ProviderError> {
    let (current, forecast) = tokio::try_join!(provider.current(city), provider.forecast(city))?;
    normalize(&current, &forecast)
}
