// =============================================================================
// GATEWAY CLIENT
// =============================================================================
// The kiosk's view of the gateway: one GET per data category, unwrapped
// from the `{success, data}` envelope.
// =============================================================================

use reqwest::Url;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::controller::{Fetch, Update};
use super::panels::{
    EnvironmentPanel, EnvironmentRecord, GuestPanel, GuestRecord, PreferencesPanel,
    PreferencesRecord, WeatherPanel, WeatherRecord,
};
use crate::fallback::fetch_with_fallback;
use crate::models::ApiResponse;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("gateway unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("gateway answered {0}")]
    Status(u16),

    /// `success: false` envelope
    #[error("gateway reported failure: {0}")]
    Rejected(String),

    #[error("gateway response carried no data")]
    Empty,

    #[error("cannot build request URL from {0}")]
    BadBase(Url),
}

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base: Url,
}

impl GatewayClient {
    pub fn new(base: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
        }
    }

    /// `base` + percent-encoded path segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::BadBase(self.base.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, FetchError> {
        let response = self.http.get(self.endpoint(segments)?).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.success {
            return Err(FetchError::Rejected(envelope.message.unwrap_or_default()));
        }
        envelope.data.ok_or(FetchError::Empty)
    }

    pub async fn guest(&self, room: &str) -> Result<GuestRecord, FetchError> {
        self.get(&["api", "guest", room]).await
    }

    pub async fn environment(&self, room: &str) -> Result<EnvironmentRecord, FetchError> {
        self.get(&["api", "room-environment", room]).await
    }

    pub async fn weather(&self, city: &str) -> Result<WeatherRecord, FetchError> {
        self.get(&["api", "weather", city]).await
    }

    pub async fn preferences(&self, room: &str) -> Result<PreferencesRecord, FetchError> {
        self.get(&["api", "preferences", room]).await
    }

    /// Liveness probe, used as the connectivity signal.
    pub async fn health(&self) -> Result<(), FetchError> {
        let response = self.http.get(self.endpoint(&["api", "health"])?).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::Status(status.as_u16()))
        }
    }

    /// Runs one fetch and turns the answer (or its failure) into a panel
    /// update. Never fails.
    pub async fn perform(&self, fetch: Fetch, room: &str, city: &str) -> Update {
        match fetch {
            Fetch::Guest => Update::Guest(
                fetch_with_fallback(
                    "guest profile",
                    async { self.guest(room).await.map(|r| GuestPanel::from_record(&r, room)) },
                    || GuestPanel::fallback(room),
                )
                .await,
            ),
            Fetch::Environment => Update::Environment(
                fetch_with_fallback(
                    "room environment",
                    async { self.environment(room).await.map(|r| EnvironmentPanel::from_record(&r)) },
                    EnvironmentPanel::fallback,
                )
                .await,
            ),
            Fetch::Weather => Update::Weather(
                fetch_with_fallback(
                    "weather",
                    async { self.weather(city).await.map(|r| WeatherPanel::from_record(&r, city)) },
                    || WeatherPanel::fallback(city),
                )
                .await,
            ),
            Fetch::Preferences => Update::Preferences(
                fetch_with_fallback(
                    "preferences",
                    async { self.preferences(room).await.map(|r| PreferencesPanel::from_record(&r)) },
                    PreferencesPanel::fallback,
                )
                .await,
            ),
            Fetch::Connectivity => Update::Connectivity(self.health().await.is_ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::Outcome;
    use crate::store::SampleGuestStore;
    use crate::weather::WeatherService;
    use crate::{build_router, metrics, AppState};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::sync::Arc;

    async fn serve(router: Router) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }

    async fn real_gateway() -> GatewayClient {
        let router = build_router(Arc::new(AppState {
            store: Arc::new(SampleGuestStore::new()),
            weather: WeatherService::new(None, "Budapest"),
            metrics_handle: metrics::detached_handle(),
        }));
        GatewayClient::new(serve(router).await)
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = GatewayClient::new(Url::parse("http://tv.local:3000/").unwrap());
        let url = client.endpoint(&["api", "guest", "Suite 401"]).unwrap();
        assert_eq!(url.as_str(), "http://tv.local:3000/api/guest/Suite%20401");
    }

    #[tokio::test]
    async fn test_perform_against_gateway() {
        let client = real_gateway().await;

        match client.perform(Fetch::Guest, "512", "Budapest").await {
            Update::Guest(Outcome::Live(panel)) => {
                assert_eq!(panel.guest_name, "Mr. and Mrs. Johnson");
                assert_eq!(panel.room_label, "512");
            }
            other => panic!("unexpected {other:?}"),
        }

        match client.perform(Fetch::Weather, "512", "Vienna").await {
            Update::Weather(Outcome::Live(panel)) => {
                assert_eq!(panel.location, "Vienna");
                assert_eq!(panel.forecast.len(), 3);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(matches!(
            client.perform(Fetch::Connectivity, "512", "Vienna").await,
            Update::Connectivity(true)
        ));
    }

    #[tokio::test]
    async fn test_rejected_envelope_falls_back() {
        let router = Router::new().route(
            "/api/preferences/:room",
            get(|| async { Json(json!({ "success": false, "message": "Error fetching guest preferences" })) }),
        );
        let client = GatewayClient::new(serve(router).await);

        let err = client.preferences("401").await.unwrap_err();
        assert!(matches!(err, FetchError::Rejected(ref m) if m == "Error fetching guest preferences"));

        match client.perform(Fetch::Preferences, "401", "Budapest").await {
            Update::Preferences(outcome) => {
                assert!(outcome.is_fallback());
                assert_eq!(outcome.value().mattress_type, "Firm");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let router = Router::new().route(
            "/api/room-environment/:room",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let client = GatewayClient::new(serve(router).await);

        match client.perform(Fetch::Environment, "401", "Budapest").await {
            Update::Environment(outcome) => {
                assert_eq!(outcome, Outcome::Fallback(EnvironmentPanel::fallback()));
            }
            other => panic!("unexpected {other:?}"),
        }
        match client.perform(Fetch::Weather, "401", "Vienna").await {
            Update::Weather(outcome) => {
                assert!(outcome.is_fallback());
                assert_eq!(outcome.value().location, "Vienna");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            client.perform(Fetch::Connectivity, "401", "Budapest").await,
            Update::Connectivity(false)
        ));
    }
}
