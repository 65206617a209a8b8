// =============================================================================
// KIOSK RUNTIME
// =============================================================================
// Single event loop around the controller. Inputs:
// - scheduler deadlines (tokio timers against a fixed origin)
// - completed fetches, sent back over a channel by spawned tasks
// - SIGUSR1, meaning the display became visible again
// - shutdown
//
// Fetches run concurrently and are never cancelled; whichever completes
// last for a category is what the screen shows.
// =============================================================================

use std::collections::HashSet;
use std::future::Future;

use anyhow::{Context, Result};
use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info};

use super::client::GatewayClient;
use super::controller::{Dashboard, Fetch, Update};
use super::kiosk_schedule;
use super::render::render;
use crate::config::KioskConfig;

/// Runs until Ctrl-C, handing every rendered frame to `draw`.
pub async fn run(config: KioskConfig, draw: impl FnMut(&str)) -> Result<()> {
    run_until(config, draw, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

/// Runs until `shutdown` resolves.
pub async fn run_until<F>(config: KioskConfig, mut draw: impl FnMut(&str), shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    info!(
        gateway = %config.gateway,
        room = %config.room,
        city = %config.city,
        "Starting kiosk dashboard"
    );

    let client = GatewayClient::new(config.gateway.clone());
    let mut dashboard = Dashboard::new(config.room.clone(), config.city.clone());
    let mut scheduler = kiosk_schedule();
    let mut wake = WakeSignal::install().context("Failed to install display wake signal")?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Update>();
    let dispatch = |fetches: Vec<Fetch>| {
        for fetch in dedup(fetches) {
            let client = client.clone();
            let tx = tx.clone();
            let room = config.room.clone();
            let city = config.city.clone();
            tokio::spawn(async move {
                let update = client.perform(fetch, &room, &city).await;
                // Receiver only goes away on shutdown
                let _ = tx.send(update);
            });
        }
    };

    let origin = Instant::now();
    dispatch(dashboard.start(Local::now().naive_local()));
    draw(&render(dashboard.view()));

    tokio::pin!(shutdown);

    loop {
        let deadline = scheduler.next_deadline().map(|d| origin + d);

        tokio::select! {
            _ = sleep_until(deadline) => {
                let now = Local::now().naive_local();
                let mut fetches = Vec::new();
                for task in scheduler.poll(origin.elapsed()) {
                    fetches.extend(dashboard.on_task(task, now));
                }
                dispatch(fetches);
            }
            Some(update) = rx.recv() => {
                debug!(?update, "Fetch completed");
                dispatch(dashboard.apply(update));
            }
            _ = wake.recv() => {
                dispatch(dashboard.on_visible(Local::now().naive_local()));
            }
            _ = &mut shutdown => {
                info!("Kiosk shutting down");
                return Ok(());
            }
        }

        draw(&render(dashboard.view()));
    }
}

/// A single poll can return the same task many times after the process was
/// suspended; one request per category is enough.
fn dedup(mut fetches: Vec<Fetch>) -> Vec<Fetch> {
    let mut seen = HashSet::new();
    fetches.retain(|fetch| seen.insert(*fetch));
    fetches
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

// -----------------------------------------------------------------------------
// DISPLAY WAKE
// -----------------------------------------------------------------------------
#[cfg(unix)]
struct WakeSignal(tokio::signal::unix::Signal);

#[cfg(unix)]
impl WakeSignal {
    fn install() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::user_defined1()).map(Self)
    }

    async fn recv(&mut self) {
        if self.0.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
struct WakeSignal;

#[cfg(not(unix))]
impl WakeSignal {
    fn install() -> std::io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SampleGuestStore;
    use crate::weather::WeatherService;
    use crate::{build_router, metrics, AppState};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let fetches = vec![
            Fetch::Environment,
            Fetch::Guest,
            Fetch::Environment,
            Fetch::Preferences,
            Fetch::Guest,
        ];
        assert_eq!(
            dedup(fetches),
            vec![Fetch::Environment, Fetch::Guest, Fetch::Preferences]
        );
    }

    #[tokio::test]
    async fn test_kiosk_renders_gateway_data() {
        let router = build_router(Arc::new(AppState {
            store: Arc::new(SampleGuestStore::new()),
            weather: WeatherService::new(None, "Budapest"),
            metrics_handle: metrics::detached_handle(),
        }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let config =
            KioskConfig::from_url(&format!("http://{addr}/?room=512"), Some("Vienna".into())).unwrap();

        let mut frames = Vec::new();
        run_until(
            config,
            |frame| frames.push(frame.to_string()),
            tokio::time::sleep(Duration::from_millis(500)),
        )
        .await
        .unwrap();

        assert!(frames[0].contains("Room 512"));
        let last = frames.last().unwrap();
        assert!(last.contains("Mr. and Mrs. Johnson"));
        assert!(last.contains("Vienna"));
        assert!(last.contains("Pillow Soft"));
    }

    #[tokio::test]
    async fn test_kiosk_without_gateway_shows_fallbacks() {
        // Nothing listens on this port once the listener is dropped
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = KioskConfig::from_url(&format!("http://{addr}/"), None).unwrap();

        let mut frames = Vec::new();
        run_until(
            config,
            |frame| frames.push(frame.to_string()),
            tokio::time::sleep(Duration::from_millis(500)),
        )
        .await
        .unwrap();

        let last = frames.last().unwrap();
        assert!(last.contains("Welcome Guest"));
        assert!(last.contains("Room 401"));
        assert!(last.contains("22°C"));
        assert!(last.contains("24°C  Pleasant  Budapest"));
    }
}
