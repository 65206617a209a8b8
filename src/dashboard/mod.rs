// =============================================================================
// KIOSK DASHBOARD
// =============================================================================
// Client side of the in-room display:
// - scheduler:  named periodic tasks on a virtual timeline
// - panels:     what each panel shows, with per-field and per-panel defaults
// - controller: pure state machine from events to fetches and panel updates
// - client:     HTTP calls to the gateway
// - render:     text frame for the terminal
// - runtime:    the event loop tying it all to tokio
// =============================================================================

pub mod client;
pub mod controller;
pub mod panels;
pub mod render;
pub mod runtime;
pub mod scheduler;

use std::time::Duration;

pub use client::{FetchError, GatewayClient};
pub use controller::{Category, Dashboard, Fetch, PanelState, Update};
pub use panels::DashboardView;
pub use scheduler::Scheduler;

// -----------------------------------------------------------------------------
// POLLING PERIODS
// -----------------------------------------------------------------------------
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);
pub const ENVIRONMENT_PERIOD: Duration = Duration::from_secs(30);
pub const WEATHER_PERIOD: Duration = Duration::from_secs(5 * 60);
/// Guest profile and preferences, every twentieth environment period
pub const GUEST_PERIOD: Duration = Duration::from_secs(30 * 20);
pub const FULL_RELOAD_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);
pub const CONNECTIVITY_PERIOD: Duration = Duration::from_secs(15);

/// Everything the kiosk does on a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    Clock,
    Environment,
    Weather,
    GuestProfile,
    FullReload,
    ConnectivityProbe,
}

/// The kiosk's timers, all starting at the same origin.
pub fn kiosk_schedule() -> Scheduler<Task> {
    Scheduler::new()
        .every(Task::Clock, CLOCK_PERIOD)
        .every(Task::Environment, ENVIRONMENT_PERIOD)
        .every(Task::Weather, WEATHER_PERIOD)
        .every(Task::GuestProfile, GUEST_PERIOD)
        .every(Task::FullReload, FULL_RELOAD_PERIOD)
        .every(Task::ConnectivityProbe, CONNECTIVITY_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_period_is_twenty_environment_periods() {
        assert_eq!(GUEST_PERIOD, ENVIRONMENT_PERIOD * 20);
    }

    #[test]
    fn test_first_full_reload_after_a_day() {
        let mut scheduler = kiosk_schedule();
        let fired = scheduler.poll(FULL_RELOAD_PERIOD - Duration::from_secs(1));
        assert!(!fired.contains(&Task::FullReload));

        let fired = scheduler.poll(FULL_RELOAD_PERIOD);
        assert_eq!(fired.iter().filter(|t| **t == Task::FullReload).count(), 1);
    }
}
