// =============================================================================
// DASHBOARD CONTROLLER
// =============================================================================
// Owns the on-screen state. Pure: it never performs I/O itself. Timer fires
// and display/connectivity events go in, `Fetch` requests come out; fetch
// results come back as `Update`s in whatever order they complete.
//
// Per category the state is Unloaded -> Loaded | Fallback, and any later
// result moves it again. There is no terminal state.
// =============================================================================

use chrono::NaiveDateTime;

use super::panels::{
    ClockPanel, DashboardView, EnvironmentPanel, GuestPanel, PreferencesPanel, WeatherPanel,
};
use super::Task;
use crate::fallback::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Guest,
    Environment,
    Weather,
    Preferences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Unloaded,
    Loaded,
    Fallback,
}

impl<T> From<&Outcome<T>> for PanelState {
    fn from(outcome: &Outcome<T>) -> Self {
        if outcome.is_fallback() {
            PanelState::Fallback
        } else {
            PanelState::Loaded
        }
    }
}

/// A gateway request the runtime should issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fetch {
    Guest,
    Environment,
    Weather,
    Preferences,
    /// Health probe; answers with `Update::Connectivity`
    Connectivity,
}

/// A completed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Guest(Outcome<GuestPanel>),
    Environment(Outcome<EnvironmentPanel>),
    Weather(Outcome<WeatherPanel>),
    Preferences(Outcome<PreferencesPanel>),
    Connectivity(bool),
}

#[derive(Debug, Clone, Copy, Default)]
struct PanelStates {
    guest: PanelState,
    environment: PanelState,
    weather: PanelState,
    preferences: PanelState,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    room: String,
    city: String,
    view: DashboardView,
    states: PanelStates,
    online: bool,
}

impl Dashboard {
    pub fn new(room: impl Into<String>, city: impl Into<String>) -> Self {
        let room = room.into();
        let city = city.into();
        Self {
            view: DashboardView::loading(&room, &city),
            room,
            city,
            states: PanelStates::default(),
            online: true,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn state(&self, category: Category) -> PanelState {
        match category {
            Category::Guest => self.states.guest,
            Category::Environment => self.states.environment,
            Category::Weather => self.states.weather,
            Category::Preferences => self.states.preferences,
        }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Initial load: clock plus every category.
    pub fn start(&mut self, now: NaiveDateTime) -> Vec<Fetch> {
        self.refresh_clock(now);
        vec![Fetch::Guest, Fetch::Environment, Fetch::Weather, Fetch::Preferences]
    }

    /// Handles one scheduled task firing.
    pub fn on_task(&mut self, task: Task, now: NaiveDateTime) -> Vec<Fetch> {
        match task {
            Task::Clock => {
                self.refresh_clock(now);
                Vec::new()
            }
            Task::Environment => vec![Fetch::Environment],
            Task::Weather => vec![Fetch::Weather],
            Task::GuestProfile => vec![Fetch::Guest, Fetch::Preferences],
            Task::ConnectivityProbe => vec![Fetch::Connectivity],
            Task::FullReload => {
                tracing::info!(room = %self.room, "Full dashboard reload");
                *self = Dashboard::new(self.room.clone(), self.city.clone());
                self.start(now)
            }
        }
    }

    /// The display woke up. Periodic timers are left alone.
    pub fn on_visible(&mut self, now: NaiveDateTime) -> Vec<Fetch> {
        tracing::info!("Display visible again, refreshing");
        self.refresh_clock(now);
        vec![Fetch::Guest, Fetch::Environment]
    }

    /// Applies a completed fetch. Returns follow-up fetches, which only a
    /// restored connection produces.
    pub fn apply(&mut self, update: Update) -> Vec<Fetch> {
        match update {
            Update::Guest(outcome) => {
                self.states.guest = PanelState::from(&outcome);
                self.view.guest = outcome.into_inner();
            }
            Update::Environment(outcome) => {
                self.states.environment = PanelState::from(&outcome);
                self.view.environment = outcome.into_inner();
            }
            Update::Weather(outcome) => {
                self.states.weather = PanelState::from(&outcome);
                self.view.weather = outcome.into_inner();
            }
            Update::Preferences(outcome) => {
                self.states.preferences = PanelState::from(&outcome);
                self.view.preferences = outcome.into_inner();
            }
            Update::Connectivity(online) => return self.set_online(online),
        }
        Vec::new()
    }

    fn set_online(&mut self, online: bool) -> Vec<Fetch> {
        let was_online = self.online;
        self.online = online;
        self.view.offline = !online;

        match (was_online, online) {
            (false, true) => {
                tracing::info!("Connection restored, refreshing");
                vec![Fetch::Weather, Fetch::Guest]
            }
            (true, false) => {
                tracing::warn!("Connection lost, keeping last known values");
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn refresh_clock(&mut self, now: NaiveDateTime) {
        self.view.clock = ClockPanel::at(now);
    }
}
