//! Application state for the terminal dashboard.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::style::Color;
use tokio::sync::{mpsc, watch};

use garden_core::{DashboardState, Recommendation, StatusSummary, recommendations};
use garden_types::{PlantRecord, Snapshot};

use super::messages::DashboardEvent;
use super::ui::theme::AppTheme;
use crate::config::ThemeChoice;

/// UI color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Background color for the theme.
    pub fn bg(self) -> Color {
        match self {
            Theme::Dark => Color::Reset,
            Theme::Light => Color::White,
        }
    }
}

impl From<ThemeChoice> for Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Theme::Dark,
            ThemeChoice::Light => Theme::Light,
        }
    }
}

/// Main application state for the dashboard.
pub struct App {
    /// Published view-model state.
    pub state_rx: watch::Receiver<DashboardState>,
    /// Copy of the latest published state, taken once per frame.
    pub state: DashboardState,
    /// Plant catalog shown on the cards.
    pub plants: Arc<[PlantRecord]>,
    /// Name of the telemetry source, shown in the header.
    pub source_name: String,
    /// Refresh period, shown in the help overlay.
    pub period: Duration,
    /// Events from the background worker.
    pub event_rx: mpsc::Receiver<DashboardEvent>,
    pub should_quit: bool,
    pub show_help: bool,
    pub theme: Theme,
    /// Show temperatures in Fahrenheit.
    pub fahrenheit: bool,
    /// Spinner animation frame.
    pub spinner_frame: usize,
    /// Status messages with the time they were pushed.
    pub status_messages: Vec<(String, Instant)>,
    /// How long to show each status message (in seconds).
    pub status_message_timeout: u64,
}

impl App {
    pub fn new(
        state_rx: watch::Receiver<DashboardState>,
        event_rx: mpsc::Receiver<DashboardEvent>,
        plants: Arc<[PlantRecord]>,
    ) -> Self {
        let state = state_rx.borrow().clone();
        Self {
            state_rx,
            state,
            plants,
            source_name: String::new(),
            period: garden_core::DEFAULT_PERIOD,
            event_rx,
            should_quit: false,
            show_help: false,
            theme: Theme::default(),
            fahrenheit: false,
            spinner_frame: 0,
            status_messages: Vec::new(),
            status_message_timeout: 5,
        }
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_fahrenheit(mut self, fahrenheit: bool) -> Self {
        self.fahrenheit = fahrenheit;
        self
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Pull the latest published state, if it changed.
    ///
    /// A newly surfaced refresh error is pushed as a status message.
    pub fn sync_state(&mut self) -> bool {
        if !self.state_rx.has_changed().unwrap_or(false) {
            return false;
        }
        let next = self.state_rx.borrow_and_update().clone();
        if let Some(error) = &next.last_error
            && next.last_error != self.state.last_error
        {
            self.push_status_message(format!("Refresh failed: {}", error));
        }
        self.state = next;
        true
    }

    /// Handle an event from the worker.
    pub fn handle_dashboard_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Refreshed { generation } => {
                self.push_status_message(format!("Refreshed (snapshot #{})", generation));
            }
            DashboardEvent::RefreshFailed { error } => {
                self.push_status_message(format!("Refresh failed: {}", error));
            }
        }
    }

    /// The snapshot to render; `None` while loading.
    #[must_use]
    pub fn visible_snapshot(&self) -> Option<&Snapshot> {
        self.state.visible()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    #[must_use]
    pub fn summary(&self) -> StatusSummary {
        StatusSummary::from_plants(&self.plants)
    }

    #[must_use]
    pub fn recommendations(&self) -> Vec<Recommendation> {
        recommendations(&self.plants, self.visible_snapshot())
    }

    pub fn toggle_theme(&mut self) {
        self.theme = match self.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
    }

    /// Get the current AppTheme based on the theme setting.
    #[must_use]
    pub fn app_theme(&self) -> AppTheme {
        match self.theme {
            Theme::Dark => AppTheme::dark(),
            Theme::Light => AppTheme::light(),
        }
    }

    /// Push a status message to be displayed.
    pub fn push_status_message(&mut self, message: String) {
        self.status_messages.push((message, Instant::now()));
        // Keep at most 5 messages
        while self.status_messages.len() > 5 {
            self.status_messages.remove(0);
        }
    }

    /// Remove expired status messages.
    pub fn clean_expired_messages(&mut self) {
        let timeout = Duration::from_secs(self.status_message_timeout);
        self.status_messages
            .retain(|(_, created)| created.elapsed() < timeout);
    }

    pub fn current_status_message(&self) -> Option<&str> {
        self.status_messages.last().map(|(msg, _)| msg.as_str())
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % 10;
    }

    pub fn spinner_char(&self) -> &'static str {
        const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
        SPINNER[self.spinner_frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::plants::default_catalog;
    use garden_core::{FixedClock, MockSource};
    use garden_core::DashboardViewModel;
    use time::macros::datetime;

    fn setup() -> (Arc<DashboardViewModel>, Arc<MockSource>, App) {
        let source = Arc::new(MockSource::new("mock"));
        let clock = Arc::new(FixedClock::new(datetime!(2024-06-01 15:00 UTC)));
        let vm = Arc::new(DashboardViewModel::new(
            source.clone(),
            clock,
            default_catalog(),
        ));
        let (_tx, rx) = mpsc::channel(1);
        let app = App::new(vm.subscribe(), rx, vm.plants_shared());
        (vm, source, app)
    }

    #[test]
    fn test_new_app_starts_loading() {
        let (_vm, _source, app) = setup();
        assert!(app.is_loading());
        assert!(app.visible_snapshot().is_none());
        assert!(!app.should_quit());
        assert_eq!(app.theme, Theme::Dark);
        assert_eq!(app.summary().total(), 4);
    }

    #[tokio::test]
    async fn test_sync_state_picks_up_refresh() {
        let (vm, _source, mut app) = setup();
        vm.refresh().await.unwrap();

        assert!(app.sync_state());
        assert!(!app.is_loading());
        assert_eq!(app.visible_snapshot().map(|s| s.generation), Some(1));
        assert!(!app.sync_state());
    }

    #[tokio::test]
    async fn test_sync_state_surfaces_errors() {
        let (vm, source, mut app) = setup();
        source.set_should_fail(true, Some("sensor offline")).await;
        assert!(vm.refresh().await.is_err());

        app.sync_state();
        let message = app.current_status_message().unwrap();
        assert!(message.starts_with("Refresh failed"));
        assert!(message.contains("sensor offline"));
    }

    #[test]
    fn test_spinner_wraps() {
        let (_vm, _source, mut app) = setup();
        for _ in 0..10 {
            app.tick_spinner();
        }
        assert_eq!(app.spinner_char(), "⠋");
        app.tick_spinner();
        assert_eq!(app.spinner_char(), "⠙");
    }

    #[test]
    fn test_status_messages_capped() {
        let (_vm, _source, mut app) = setup();
        for i in 0..8 {
            app.push_status_message(format!("msg {}", i));
        }
        assert_eq!(app.status_messages.len(), 5);
        assert_eq!(app.current_status_message(), Some("msg 7"));
    }

    #[test]
    fn test_toggle_theme() {
        let (_vm, _source, mut app) = setup();
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.theme.bg(), Color::White);
        app.toggle_theme();
        assert_eq!(app.theme, Theme::Dark);
    }

    #[test]
    fn test_theme_from_config() {
        assert_eq!(Theme::from(ThemeChoice::Light), Theme::Light);
    }

    #[test]
    fn test_worker_events_become_messages() {
        let (_vm, _source, mut app) = setup();
        app.handle_dashboard_event(DashboardEvent::Refreshed { generation: 4 });
        assert_eq!(app.current_status_message(), Some("Refreshed (snapshot #4)"));
    }
}
