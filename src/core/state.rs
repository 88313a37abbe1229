pub mod bookmark;
pub mod clock;
pub mod gradient;
pub mod pomodoro;
pub mod quote;
pub mod settings;
pub mod system;
pub mod theme;

use crate::{
    domain::theme::SurfaceTints,
    infrastructure::{config::Config, storage::Snapshot},
};
use bookmark::BookmarkState;
use clock::ClockState;
use gradient::GradientState;
use pomodoro::PomodoroState;
use quote::QuoteState;
use settings::SettingsState;
use system::SystemState;
use theme::ThemeState;

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub system: SystemState,
    pub clock: ClockState,
    pub quote: QuoteState,
    pub bookmarks: BookmarkState,
    pub pomodoro: PomodoroState,
    pub gradient: GradientState,
    pub theme: ThemeState,
    pub settings: SettingsState,
    /// Card and panel colors derived from the committed pair and theme
    pub surfaces: SurfaceTints,
    pub config: ConfigState,
}

/// Configuration state - holds all user-configurable settings
#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    /// Current configuration loaded from file
    pub config: Config,
}

impl AppState {
    /// Initialize AppState from config and the values restored from storage
    pub fn new(config: Config, snapshot: Snapshot) -> Self {
        let dashboard = &config.dashboard;
        let mut state = Self {
            clock: ClockState::new(dashboard.clock_format.clone()),
            bookmarks: BookmarkState::new(snapshot.bookmarks),
            pomodoro: PomodoroState::new(dashboard.pomodoro_secs, snapshot.pomodoro_time),
            gradient: GradientState::new(
                snapshot.colors,
                dashboard.gradient_transition_ms,
                dashboard.animation_frame_ms,
            ),
            theme: ThemeState::new(snapshot.theme),
            settings: SettingsState::new(snapshot.colors),
            config: ConfigState { config },
            ..Default::default()
        };
        state.refresh_surfaces();
        state
    }

    pub fn new_with_config(config: Config) -> Self {
        Self::new(config, Snapshot::default())
    }

    /// Re-derive surface tints from the committed pair and current theme.
    pub fn refresh_surfaces(&mut self) {
        self.surfaces = SurfaceTints::derive(self.gradient.pair, self.theme.current);
    }
}
