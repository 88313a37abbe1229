//! Component collection and management
//!
//! Components are stateless renderers that receive `AppState` during render.

use std::rc::Rc;

use ratatui::prelude::*;

use crate::{core::state::AppState, presentation::config::keybindings::Action};

pub mod dashboard;
pub mod settings;
pub mod status_bar;

pub use dashboard::DashboardComponent;
pub use settings::SettingsComponent;
pub use status_bar::StatusBarComponent;

/// Collection of all components
pub struct Components {
    pub dashboard: DashboardComponent,
    pub settings: SettingsComponent,
    pub status_bar: StatusBarComponent,
}

impl Components {
    pub fn new() -> Self {
        Self {
            dashboard: DashboardComponent::new(),
            settings: SettingsComponent::new(),
            status_bar: StatusBarComponent::new(),
        }
    }

    /// Render all components
    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.area();
        if area.is_empty() {
            return;
        }

        let layout = screen_layout(area);

        self.dashboard.view(state, frame, layout[0]);
        self.status_bar.view(state, frame, layout[1]);

        // Overlay
        if state.settings.open {
            self.settings
                .view(state, frame, settings::settings_panel_area(area));
        }
    }
}

impl Default for Components {
    fn default() -> Self {
        Self::new()
    }
}

/// [dashboard, status line]
fn screen_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area)
}

/// Part of the screen the dashboard renders into
pub fn dashboard_area(screen: Rect) -> Rect {
    screen_layout(screen)[0]
}

/// Shortest key bound to `action`, for hint text
pub fn hint_key(state: &AppState, action: Action) -> Option<String> {
    state
        .config
        .config
        .keybindings
        .keys_for(action)
        .into_iter()
        .min_by_key(|key| key.len())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::infrastructure::config::Config;

    fn state() -> AppState {
        AppState::new_with_config(Config::embedded().unwrap_or_default())
    }

    #[test]
    fn test_hint_key_prefers_plain_key() {
        let state = state();
        assert_eq!(hint_key(&state, Action::Quit), Some("q".to_string()));
        assert_eq!(hint_key(&state, Action::Suspend), None);
    }

    #[test]
    fn test_render_handles_tiny_terminals() -> color_eyre::Result<()> {
        let state = state();
        let mut components = Components::new();
        for (w, h) in [(1, 1), (3, 2), (10, 4)] {
            let mut terminal = Terminal::new(TestBackend::new(w, h))?;
            terminal.draw(|f| components.render(f, &state))?;
        }
        Ok(())
    }

    #[test]
    fn test_link_bar_hit_test_matches_rendered_labels() -> color_eyre::Result<()> {
        use crate::{core::state::bookmark::BookmarkState, domain::bookmark::Bookmark};

        let mut state = state();
        state.bookmarks = BookmarkState::new(vec![
            Bookmark {
                label: "Rust".to_string(),
                url: "https://www.rust-lang.org".to_string(),
            },
            Bookmark {
                label: "Docs".to_string(),
                url: "https://docs.rs".to_string(),
            },
        ]);

        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|f| Components::new().render(f, &state))?;
        let buf = terminal.backend().buffer().clone();

        let screen = Rect::new(0, 0, 100, 30);
        let links = DashboardComponent::link_bar_area(dashboard_area(screen));
        let bar = crate::presentation::widgets::link_bar::LinkBar::new(&state.bookmarks);
        for (label, index) in [("R", 0), ("D", 1)] {
            let x = (links.x..links.right())
                .find(|&x| buf[(x, links.y)].symbol() == label)
                .ok_or_else(|| color_eyre::eyre::eyre!("{label} not rendered"))?;
            assert_eq!(bar.hit_test(links, Position::new(x, links.y)), Some(index));
        }
        Ok(())
    }
}
