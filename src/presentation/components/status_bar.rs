//! Status line
//!
//! Left: the latest status or error message. Right: key hints for the
//! current mode.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::{
    core::state::AppState,
    presentation::{components::hint_key, config::keybindings::Action},
};

const PANEL_HINTS: &str = "tab next · enter select · esc close";

#[derive(Debug, Clone, Default)]
pub struct StatusBarComponent;

impl StatusBarComponent {
    pub fn new() -> Self {
        Self
    }

    /// Hint text built from the configured keybindings
    pub fn hints(&self, state: &AppState) -> String {
        if state.settings.open {
            return PANEL_HINTS.to_string();
        }

        let open = (!state.bookmarks.items.is_empty()).then(|| "[1-9] open".to_string());
        let bound = [
            (Action::ToggleSettings, "settings"),
            (Action::ToggleTheme, "theme"),
            (Action::ToggleIcons, "icons"),
            (Action::ReloadBookmarks, "reload"),
            (Action::Quit, "quit"),
        ]
        .into_iter()
        .filter_map(|(action, name)| hint_key(state, action).map(|key| format!("[{key}] {name}")));

        open.into_iter().chain(bound).collect::<Vec<_>>().join("  ")
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }

        let styles = &state.config.config.styles;
        let theme = state.theme.current;
        let base = Style::default()
            .fg(theme.text().into())
            .bg(theme.base().into());

        let message = state.system.status_message.clone().unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Span::styled(message, styles.get_or_default("status"))).style(base),
            area,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(self.hints(state), styles.get_or_default("hint")))
                .alignment(Alignment::Right),
            area,
        );
    }
}
