use serde::{Deserialize, Serialize};

use crate::{
    core::{cmd::Cmd, msg::settings::SettingsMsg},
    domain::color::GradientPair,
};

/// Single-line editable fields of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextField {
    Color1,
    Color2,
    Label,
    Url,
}

/// Focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum SettingsFocus {
    #[default]
    Color1,
    Color2,
    Apply,
    Theme,
    Icons,
    Label,
    Url,
    List,
}

impl SettingsFocus {
    pub const ORDER: [SettingsFocus; 8] = [
        SettingsFocus::Color1,
        SettingsFocus::Color2,
        SettingsFocus::Apply,
        SettingsFocus::Theme,
        SettingsFocus::Icons,
        SettingsFocus::Label,
        SettingsFocus::Url,
        SettingsFocus::List,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.index() + len - 1) % len]
    }

    pub fn text_field(self) -> Option<TextField> {
        match self {
            SettingsFocus::Color1 => Some(TextField::Color1),
            SettingsFocus::Color2 => Some(TextField::Color2),
            SettingsFocus::Label => Some(TextField::Label),
            SettingsFocus::Url => Some(TextField::Url),
            SettingsFocus::Apply
            | SettingsFocus::Theme
            | SettingsFocus::Icons
            | SettingsFocus::List => None,
        }
    }
}

/// Snapshot of a single-line editor
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextFieldState {
    pub content: String,
    /// Cursor column in characters
    pub cursor: usize,
}

impl TextFieldState {
    /// Field holding `content` with the cursor at its end.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub open: bool,
    pub focus: SettingsFocus,
    pub color1: TextFieldState,
    pub color2: TextFieldState,
    pub label: TextFieldState,
    pub url: TextFieldState,
    /// Selected row of the bookmark list
    pub selected: Option<usize>,
}

impl SettingsState {
    pub fn new(pair: GradientPair) -> Self {
        let mut state = Self::default();
        state.show_colors(pair);
        state
    }

    pub fn field(&self, field: TextField) -> &TextFieldState {
        match field {
            TextField::Color1 => &self.color1,
            TextField::Color2 => &self.color2,
            TextField::Label => &self.label,
            TextField::Url => &self.url,
        }
    }

    pub fn field_mut(&mut self, field: TextField) -> &mut TextFieldState {
        match field {
            TextField::Color1 => &mut self.color1,
            TextField::Color2 => &mut self.color2,
            TextField::Label => &mut self.label,
            TextField::Url => &mut self.url,
        }
    }

    pub fn focused_field(&self) -> Option<TextField> {
        self.focus.text_field()
    }

    /// Reset the color pickers to `pair`.
    pub fn show_colors(&mut self, pair: GradientPair) {
        self.color1 = TextFieldState::new(pair.start().to_hex());
        self.color2 = TextFieldState::new(pair.end().to_hex());
    }

    pub fn clear_bookmark_form(&mut self) {
        self.label = TextFieldState::default();
        self.url = TextFieldState::default();
    }

    /// Keep the list selection inside a collection of `len` entries.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
    }

    /// Panel-local transitions. `bookmark_count` bounds the list selection.
    /// Messages that reach other components are handled by the caller.
    pub fn update(&mut self, msg: SettingsMsg, bookmark_count: usize) -> Vec<Cmd> {
        match msg {
            SettingsMsg::Toggle => {
                self.open = !self.open;
                if self.open {
                    self.focus = SettingsFocus::default();
                }
                vec![]
            }

            SettingsMsg::Close => {
                self.open = false;
                vec![]
            }

            SettingsMsg::FocusNext => {
                self.focus = self.focus.next();
                vec![]
            }

            SettingsMsg::FocusPrev => {
                self.focus = self.focus.prev();
                vec![]
            }

            SettingsMsg::SetField(field, content) => {
                *self.field_mut(field) = TextFieldState::new(content);
                vec![]
            }

            SettingsMsg::SelectNext => {
                if bookmark_count > 0 {
                    self.selected = Some(match self.selected {
                        Some(i) => (i + 1).min(bookmark_count - 1),
                        None => 0,
                    });
                }
                vec![]
            }

            SettingsMsg::SelectPrev => {
                if bookmark_count > 0 {
                    self.selected = Some(match self.selected {
                        Some(i) => i.saturating_sub(1),
                        None => bookmark_count - 1,
                    });
                }
                vec![]
            }

            SettingsMsg::Activate | SettingsMsg::Input(_) | SettingsMsg::DeleteSelected => {
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::*;

    use super::*;

    #[test]
    fn test_focus_cycles_in_order() {
        let mut focus = SettingsFocus::default();
        let mut seen = vec![focus];
        for _ in 0..8 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(&seen[..8], &SettingsFocus::ORDER[..]);
        assert_eq!(seen[8], SettingsFocus::Color1);
        assert_eq!(SettingsFocus::Color1.prev(), SettingsFocus::List);
    }

    #[rstest]
    #[case(SettingsFocus::Color1, Some(TextField::Color1))]
    #[case(SettingsFocus::Url, Some(TextField::Url))]
    #[case(SettingsFocus::Apply, None)]
    #[case(SettingsFocus::List, None)]
    fn test_text_field_for_focus(#[case] focus: SettingsFocus, #[case] expected: Option<TextField>) {
        assert_eq!(focus.text_field(), expected);
    }

    #[test]
    fn test_new_prefills_colors() {
        let state = SettingsState::new(GradientPair::default());
        assert_eq!(state.color1, TextFieldState::new("#ff5f6d"));
        assert_eq!(state.color2.content, "#ffc371");
        assert_eq!(state.color2.cursor, 7);
    }

    #[test]
    fn test_toggle_resets_focus() {
        let mut state = SettingsState::default();
        state.focus = SettingsFocus::Url;

        state.update(SettingsMsg::Toggle, 0);
        assert!(state.open);
        assert_eq!(state.focus, SettingsFocus::Color1);

        state.update(SettingsMsg::Close, 0);
        assert!(!state.open);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = SettingsState::default();

        state.update(SettingsMsg::SelectNext, 0);
        assert_eq!(state.selected, None);

        state.update(SettingsMsg::SelectNext, 2);
        state.update(SettingsMsg::SelectNext, 2);
        state.update(SettingsMsg::SelectNext, 2);
        assert_eq!(state.selected, Some(1));

        state.update(SettingsMsg::SelectPrev, 2);
        state.update(SettingsMsg::SelectPrev, 2);
        assert_eq!(state.selected, Some(0));

        state.clamp_selection(0);
        assert_eq!(state.selected, None);
    }
}
