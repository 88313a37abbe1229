use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::core::state::settings::TextField;

/// Messages for the settings panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingsMsg {
    Toggle,
    Close,

    FocusNext,
    FocusPrev,
    /// Press the focused control.
    Activate,

    /// Key for the focused text field, applied through the text area engine.
    Input(KeyEvent),
    SetField(TextField, String),

    // Bookmark list
    SelectNext,
    SelectPrev,
    DeleteSelected,
}
