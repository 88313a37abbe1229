use crossterm::event::{Event, KeyEvent};
use tui_textarea::{CursorMove, TextArea};

use crate::core::{state::settings::TextFieldState, textarea_engine::TextAreaEngine};

/// Production engine based on tui-textarea. It builds a temporary single-line
/// TextArea from the snapshot, applies keys, then extracts the new snapshot.
pub struct TuiTextAreaEngine;

impl TuiTextAreaEngine {
    pub fn hydrate(snapshot: &TextFieldState) -> TextArea<'static> {
        let mut textarea = TextArea::new(vec![snapshot.content.clone()]);
        let column = u16::try_from(snapshot.cursor).unwrap_or(u16::MAX);
        textarea.move_cursor(CursorMove::Jump(0, column));
        textarea
    }

    fn extract(textarea: &TextArea<'_>) -> TextFieldState {
        // Fields are single-line; pasted newlines collapse into spaces
        let content = textarea.lines().join(" ");
        let (row, column) = textarea.cursor();
        let cursor = if row == 0 {
            column
        } else {
            let before: usize = textarea.lines()[..row]
                .iter()
                .map(|line| line.chars().count() + 1)
                .sum();
            before + column
        };
        TextFieldState { content, cursor }
    }
}

impl TextAreaEngine for TuiTextAreaEngine {
    fn apply_keys(&self, snapshot: &TextFieldState, keys: &[KeyEvent]) -> TextFieldState {
        let mut textarea = Self::hydrate(snapshot);
        for key in keys {
            textarea.input(Event::Key(*key));
        }
        Self::extract(&textarea)
    }
}
