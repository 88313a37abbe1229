use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::core::{cmd::Cmd, msg::clock::ClockMsg};

/// Shown until the first tick arrives.
pub const CLOCK_PLACEHOLDER: &str = "--:--:--";

const FALLBACK_FORMAT: &str = "%X";

#[derive(Debug, Clone)]
pub struct ClockState {
    pub now: Option<DateTime<Local>>,
    /// chrono strftime pattern
    pub format: String,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new(FALLBACK_FORMAT)
    }
}

impl ClockState {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            now: None,
            format: format.into(),
        }
    }

    pub fn update(&mut self, msg: ClockMsg) -> Vec<Cmd> {
        match msg {
            ClockMsg::Tick(now) => {
                self.now = Some(now);
                vec![]
            }
        }
    }

    /// Formatted time. A pattern chrono cannot render falls back to `%X`.
    pub fn display(&self) -> String {
        let Some(now) = self.now else {
            return CLOCK_PLACEHOLDER.to_string();
        };

        let mut out = String::new();
        if write!(out, "{}", now.format(&self.format)).is_err() {
            out = now.format(FALLBACK_FORMAT).to_string();
        }
        out
    }
}
