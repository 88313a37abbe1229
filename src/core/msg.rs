use serde::{Deserialize, Serialize};

pub mod bookmark;
pub mod clock;
pub mod gradient;
pub mod pomodoro;
pub mod quote;
pub mod settings;
pub mod system;
pub mod theme;

use bookmark::BookmarkMsg;
use clock::ClockMsg;
use gradient::GradientMsg;
use pomodoro::PomodoroMsg;
use quote::QuoteMsg;
use settings::SettingsMsg;
use system::SystemMsg;
use theme::ThemeMsg;

/// Domain messages representing application intent
/// These are processed by the update function and represent pure domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    System(SystemMsg),
    Clock(ClockMsg),
    Quote(QuoteMsg),
    Bookmark(BookmarkMsg),
    Pomodoro(PomodoroMsg),
    Gradient(GradientMsg),
    Theme(ThemeMsg),
    Settings(SettingsMsg),
}

impl Msg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        match self {
            Msg::Clock(msg) => msg.is_frequent(),
            Msg::Pomodoro(msg) => msg.is_frequent(),
            Msg::Gradient(msg) => msg.is_frequent(),
            _ => false,
        }
    }
}
