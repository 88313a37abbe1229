use chrono::{DateTime, Local};
use crossterm::event::{KeyEvent, MouseEvent};
use serde::{Deserialize, Serialize};

use crate::{
    core::cmd::TimerId,
    domain::{bookmark::Bookmark, quote::Quote},
};

/// Raw messages from external sources (input, timers, network, system)
/// These represent unprocessed external events that need to be translated to domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawMsg {
    // System events
    Tick,
    Render,
    Resize(u16, u16),
    Quit,
    Suspend,
    Resume,

    // User input
    Key(KeyEvent),
    Mouse(MouseEvent),

    // Timer service
    Timer {
        id: TimerId,
        generation: u64,
        at: DateTime<Local>,
    },

    // Network results
    QuoteLoaded(Quote),
    QuoteFailed(String),
    FaviconFetched { domain: String, ok: bool },

    // Storage results
    BookmarksLoaded(Vec<Bookmark>),

    // Status line text from command results
    SystemMessage(String),
    Error(String),
}

impl RawMsg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(
            self,
            RawMsg::Tick
                | RawMsg::Render
                | RawMsg::Mouse(_)
                | RawMsg::Timer {
                    id: TimerId::Clock | TimerId::GradientAnimation,
                    ..
                }
        )
    }
}
