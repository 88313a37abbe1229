use serde::{Deserialize, Serialize};

use crate::infrastructure::storage::StorageKey;

/// Named repeating timers. At most one task per id is ever active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerId {
    Clock,
    GradientCycle,
    GradientAnimation,
    Pomodoro,
}

impl TimerId {
    /// Whether the first tick fires as soon as the timer starts instead of
    /// after one period.
    pub fn fires_immediately(&self) -> bool {
        matches!(self, TimerId::Clock)
    }
}

/// Writes against the key-value store. Every write replaces the whole value
/// stored under the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageCmd {
    Set { key: StorageKey, value: String },
    Remove { key: StorageKey },
    /// Re-read the bookmark collection, healing a corrupted blob.
    LoadBookmarks,
}

/// Elm-like command definitions
/// Represents side effects (persistence, timers, network)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    // Persistence
    Storage(StorageCmd),

    // Scheduling
    /// `generation` is stamped into every tick of this run so late ticks
    /// from an earlier run can be told apart.
    StartTimer {
        id: TimerId,
        period_ms: u64,
        generation: u64,
    },
    StopTimer { id: TimerId },

    /// Hand a URL to the platform opener
    OpenUrl { url: String },

    // Network
    FetchQuote,
    FetchFavicon { domain: String },

    /// Request a render; delivered via render_req_sender and coalesced by AppRunner
    RequestRender,

    // Logging related
    LogError { message: String },
}

impl Cmd {
    /// Start a timer whose ticks are never checked for staleness
    pub fn start_timer(id: TimerId, period_ms: u64) -> Cmd {
        Cmd::StartTimer {
            id,
            period_ms,
            generation: 0,
        }
    }

    pub fn set(key: StorageKey, value: impl Into<String>) -> Cmd {
        Cmd::Storage(StorageCmd::Set {
            key,
            value: value.into(),
        })
    }

    pub fn remove(key: StorageKey) -> Cmd {
        Cmd::Storage(StorageCmd::Remove { key })
    }

    /// Whether the command requires asynchronous processing
    pub fn is_async(&self) -> bool {
        match self {
            Cmd::FetchQuote | Cmd::FetchFavicon { .. } => true,

            Cmd::Storage(..)
            | Cmd::StartTimer { .. }
            | Cmd::StopTimer { .. }
            | Cmd::OpenUrl { .. }
            | Cmd::RequestRender
            | Cmd::LogError { .. } => false,
        }
    }

    /// Human-readable name for execution logs
    pub fn name(&self) -> String {
        match self {
            Cmd::Storage(StorageCmd::Set { key, .. }) => format!("Storage(Set {})", key.as_str()),
            Cmd::Storage(StorageCmd::Remove { key }) => {
                format!("Storage(Remove {})", key.as_str())
            }
            Cmd::Storage(StorageCmd::LoadBookmarks) => "Storage(LoadBookmarks)".to_string(),
            Cmd::StartTimer { id, .. } => format!("StartTimer({id:?})"),
            Cmd::StopTimer { id } => format!("StopTimer({id:?})"),
            Cmd::OpenUrl { .. } => "OpenUrl".to_string(),
            Cmd::FetchQuote => "FetchQuote".to_string(),
            Cmd::FetchFavicon { .. } => "FetchFavicon".to_string(),
            Cmd::RequestRender => "RequestRender".to_string(),
            Cmd::LogError { .. } => "LogError".to_string(),
        }
    }
}
