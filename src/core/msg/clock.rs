use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClockMsg {
    /// Wall-clock time observed by the timer service.
    Tick(DateTime<Local>),
}

impl ClockMsg {
    pub fn is_frequent(&self) -> bool {
        true
    }
}
