use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PomodoroMsg {
    Start,
    /// One second elapsed on the timer run with this generation
    Tick(u64),
    Reset,
}

impl PomodoroMsg {
    pub fn is_frequent(&self) -> bool {
        matches!(self, PomodoroMsg::Tick(_))
    }
}
