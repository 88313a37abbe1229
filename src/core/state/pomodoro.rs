use crate::{
    core::{
        cmd::{Cmd, TimerId},
        msg::pomodoro::PomodoroMsg,
    },
    domain::text::format_countdown,
    infrastructure::storage::StorageKey,
};

pub const DEFAULT_POMODORO_SECS: u32 = 25 * 60;
const TICK_MS: u64 = 1000;

/// Countdown with two states, Stopped and Running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PomodoroState {
    pub remaining: u32,
    pub running: bool,
    /// Length of a fresh session; `Reset` returns here.
    pub duration: u32,
    /// Bumped on every start. Ticks from an older run are ignored.
    pub generation: u64,
}

impl Default for PomodoroState {
    fn default() -> Self {
        Self::new(DEFAULT_POMODORO_SECS, None)
    }
}

impl PomodoroState {
    pub fn new(duration: u32, restored: Option<u32>) -> Self {
        Self {
            remaining: restored.unwrap_or(duration),
            running: false,
            duration,
            generation: 0,
        }
    }

    pub fn update(&mut self, msg: PomodoroMsg) -> Vec<Cmd> {
        match msg {
            PomodoroMsg::Start => {
                if self.running {
                    return vec![];
                }
                self.running = true;
                self.generation = self.generation.wrapping_add(1);
                vec![Cmd::StartTimer {
                    id: TimerId::Pomodoro,
                    period_ms: TICK_MS,
                    generation: self.generation,
                }]
            }

            PomodoroMsg::Tick(generation) => {
                if !self.running || generation != self.generation {
                    return vec![];
                }
                if self.remaining == 0 {
                    self.running = false;
                    return vec![Cmd::StopTimer {
                        id: TimerId::Pomodoro,
                    }];
                }

                self.remaining -= 1;
                let mut cmds = vec![Cmd::set(
                    StorageKey::PomodoroTime,
                    self.remaining.to_string(),
                )];
                if self.remaining == 0 {
                    self.running = false;
                    cmds.push(Cmd::StopTimer {
                        id: TimerId::Pomodoro,
                    });
                }
                cmds
            }

            PomodoroMsg::Reset => {
                self.running = false;
                self.remaining = self.duration;
                vec![
                    Cmd::StopTimer {
                        id: TimerId::Pomodoro,
                    },
                    Cmd::remove(StorageKey::PomodoroTime),
                ]
            }
        }
    }

    pub fn display(&self) -> String {
        format_countdown(self.remaining)
    }
}
