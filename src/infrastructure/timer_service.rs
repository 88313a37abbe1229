use std::{collections::HashMap, time::Duration};

use chrono::Local;
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::core::{cmd::TimerId, raw_msg::RawMsg};

struct ActiveTimer {
    token: CancellationToken,
    generation: u64,
}

/// Named repeating timers. Each timer is a tokio task that stamps the local
/// time and its generation into a `RawMsg::Timer` every period until its
/// token is cancelled.
pub struct TimerService {
    raw_tx: mpsc::UnboundedSender<RawMsg>,
    timers: HashMap<TimerId, ActiveTimer>,
    root: CancellationToken,
}

impl TimerService {
    pub fn new(raw_tx: mpsc::UnboundedSender<RawMsg>) -> Self {
        Self {
            raw_tx,
            timers: HashMap::new(),
            root: CancellationToken::new(),
        }
    }

    /// Start `id` unless it is already running. Returns whether a task was spawned.
    pub fn start(&mut self, id: TimerId, period: Duration, generation: u64) -> bool {
        if self.timers.contains_key(&id) {
            log::debug!("timer {id:?} already active");
            return false;
        }

        let period = period.max(Duration::from_millis(1));
        let token = self.root.child_token();
        let cancel = token.clone();
        let raw_tx = self.raw_tx.clone();

        tokio::spawn(async move {
            let first = if id.fires_immediately() {
                Instant::now()
            } else {
                Instant::now() + period
            };
            let mut interval = interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let msg = RawMsg::Timer { id, generation, at: Local::now() };
                        if raw_tx.send(msg).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        self.timers.insert(id, ActiveTimer { token, generation });
        true
    }

    /// Cancel `id`. Stopping an inactive timer is a no-op.
    pub fn stop(&mut self, id: TimerId) -> bool {
        match self.timers.remove(&id) {
            Some(timer) => {
                timer.token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Whether a tick stamped with `generation` belongs to the running task
    /// for `id`. Ticks already queued when a timer stops fail this check.
    pub fn is_current(&self, id: TimerId, generation: u64) -> bool {
        self.timers
            .get(&id)
            .is_some_and(|timer| timer.generation == generation)
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Cancel every timer.
    pub fn shutdown(&mut self) {
        self.root.cancel();
        self.timers.clear();
    }
}

impl Drop for TimerService {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
