use pretty_assertions::assert_eq;

use tabdash::core::cmd::TimerId;
use tabdash::core::msg::{pomodoro::PomodoroMsg, Msg};
use tabdash::core::raw_msg::RawMsg;
use tabdash::core::state::AppState;
use tabdash::infrastructure::config::Config;
use tabdash::infrastructure::storage::{MemoryStore, Snapshot, StorageKey};
use tabdash::integration::runtime::Runtime;

fn runtime_with(store: MemoryStore) -> Runtime {
    let mut store = store;
    let snapshot = Snapshot::load(&mut store);
    let config = Config::embedded().expect("embedded config");
    Runtime::new_with_executor(AppState::new(config, snapshot), Box::new(store))
}

fn stored_time(runtime: &Runtime) -> Option<String> {
    runtime
        .executor()
        .and_then(|executor| executor.store().get(StorageKey::PomodoroTime))
}

/// Feed `count` pomodoro ticks from the timer service back into the runtime.
async fn pump_pomodoro_ticks(runtime: &mut Runtime, count: usize) {
    let mut seen = 0;
    while seen < count {
        let raw = runtime.recv_raw().await.expect("raw channel closed");
        if matches!(
            raw,
            RawMsg::Timer {
                id: TimerId::Pomodoro,
                ..
            }
        ) {
            seen += 1;
        }
        runtime.send_raw_msg(raw);
        runtime.run_update_cycle().expect("update cycle");
    }
}

#[tokio::test(start_paused = true)]
async fn test_running_pomodoro_counts_down_and_persists() {
    let mut runtime = runtime_with(MemoryStore::new());

    runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Start));
    runtime.run_update_cycle().expect("start");
    assert!(runtime.get_stats().pomodoro_running);

    pump_pomodoro_ticks(&mut runtime, 3).await;

    assert_eq!(runtime.state().pomodoro.display(), "24:57");
    assert_eq!(stored_time(&runtime), Some("1497".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_second_start_does_not_double_speed() {
    let mut runtime = runtime_with(MemoryStore::new());

    runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Start));
    runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Start));
    runtime.run_update_cycle().expect("start");
    assert_eq!(runtime.get_stats().active_timers, 1);

    let before = tokio::time::Instant::now();
    pump_pomodoro_ticks(&mut runtime, 2).await;

    assert_eq!(runtime.state().pomodoro.remaining, 1498);
    assert!(before.elapsed() >= std::time::Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn test_reset_stops_and_clears_persisted_time() {
    let mut runtime = runtime_with(MemoryStore::new());

    runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Start));
    runtime.run_update_cycle().expect("start");
    pump_pomodoro_ticks(&mut runtime, 1).await;
    assert_eq!(stored_time(&runtime), Some("1499".to_string()));

    runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Reset));
    runtime.run_update_cycle().expect("reset");

    assert!(!runtime.get_stats().pomodoro_running);
    assert_eq!(runtime.get_stats().active_timers, 0);
    assert_eq!(runtime.state().pomodoro.display(), "25:00");
    assert_eq!(stored_time(&runtime), None);
}

#[tokio::test(start_paused = true)]
async fn test_tick_queued_before_restart_does_not_count() {
    let mut runtime = runtime_with(MemoryStore::new());

    runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Start));
    runtime.run_update_cycle().expect("start");
    // One tick of the first run is now waiting on the raw channel
    tokio::time::sleep(std::time::Duration::from_millis(1001)).await;

    runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Reset));
    runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Start));
    runtime.run_update_cycle().expect("restart");

    assert_eq!(runtime.state().pomodoro.remaining, 1500);
    assert!(runtime.get_stats().pomodoro_running);
    assert_eq!(stored_time(&runtime), None);

    // The new run still counts down
    pump_pomodoro_ticks(&mut runtime, 1).await;
    assert_eq!(runtime.state().pomodoro.remaining, 1499);
}

#[tokio::test(start_paused = true)]
async fn test_interrupted_session_resumes_from_store() {
    let store = MemoryStore::new().with(StorageKey::PomodoroTime, "3");
    let mut runtime = runtime_with(store);

    assert_eq!(runtime.state().pomodoro.display(), "00:03");
    assert!(!runtime.get_stats().pomodoro_running);

    runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Start));
    runtime.run_update_cycle().expect("start");
    pump_pomodoro_ticks(&mut runtime, 3).await;

    // The timer stops itself on reaching zero
    assert_eq!(runtime.state().pomodoro.display(), "00:00");
    assert!(!runtime.get_stats().pomodoro_running);
    assert_eq!(runtime.get_stats().active_timers, 0);
    assert_eq!(stored_time(&runtime), Some("0".to_string()));
}

#[tokio::test]
async fn test_zero_in_store_means_fresh_session() {
    let runtime = runtime_with(MemoryStore::new().with(StorageKey::PomodoroTime, "0"));
    assert_eq!(runtime.state().pomodoro.display(), "25:00");
}
