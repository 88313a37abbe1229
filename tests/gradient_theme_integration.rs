use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use ratatui::style::Color;
use tokio::sync::Mutex;

use tabdash::core::cmd::TimerId;
use tabdash::core::msg::{settings::SettingsMsg, Msg};
use tabdash::core::raw_msg::RawMsg;
use tabdash::core::state::{
    settings::{SettingsFocus, TextField},
    AppState,
};
use tabdash::domain::color::{GradientPair, HexColor};
use tabdash::domain::theme::Theme;
use tabdash::infrastructure::config::Config;
use tabdash::infrastructure::storage::{MemoryStore, Snapshot, StorageKey};
use tabdash::infrastructure::tui::{test::TestTui, TuiLike};
use tabdash::integration::renderer::Renderer;
use tabdash::integration::runtime::Runtime;

fn runtime_with(store: MemoryStore) -> Runtime {
    let mut store = store;
    let snapshot = Snapshot::load(&mut store);
    let config = Config::embedded().expect("embedded config");
    Runtime::new_with_executor(AppState::new(config, snapshot), Box::new(store))
}

fn stored(runtime: &Runtime, key: StorageKey) -> Option<String> {
    runtime
        .executor()
        .and_then(|executor| executor.store().get(key))
}

fn hex(s: &str) -> HexColor {
    HexColor::parse(s).expect("valid color")
}

/// Feed timer results back until `done` holds for the state.
async fn pump_until(runtime: &mut Runtime, done: impl Fn(&AppState) -> bool) {
    for _ in 0..1000 {
        if done(runtime.state()) {
            return;
        }
        let raw = runtime.recv_raw().await.expect("raw channel closed");
        runtime.send_raw_msg(raw);
        runtime.run_update_cycle().expect("update cycle");
    }
    panic!("condition not reached");
}

fn apply_colors(runtime: &mut Runtime, start: &str, end: &str) {
    runtime.send_msg(Msg::Settings(SettingsMsg::Toggle));
    runtime.send_msg(Msg::Settings(SettingsMsg::SetField(
        TextField::Color1,
        start.to_string(),
    )));
    runtime.send_msg(Msg::Settings(SettingsMsg::SetField(
        TextField::Color2,
        end.to_string(),
    )));
    runtime.send_msg(Msg::Settings(SettingsMsg::FocusNext));
    runtime.send_msg(Msg::Settings(SettingsMsg::FocusNext));
    runtime.send_msg(Msg::Settings(SettingsMsg::Activate));
    runtime.run_update_cycle().expect("apply colors");
}

#[tokio::test(start_paused = true)]
async fn test_saved_colors_persist_and_animate_in() {
    let mut runtime = runtime_with(MemoryStore::new());
    let target = GradientPair::new(hex("#112233"), hex("#445566"));

    apply_colors(&mut runtime, "#112233", "#445566");

    assert_eq!(runtime.state().settings.focus, SettingsFocus::Apply);
    assert_eq!(runtime.state().gradient.pair, target);
    assert_eq!(
        stored(&runtime, StorageKey::BgColors),
        Some(r##"["#112233","#445566"]"##.to_string())
    );
    // Still mid-transition on screen
    assert_ne!(runtime.state().gradient.displayed(), target);

    pump_until(&mut runtime, |state| state.gradient.transition.is_none()).await;

    assert_eq!(runtime.state().gradient.displayed(), target);
    assert_eq!(runtime.get_stats().active_timers, 0);
}

#[tokio::test]
async fn test_unset_pickers_fall_back_to_defaults() {
    let mut runtime = runtime_with(MemoryStore::new());

    apply_colors(&mut runtime, "#000000", "#123456");

    assert_eq!(
        runtime.state().gradient.pair,
        GradientPair::new(GradientPair::DEFAULT_START, hex("#123456"))
    );
    assert_eq!(
        stored(&runtime, StorageKey::BgColors),
        Some(r##"["#ff5f6d","#123456"]"##.to_string())
    );
    assert_eq!(runtime.state().settings.color1.content, "#ff5f6d");
}

#[tokio::test]
async fn test_invalid_color_keeps_committed_pair() {
    let mut runtime = runtime_with(MemoryStore::new());

    apply_colors(&mut runtime, "tomato", "#445566");

    assert_eq!(runtime.state().gradient.pair, GradientPair::default());
    assert_eq!(stored(&runtime, StorageKey::BgColors), None);
    assert_eq!(runtime.state().settings.color1.content, "#ff5f6d");
}

#[tokio::test(start_paused = true)]
async fn test_cycle_swaps_pair_and_persists() {
    let mut runtime = runtime_with(MemoryStore::new());
    runtime.start();
    runtime.run_update_cycle().expect("init");

    let initial = runtime.state().gradient.pair;
    pump_until(&mut runtime, |state| state.gradient.transition.is_some()).await;
    pump_until(&mut runtime, |state| state.gradient.transition.is_none()).await;

    assert_eq!(runtime.state().gradient.pair, initial.swapped());
    assert_eq!(
        stored(&runtime, StorageKey::BgColors),
        Some(r##"["#ffc371","#ff5f6d"]"##.to_string())
    );
    // Clock and cycle keep running; the animation timer is done
    let executor = runtime.executor().expect("executor");
    assert!(executor.timers().is_active(TimerId::GradientCycle));
    assert!(!executor.timers().is_active(TimerId::GradientAnimation));
}

#[tokio::test]
async fn test_theme_toggle_persists_and_restores() {
    let mut runtime = runtime_with(MemoryStore::new());

    runtime.send_raw_msg(RawMsg::Key(KeyEvent::new(
        KeyCode::Char('t'),
        KeyModifiers::NONE,
    )));
    runtime.run_update_cycle().expect("toggle");

    assert_eq!(runtime.state().theme.current, Theme::Light);
    assert_eq!(
        stored(&runtime, StorageKey::Theme),
        Some("light".to_string())
    );

    let restored = runtime_with(MemoryStore::new().with(StorageKey::Theme, "light"));
    assert_eq!(restored.state().theme.current, Theme::Light);
}

#[tokio::test]
async fn test_background_follows_theme() -> color_eyre::Result<()> {
    let tui = Arc::new(Mutex::new(TestTui::new(80, 24)?));
    let shared: Arc<Mutex<dyn TuiLike + Send>> = Arc::<Mutex<TestTui>>::clone(&tui);
    let mut renderer = Renderer::new();

    let dark = AppState::new_with_config(Config::embedded()?);
    renderer.render(&shared, &dark).await?;
    assert_eq!(
        tui.lock().await.buffer()[(0, 0)].bg,
        Color::from(GradientPair::DEFAULT_START)
    );

    let light = AppState::new(
        Config::embedded()?,
        Snapshot {
            theme: Theme::Light,
            ..Default::default()
        },
    );
    renderer.render(&shared, &light).await?;
    assert_eq!(
        tui.lock().await.buffer()[(0, 0)].bg,
        Color::from(Theme::Light.base())
    );
    Ok(())
}
