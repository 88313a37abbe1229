use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use tabdash::core::msg::{bookmark::BookmarkMsg, Msg};
use tabdash::core::raw_msg::RawMsg;
use tabdash::core::state::{settings::SettingsFocus, AppState};
use tabdash::infrastructure::config::Config;
use tabdash::infrastructure::storage::{FileStore, KeyValueStore, Snapshot, StorageKey};
use tabdash::integration::runtime::Runtime;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "tabdash-bookmarks-{name}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn runtime_on(dir: &Path) -> Runtime {
    let mut store = FileStore::open(dir).expect("failed to open store");
    let snapshot = Snapshot::load(&mut store);
    let config = Config::embedded().expect("embedded config");
    Runtime::new_with_executor(AppState::new(config, snapshot), Box::new(store))
}

fn key(code: KeyCode) -> RawMsg {
    RawMsg::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(runtime: &mut Runtime, text: &str) {
    for c in text.chars() {
        runtime.send_raw_msg(key(KeyCode::Char(c)));
    }
}

fn focus(runtime: &mut Runtime, target: SettingsFocus) {
    while runtime.state().settings.focus != target {
        runtime.send_raw_msg(key(KeyCode::Tab));
        runtime
            .run_update_cycle()
            .expect("update cycle should succeed");
    }
}

#[tokio::test]
async fn test_bookmarks_added_through_form_survive_restart() {
    let dir = scratch_dir("restart");

    {
        let mut runtime = runtime_on(&dir);
        runtime.send_raw_msg(key(KeyCode::Char(',')));
        runtime.run_update_cycle().expect("open settings");

        for (label, url) in [("Docs", "docs.rs"), ("Crates", "https://crates.io")] {
            focus(&mut runtime, SettingsFocus::Label);
            type_text(&mut runtime, label);
            runtime.send_raw_msg(key(KeyCode::Tab));
            type_text(&mut runtime, url);
            runtime.send_raw_msg(key(KeyCode::Enter));
            runtime.run_update_cycle().expect("add bookmark");
        }

        assert_eq!(runtime.get_stats().bookmark_count, 2);
        assert_eq!(runtime.state().settings.label.content, "");
        assert_eq!(runtime.state().settings.url.content, "");
    }

    let runtime = runtime_on(&dir);
    let items = &runtime.state().bookmarks.items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].label, "Docs");
    assert_eq!(items[0].url, "https://docs.rs");
    assert_eq!(items[1].url, "https://crates.io");

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_incomplete_form_is_rejected() {
    let dir = scratch_dir("incomplete");
    let mut runtime = runtime_on(&dir);

    runtime.send_msg(Msg::Bookmark(BookmarkMsg::Add {
        label: "   ".to_string(),
        url: "docs.rs".to_string(),
    }));
    runtime.run_update_cycle().expect("update cycle");

    assert_eq!(runtime.get_stats().bookmark_count, 0);
    assert_eq!(
        runtime
            .executor()
            .and_then(|executor| executor.store().get(StorageKey::Bookmarks)),
        None
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_delete_from_manage_list_persists() {
    let dir = scratch_dir("delete");
    let mut runtime = runtime_on(&dir);

    for (label, url) in [("A", "a.example"), ("B", "b.example"), ("C", "c.example")] {
        runtime.send_msg(Msg::Bookmark(BookmarkMsg::Add {
            label: label.to_string(),
            url: url.to_string(),
        }));
    }
    runtime.run_update_cycle().expect("add bookmarks");

    runtime.send_raw_msg(key(KeyCode::Char(',')));
    runtime.run_update_cycle().expect("open settings");
    focus(&mut runtime, SettingsFocus::List);
    // First press selects the top entry, second moves to "B"
    runtime.send_raw_msg(key(KeyCode::Down));
    runtime.send_raw_msg(key(KeyCode::Down));
    runtime.send_raw_msg(key(KeyCode::Char('d')));
    runtime.run_update_cycle().expect("delete");

    drop(runtime);
    let runtime = runtime_on(&dir);
    let labels: Vec<_> = runtime
        .state()
        .bookmarks
        .items
        .iter()
        .map(|b| b.label.as_str())
        .collect();
    assert_eq!(labels, vec!["A", "C"]);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_corrupt_collection_is_healed_on_reload() {
    let dir = scratch_dir("corrupt");
    {
        let mut store = FileStore::open(&dir).expect("failed to open store");
        store
            .set(StorageKey::Bookmarks, "[{\"label\":".to_string())
            .expect("write corrupt blob");
    }

    let mut runtime = runtime_on(&dir);
    assert_eq!(runtime.get_stats().bookmark_count, 0);

    runtime.send_raw_msg(key(KeyCode::Char('b')));
    runtime.run_update_cycle().expect("reload");
    runtime.run_update_cycle().expect("loaded");

    assert_eq!(runtime.get_stats().bookmark_count, 0);
    assert_eq!(
        runtime
            .executor()
            .and_then(|executor| executor.store().get(StorageKey::Bookmarks)),
        None
    );

    let _ = std::fs::remove_dir_all(&dir);
}
