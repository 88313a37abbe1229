use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

use crate::domain::{
    bookmark::{self, Bookmark},
    color::GradientPair,
    theme::Theme,
};

/// Keys of the persisted key-value store. The string forms are the on-disk
/// keys and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StorageKey {
    Bookmarks,
    PomodoroTime,
    BgColors,
    Theme,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Bookmarks => "bookmarks",
            StorageKey::PomodoroTime => "pomodoroTime",
            StorageKey::BgColors => "bgColors",
            StorageKey::Theme => "theme",
        }
    }
}

/// String-valued persistent store. Every write replaces the whole value.
pub trait KeyValueStore: Send {
    fn get(&self, key: StorageKey) -> Option<String>;
    fn set(&mut self, key: StorageKey, value: String) -> Result<()>;
    fn remove(&mut self, key: StorageKey) -> Result<()>;
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<StorageKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: StorageKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.values.get(&key).cloned()
    }

    fn set(&mut self, key: StorageKey, value: String) -> Result<()> {
        self.values.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: StorageKey) -> Result<()> {
        self.values.remove(&key);
        Ok(())
    }
}

/// JSON object on disk mapping key strings to string values.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    pub const FILE_NAME: &'static str = "storage.json";

    /// Open the store inside `dir`, creating the directory if needed. An
    /// unreadable or corrupt file is treated as empty.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create data dir {}", dir.display()))?;
        let path = dir.join(Self::FILE_NAME);

        let values = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("ignoring corrupt store {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("failed to read store {}: {e}", path.display());
                BTreeMap::new()
            }
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .wrap_err_with(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .wrap_err_with(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: StorageKey) -> Option<String> {
        self.values.get(key.as_str()).cloned()
    }

    fn set(&mut self, key: StorageKey, value: String) -> Result<()> {
        self.values.insert(key.as_str().to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: StorageKey) -> Result<()> {
        if self.values.remove(key.as_str()).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Read the bookmark collection. A blob that does not parse is removed so the
/// next read starts from an empty list.
pub fn load_bookmarks(store: &mut dyn KeyValueStore) -> Vec<Bookmark> {
    let Some(raw) = store.get(StorageKey::Bookmarks) else {
        return vec![];
    };

    match bookmark::parse_collection(&raw) {
        Ok(bookmarks) => bookmarks,
        Err(e) => {
            log::warn!("discarding corrupt bookmarks: {e}");
            if let Err(e) = store.remove(StorageKey::Bookmarks) {
                log::error!("failed to remove corrupt bookmarks: {e}");
            }
            vec![]
        }
    }
}

pub fn load_colors(store: &dyn KeyValueStore) -> GradientPair {
    store
        .get(StorageKey::BgColors)
        .and_then(|raw| GradientPair::from_json(&raw))
        .unwrap_or_default()
}

pub fn load_theme(store: &dyn KeyValueStore) -> Theme {
    Theme::from_persisted(store.get(StorageKey::Theme).as_deref())
}

/// Remaining seconds of an interrupted pomodoro. Zero and malformed values
/// count as absent.
pub fn load_pomodoro_time(store: &dyn KeyValueStore) -> Option<u32> {
    store
        .get(StorageKey::PomodoroTime)
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|secs| *secs > 0)
}

/// Everything the dashboard restores at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub bookmarks: Vec<Bookmark>,
    pub colors: GradientPair,
    pub theme: Theme,
    pub pomodoro_time: Option<u32>,
}

impl Snapshot {
    pub fn load(store: &mut dyn KeyValueStore) -> Self {
        Self {
            bookmarks: load_bookmarks(store),
            colors: load_colors(store),
            theme: load_theme(store),
            pomodoro_time: load_pomodoro_time(store),
        }
    }
}
