use serde::{Deserialize, Serialize};

use crate::domain::bookmark::Bookmark;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BookmarkMsg {
    /// Raw form input; validation happens in the state.
    Add { label: String, url: String },
    Delete(usize),
    /// Open the bookmark at this position in the browser.
    Open(usize),
    /// Re-read the collection from storage.
    Reload,
    Loaded(Vec<Bookmark>),
    ToggleIcons,
    FaviconLoaded { domain: String, ok: bool },
}
