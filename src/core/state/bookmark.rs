use std::collections::HashMap;

use crate::{
    core::{
        cmd::{Cmd, StorageCmd},
        msg::bookmark::BookmarkMsg,
    },
    domain::bookmark::{self, Bookmark},
    infrastructure::storage::StorageKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaviconStatus {
    Pending,
    Loaded,
    Broken,
}

#[derive(Debug, Clone, Default)]
pub struct BookmarkState {
    pub items: Vec<Bookmark>,
    pub icon_mode: bool,
    /// Keyed by domain so each one is requested at most once
    pub favicons: HashMap<String, FaviconStatus>,
}

impl BookmarkState {
    pub fn new(items: Vec<Bookmark>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn update(&mut self, msg: BookmarkMsg) -> Vec<Cmd> {
        match msg {
            BookmarkMsg::Add { label, url } => {
                let Some(bookmark) = Bookmark::from_input(&label, &url) else {
                    return vec![];
                };
                self.items.push(bookmark);

                let mut cmds = vec![self.persist()];
                cmds.extend(self.request_missing_favicons());
                cmds
            }

            BookmarkMsg::Delete(index) => {
                if index >= self.items.len() {
                    return vec![];
                }
                self.items.remove(index);
                vec![self.persist()]
            }

            BookmarkMsg::Open(index) => match self.items.get(index) {
                Some(bookmark) => vec![Cmd::OpenUrl {
                    url: bookmark.url.clone(),
                }],
                None => vec![],
            },

            BookmarkMsg::Reload => vec![Cmd::Storage(StorageCmd::LoadBookmarks)],

            BookmarkMsg::Loaded(items) => {
                self.items = items;
                self.request_missing_favicons()
            }

            BookmarkMsg::ToggleIcons => {
                self.icon_mode = !self.icon_mode;
                self.request_missing_favicons()
            }

            BookmarkMsg::FaviconLoaded { domain, ok } => {
                let status = if ok {
                    FaviconStatus::Loaded
                } else {
                    FaviconStatus::Broken
                };
                self.favicons.insert(domain, status);
                vec![]
            }
        }
    }

    pub fn favicon(&self, bookmark: &Bookmark) -> Option<FaviconStatus> {
        self.favicons.get(&bookmark.domain()).copied()
    }

    fn persist(&self) -> Cmd {
        match bookmark::serialize_collection(&self.items) {
            Ok(json) => Cmd::set(StorageKey::Bookmarks, json),
            Err(e) => Cmd::LogError {
                message: format!("Failed to serialize bookmarks: {e}"),
            },
        }
    }

    fn request_missing_favicons(&mut self) -> Vec<Cmd> {
        if !self.icon_mode {
            return vec![];
        }

        let mut cmds = vec![];
        for domain in self.items.iter().map(Bookmark::domain) {
            if domain.is_empty() || self.favicons.contains_key(&domain) {
                continue;
            }
            self.favicons.insert(domain.clone(), FaviconStatus::Pending);
            cmds.push(Cmd::FetchFavicon { domain });
        }
        cmds
    }
}
