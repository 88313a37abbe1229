use lazy_static::lazy_static;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref SCHEME: Regex = Regex::new(r"(?i)^https?://").expect("valid scheme regex");
}

/// A user-saved link. Collections keep insertion order, which is also the display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub label: String,
    pub url: String,
}

impl Bookmark {
    /// Build a bookmark from raw form input.
    ///
    /// Both fields are trimmed; an empty field rejects the input. A URL
    /// without an `http(s)://` prefix gets `https://` prepended.
    pub fn from_input(label: &str, url: &str) -> Option<Self> {
        let label = label.trim();
        let url = url.trim();
        if label.is_empty() || url.is_empty() {
            return None;
        }

        Some(Self {
            label: label.to_string(),
            url: normalize_url(url),
        })
    }

    /// Host part of the URL, used to key favicon lookups.
    pub fn domain(&self) -> String {
        let rest = SCHEME.replace(&self.url, "");
        let host = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .rsplit('@')
            .next()
            .unwrap_or_default();
        host.to_lowercase()
    }
}

pub fn normalize_url(url: &str) -> String {
    if SCHEME.is_match(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Expand a favicon service template, replacing `{domain}` with the
/// percent-encoded domain.
pub fn favicon_url(template: &str, domain: &str) -> String {
    let encoded = utf8_percent_encode(domain, NON_ALPHANUMERIC).to_string();
    template.replace("{domain}", &encoded)
}

pub fn parse_collection(json: &str) -> Result<Vec<Bookmark>, serde_json::Error> {
    serde_json::from_str(json)
}

pub fn serialize_collection(bookmarks: &[Bookmark]) -> Result<String, serde_json::Error> {
    serde_json::to_string(bookmarks)
}
