use tokio::{sync::mpsc, task::JoinHandle};

use crate::{core::raw_msg::RawMsg, domain::bookmark::favicon_url};

/// Checks the favicon service for a domain. Only availability is tracked;
/// the terminal draws a marker instead of the image.
#[derive(Clone)]
pub struct FaviconService {
    client: reqwest::Client,
    template: String,
    raw_tx: mpsc::UnboundedSender<RawMsg>,
}

impl FaviconService {
    pub fn new(
        client: reqwest::Client,
        template: impl Into<String>,
        raw_tx: mpsc::UnboundedSender<RawMsg>,
    ) -> Self {
        Self {
            client,
            template: template.into(),
            raw_tx,
        }
    }

    pub fn url_for(&self, domain: &str) -> String {
        favicon_url(&self.template, domain)
    }

    pub fn spawn_fetch(&self, domain: String) -> JoinHandle<()> {
        let client = self.client.clone();
        let url = self.url_for(&domain);
        let raw_tx = self.raw_tx.clone();

        tokio::spawn(async move {
            let ok = match client.get(&url).send().await {
                Ok(response) if response.status().is_success() => response
                    .bytes()
                    .await
                    .map(|body| !body.is_empty())
                    .unwrap_or(false),
                Ok(response) => {
                    log::debug!("favicon {url} returned {}", response.status());
                    false
                }
                Err(e) => {
                    log::debug!("favicon {url} failed: {e}");
                    false
                }
            };
            let _ = raw_tx.send(RawMsg::FaviconFetched { domain, ok });
        })
    }
}
