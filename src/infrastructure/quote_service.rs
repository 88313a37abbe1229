use color_eyre::eyre::{eyre, Result};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{core::raw_msg::RawMsg, domain::quote::Quote};

/// Fetches a random quote and reports the outcome as a raw message
#[derive(Clone)]
pub struct QuoteService {
    client: reqwest::Client,
    url: String,
    raw_tx: mpsc::UnboundedSender<RawMsg>,
}

impl QuoteService {
    pub fn new(
        client: reqwest::Client,
        url: impl Into<String>,
        raw_tx: mpsc::UnboundedSender<RawMsg>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            raw_tx,
        }
    }

    pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Quote> {
        let response = client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(eyre!("HTTP status: {}", response.status()));
        }
        let quote = response.json::<Quote>().await?;
        Ok(quote)
    }

    /// Fire-and-forget request. The result is dropped if the runtime is gone.
    pub fn spawn_fetch(&self) -> JoinHandle<()> {
        let client = self.client.clone();
        let url = self.url.clone();
        let raw_tx = self.raw_tx.clone();

        tokio::spawn(async move {
            let msg = match Self::fetch(&client, &url).await {
                Ok(quote) => RawMsg::QuoteLoaded(quote),
                Err(e) => RawMsg::QuoteFailed(e.to_string()),
            };
            let _ = raw_tx.send(msg);
        })
    }
}
