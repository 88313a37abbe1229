use std::{io, time::Duration};

use color_eyre::eyre::{Result, WrapErr};
use tokio::sync::mpsc;

use crate::{
    core::{
        cmd::{Cmd, StorageCmd},
        raw_msg::RawMsg,
    },
    infrastructure::{
        favicon_service::FaviconService,
        quote_service::QuoteService,
        storage::{self, KeyValueStore},
        timer_service::TimerService,
    },
};

/// Hands a URL to whatever the platform uses to open links
pub type Opener = fn(&str) -> io::Result<()>;

fn open_with_system(url: &str) -> io::Result<()> {
    open::that(url)
}

/// Command executor that carries out Elm commands against the store, the
/// timer service and the network services. Results come back as `RawMsg`.
pub struct CmdExecutor {
    raw_tx: mpsc::UnboundedSender<RawMsg>,
    store: Box<dyn KeyValueStore>,
    timers: TimerService,
    opener: Opener,
    quote_service: Option<QuoteService>,
    favicon_service: Option<FaviconService>,
    render_req_sender: Option<mpsc::UnboundedSender<()>>,
}

impl CmdExecutor {
    /// Create an executor with storage and timers only
    pub fn new(raw_tx: mpsc::UnboundedSender<RawMsg>, store: Box<dyn KeyValueStore>) -> Self {
        let timers = TimerService::new(raw_tx.clone());
        Self {
            raw_tx,
            store,
            timers,
            opener: open_with_system,
            quote_service: None,
            favicon_service: None,
            render_req_sender: None,
        }
    }

    /// Replace the system opener, e.g. to record URLs in tests
    pub fn set_opener(&mut self, opener: Opener) {
        self.opener = opener;
    }

    pub fn set_quote_service(&mut self, service: QuoteService) {
        self.quote_service = Some(service);
    }

    pub fn set_favicon_service(&mut self, service: FaviconService) {
        self.favicon_service = Some(service);
    }

    /// Inject render request sender for AppRunner-orchestrated rendering.
    pub fn set_render_request_sender(&mut self, sender: mpsc::UnboundedSender<()>) {
        self.render_req_sender = Some(sender);
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }

    pub fn timers(&self) -> &TimerService {
        &self.timers
    }

    /// Execute a single command
    pub fn execute_command(&mut self, cmd: &Cmd) -> Result<()> {
        match cmd {
            Cmd::Storage(storage_cmd) => self.execute_storage(storage_cmd)?,

            Cmd::StartTimer {
                id,
                period_ms,
                generation,
            } => {
                let period = Duration::from_millis((*period_ms).max(1));
                if !self.timers.start(*id, period, *generation) {
                    log::debug!("Timer {id:?} already running");
                }
            }

            Cmd::StopTimer { id } => {
                self.timers.stop(*id);
            }

            Cmd::OpenUrl { url } => match (self.opener)(url.as_str()) {
                Ok(()) => {
                    log::info!("Opened {url}");
                    self.raw_tx.send(RawMsg::SystemMessage(format!("Opened {url}")))?;
                }
                Err(e) => {
                    log::error!("Failed to open {url}: {e}");
                    self.raw_tx
                        .send(RawMsg::Error(format!("failed to open {url}: {e}")))?;
                }
            },

            Cmd::FetchQuote => match &self.quote_service {
                Some(service) => {
                    service.spawn_fetch();
                }
                None => {
                    log::warn!("FetchQuote ignored: QuoteService not available");
                    self.raw_tx.send(RawMsg::QuoteFailed(
                        "quote service not available".to_string(),
                    ))?;
                }
            },

            Cmd::FetchFavicon { domain } => match &self.favicon_service {
                Some(service) => {
                    service.spawn_fetch(domain.clone());
                }
                None => {
                    log::debug!("FetchFavicon ignored for {domain}: FaviconService not available");
                }
            },

            Cmd::RequestRender => {
                if let Some(rtx) = &self.render_req_sender {
                    let _ = rtx.send(());
                }
            }

            Cmd::LogError { message } => {
                log::error!("{message}");
            }

        }

        Ok(())
    }

    fn execute_storage(&mut self, cmd: &StorageCmd) -> Result<()> {
        let outcome = match cmd {
            StorageCmd::Set { key, value } => self
                .store
                .set(*key, value.clone())
                .wrap_err_with(|| format!("failed to save {}", key.as_str())),
            StorageCmd::Remove { key } => self
                .store
                .remove(*key)
                .wrap_err_with(|| format!("failed to remove {}", key.as_str())),
            StorageCmd::LoadBookmarks => {
                let bookmarks = storage::load_bookmarks(self.store.as_mut());
                self.raw_tx.send(RawMsg::BookmarksLoaded(bookmarks))?;
                Ok(())
            }
        };

        // Persistence failures surface in the status bar; the in-memory state stays authoritative
        if let Err(e) = &outcome {
            let _ = self.raw_tx.send(RawMsg::Error(format!("{e:#}")));
        }
        outcome
    }

    /// Execute multiple commands
    pub fn execute_commands(&mut self, commands: &[Cmd]) -> Vec<String> {
        let mut execution_log = Vec::new();

        for cmd in commands {
            match self.execute_command(cmd) {
                Ok(()) => {
                    execution_log.push(format!("✓ Executed: {}", cmd.name()));
                }
                Err(e) => {
                    let error_msg = format!("✗ Failed to execute {}: {}", cmd.name(), e);
                    log::error!("{}", error_msg);
                    execution_log.push(error_msg);
                }
            }
        }

        execution_log
    }

    /// Cancel every running timer
    pub fn shutdown(&mut self) {
        self.timers.shutdown();
    }

    /// Get execution statistics
    pub fn get_stats(&self) -> CmdExecutorStats {
        CmdExecutorStats {
            is_raw_sender_closed: self.raw_tx.is_closed(),
            active_timers: self.timers.active_count(),
            has_quote_service: self.quote_service.is_some(),
            has_favicon_service: self.favicon_service.is_some(),
        }
    }
}

/// Command executor statistics
#[derive(Debug, Clone)]
pub struct CmdExecutorStats {
    pub is_raw_sender_closed: bool,
    pub active_timers: usize,
    pub has_quote_service: bool,
    pub has_favicon_service: bool,
}
