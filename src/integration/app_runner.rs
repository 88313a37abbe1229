use std::sync::Arc;

use color_eyre::eyre::{Report, Result, WrapErr};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::Rect;
use tokio::sync::{mpsc, Mutex};

use crate::{
    core::{raw_msg::RawMsg, state::AppState},
    infrastructure::{
        config::Config,
        favicon_service::FaviconService,
        http,
        quote_service::QuoteService,
        storage::{FileStore, KeyValueStore, Snapshot},
        tui::{event_source::EventSource, Event, TuiLike},
    },
    integration::{renderer::Renderer, runtime::Runtime},
    utils,
};

/// Drives the Elm runtime: terminal events and service results in, renders out.
pub struct AppRunner {
    runtime: Runtime,
    tui: Arc<Mutex<dyn TuiLike + Send>>,
    events: EventSource,
    renderer: Renderer,
    render_rx: mpsc::UnboundedReceiver<()>,
}

impl AppRunner {
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn tui(&self) -> Arc<Mutex<dyn TuiLike + Send>> {
        Arc::clone(&self.tui)
    }

    /// Production wiring: file store in the data directory, HTTP services,
    /// events from the live terminal.
    pub async fn new_with_real(config: Config, tui: Arc<Mutex<dyn TuiLike + Send>>) -> Result<Self> {
        let data_dir = if config.config.data_dir.as_os_str().is_empty() {
            utils::get_data_dir()
        } else {
            config.config.data_dir.clone()
        };
        let store = FileStore::open(&data_dir)?;
        log::info!("Using store {}", store.path().display());

        let dashboard = config.dashboard.clone();
        let events = EventSource::real(Arc::clone(&tui));
        let mut runner = Self::new_with_store(config, Box::new(store), tui, events)?;

        let client = http::build_client(dashboard.request_timeout_secs)?;
        let raw_tx = runner.runtime.get_raw_sender();
        let quote = QuoteService::new(client.clone(), dashboard.quote_url, raw_tx.clone());
        let favicon = FaviconService::new(client, dashboard.favicon_url, raw_tx);
        runner
            .runtime
            .add_quote_service(quote)
            .map_err(Report::msg)?;
        runner
            .runtime
            .add_favicon_service(favicon)
            .map_err(Report::msg)?;

        Ok(runner)
    }

    /// Wiring without network services. Restores state from `store`.
    pub fn new_with_store(
        config: Config,
        mut store: Box<dyn KeyValueStore>,
        tui: Arc<Mutex<dyn TuiLike + Send>>,
        events: EventSource,
    ) -> Result<Self> {
        let snapshot = Snapshot::load(store.as_mut());
        log::info!(
            "Restored {} bookmarks, theme {}, pomodoro {:?}",
            snapshot.bookmarks.len(),
            snapshot.theme,
            snapshot.pomodoro_time
        );
        let state = AppState::new(config, snapshot);

        let mut runtime = Runtime::new_with_executor(state, store);
        let (render_tx, render_rx) = mpsc::unbounded_channel();
        runtime
            .add_render_request_sender(render_tx)
            .map_err(Report::msg)?;

        Ok(Self {
            runtime,
            tui,
            events,
            renderer: Renderer::new(),
            render_rx,
        })
    }

    /// Run until quit or until the event source is exhausted.
    pub async fn run(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;

        let size = self.tui.lock().await.size()?;
        self.runtime
            .send_raw_msg(RawMsg::Resize(size.width, size.height));
        self.runtime.start();
        self.update_cycle();
        self.render().await?;

        loop {
            let mut should_render = false;

            tokio::select! {
                event = self.events.next() => match event {
                    Some(event) => should_render |= self.handle_event(event).await?,
                    None => {
                        log::info!("Event source closed");
                        break;
                    }
                },
                Some(raw) = self.runtime.recv_raw() => {
                    self.runtime.send_raw_msg(raw);
                }
            }

            self.update_cycle();

            if self.runtime.state().system.should_suspend {
                self.suspend().await?;
                should_render = true;
            }

            if self.runtime.state().system.should_quit {
                break;
            }

            while self.render_rx.try_recv().is_ok() {
                should_render = true;
            }
            if should_render {
                self.render().await?;
            }
        }

        self.runtime.shutdown();
        self.tui.lock().await.exit()?;
        Ok(())
    }

    /// Returns whether the event calls for a render.
    async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Render => return Ok(true),
            Event::Tick => self.runtime.send_raw_msg(RawMsg::Tick),
            Event::Quit | Event::Closed => self.runtime.send_raw_msg(RawMsg::Quit),
            Event::Resize(w, h) => {
                self.tui
                    .lock()
                    .await
                    .resize(Rect::new(0, 0, w, h))
                    .wrap_err("failed to resize terminal")?;
                self.runtime.send_raw_msg(RawMsg::Resize(w, h));
                return Ok(true);
            }
            Event::Key(key) => {
                self.runtime.send_raw_msg(RawMsg::Key(key));
                return Ok(true);
            }
            Event::Mouse(mouse) => {
                self.runtime.send_raw_msg(RawMsg::Mouse(mouse));
                return Ok(true);
            }
            Event::Paste(text) => {
                // Pasted text only makes sense inside a settings text field
                let settings = &self.runtime.state().settings;
                if settings.open && settings.focused_field().is_some() {
                    for c in text.chars().filter(|c| !c.is_control()) {
                        self.runtime.send_raw_msg(RawMsg::Key(KeyEvent::new(
                            KeyCode::Char(c),
                            KeyModifiers::NONE,
                        )));
                    }
                    return Ok(true);
                }
            }
            Event::Error => log::warn!("Terminal reported an input error"),
            Event::Init | Event::FocusGained | Event::FocusLost => {}
        }
        Ok(false)
    }

    fn update_cycle(&mut self) {
        match self.runtime.run_update_cycle() {
            Ok(execution_log) => {
                for line in execution_log.iter().filter(|line| !line.starts_with('✓')) {
                    log::debug!("{line}");
                }
            }
            Err(e) => log::error!("Runtime error: {e}"),
        }
    }

    async fn suspend(&mut self) -> Result<()> {
        {
            let mut tui = self.tui.lock().await;
            tui.suspend()?;
            tui.resume()?;
        }
        self.runtime.send_raw_msg(RawMsg::Resume);
        self.update_cycle();
        Ok(())
    }

    async fn render(&mut self) -> Result<()> {
        let state = self.runtime.state();
        self.renderer.render(&self.tui, state).await
    }
}
