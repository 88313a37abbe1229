use std::collections::VecDeque;
use tokio::sync::mpsc;

use crate::{
    core::{
        cmd::Cmd,
        cmd_executor::CmdExecutor,
        msg::Msg,
        raw_msg::RawMsg,
        state::AppState,
        translator::translate_raw_to_domain,
        update::{self, update_with_context, UpdateContext},
    },
    infrastructure::{
        favicon_service::FaviconService, quote_service::QuoteService, storage::KeyValueStore,
        tui::textarea_engine::TuiTextAreaEngine,
    },
};

static ENGINE: TuiTextAreaEngine = TuiTextAreaEngine;

/// Owns the state and drives translate, update and command execution
pub struct Runtime {
    ctx: UpdateContext<'static>,
    state: AppState,
    msg_queue: VecDeque<Msg>,
    raw_msg_queue: VecDeque<RawMsg>,
    cmd_queue: VecDeque<Cmd>,
    raw_msg_tx: mpsc::UnboundedSender<RawMsg>,
    raw_msg_rx: mpsc::UnboundedReceiver<RawMsg>,
    cmd_executor: Option<CmdExecutor>,
}

impl Runtime {
    /// Create a Runtime without side effects; commands stay queued
    pub fn new(initial_state: AppState) -> Self {
        let (raw_msg_tx, raw_msg_rx) = mpsc::unbounded_channel();

        Self {
            ctx: UpdateContext { text_area: &ENGINE },
            state: initial_state,
            msg_queue: VecDeque::new(),
            raw_msg_queue: VecDeque::new(),
            cmd_queue: VecDeque::new(),
            raw_msg_tx,
            raw_msg_rx,
            cmd_executor: None,
        }
    }

    /// Create a Runtime whose commands run against `store` and the timer service
    pub fn new_with_executor(initial_state: AppState, store: Box<dyn KeyValueStore>) -> Self {
        let mut runtime = Self::new(initial_state);
        runtime.cmd_executor = Some(CmdExecutor::new(runtime.raw_msg_tx.clone(), store));
        runtime
    }

    fn executor_mut(&mut self) -> Result<&mut CmdExecutor, String> {
        self.cmd_executor.as_mut().ok_or_else(|| {
            "No command executor available. Use new_with_executor() to configure.".to_string()
        })
    }

    pub fn add_quote_service(&mut self, service: QuoteService) -> Result<(), String> {
        self.executor_mut()?.set_quote_service(service);
        Ok(())
    }

    pub fn add_favicon_service(&mut self, service: FaviconService) -> Result<(), String> {
        self.executor_mut()?.set_favicon_service(service);
        Ok(())
    }

    /// Add render request sender for orchestrated rendering in AppRunner
    pub fn add_render_request_sender(
        &mut self,
        render_sender: mpsc::UnboundedSender<()>,
    ) -> Result<(), String> {
        self.executor_mut()?.set_render_request_sender(render_sender);
        Ok(())
    }

    /// Queue the startup commands: timers, quote request, theme re-apply
    pub fn start(&mut self) {
        let commands = update::init(&self.state);
        self.cmd_queue.extend(commands);
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn executor(&self) -> Option<&CmdExecutor> {
        self.cmd_executor.as_ref()
    }

    /// Send message directly (for testing)
    pub fn send_msg(&mut self, msg: Msg) {
        self.msg_queue.push_back(msg);
    }

    /// Send raw message (for integration with external systems)
    pub fn send_raw_msg(&mut self, raw_msg: RawMsg) {
        self.raw_msg_queue.push_back(raw_msg);
    }

    /// Sender used by services to report back
    pub fn get_raw_sender(&self) -> mpsc::UnboundedSender<RawMsg> {
        self.raw_msg_tx.clone()
    }

    /// Get pending commands
    pub fn pending_commands(&mut self) -> Vec<Cmd> {
        self.cmd_queue.drain(..).collect()
    }

    /// Execute all pending commands using the command executor
    pub fn execute_pending_commands(&mut self) -> Result<Vec<String>, String> {
        let commands = self.pending_commands();
        let executor = match self.cmd_executor.as_mut() {
            Some(executor) => executor,
            None => {
                // Keep them for a later executor
                self.cmd_queue.extend(commands);
                return Err(
                    "No command executor available. Use new_with_executor() to configure."
                        .to_string(),
                );
            }
        };
        if commands.is_empty() {
            return Ok(vec![]);
        }
        Ok(executor.execute_commands(&commands))
    }

    /// Process a single message
    pub fn process_message(&mut self, msg: Msg) -> Vec<Cmd> {
        if !msg.is_frequent() {
            log::debug!("Processing {msg:?}");
        }
        let state = std::mem::take(&mut self.state);
        let (new_state, commands) = update_with_context(msg, state, &self.ctx);
        self.state = new_state;

        self.cmd_queue.extend(commands.iter().cloned());
        commands
    }

    fn translate(&mut self, raw_msg: RawMsg) {
        let domain_msgs = translate_raw_to_domain(raw_msg, &self.state);
        self.msg_queue.extend(domain_msgs);
    }

    /// A tick queued by a timer run that has since been stopped or replaced
    fn is_stale_tick(&self, raw_msg: &RawMsg) -> bool {
        match (raw_msg, &self.cmd_executor) {
            (RawMsg::Timer { id, generation, .. }, Some(executor)) => {
                !executor.timers().is_current(*id, *generation)
            }
            _ => false,
        }
    }

    /// Process all messages in queue
    pub fn process_all_messages(&mut self) -> Vec<Cmd> {
        let mut all_commands = Vec::new();

        while let Some(raw_msg) = self.raw_msg_queue.pop_front() {
            self.translate(raw_msg);
        }

        // Timer ticks and network results
        while let Ok(raw_msg) = self.raw_msg_rx.try_recv() {
            if self.is_stale_tick(&raw_msg) {
                log::debug!("Dropping stale {raw_msg:?}");
                continue;
            }
            self.translate(raw_msg);
        }

        while let Some(msg) = self.msg_queue.pop_front() {
            let commands = self.process_message(msg);
            all_commands.extend(commands);
        }

        all_commands
    }

    /// Process all messages and execute commands in one step
    pub fn run_update_cycle(&mut self) -> Result<Vec<String>, String> {
        let _commands = self.process_all_messages();
        self.execute_pending_commands()
    }

    /// Wait until a service reports back. Returns `None` once every sender is gone.
    pub async fn recv_raw(&mut self) -> Option<RawMsg> {
        self.raw_msg_rx.recv().await
    }

    /// Stop all timers
    pub fn shutdown(&mut self) {
        if let Some(executor) = &mut self.cmd_executor {
            executor.shutdown();
        }
    }

    /// Get runtime statistics
    pub fn get_stats(&self) -> RuntimeStats {
        RuntimeStats {
            queued_messages: self.msg_queue.len(),
            queued_commands: self.cmd_queue.len(),
            bookmark_count: self.state.bookmarks.items.len(),
            pomodoro_running: self.state.pomodoro.running,
            is_settings_open: self.state.settings.open,
            has_executor: self.cmd_executor.is_some(),
            active_timers: self
                .cmd_executor
                .as_ref()
                .map(|executor| executor.get_stats().active_timers)
                .unwrap_or(0),
        }
    }
}

/// Runtime statistics
#[derive(Debug, Clone)]
pub struct RuntimeStats {
    pub queued_messages: usize,
    pub queued_commands: usize,
    pub bookmark_count: usize,
    pub pomodoro_running: bool,
    pub is_settings_open: bool,
    pub has_executor: bool,
    pub active_timers: usize,
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::{
            cmd::TimerId,
            msg::{bookmark::BookmarkMsg, pomodoro::PomodoroMsg, system::SystemMsg},
            state::settings::SettingsFocus,
        },
        infrastructure::{
            config::Config,
            storage::{MemoryStore, StorageKey},
        },
    };

    fn create_test_runtime() -> Runtime {
        let config = Config::embedded().unwrap_or_default();
        Runtime::new(AppState::new_with_config(config))
    }

    fn key(c: char) -> RawMsg {
        RawMsg::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_runtime_creation() {
        let runtime = create_test_runtime();
        let stats = runtime.get_stats();

        assert_eq!(stats.queued_messages, 0);
        assert_eq!(stats.queued_commands, 0);
        assert_eq!(stats.bookmark_count, 0);
        assert!(!stats.has_executor);
    }

    #[test]
    fn test_start_queues_init_commands() {
        let mut runtime = create_test_runtime();
        runtime.start();

        let commands = runtime.pending_commands();
        assert_eq!(commands, update::init(runtime.state()));
        assert!(commands.contains(&Cmd::FetchQuote));
    }

    #[test]
    fn test_process_message() {
        let mut runtime = create_test_runtime();

        let commands = runtime.process_message(Msg::System(SystemMsg::Quit));
        assert!(commands.is_empty());
        assert!(runtime.state().system.should_quit);
    }

    #[test]
    fn test_raw_keys_go_through_bindings() {
        let mut runtime = create_test_runtime();

        runtime.send_raw_msg(key('s'));
        let commands = runtime.process_all_messages();

        assert!(runtime.state().pomodoro.running);
        assert_eq!(
            commands,
            vec![Cmd::StartTimer {
                id: TimerId::Pomodoro,
                period_ms: 1000,
                generation: 1
            }]
        );
    }

    #[test]
    fn test_typing_into_settings_field() {
        let mut runtime = create_test_runtime();
        runtime.send_raw_msg(key(','));
        runtime.process_all_messages();
        assert!(runtime.state().settings.open);

        // Tab twice from the first color picker lands on the label field
        let tab = RawMsg::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        let focus_order = SettingsFocus::ORDER;
        let label_at = focus_order
            .iter()
            .position(|focus| *focus == SettingsFocus::Label)
            .unwrap_or(0);
        for _ in 0..label_at {
            runtime.send_raw_msg(tab.clone());
        }
        for c in "qs".chars() {
            runtime.send_raw_msg(key(c));
        }
        runtime.process_all_messages();

        assert_eq!(runtime.state().settings.label.content, "qs");
        assert!(!runtime.state().pomodoro.running);
        assert!(!runtime.state().system.should_quit);
    }

    #[test]
    fn test_execute_without_executor_keeps_commands() {
        let mut runtime = create_test_runtime();
        runtime.process_message(Msg::Pomodoro(PomodoroMsg::Start));

        assert!(runtime.execute_pending_commands().is_err());
        assert_eq!(runtime.get_stats().queued_commands, 1);
    }

    #[tokio::test]
    async fn test_update_cycle_persists_through_executor() -> Result<(), String> {
        let mut runtime = Runtime::new_with_executor(AppState::default(), Box::new(MemoryStore::new()));

        runtime.send_msg(Msg::Bookmark(BookmarkMsg::Add {
            label: "Docs".to_string(),
            url: "docs.rs".to_string(),
        }));
        let log = runtime.run_update_cycle()?;

        assert!(log.iter().all(|line| line.starts_with('✓')));
        let stored = runtime
            .executor()
            .and_then(|executor| executor.store().get(StorageKey::Bookmarks))
            .unwrap_or_default();
        assert!(stored.contains("https://docs.rs"));
        Ok(())
    }

    #[tokio::test]
    async fn test_reload_round_trips_through_raw_channel() -> Result<(), String> {
        let store = MemoryStore::new().with(
            StorageKey::Bookmarks,
            r#"[{"label":"Rust","url":"https://www.rust-lang.org"}]"#,
        );
        let mut runtime = Runtime::new_with_executor(AppState::default(), Box::new(store));

        runtime.send_msg(Msg::Bookmark(BookmarkMsg::Reload));
        runtime.run_update_cycle()?;
        // BookmarksLoaded arrives on the raw channel
        runtime.run_update_cycle()?;

        assert_eq!(runtime.state().bookmarks.items.len(), 1);
        assert_eq!(runtime.state().bookmarks.items[0].label, "Rust");
        Ok(())
    }

    #[tokio::test]
    async fn test_ticks_from_replaced_timer_run_are_dropped() -> Result<(), String> {
        let mut runtime = Runtime::new_with_executor(AppState::default(), Box::new(MemoryStore::new()));
        runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Start));
        runtime.run_update_cycle()?;
        runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Reset));
        runtime.run_update_cycle()?;
        runtime.send_msg(Msg::Pomodoro(PomodoroMsg::Start));
        runtime.run_update_cycle()?;

        let raw_tx = runtime.get_raw_sender();
        let stale = RawMsg::Timer {
            id: TimerId::Pomodoro,
            generation: 1,
            at: chrono::Local::now(),
        };
        raw_tx.send(stale).map_err(|e| e.to_string())?;
        runtime.run_update_cycle()?;
        assert_eq!(runtime.state().pomodoro.remaining, 1500);

        let current = RawMsg::Timer {
            id: TimerId::Pomodoro,
            generation: 2,
            at: chrono::Local::now(),
        };
        raw_tx.send(current).map_err(|e| e.to_string())?;
        runtime.run_update_cycle()?;
        assert_eq!(runtime.state().pomodoro.remaining, 1499);
        Ok(())
    }

    #[tokio::test]
    async fn test_shutdown_clears_timers() -> Result<(), String> {
        let mut runtime = Runtime::new_with_executor(AppState::default(), Box::new(MemoryStore::new()));
        runtime.start();
        runtime.run_update_cycle()?;
        assert_eq!(runtime.get_stats().active_timers, 2);

        runtime.shutdown();
        assert_eq!(runtime.get_stats().active_timers, 0);
        Ok(())
    }
}
