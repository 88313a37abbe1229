use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::presentation::config::keybindings::Action;
use crate::{
    core::{
        cmd::TimerId,
        msg::{
            bookmark::BookmarkMsg, clock::ClockMsg, gradient::GradientMsg,
            pomodoro::PomodoroMsg, quote::QuoteMsg, settings::SettingsMsg, system::SystemMsg,
            theme::ThemeMsg, Msg,
        },
        raw_msg::RawMsg,
        state::{settings::SettingsFocus, AppState},
    },
    presentation::{
        components::{dashboard_area, settings::settings_panel_area, DashboardComponent},
        widgets::link_bar::LinkBar,
    },
};

/// Translates raw external events into domain messages
/// This function is pure and contains no side effects
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState) -> Vec<Msg> {
    match raw {
        // System events - direct mapping
        RawMsg::Quit => vec![Msg::System(SystemMsg::Quit)],
        RawMsg::Suspend => vec![Msg::System(SystemMsg::Suspend)],
        RawMsg::Resume => vec![Msg::System(SystemMsg::Resume)],
        RawMsg::Resize(width, height) => vec![Msg::System(SystemMsg::Resize(width, height))],

        // User input - translate based on context and key bindings
        RawMsg::Key(key) => translate_key_event(key, state),
        RawMsg::Mouse(mouse) => translate_mouse_event(mouse, state),

        RawMsg::Timer { id, generation, at } => match id {
            TimerId::Clock => vec![Msg::Clock(ClockMsg::Tick(at))],
            TimerId::GradientCycle => vec![Msg::Gradient(GradientMsg::Cycle)],
            TimerId::GradientAnimation => vec![Msg::Gradient(GradientMsg::AnimationFrame)],
            TimerId::Pomodoro => vec![Msg::Pomodoro(PomodoroMsg::Tick(generation))],
        },

        RawMsg::QuoteLoaded(quote) => vec![Msg::Quote(QuoteMsg::Loaded(quote))],
        RawMsg::QuoteFailed(error) => vec![Msg::Quote(QuoteMsg::Failed(error))],
        RawMsg::FaviconFetched { domain, ok } => {
            vec![Msg::Bookmark(BookmarkMsg::FaviconLoaded { domain, ok })]
        }
        RawMsg::BookmarksLoaded(items) => vec![Msg::Bookmark(BookmarkMsg::Loaded(items))],

        RawMsg::SystemMessage(msg) => vec![Msg::System(SystemMsg::UpdateStatusMessage(msg))],
        RawMsg::Error(error) => vec![Msg::System(SystemMsg::ShowError(error))],

        // Ignore frequent system events in domain layer
        RawMsg::Tick | RawMsg::Render => vec![],
    }
}

/// Translates keyboard input to domain events based on current application state
fn translate_key_event(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    // Handle global key bindings first
    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return vec![Msg::System(SystemMsg::Quit)],

        KeyEvent {
            code: KeyCode::Char('z'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => return vec![Msg::System(SystemMsg::Suspend)],

        _ => {}
    }

    if state.settings.open {
        translate_settings_keys(key, state)
    } else {
        translate_normal_mode_keys(key, state)
    }
}

/// Key handling while the settings panel has focus
fn translate_settings_keys(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    let settings = |msg| vec![Msg::Settings(msg)];

    match key.code {
        KeyCode::Esc => settings(SettingsMsg::Close),
        KeyCode::Tab => settings(SettingsMsg::FocusNext),
        KeyCode::BackTab => settings(SettingsMsg::FocusPrev),
        KeyCode::Enter => settings(SettingsMsg::Activate),
        _ if state.settings.focus == SettingsFocus::List => match key.code {
            KeyCode::Up | KeyCode::Char('k') => settings(SettingsMsg::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => settings(SettingsMsg::SelectNext),
            KeyCode::Delete | KeyCode::Char('d') => settings(SettingsMsg::DeleteSelected),
            KeyCode::Char('o') => match state.settings.selected {
                Some(index) => vec![Msg::Bookmark(BookmarkMsg::Open(index))],
                None => vec![],
            },
            _ => vec![],
        },
        _ if state.settings.focused_field().is_some() => {
            if is_line_break(&key) {
                vec![]
            } else {
                settings(SettingsMsg::Input(key))
            }
        }
        _ => vec![],
    }
}

/// Single-line fields never accept line breaks
fn is_line_break(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j'))
}

/// Key bindings when in normal navigation mode
fn translate_normal_mode_keys(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    // Get keybindings from config state (flat mapping)
    if let Some(action) = state.config.config.keybindings.get(&vec![key]) {
        return translate_action_to_msg(action);
    }

    // Unbound digits open the matching bookmark
    if let KeyEvent {
        code: KeyCode::Char(c @ '1'..='9'),
        modifiers: KeyModifiers::NONE,
        ..
    } = key
    {
        let index = c as usize - '1' as usize;
        return vec![Msg::Bookmark(BookmarkMsg::Open(index))];
    }

    vec![] // No matching keybinding found
}

fn translate_action_to_msg(action: &Action) -> Vec<Msg> {
    match action {
        Action::Quit => vec![Msg::System(SystemMsg::Quit)],
        Action::Suspend => vec![Msg::System(SystemMsg::Suspend)],
        Action::StartPomodoro => vec![Msg::Pomodoro(PomodoroMsg::Start)],
        Action::ResetPomodoro => vec![Msg::Pomodoro(PomodoroMsg::Reset)],
        Action::ToggleTheme => vec![Msg::Theme(ThemeMsg::Toggle)],
        Action::ToggleIcons => vec![Msg::Bookmark(BookmarkMsg::ToggleIcons)],
        Action::ToggleSettings => vec![Msg::Settings(SettingsMsg::Toggle)],
        Action::ReloadBookmarks => vec![Msg::Bookmark(BookmarkMsg::Reload)],
    }
}

/// A click outside the open settings panel closes it. With the panel
/// closed, a click on a link bar label opens that bookmark.
fn translate_mouse_event(mouse: MouseEvent, state: &AppState) -> Vec<Msg> {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return vec![];
    }

    let (width, height) = state.system.size;
    let screen = Rect::new(0, 0, width, height);
    let position = Position::new(mouse.column, mouse.row);

    if state.settings.open {
        let panel = settings_panel_area(screen);
        return if panel.contains(position) {
            vec![]
        } else {
            vec![Msg::Settings(SettingsMsg::Close)]
        };
    }

    let links = DashboardComponent::link_bar_area(dashboard_area(screen));
    match LinkBar::new(&state.bookmarks).hit_test(links, position) {
        Some(index) => vec![Msg::Bookmark(BookmarkMsg::Open(index))],
        None => vec![],
    }
}
