use crate::{
    core::{
        cmd::{Cmd, TimerId},
        msg::{
            bookmark::BookmarkMsg, gradient::GradientMsg, settings::SettingsMsg, theme::ThemeMsg,
            Msg,
        },
        state::{settings::SettingsFocus, AppState},
        textarea_engine::{NoopTextAreaEngine, TextAreaEngine},
    },
};

/// Services the pure update path may consult
pub struct UpdateContext<'a> {
    pub text_area: &'a dyn TextAreaEngine,
}

/// Commands issued once at startup: clock and gradient timers, the quote
/// request, and re-applying the restored theme.
pub fn init(state: &AppState) -> Vec<Cmd> {
    let dashboard = &state.config.config.dashboard;
    let mut commands = vec![
        Cmd::start_timer(TimerId::Clock, 1000),
        Cmd::start_timer(TimerId::GradientCycle, dashboard.gradient_cycle_ms.max(1)),
        Cmd::FetchQuote,
    ];
    let mut theme = state.theme;
    commands.extend(theme.update(ThemeMsg::Apply(state.theme.current)));
    commands
}

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: Msg, state: AppState) -> (AppState, Vec<Cmd>) {
    let ctx = UpdateContext {
        text_area: &NoopTextAreaEngine,
    };
    update_with_context(msg, state, &ctx)
}

pub fn update_with_context(
    msg: Msg,
    mut state: AppState,
    ctx: &UpdateContext<'_>,
) -> (AppState, Vec<Cmd>) {
    match msg {
        Msg::System(system_msg) => {
            let commands = state.system.update(system_msg);
            (state, commands)
        }

        Msg::Clock(clock_msg) => {
            let mut commands = state.clock.update(clock_msg);
            // Redraw on the second even at low frame rates
            commands.push(Cmd::RequestRender);
            (state, commands)
        }

        Msg::Quote(quote_msg) => {
            let commands = state.quote.update(quote_msg);
            (state, commands)
        }

        Msg::Pomodoro(pomodoro_msg) => {
            let commands = state.pomodoro.update(pomodoro_msg);
            (state, commands)
        }

        Msg::Bookmark(bookmark_msg) => {
            let commands = update_bookmarks(&mut state, bookmark_msg);
            (state, commands)
        }

        Msg::Gradient(gradient_msg) => {
            let commands = update_gradient(&mut state, gradient_msg);
            (state, commands)
        }

        Msg::Theme(theme_msg) => {
            let commands = state.theme.update(theme_msg);
            state.refresh_surfaces();
            (state, commands)
        }

        Msg::Settings(settings_msg) => update_settings(state, settings_msg, ctx),
    }
}

fn update_bookmarks(state: &mut AppState, msg: BookmarkMsg) -> Vec<Cmd> {
    let added = matches!(msg, BookmarkMsg::Add { .. });
    let before = state.bookmarks.items.len();

    let commands = state.bookmarks.update(msg);

    if added && state.bookmarks.items.len() > before {
        state.settings.clear_bookmark_form();
    }
    state.settings.clamp_selection(state.bookmarks.items.len());
    commands
}

fn update_gradient(state: &mut AppState, msg: GradientMsg) -> Vec<Cmd> {
    let saving = matches!(msg, GradientMsg::SaveColors { .. });
    let committed = state.gradient.pair;

    let commands = state.gradient.update(msg);

    // A rejected save restores the pickers as well
    if saving || state.gradient.pair != committed {
        state.settings.show_colors(state.gradient.pair);
    }
    if state.gradient.pair != committed {
        state.refresh_surfaces();
    }
    commands
}

fn update_settings(
    mut state: AppState,
    msg: SettingsMsg,
    ctx: &UpdateContext<'_>,
) -> (AppState, Vec<Cmd>) {
    match msg {
        SettingsMsg::Activate => {
            let follow_up = match state.settings.focus {
                SettingsFocus::Color1 | SettingsFocus::Color2 | SettingsFocus::Apply => {
                    Msg::Gradient(GradientMsg::SaveColors {
                        start: state.settings.color1.content.clone(),
                        end: state.settings.color2.content.clone(),
                    })
                }
                SettingsFocus::Theme => Msg::Theme(ThemeMsg::Toggle),
                SettingsFocus::Icons => Msg::Bookmark(BookmarkMsg::ToggleIcons),
                SettingsFocus::Label | SettingsFocus::Url => Msg::Bookmark(BookmarkMsg::Add {
                    label: state.settings.label.content.clone(),
                    url: state.settings.url.content.clone(),
                }),
                SettingsFocus::List => match state.settings.selected {
                    Some(index) => Msg::Bookmark(BookmarkMsg::Open(index)),
                    None => return (state, vec![]),
                },
            };
            update_with_context(follow_up, state, ctx)
        }

        SettingsMsg::DeleteSelected => match state.settings.selected {
            Some(index) => {
                update_with_context(Msg::Bookmark(BookmarkMsg::Delete(index)), state, ctx)
            }
            None => (state, vec![]),
        },

        SettingsMsg::Input(key) => {
            if let Some(field) = state.settings.focused_field() {
                let next = ctx.text_area.apply_keys(state.settings.field(field), &[key]);
                *state.settings.field_mut(field) = next;
            }
            (state, vec![])
        }

        other => {
            let count = state.bookmarks.items.len();
            let commands = state.settings.update(other, count);
            (state, commands)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::{
            msg::{pomodoro::PomodoroMsg, system::SystemMsg},
            state::settings::TextField,
        },
        domain::{color::GradientPair, theme::Theme},
        infrastructure::storage::StorageKey,
    };

    fn set_field(state: AppState, field: TextField, value: &str) -> AppState {
        update(
            Msg::Settings(SettingsMsg::SetField(field, value.to_string())),
            state,
        )
        .0
    }

    #[test]
    fn test_init_commands() {
        let state = AppState::default();
        assert_eq!(
            init(&state),
            vec![
                Cmd::start_timer(TimerId::Clock, 1000),
                Cmd::start_timer(TimerId::GradientCycle, 8000),
                Cmd::FetchQuote,
                Cmd::set(StorageKey::Theme, "dark"),
            ]
        );
    }

    #[test]
    fn test_system_quit() {
        let (state, cmds) = update(Msg::System(SystemMsg::Quit), AppState::default());
        assert!(state.system.should_quit);
        assert!(cmds.is_empty());
    }

    #[test]
    fn test_clock_tick_requests_render() {
        use crate::core::msg::clock::ClockMsg;

        let (state, cmds) = update(
            Msg::Clock(ClockMsg::Tick(chrono::Local::now())),
            AppState::default(),
        );
        assert!(state.clock.now.is_some());
        assert_eq!(cmds, vec![Cmd::RequestRender]);
    }

    #[test]
    fn test_pomodoro_delegation() {
        let (state, cmds) = update(Msg::Pomodoro(PomodoroMsg::Start), AppState::default());
        assert!(state.pomodoro.running);
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn test_theme_toggle_refreshes_surfaces() {
        let state = AppState::default();
        let dark_surfaces = state.surfaces;

        let (state, _) = update(Msg::Theme(ThemeMsg::Toggle), state);
        assert_eq!(state.theme.current, Theme::Light);
        assert_ne!(state.surfaces, dark_surfaces);
    }

    #[test]
    fn test_activate_on_form_adds_and_clears() {
        let mut state = AppState::default();
        state = set_field(state, TextField::Label, "Docs");
        state = set_field(state, TextField::Url, "docs.rs");
        state.settings.focus = SettingsFocus::Url;

        let (state, cmds) = update(Msg::Settings(SettingsMsg::Activate), state);
        assert_eq!(state.bookmarks.items.len(), 1);
        assert_eq!(state.bookmarks.items[0].url, "https://docs.rs");
        assert!(state.settings.label.content.is_empty());
        assert!(state.settings.url.content.is_empty());
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn test_rejected_add_keeps_form() {
        let mut state = set_field(AppState::default(), TextField::Label, "Docs");
        state.settings.focus = SettingsFocus::Label;

        let (state, cmds) = update(Msg::Settings(SettingsMsg::Activate), state);
        assert!(cmds.is_empty());
        assert_eq!(state.settings.label.content, "Docs");
    }

    #[test]
    fn test_activate_on_apply_saves_colors() {
        let mut state = set_field(AppState::default(), TextField::Color1, "#000000");
        state = set_field(state, TextField::Color2, "#336699");
        state.settings.focus = SettingsFocus::Apply;

        let (state, _) = update(Msg::Settings(SettingsMsg::Activate), state);
        assert_eq!(state.gradient.pair.start(), GradientPair::DEFAULT_START);
        assert_eq!(state.gradient.pair.end().to_hex(), "#336699");
        assert_eq!(state.settings.color1.content, "#ff5f6d");
        assert_eq!(
            state.surfaces,
            crate::domain::theme::SurfaceTints::derive(state.gradient.pair, Theme::Dark)
        );
    }

    #[test]
    fn test_invalid_colors_restore_pickers() {
        let mut state = set_field(AppState::default(), TextField::Color1, "blue");
        state.settings.focus = SettingsFocus::Color1;

        let (state, cmds) = update(Msg::Settings(SettingsMsg::Activate), state);
        assert!(cmds.is_empty());
        assert_eq!(state.settings.color1.content, "#ff5f6d");
    }

    #[test]
    fn test_delete_selected_clamps_selection() {
        let mut state = AppState::default();
        for (label, url) in [("A", "a.dev"), ("B", "b.dev")] {
            state = update(
                Msg::Bookmark(BookmarkMsg::Add {
                    label: label.to_string(),
                    url: url.to_string(),
                }),
                state,
            )
            .0;
        }
        state.settings.selected = Some(1);

        let (state, cmds) = update(Msg::Settings(SettingsMsg::DeleteSelected), state);
        assert_eq!(state.bookmarks.items.len(), 1);
        assert_eq!(state.settings.selected, Some(0));
        assert_eq!(cmds.len(), 1);
    }

    #[test]
    fn test_activate_on_list_opens_selected_row() {
        let mut state = AppState::default();
        for (label, url) in [("A", "a.dev"), ("B", "b.dev")] {
            state = update(
                Msg::Bookmark(BookmarkMsg::Add {
                    label: label.to_string(),
                    url: url.to_string(),
                }),
                state,
            )
            .0;
        }
        state.settings.open = true;
        state.settings.focus = SettingsFocus::List;

        let (mut state, cmds) = update(Msg::Settings(SettingsMsg::Activate), state);
        assert!(cmds.is_empty());

        state.settings.selected = Some(1);
        let (_, cmds) = update(Msg::Settings(SettingsMsg::Activate), state);
        assert_eq!(
            cmds,
            vec![Cmd::OpenUrl {
                url: "https://b.dev".to_string()
            }]
        );
    }

    #[test]
    fn test_input_without_text_focus_is_ignored() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let mut state = AppState::default();
        state.settings.focus = SettingsFocus::Theme;
        let before = state.settings.clone();

        let (state, _) = update(
            Msg::Settings(SettingsMsg::Input(KeyEvent::new(
                KeyCode::Char('x'),
                KeyModifiers::NONE,
            ))),
            state,
        );
        assert_eq!(state.settings.color1, before.color1);
        assert_eq!(state.settings.label, before.label);
    }
}
