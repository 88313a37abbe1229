//! Settings panel overlay: color pickers, theme and icon toggles, the
//! bookmark form and the manage list.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    core::state::{
        settings::{SettingsFocus, TextField, TextFieldState},
        AppState,
    },
    domain::color::HexColor,
    infrastructure::tui::textarea_engine::TuiTextAreaEngine,
    presentation::widgets::{bookmark_list::BookmarkList, gradient_fill::GradientFill},
};

const PANEL_WIDTH: u16 = 50;
const PANEL_HEIGHT: u16 = 22;
const LABEL_WIDTH: u16 = 9;

/// Top-right region of `area` covered by the open panel. The bottom row
/// stays free for the status line.
pub fn settings_panel_area(area: Rect) -> Rect {
    let width = area.width.min(PANEL_WIDTH);
    let height = area.height.saturating_sub(1).min(PANEL_HEIGHT);
    Rect::new(area.right() - width, area.y, width, height)
}

#[derive(Debug, Clone, Default)]
pub struct SettingsComponent;

impl SettingsComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }

        let theme = state.theme.current;
        frame.render_widget(Clear, area);
        frame.render_widget(GradientFill::new(state.surfaces.panel), area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Settings ")
            .title_bottom(Line::from(" Tab move · Enter select · Esc close ").right_aligned())
            .style(Style::default().fg(theme.text().into()));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.is_empty() {
            return;
        }

        let rows = Layout::vertical([
            Constraint::Length(1), // color 1
            Constraint::Length(1), // color 2
            Constraint::Length(1), // apply
            Constraint::Length(1), // theme
            Constraint::Length(1), // icons
            Constraint::Length(1),
            Constraint::Length(1), // label
            Constraint::Length(1), // url
            Constraint::Length(1),
            Constraint::Length(1), // list header
            Constraint::Min(0),    // list
        ])
        .split(inner);

        let settings = &state.settings;
        let selected = state.config.config.styles.get_or_default("selected");
        let hint = state.config.config.styles.get_or_default("hint");

        self.color_row(frame, rows[0], "Color 1", TextField::Color1, state);
        self.color_row(frame, rows[1], "Color 2", TextField::Color2, state);

        let button_style = |focus: SettingsFocus| {
            if settings.focus == focus {
                selected
            } else {
                Style::default()
            }
        };

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(" ".repeat(usize::from(LABEL_WIDTH))),
                Span::styled("[ Apply colors ]", button_style(SettingsFocus::Apply)),
            ])),
            rows[2],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(pad_label("Theme")),
                Span::styled(format!("[ {theme} ]"), button_style(SettingsFocus::Theme)),
            ])),
            rows[3],
        );
        let icons = if state.bookmarks.icon_mode { "on" } else { "off" };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(pad_label("Icons")),
                Span::styled(format!("[ {icons} ]"), button_style(SettingsFocus::Icons)),
            ])),
            rows[4],
        );

        self.text_row(frame, rows[6], "Label", TextField::Label, state, "Docs");
        self.text_row(frame, rows[7], "URL", TextField::Url, state, "docs.rs");

        let header_style = if settings.focus == SettingsFocus::List {
            selected
        } else {
            Style::default()
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Bookmarks", header_style),
                Span::styled("  ↑/↓ select · o open · d delete", hint),
            ])),
            rows[9],
        );
        frame.render_widget(
            BookmarkList::new(&state.bookmarks.items, settings.selected)
                .focused(settings.focus == SettingsFocus::List)
                .selected_style(selected)
                .url_style(hint),
            rows[10],
        );
    }

    fn color_row(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        field: TextField,
        state: &AppState,
    ) {
        let [label_area, field_area, swatch_area] = Layout::horizontal([
            Constraint::Length(LABEL_WIDTH),
            Constraint::Length(10),
            Constraint::Length(3),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(label), label_area);
        let snapshot = state.settings.field(field);
        self.render_field(frame, field_area, snapshot, state, field, None);

        // Preview of the typed value, if it parses
        if let Some(color) = HexColor::parse(&snapshot.content) {
            frame.render_widget(
                Paragraph::new(" ██").style(Style::default().fg(color.into())),
                swatch_area,
            );
        }
    }

    fn text_row(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        field: TextField,
        state: &AppState,
        placeholder: &str,
    ) {
        let [label_area, field_area] =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)]).areas(area);

        frame.render_widget(Paragraph::new(label), label_area);
        self.render_field(
            frame,
            field_area,
            state.settings.field(field),
            state,
            field,
            Some(placeholder),
        );
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &TextFieldState,
        state: &AppState,
        field: TextField,
        placeholder: Option<&str>,
    ) {
        let focused = state.settings.focused_field() == Some(field);
        let mut textarea = TuiTextAreaEngine::hydrate(snapshot);
        textarea.set_style(Style::default().add_modifier(Modifier::UNDERLINED));
        textarea.set_cursor_line_style(Style::default());
        textarea.set_cursor_style(if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        });
        if let Some(placeholder) = placeholder {
            textarea.set_placeholder_text(placeholder);
            textarea.set_placeholder_style(state.config.config.styles.get_or_default("hint"));
        }
        frame.render_widget(&textarea, area);
    }
}

fn pad_label(label: &str) -> String {
    format!("{label:<width$}", width = usize::from(LABEL_WIDTH))
}
