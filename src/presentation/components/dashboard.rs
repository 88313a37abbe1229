//! Main card: clock, quote, pomodoro and link bar over the page background

use std::rc::Rc;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::{
    core::state::AppState,
    domain::text::{ellipsize, wrap_words},
    presentation::{
        components::hint_key,
        config::keybindings::Action,
        widgets::{countdown::Countdown, gradient_fill::GradientFill, link_bar::LinkBar},
    },
};

const CARD_MAX_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 13;
const QUOTE_LINES: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct DashboardComponent;

impl DashboardComponent {
    pub fn new() -> Self {
        Self
    }

    /// Centered card inside `area`
    pub fn card_area(area: Rect) -> Rect {
        let width = area.width.saturating_sub(4).min(CARD_MAX_WIDTH);
        let height = CARD_HEIGHT.min(area.height);
        Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        )
    }

    /// Rows of the card: clock, quote, pomodoro and links with spacers between
    fn sections(card: Rect) -> Rc<[Rect]> {
        Layout::vertical([
            Constraint::Length(1), // clock
            Constraint::Length(1),
            Constraint::Length(QUOTE_LINES as u16),
            Constraint::Length(1),
            Constraint::Length(1), // pomodoro
            Constraint::Length(1),
            Constraint::Min(1), // links
        ])
        .split(card.inner(Margin::new(2, 1)))
    }

    /// Where the link bar is drawn when the dashboard fills `area`
    pub fn link_bar_area(area: Rect) -> Rect {
        let card = Self::card_area(area);
        if card.is_empty() {
            return Rect::default();
        }
        Self::sections(card)[6]
    }

    /// Quote wrapped to `width`, at most three lines; overflow is marked on
    /// the last one.
    pub fn quote_lines(text: &str, width: usize) -> Vec<String> {
        let mut lines = wrap_words(text, width);
        if lines.len() > QUOTE_LINES {
            lines.truncate(QUOTE_LINES);
            if let Some(last) = lines.last_mut() {
                *last = ellipsize(&format!("{last} …"), width);
            }
        }
        lines
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }

        let theme = state.theme.current;
        let text = Style::default().fg(theme.text().into());

        // Page background: animated gradient in dark theme, plain base in light
        if theme.paints_background() {
            frame.render_widget(GradientFill::new(state.gradient.displayed()), area);
            frame.buffer_mut().set_style(area, text);
        } else {
            frame.render_widget(Block::default().style(text.bg(theme.base().into())), area);
        }

        let card = Self::card_area(area);
        if card.is_empty() {
            return;
        }
        frame.render_widget(GradientFill::new(state.surfaces.card), card);

        let layout = Self::sections(card);

        let styles = &state.config.config.styles;

        frame.render_widget(
            Paragraph::new(state.clock.display())
                .style(styles.get_or_default("clock"))
                .alignment(Alignment::Center),
            layout[0],
        );

        let quote: Vec<Line> = Self::quote_lines(state.quote.display(), usize::from(layout[2].width))
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(
            Paragraph::new(quote)
                .style(styles.get_or_default("quote"))
                .alignment(Alignment::Center),
            layout[2],
        );

        let start = hint_key(state, Action::StartPomodoro);
        let reset = hint_key(state, Action::ResetPomodoro);
        frame.render_widget(
            Countdown::new(state.pomodoro.display(), state.pomodoro.running)
                .keys(start.as_deref(), reset.as_deref())
                .styles(
                    styles.get_or_default("timer"),
                    styles.get_or_default("timer_running"),
                    styles.get_or_default("hint"),
                ),
            layout[4],
        );

        frame.render_widget(
            LinkBar::new(&state.bookmarks)
                .link_style(styles.get_or_default("link"))
                .empty_style(styles.get_or_default("hint")),
            layout[6],
        );
    }
}
