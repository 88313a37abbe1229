use ratatui::{prelude::*, widgets::Paragraph};

/// Pomodoro readout: `MM:SS` followed by the start and reset hints.
pub struct Countdown<'a> {
    display: String,
    running: bool,
    start_key: Option<&'a str>,
    reset_key: Option<&'a str>,
    style: Style,
    running_style: Style,
    hint_style: Style,
}

impl<'a> Countdown<'a> {
    pub fn new(display: impl Into<String>, running: bool) -> Self {
        Self {
            display: display.into(),
            running,
            start_key: None,
            reset_key: None,
            style: Style::default(),
            running_style: Style::default(),
            hint_style: Style::default(),
        }
    }

    pub fn keys(mut self, start: Option<&'a str>, reset: Option<&'a str>) -> Self {
        self.start_key = start;
        self.reset_key = reset;
        self
    }

    pub fn styles(mut self, idle: Style, running: Style, hint: Style) -> Self {
        self.style = idle;
        self.running_style = running;
        self.hint_style = hint;
        self
    }

    pub fn line(&self) -> Line<'static> {
        let timer_style = if self.running {
            self.running_style
        } else {
            self.style
        };
        let mut spans = vec![Span::styled(self.display.clone(), timer_style)];
        if let Some(key) = self.start_key {
            spans.push(Span::styled(format!("  [{key}] start"), self.hint_style));
        }
        if let Some(key) = self.reset_key {
            spans.push(Span::styled(format!("  [{key}] reset"), self.hint_style));
        }
        Line::from(spans)
    }
}

impl Widget for Countdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line())
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
