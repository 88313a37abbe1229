use ratatui::{
    prelude::*,
    widgets::{List, ListItem, ListState, StatefulWidget},
};

use crate::domain::{bookmark::Bookmark, text::ellipsize};

const DELETE_MARKER: &str = "✕";

/// Manage view of the bookmark collection: `label  url` rows, each with a
/// delete control. The selected row is the one the delete key removes.
pub struct BookmarkList<'a> {
    items: &'a [Bookmark],
    selected: Option<usize>,
    focused: bool,
    selected_style: Style,
    url_style: Style,
}

impl<'a> BookmarkList<'a> {
    pub fn new(items: &'a [Bookmark], selected: Option<usize>) -> Self {
        Self {
            items,
            selected,
            focused: false,
            selected_style: Style::default().add_modifier(Modifier::REVERSED),
            url_style: Style::default(),
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn selected_style(mut self, style: Style) -> Self {
        self.selected_style = style;
        self
    }

    pub fn url_style(mut self, style: Style) -> Self {
        self.url_style = style;
        self
    }

    /// One row, fitted to `width` columns with the delete control flush right.
    pub fn row(bookmark: &Bookmark, width: usize, url_style: Style) -> Line<'static> {
        let control = format!(" {DELETE_MARKER}");
        let body_width = width.saturating_sub(control.chars().count());
        let label = ellipsize(&bookmark.label, body_width);
        let url_width = body_width.saturating_sub(label.chars().count() + 2);
        let url = ellipsize(&bookmark.url, url_width);

        let used = label.chars().count() + if url.is_empty() { 0 } else { url.chars().count() + 2 };
        let padding = " ".repeat(body_width.saturating_sub(used));

        let mut spans = vec![Span::raw(label)];
        if !url.is_empty() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(url, url_style));
        }
        spans.push(Span::raw(padding));
        spans.push(Span::raw(control));
        Line::from(spans)
    }
}

impl Widget for BookmarkList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let width = usize::from(area.width);
        let rows: Vec<ListItem> = self
            .items
            .iter()
            .map(|bookmark| ListItem::new(Self::row(bookmark, width, self.url_style)))
            .collect();

        let highlight = if self.focused {
            self.selected_style
        } else {
            Style::default()
        };
        let list = List::new(rows).highlight_style(highlight);
        let mut state = ListState::default().with_selected(self.selected);
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
