use ratatui::prelude::*;
use unicode_width::UnicodeWidthStr;

use crate::core::state::bookmark::{BookmarkState, FaviconStatus};

pub const EMPTY_TEXT: &str = "No bookmarks yet";
const SEPARATOR: &str = "   ";

/// Compact rows of bookmark labels, centered. In icon mode each label is
/// prefixed by a favicon marker. Entries never break across rows.
pub struct LinkBar<'a> {
    bookmarks: &'a BookmarkState,
    link_style: Style,
    empty_style: Style,
}

impl<'a> LinkBar<'a> {
    pub fn new(bookmarks: &'a BookmarkState) -> Self {
        Self {
            bookmarks,
            link_style: Style::default(),
            empty_style: Style::default(),
        }
    }

    pub fn link_style(mut self, style: Style) -> Self {
        self.link_style = style;
        self
    }

    pub fn empty_style(mut self, style: Style) -> Self {
        self.empty_style = style;
        self
    }

    pub fn marker(status: Option<FaviconStatus>) -> &'static str {
        match status {
            Some(FaviconStatus::Loaded) => "●",
            Some(FaviconStatus::Broken) => "○",
            Some(FaviconStatus::Pending) | None => "·",
        }
    }

    fn prefix(&self, index: usize) -> Option<String> {
        if !self.bookmarks.icon_mode {
            return None;
        }
        let bookmark = self.bookmarks.items.get(index)?;
        let marker = Self::marker(self.bookmarks.favicon(bookmark));
        Some(format!("{marker} "))
    }

    /// Display width of one entry, marker included
    fn entry_width(&self, index: usize) -> usize {
        let label = self
            .bookmarks
            .items
            .get(index)
            .map_or(0, |bookmark| bookmark.label.width());
        self.prefix(index).map_or(0, |prefix| prefix.width()) + label
    }

    /// Entry indices packed greedily into rows no wider than `width`. An
    /// entry wider than a whole row gets a row of its own.
    pub fn rows(&self, width: u16) -> Vec<Vec<usize>> {
        let width = usize::from(width);
        let mut rows: Vec<Vec<usize>> = vec![];
        let mut used = 0;

        for index in 0..self.bookmarks.items.len() {
            let entry = self.entry_width(index);
            match rows.last_mut() {
                Some(row) if used + SEPARATOR.len() + entry <= width => {
                    row.push(index);
                    used += SEPARATOR.len() + entry;
                }
                _ => {
                    rows.push(vec![index]);
                    used = entry;
                }
            }
        }
        rows
    }

    fn row_width(&self, row: &[usize]) -> usize {
        let entries: usize = row.iter().map(|&index| self.entry_width(index)).sum();
        entries + SEPARATOR.len() * row.len().saturating_sub(1)
    }

    pub fn row_line(&self, row: &[usize]) -> Line<'a> {
        let mut spans = Vec::with_capacity(row.len() * 3);
        for (position, &index) in row.iter().enumerate() {
            let Some(bookmark) = self.bookmarks.items.get(index) else {
                continue;
            };
            if position > 0 {
                spans.push(Span::raw(SEPARATOR));
            }
            if let Some(prefix) = self.prefix(index) {
                spans.push(Span::raw(prefix));
            }
            spans.push(Span::styled(bookmark.label.as_str(), self.link_style));
        }
        Line::from(spans)
    }

    /// Column where a centered row of `row_width` starts
    fn row_x(area: Rect, row_width: usize) -> u16 {
        let row_width = u16::try_from(row_width).unwrap_or(u16::MAX);
        area.x + area.width.saturating_sub(row_width) / 2
    }

    /// Index of the bookmark drawn under `position`, if any
    pub fn hit_test(&self, area: Rect, position: Position) -> Option<usize> {
        if !area.contains(position) {
            return None;
        }
        let rows = self.rows(area.width);
        let row = rows.get(usize::from(position.y - area.y))?;

        let mut x = usize::from(Self::row_x(area, self.row_width(row)));
        let column = usize::from(position.x);
        for &index in row {
            let end = x + self.entry_width(index);
            if (x..end).contains(&column) {
                return Some(index);
            }
            x = end + SEPARATOR.len();
        }
        None
    }
}

impl Widget for LinkBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        if self.bookmarks.items.is_empty() {
            Line::from(Span::styled(EMPTY_TEXT, self.empty_style))
                .alignment(Alignment::Center)
                .render(Rect { height: 1, ..area }, buf);
            return;
        }

        for (offset, row) in self.rows(area.width).iter().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            if offset >= area.height {
                break;
            }
            let width = self.row_width(row);
            let x = Self::row_x(area, width);
            let row_area = Rect::new(
                x,
                area.y + offset,
                u16::try_from(width).unwrap_or(u16::MAX).min(area.width),
                1,
            );
            self.row_line(row).render(row_area, buf);
        }
    }
}
