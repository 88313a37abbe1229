use ratatui::prelude::*;

use crate::domain::color::GradientPair;

/// Horizontal gradient painted into cell backgrounds. Cell symbols are kept,
/// so it can go under or over text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientFill {
    pair: GradientPair,
}

impl GradientFill {
    pub fn new(pair: GradientPair) -> Self {
        Self { pair }
    }

    /// Color of column `x` out of `width` columns. The first column is the
    /// start color and the last column the end color.
    pub fn color_at(&self, x: u16, width: u16) -> Color {
        let t = if width <= 1 {
            0.0
        } else {
            f64::from(x) / f64::from(width - 1)
        };
        self.pair.at(t).into()
    }
}

impl Widget for GradientFill {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }

        for x in 0..area.width {
            let color = self.color_at(x, area.width);
            for y in area.top()..area.bottom() {
                buf[(area.x + x, y)].set_bg(color);
            }
        }
    }
}
