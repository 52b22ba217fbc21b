//! Frame loading indicator: a small spinner + `loaded/total` label rendered
//! in the top-right corner of a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;
use crate::core::frames::LoadCounts;

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Invisible once loading has finished.
pub struct LoadIndicator {
    pub visible: bool,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
    pub counts: LoadCounts,
}

impl LoadIndicator {
    fn label(&self) -> String {
        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        format!(" {frame} frames {}/{} ", self.counts.settled(), self.counts.total)
    }
}

impl Widget for LoadIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.height == 0 {
            return;
        }
        let label = self.label();
        let label_width = label.chars().count() as u16;
        if area.width < label_width {
            return;
        }

        let x = area.x + area.width - label_width;
        let line = Line::from(Span::styled(label, Theme::spinner_style()));
        buf.set_line(x, area.y, &line, label_width);
    }
}
