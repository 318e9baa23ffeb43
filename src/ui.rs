//! src/ui.rs
//!
//! Panel trait shared by every UI surface.

use ratatui::Frame;
use ratatui::layout::Rect;

/// Panel trait: any renderable surface implements this.
pub trait Panel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect);
}
