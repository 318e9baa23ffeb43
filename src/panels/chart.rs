//! src/panels/chart.rs
//!
//! Chart panel: blits the engine's raster into the frame.
//!
//! When the panel's inner area changes size the raster is resized and the
//! plot is refitted (axis margin on the right, title bar on top), so the next
//! render tick picks up the new column count.

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, Borders},
};

use moving_bar_monitor::graph::shared::{self, Chart};
use moving_bar_monitor::render::Drawable;

use super::SharedMovingChart;

pub struct ChartPanel {
    pub shared: SharedMovingChart,
}

impl ChartPanel {
    pub fn new(shared: SharedMovingChart) -> Self {
        Self { shared }
    }
}

impl crate::ui::Panel for ChartPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default().title("Chart").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut chart = shared::write(&self.shared);
        if chart.surface.size() != (inner.width, inner.height) {
            let Chart {
                drawable, surface, ..
            } = &mut *chart;
            surface.resize(inner.width, inner.height);
            let margin = drawable.axis_margin(surface);
            let title_bar = drawable.config().plot.title_bar_height.unwrap_or(0.0);
            let plot_width = (inner.width as f64 - margin).max(0.0);
            let plot_height = (inner.height as f64 - title_bar).max(0.0);
            drawable.resize(plot_width, plot_height);
            log::info!(
                "chart area {}x{}, plot {plot_width}x{plot_height}",
                inner.width,
                inner.height
            );
        }
        f.render_widget(&chart.surface, inner);
    }
}
