//! src/panels/info.rs
//!
//! Engine info panel: scale, bounds, pending count, window and schedule state.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use moving_bar_monitor::graph::ScaleMode;
use moving_bar_monitor::graph::shared;

use super::SharedMovingChart;

/// Read-only info panel; `running` reflects the render schedule.
pub struct InfoPanel {
    pub shared: SharedMovingChart,
    pub running: bool,
}

impl InfoPanel {
    pub fn new(shared: SharedMovingChart, running: bool) -> Self {
        Self { shared, running }
    }
}

impl crate::ui::Panel for InfoPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chart = shared::read(&self.shared);
        let c = &chart.drawable;

        let mode = match c.scale().mode() {
            ScaleMode::Bounded => "bounded",
            ScaleMode::Simple => "simple",
        };
        let (lo, hi) = c.scale().bounds();
        let accumulate = if c.accumulator().is_incremental() {
            " (running total)"
        } else {
            ""
        };
        let schedule = if self.running {
            Span::styled("running", Style::default().fg(Color::Green))
        } else {
            Span::styled(
                "paused",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        };
        let drawing = if chart.is_enabled() {
            Span::raw("enabled")
        } else {
            Span::styled("disabled", Style::default().fg(Color::Red))
        };

        let lines = vec![
            Line::from(format!("scale={}  mode={}", c.scale().scale(), mode)),
            Line::from(format!("bounds=[{:.1},{:.1}]", lo, hi)),
            Line::from(format!("pending={}{}", c.accumulator().pending(), accumulate)),
            Line::from(format!(
                "latest={}  columns={}",
                c.window().latest().unwrap_or(0.0),
                c.window().capacity()
            )),
            Line::from(format!("marker offset={}  frames={}", c.marker().offset(), c.frames())),
            Line::from(vec![Span::raw("schedule="), schedule]),
            Line::from(vec![Span::raw("drawing="), drawing]),
        ];

        let block = Block::default().title("Info").borders(Borders::ALL);
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}
