//! src/panels/controls.rs
//!
//! Key binding strip.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// `(key, action)` pairs shown left to right.
pub const BINDINGS: &[(&str, &str)] = &[
    ("+", "add 1"),
    ("-", "remove 1"),
    ("Space", "pause/resume"),
    ("Q", "quit"),
];

pub struct ControlsPanel;

impl crate::ui::Panel for ControlsPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let spans: Vec<Span> = BINDINGS
            .iter()
            .flat_map(|(k, action)| {
                [
                    Span::styled(*k, key),
                    Span::raw(format!("={action}  ")),
                ]
            })
            .collect();
        let p = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Controls").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
