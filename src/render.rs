//! src/render.rs
//!
//! Chart variants and the drawing helpers they share.

pub mod draw;
pub mod moving;
pub mod static_bars;

pub use moving::{FrameStyle, MovingBarChart};
pub use static_bars::{BarDatum, StaticBarChart};

use crate::graph::config::ConfigError;
use crate::surface::Surface;

/// Anything the render scheduler can drive.
pub trait Drawable {
    /// Checked once when the chart is attached to a surface. An error leaves
    /// drawing disabled for that instance.
    fn validate(&self, surface: &dyn Surface) -> Result<(), ConfigError>;

    /// Produce one frame. Never fails: problems are logged and the frame is
    /// skipped.
    fn render(&mut self, surface: &mut dyn Surface);

    /// New plot size, applied on the next frame.
    fn resize(&mut self, plot_width: f64, plot_height: f64);
}
