//! src/surface.rs
//!
//! Drawing-surface seam used by every chart variant.
//!
//! A surface is a canvas-like 2D raster target: filled rectangles, cleared
//! rectangles, measured text and drawn text, plus a save/restore stack for the
//! drawing state so one render stage cannot leak its style into the next.

pub mod color;
pub mod raster;

pub use color::Rgb;
pub use raster::Raster;

/// Mutable drawing state that `save`/`restore` bracket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawState {
    pub fill: Rgb,
    pub font_size: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill: Rgb::BLACK,
            font_size: 10.0,
        }
    }
}

/// Canvas-like drawing target.
///
/// Coordinates are in surface units with the origin at the top-left corner.
/// Text is anchored at its top-left corner and painted with the current fill.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Push the current drawing state.
    fn save(&mut self);
    /// Pop the last saved drawing state; a no-op on an empty stack.
    fn restore(&mut self);

    fn set_fill(&mut self, color: Rgb);
    fn set_font_size(&mut self, size: f64);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Width the text would occupy at the current font size.
    fn measure_text(&self, text: &str) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Normalise a rectangle with possibly negative extents to `(x, y, w, h)`
/// with `w, h >= 0`.
pub fn normalize_rect(x: f64, y: f64, w: f64, h: f64) -> (f64, f64, f64, f64) {
    let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
    let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
    (x, y, w, h)
}

/// Whether both surface dimensions are finite and strictly positive.
pub fn has_valid_size(surface: &dyn Surface) -> bool {
    let (w, h) = (surface.width(), surface.height());
    w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0
}
