//! src/render/draw.rs
//!
//! Small drawing helpers shared by the chart variants. Each helper brackets
//! its work with `save`/`restore`.

use crate::surface::{Rgb, Surface};

/// Clear the whole surface and fill it with `color`.
pub fn paint_background(surface: &mut dyn Surface, color: Rgb) {
    let (w, h) = (surface.width(), surface.height());
    surface.save();
    surface.clear_rect(0.0, 0.0, w, h);
    surface.set_fill(color);
    surface.fill_rect(0.0, 0.0, w, h);
    surface.restore();
}

pub fn fill_rect(surface: &mut dyn Surface, color: Rgb, x: f64, y: f64, w: f64, h: f64) {
    surface.save();
    surface.set_fill(color);
    surface.fill_rect(x, y, w, h);
    surface.restore();
}

/// Width of `text` at `font_size`.
pub fn measure(surface: &mut dyn Surface, text: &str, font_size: f64) -> f64 {
    surface.save();
    surface.set_font_size(font_size);
    let w = surface.measure_text(text);
    surface.restore();
    w
}

pub fn text(surface: &mut dyn Surface, text: &str, x: f64, y: f64, font_size: f64, color: Rgb) {
    surface.save();
    surface.set_font_size(font_size);
    surface.set_fill(color);
    surface.fill_text(text, x, y);
    surface.restore();
}

/// Draw `label` horizontally centred on `[left, left + width]`.
pub fn centered_text(
    surface: &mut dyn Surface,
    label: &str,
    left: f64,
    width: f64,
    y: f64,
    font_size: f64,
    color: Rgb,
) {
    let measured = measure(surface, label, font_size);
    text(surface, label, left + (width - measured) / 2.0, y, font_size, color);
}

/// Tick label: whole numbers without decimals, everything else with one.
pub fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Raster;

    #[test]
    fn tick_formatting() {
        assert_eq!(format_tick(30.0), "30");
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(9.46), "9.5");
        assert_eq!(format_tick(132.0000000001), "132");
    }

    #[test]
    fn helpers_leave_the_fill_untouched() {
        let mut r = Raster::new(10, 3);
        let before = r.state();
        paint_background(&mut r, Rgb(1, 2, 3));
        centered_text(&mut r, "hi", 0.0, 10.0, 1.0, 1.0, Rgb::WHITE);
        assert_eq!(r.state(), before);
        assert_eq!(r.cell(0, 0).unwrap().bg, Rgb(1, 2, 3));
        assert_eq!(r.row_text(1), "    hi    ");
    }
}
