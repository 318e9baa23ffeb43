//! src/surface/raster.rs
//!
//! Owned cell grid implementing `Surface`, blitted into the terminal by the
//! chart panel.
//!
//! One cell is one surface unit. Text uses one cell per glyph regardless of
//! font size, so `measure_text` is the glyph count.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::{DrawState, Rgb, Surface, normalize_rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterCell {
    pub bg: Rgb,
    pub fg: Rgb,
    pub glyph: char,
}

impl Default for RasterCell {
    fn default() -> Self {
        Self {
            bg: Rgb::BLACK,
            fg: Rgb::WHITE,
            glyph: ' ',
        }
    }
}

#[derive(Clone, Debug)]
pub struct Raster {
    width: u16,
    height: u16,
    cells: Vec<RasterCell>,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl Raster {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![RasterCell::default(); width as usize * height as usize],
            state: DrawState::default(),
            saved: Vec::new(),
        }
    }

    /// Change the grid size. Contents are discarded; the next frame repaints.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.cells = vec![RasterCell::default(); width as usize * height as usize];
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&RasterCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// Glyphs of one row as a string (trailing blanks kept).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y))
            .map(|c| c.glyph)
            .collect()
    }

    /// Current drawing state (fill colour, font size).
    pub fn state(&self) -> DrawState {
        self.state
    }

    /// Half-open cell span `[start, end)` covered by `[pos, pos + len)`.
    fn span(pos: f64, len: f64, limit: u16) -> (u16, u16) {
        let clamp = |v: f64| v.round().clamp(0.0, limit as f64) as u16;
        (clamp(pos), clamp(pos + len))
    }

    fn paint_rect(&mut self, x: f64, y: f64, w: f64, h: f64, cell: RasterCell) {
        if ![x, y, w, h].iter().all(|v| v.is_finite()) {
            return;
        }
        let (x, y, w, h) = normalize_rect(x, y, w, h);
        let (x0, x1) = Self::span(x, w, self.width);
        let (y0, y1) = Self::span(y, h, self.height);
        let stride = self.width as usize;
        for row in y0..y1 {
            let base = row as usize * stride;
            self.cells[base + x0 as usize..base + x1 as usize].fill(cell);
        }
    }
}

impl Surface for Raster {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn set_fill(&mut self, color: Rgb) {
        self.state.fill = color;
    }

    fn set_font_size(&mut self, size: f64) {
        self.state.font_size = size;
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let cell = RasterCell {
            bg: self.state.fill,
            ..RasterCell::default()
        };
        self.paint_rect(x, y, w, h, cell);
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.paint_rect(x, y, w, h, RasterCell::default());
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let row = y.round();
        if row < 0.0 || row >= self.height as f64 {
            return;
        }
        let row = row as usize;
        let stride = self.width as usize;
        let fg = self.state.fill;
        let mut col = x.round() as i64;
        for glyph in text.chars() {
            if col >= self.width as i64 {
                break;
            }
            if col >= 0 {
                let cell = &mut self.cells[row * stride + col as usize];
                cell.glyph = glyph;
                cell.fg = fg;
            }
            col += 1;
        }
    }
}

impl Widget for &Raster {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let w = self.width.min(area.width);
        let h = self.height.min(area.height);
        for y in 0..h {
            for x in 0..w {
                let Some(src) = self.cell(x, y) else {
                    continue;
                };
                if let Some(dst) = buf.cell_mut((area.x + x, area.y + y)) {
                    dst.set_char(src.glyph)
                        .set_fg(src.fg.into())
                        .set_bg(src.bg.into());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb(0xff, 0, 0);

    #[test]
    fn fill_rect_is_clipped_to_the_grid() {
        let mut r = Raster::new(4, 3);
        r.set_fill(RED);
        r.fill_rect(2.0, 1.0, 10.0, 10.0);
        assert_eq!(r.cell(1, 1).unwrap().bg, Rgb::BLACK);
        assert_eq!(r.cell(2, 1).unwrap().bg, RED);
        assert_eq!(r.cell(3, 2).unwrap().bg, RED);
        assert_eq!(r.cell(3, 0).unwrap().bg, Rgb::BLACK);
    }

    #[test]
    fn negative_height_grows_upwards() {
        let mut r = Raster::new(2, 4);
        r.set_fill(RED);
        r.fill_rect(0.0, 4.0, 1.0, -2.0);
        assert_eq!(r.cell(0, 1).unwrap().bg, Rgb::BLACK);
        assert_eq!(r.cell(0, 2).unwrap().bg, RED);
        assert_eq!(r.cell(0, 3).unwrap().bg, RED);
    }

    #[test]
    fn non_finite_rects_are_ignored() {
        let mut r = Raster::new(2, 2);
        r.set_fill(RED);
        r.fill_rect(f64::NAN, 0.0, 1.0, 1.0);
        r.fill_rect(0.0, 0.0, f64::INFINITY, 1.0);
        assert!((0..2).all(|x| r.cell(x, 0).unwrap().bg == Rgb::BLACK));
    }

    #[test]
    fn text_keeps_background_and_clips() {
        let mut r = Raster::new(5, 1);
        r.set_fill(RED);
        r.fill_rect(0.0, 0.0, 5.0, 1.0);
        r.set_fill(Rgb::WHITE);
        r.fill_text("abcdef", 2.0, 0.0);
        assert_eq!(r.row_text(0), "  abc");
        let c = r.cell(2, 0).unwrap();
        assert_eq!((c.bg, c.fg), (RED, Rgb::WHITE));
        r.fill_text("xy", -1.0, 0.0);
        assert_eq!(r.row_text(0), "y abc");
    }

    #[test]
    fn save_restore_brackets_style() {
        let mut r = Raster::new(1, 1);
        r.set_fill(RED);
        r.save();
        r.set_fill(Rgb::WHITE);
        r.set_font_size(3.0);
        r.restore();
        assert_eq!(r.state().fill, RED);
        assert_eq!(r.state().font_size, 10.0);
        // unbalanced restore keeps the current state
        r.restore();
        assert_eq!(r.state().fill, RED);
    }

    #[test]
    fn clear_resets_cells() {
        let mut r = Raster::new(3, 1);
        r.set_fill(RED);
        r.fill_rect(0.0, 0.0, 3.0, 1.0);
        r.fill_text("x", 1.0, 0.0);
        r.clear_rect(0.0, 0.0, 3.0, 1.0);
        assert!((0..3).all(|x| *r.cell(x, 0).unwrap() == RasterCell::default()));
    }

    #[test]
    fn blits_into_a_ratatui_buffer() {
        let mut r = Raster::new(2, 1);
        r.set_fill(RED);
        r.fill_rect(0.0, 0.0, 1.0, 1.0);
        let area = Rect::new(1, 1, 3, 2);
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 5));
        (&r).render(area, &mut buf);
        assert_eq!(buf[(1, 1)].bg, ratatui::style::Color::Rgb(0xff, 0, 0));
        assert_eq!(buf[(2, 1)].bg, ratatui::style::Color::Rgb(0, 0, 0));
    }
}
