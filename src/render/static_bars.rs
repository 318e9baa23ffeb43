//! src/render/static_bars.rs
//!
//! Static bar chart: redraws an externally supplied dataset every frame,
//! with no windowing or scaling. Bars are sized from the surface itself.

use crate::graph::config::{self, BarGraphConfig, ConfigError};
use crate::surface::{Rgb, Surface, has_valid_size};

use super::Drawable;
use super::draw;

/// Share of each slot taken by the bar.
const BAR_SHARE: f64 = 0.4;
/// Share of each slot taken by the gap before the bar.
const GAP_SHARE: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct BarDatum {
    pub title: String,
    pub value: f64,
}

impl BarDatum {
    pub fn new(title: &str, value: f64) -> Self {
        Self {
            title: title.to_string(),
            value,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StaticBarChart {
    config: BarGraphConfig,
    data: Vec<BarDatum>,
}

impl StaticBarChart {
    pub fn new(config: BarGraphConfig) -> Self {
        Self {
            config,
            data: Vec::new(),
        }
    }

    /// Replace the whole dataset; picked up by the next frame.
    pub fn set_data(&mut self, data: Vec<BarDatum>) {
        self.data = data;
    }

    pub fn data(&self) -> &[BarDatum] {
        &self.data
    }

    fn palette(&self) -> Result<Vec<Rgb>, ConfigError> {
        let colors = &self.config.general.graph_colors;
        if colors.is_empty() {
            return Err(ConfigError::Missing("general.graph_colors"));
        }
        colors
            .iter()
            .map(|c| config::color("general.graph_colors", Some(c)))
            .collect()
    }
}

impl Drawable for StaticBarChart {
    fn validate(&self, surface: &dyn Surface) -> Result<(), ConfigError> {
        if has_valid_size(surface) {
            Ok(())
        } else {
            Err(ConfigError::Surface {
                width: surface.width(),
                height: surface.height(),
            })
        }
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        log::debug!("drawing bar graph");
        let prepared = config::color("general.background", self.config.general.background.as_deref())
            .and_then(|bg| Ok((bg, self.palette()?)));
        let (background, palette) = match prepared {
            Ok(p) => p,
            Err(err) => {
                log::warn!("skipping frame: {err}");
                return;
            }
        };

        draw::paint_background(surface, background);
        if self.data.is_empty() {
            return;
        }

        let (w, h) = (surface.width(), surface.height());
        let slot = w / self.data.len() as f64;
        let bar_width = slot * BAR_SHARE;
        let gap = slot * GAP_SHARE;
        let label_color = self
            .config
            .axis
            .title_font_color
            .as_deref()
            .and_then(|c| c.parse::<Rgb>().ok());
        let font_size = self.config.axis.tick_font_size;

        let mut last_x = 0.0;
        for (i, datum) in self.data.iter().enumerate() {
            let x = last_x + gap;
            last_x = x + bar_width;
            let bar_h = if datum.value.is_finite() {
                datum.value.clamp(0.0, h)
            } else {
                0.0
            };
            // grows upwards from the bottom edge
            draw::fill_rect(surface, palette[i % palette.len()], x, h, bar_width, -bar_h);

            if let Some(color) = label_color {
                if !datum.title.is_empty() {
                    let y = (h - bar_h - font_size).max(0.0);
                    draw::centered_text(surface, &datum.title, x, bar_width, y, font_size, color);
                }
            }
        }
    }

    /// No-op: bars are sized from the surface on every frame.
    fn resize(&mut self, _plot_width: f64, _plot_height: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Raster;

    const RED: Rgb = Rgb(0xff, 0, 0);
    const GREEN: Rgb = Rgb(0, 0xff, 0);

    fn chart() -> StaticBarChart {
        let mut cfg = BarGraphConfig::default();
        cfg.general.background = Some("#000".into());
        cfg.general.graph_colors = vec!["#f00".into(), "#0f0".into()];
        StaticBarChart::new(cfg)
    }

    #[test]
    fn bars_cycle_the_palette_and_grow_from_the_bottom() {
        let mut c = chart();
        c.set_data(vec![
            BarDatum::new("a", 4.0),
            BarDatum::new("b", 2.0),
            BarDatum::new("c", 100.0),
        ]);
        // 3 slots of 10: bar 4 wide after a 5 gap
        let mut r = Raster::new(30, 8);
        c.render(&mut r);
        assert_eq!(r.cell(5, 7).unwrap().bg, RED);
        assert_eq!(r.cell(5, 4).unwrap().bg, RED);
        assert_eq!(r.cell(5, 3).unwrap().bg, Rgb::BLACK);
        assert_eq!(r.cell(14, 7).unwrap().bg, GREEN);
        assert_eq!(r.cell(14, 5).unwrap().bg, Rgb::BLACK);
        // clamped to the surface height, palette wraps
        assert_eq!(r.cell(23, 0).unwrap().bg, RED);
        assert_eq!(r.cell(2, 7).unwrap().bg, Rgb::BLACK);
    }

    #[test]
    fn value_is_the_bar_height() {
        let mut c = chart();
        c.set_data(vec![BarDatum::new("", 8.0)]);
        let mut r = Raster::new(10, 8);
        c.render(&mut r);
        // one slot: bar spans columns 5..9
        assert!((0..8).all(|y| r.cell(5, y).unwrap().bg == RED));
        c.set_data(vec![BarDatum::new("", 0.0)]);
        c.render(&mut r);
        assert!((0..8).all(|y| r.cell(5, y).unwrap().bg == Rgb::BLACK));
    }

    #[test]
    fn resize_leaves_the_config_alone() {
        let mut c = chart();
        let before = c.config.clone();
        c.resize(40.0, 20.0);
        assert_eq!(c.config, before);
    }

    #[test]
    fn empty_palette_skips_the_frame() {
        let mut c = chart();
        c.config.general.graph_colors.clear();
        c.set_data(vec![BarDatum::new("a", 4.0)]);
        let mut r = Raster::new(10, 4);
        r.set_fill(GREEN);
        r.fill_rect(0.0, 0.0, 10.0, 4.0);
        c.render(&mut r);
        assert_eq!(r.cell(0, 0).unwrap().bg, GREEN);
    }

    #[test]
    fn labels_need_a_colour() {
        let mut c = chart();
        c.config.axis.title_font_color = Some("#fff".into());
        c.config.axis.tick_font_size = 1.0;
        c.set_data(vec![BarDatum::new("x", 2.0)]);
        let mut r = Raster::new(10, 5);
        c.render(&mut r);
        // bar spans columns 5..9, label centred above its top
        assert_eq!(r.row_text(2), "       x  ");
    }
}
