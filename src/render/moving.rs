//! src/render/moving.rs
//!
//! Scrolling bar chart: each frame commits the pending count as one new
//! sample, slides the window, rescales, and redraws the labelled columns.
//!
//! Frame layout (top to bottom, left to right):
//!
//! ```text
//! +------------------------------+---------------------+
//! |            title             |                     |  title bar
//! +------------------------------+ tick    axis title  |
//! |  ||  ||  ||  ||  ||  ||  ||  | labels              |  plot
//! +------------------------------+---------------------+
//!  origin_x      plot width        reserved margin
//! ```

use crate::graph::accumulator::SampleAccumulator;
use crate::graph::config::{self, BarGraphConfig, ConfigError, PlotGeometry};
use crate::graph::marker::MarkerCadence;
use crate::graph::scale::ScaleEstimator;
use crate::graph::window::SlidingWindow;
use crate::surface::{Rgb, Surface, has_valid_size};

use super::Drawable;
use super::draw;

/// Gap between the plot and the tick labels, and between tick labels and the
/// axis title.
pub const AXIS_MARGIN: f64 = 2.0;

/// Colours and marker cadence resolved for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStyle {
    pub background: Rgb,
    pub bar: Rgb,
    pub bar_background: Rgb,
    pub marker: Rgb,
    pub axis_text: Rgb,
    pub title_text: Rgb,
    pub marker_position: usize,
}

impl FrameStyle {
    pub fn resolve(cfg: &BarGraphConfig) -> Result<Self, ConfigError> {
        let axis_text = config::color("axis.title_font_color", cfg.axis.title_font_color.as_deref())?;
        let title_text = match cfg.general.title_font_color.as_deref() {
            Some(c) => config::color("general.title_font_color", Some(c))?,
            None => axis_text,
        };
        Ok(Self {
            background: config::color("general.background", cfg.general.background.as_deref())?,
            bar: config::color("bar.bar_color", cfg.bar.bar_color.as_deref())?,
            bar_background: config::color(
                "bar.bar_background_color",
                cfg.bar.bar_background_color.as_deref(),
            )?,
            marker: config::color("bar.marker_color", cfg.bar.marker_color.as_deref())?,
            axis_text,
            title_text,
            marker_position: cfg
                .bar
                .marker_position
                .ok_or(ConfigError::Missing("bar.marker_position"))?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct MovingBarChart {
    config: BarGraphConfig,
    accumulator: SampleAccumulator,
    window: SlidingWindow,
    scale: ScaleEstimator,
    marker: MarkerCadence,
    frames: u64,
}

impl MovingBarChart {
    pub fn new(config: BarGraphConfig) -> Self {
        Self {
            accumulator: SampleAccumulator::new(config.bar.incremental_values),
            window: SlidingWindow::new(),
            scale: ScaleEstimator::new(config.axis.scale_mode),
            marker: MarkerCadence::new(),
            frames: 0,
            config,
        }
    }

    pub fn add(&mut self, amount: f64) {
        self.accumulator.add(amount);
    }

    pub fn remove(&mut self, amount: f64) {
        self.accumulator.remove(amount);
    }

    pub fn increment(&mut self) {
        self.accumulator.increment();
    }

    pub fn decrement(&mut self) {
        self.accumulator.decrement();
    }

    pub fn config(&self) -> &BarGraphConfig {
        &self.config
    }

    pub fn accumulator(&self) -> &SampleAccumulator {
        &self.accumulator
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn scale(&self) -> &ScaleEstimator {
        &self.scale
    }

    pub fn marker(&self) -> &MarkerCadence {
        &self.marker
    }

    /// Frames actually drawn (skipped frames are not counted).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Horizontal space right of the plot needed for tick labels and the axis
    /// title.
    pub fn axis_margin(&self, surface: &mut dyn Surface) -> f64 {
        let title = draw::measure(surface, &self.config.axis.title, self.config.axis.title_font_size);
        // Tick labels get as much room as the title so both fit side by side.
        2.0 * title + 2.0 * AXIS_MARGIN
    }

    /// Commit the pending count and move the window/scale forward one tick.
    fn advance(&mut self, geom: &PlotGeometry) {
        let capacity = SlidingWindow::capacity_for(geom.width, self.config.bar_pitch());
        if self.window.resize(capacity) {
            log::debug!("window resized to {capacity} columns");
        }
        let sample = self.accumulator.commit();
        self.window.push(sample);
        self.scale.update(&self.window, geom.height);
        log::debug!(
            "sample {sample} committed, scale {} bounds {:?}",
            self.scale.scale(),
            self.scale.bounds()
        );
    }

    fn draw_frame(&self, surface: &mut dyn Surface, geom: &PlotGeometry, style: &FrameStyle) {
        let surface_h = surface.height();
        let plot_top = surface_h - geom.height;
        let plot_right = geom.origin_x + geom.width;
        let axis = &self.config.axis;

        // 1. background
        draw::paint_background(surface, style.background);
        draw::fill_rect(surface, style.background, geom.origin_x, plot_top, geom.width, geom.height);

        // 2. title
        let general = &self.config.general;
        let title_y = ((geom.title_bar_height - general.title_font_size) / 2.0).max(0.0);
        draw::centered_text(
            surface,
            &general.title,
            geom.origin_x,
            geom.width,
            title_y,
            general.title_font_size,
            style.title_text,
        );

        // 3. axis title
        let title_width = draw::measure(surface, &axis.title, axis.title_font_size);
        draw::text(
            surface,
            &axis.title,
            plot_right + title_width + AXIS_MARGIN,
            surface_h - geom.height / 2.0 - axis.title_font_size / 2.0,
            axis.title_font_size,
            style.axis_text,
        );

        // 4. tick labels, tick 0 at the plot bottom
        let n = axis.num_ticks;
        for i in 0..=n {
            let value = self.scale.tick_value(i, n, geom.height);
            let line_y = if n == 0 {
                surface_h
            } else {
                surface_h - geom.height * i as f64 / n as f64
            };
            let y = (line_y - axis.tick_font_size / 2.0)
                .min(surface_h - axis.tick_font_size)
                .max(plot_top);
            draw::text(
                surface,
                &draw::format_tick(value),
                plot_right + AXIS_MARGIN,
                y,
                axis.tick_font_size,
                style.axis_text,
            );
        }

        // 5. columns, oldest on the left
        let bar = &self.config.bar;
        let count = self.window.len();
        for (i, value) in self.window.iter().enumerate() {
            let x = geom.origin_x + i as f64 * self.config.bar_pitch() + bar.spacing;
            let column_bg = if self.marker.should_highlight(count - i, style.marker_position) {
                style.marker
            } else {
                style.bar_background
            };
            draw::fill_rect(surface, column_bg, x, plot_top, bar.width, geom.height);
            draw::fill_rect(surface, style.bar, x, surface_h - 1.0, bar.width, 1.0);
            let h = self.scale.bar_height(value, geom.height);
            draw::fill_rect(surface, style.bar, x, surface_h - h, bar.width, h);
        }
    }
}

impl Drawable for MovingBarChart {
    fn validate(&self, surface: &dyn Surface) -> Result<(), ConfigError> {
        if !has_valid_size(surface) {
            return Err(ConfigError::Surface {
                width: surface.width(),
                height: surface.height(),
            });
        }
        let geom = self.config.validate()?;
        log::debug!(
            "surface {}x{}, plot {}x{}",
            surface.width(),
            surface.height(),
            geom.width,
            geom.height
        );
        Ok(())
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        log::debug!("updating moving bar graph");
        let geom = match self.config.validate() {
            Ok(geom) => geom,
            Err(err) => {
                // One sample per tick, even without a plot to size the window.
                let sample = self.accumulator.commit();
                self.window.push(sample);
                log::warn!("skipping frame, sample {sample} kept: {err}");
                return;
            }
        };
        // Data keeps flowing even when styling is broken.
        self.advance(&geom);

        let style = match FrameStyle::resolve(&self.config) {
            Ok(style) => style,
            Err(err) => {
                log::warn!("skipping frame: {err}");
                return;
            }
        };
        self.draw_frame(surface, &geom, &style);
        self.marker.advance(style.marker_position);
        self.frames += 1;
    }

    fn resize(&mut self, plot_width: f64, plot_height: f64) {
        self.config.plot.width = Some(plot_width);
        self.config.plot.height = Some(plot_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Raster;

    fn config() -> BarGraphConfig {
        BarGraphConfig::from_toml_str(
            r##"
            [plot]
            width = 20
            height = 10
            title_bar_height = 2
            [bar]
            width = 1
            spacing = 1
            marker_position = 4
            marker_color = "#777777"
            bar_color = "#4bffff"
            bar_background_color = "#555555"
            [axis]
            title = "n"
            title_font_size = 1
            title_font_color = "#ffffff"
            num_ticks = 2
            tick_font_size = 1
            [general]
            background = "#000000"
            title = "load"
            title_font_size = 1
            "##,
        )
        .unwrap()
    }

    #[test]
    fn style_requires_every_colour() {
        let mut cfg = config();
        assert!(FrameStyle::resolve(&cfg).is_ok());
        cfg.bar.marker_color = None;
        assert_eq!(
            FrameStyle::resolve(&cfg),
            Err(ConfigError::Missing("bar.marker_color"))
        );
    }

    #[test]
    fn title_colour_falls_back_to_axis_colour() {
        let style = FrameStyle::resolve(&config()).unwrap();
        assert_eq!(style.title_text, Rgb::WHITE);
    }

    #[test]
    fn render_commits_one_sample_per_frame() {
        let mut chart = MovingBarChart::new(config());
        let mut surface = Raster::new(30, 12);
        chart.add(3.0);
        chart.render(&mut surface);
        chart.add(2.0);
        chart.remove(7.0);
        chart.render(&mut surface);
        let w: Vec<f64> = chart.window().iter().collect();
        assert_eq!(w.len(), 10);
        assert_eq!(&w[8..], &[3.0, 0.0]);
        assert_eq!(chart.frames(), 2);
        assert_eq!(chart.marker().offset(), 2);
    }

    #[test]
    fn broken_style_skips_drawing_but_keeps_data() {
        let mut cfg = config();
        cfg.general.background = Some("not a colour".into());
        let mut chart = MovingBarChart::new(cfg);
        let mut surface = Raster::new(30, 12);
        chart.add(4.0);
        chart.render(&mut surface);
        assert_eq!(chart.window().latest(), Some(4.0));
        assert_eq!(chart.frames(), 0);
        assert_eq!(chart.marker().offset(), 0);
        assert_eq!(surface.cell(0, 11).unwrap().bg, Rgb::BLACK);
    }

    #[test]
    fn resize_changes_capacity_on_next_frame() {
        let mut chart = MovingBarChart::new(config());
        let mut surface = Raster::new(30, 12);
        chart.render(&mut surface);
        assert_eq!(chart.window().capacity(), 10);
        chart.resize(8.0, 10.0);
        assert_eq!(chart.window().capacity(), 10);
        chart.render(&mut surface);
        assert_eq!(chart.window().capacity(), 4);
        assert_eq!(chart.window().len(), 4);
    }

    #[test]
    fn ticks_without_a_valid_plot_still_commit_their_counts() {
        let mut chart = MovingBarChart::new(config());
        let mut surface = Raster::new(30, 12);
        chart.render(&mut surface);
        chart.resize(-4.0, 10.0);
        for _ in 0..3 {
            chart.add(1.0);
            chart.render(&mut surface);
            assert_eq!(chart.accumulator().pending(), 0.0);
        }
        chart.resize(20.0, 10.0);
        chart.add(1.0);
        chart.render(&mut surface);
        let w: Vec<f64> = chart.window().iter().collect();
        assert_eq!(w.len(), 10);
        assert_eq!(&w[6..], &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(chart.frames(), 2);
    }

    #[test]
    fn validate_checks_surface_and_geometry() {
        let chart = MovingBarChart::new(config());
        assert!(chart.validate(&Raster::new(30, 12)).is_ok());
        assert!(matches!(
            chart.validate(&Raster::new(0, 12)),
            Err(ConfigError::Surface { .. })
        ));
        let mut cfg = config();
        cfg.plot.width = None;
        assert_eq!(
            MovingBarChart::new(cfg).validate(&Raster::new(30, 12)),
            Err(ConfigError::Missing("plot.width"))
        );
    }

    #[test]
    fn axis_margin_fits_title_twice() {
        let chart = MovingBarChart::new(config());
        let mut surface = Raster::new(30, 12);
        assert_eq!(chart.axis_margin(&mut surface), 2.0 + 2.0 * AXIS_MARGIN);
    }
}
