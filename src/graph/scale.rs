//! src/graph/scale.rs
//!
//! Auto-scale state for the y axis.
//!
//! Two policies share one state object:
//! - `Simple`: an integer divisor that only ratchets upwards when the newest
//!   sample runs out of headroom.
//! - `Bounded`: padded `[min, max]` bounds recomputed from the whole window
//!   every tick, plus the matching integer scale.
//!
//! The scale is only reassigned when the recomputed value differs, and that is
//! the only time it is logged.

use super::config::ScaleMode;
use super::window::SlidingWindow;

/// Share of the plot height usable by the tallest bar in bounded mode.
const HEADROOM: f64 = 0.9;
/// Upper bound padding factor.
const MAX_PAD: f64 = 1.1;
/// Lower bound padding factor.
const MIN_PAD: f64 = 0.9;
/// Bias added before rounding so the scale errs on the large side.
const ROUND_BIAS: f64 = 0.6;
/// Smallest `max - min` span used for pixel mapping.
const MIN_SPAN: f64 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ScaleEstimator {
    mode: ScaleMode,
    scale: u64,
    min_value: f64,
    max_value: f64,
}

impl ScaleEstimator {
    /// Create an estimator with scale 1 and unit bounds.
    pub fn new(mode: ScaleMode) -> Self {
        Self {
            mode,
            scale: 1,
            min_value: 0.0,
            max_value: MIN_SPAN,
        }
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    /// Integer divisor shown alongside the axis.
    pub fn scale(&self) -> u64 {
        self.scale
    }

    /// Current axis bounds `(min, max)`.
    pub fn bounds(&self) -> (f64, f64) {
        (self.min_value, self.max_value)
    }

    /// Recompute from the window. Returns whether the scale changed.
    pub fn update(&mut self, window: &SlidingWindow, plot_height: f64) -> bool {
        let plot_height = if plot_height.is_finite() && plot_height > 0.0 {
            plot_height
        } else {
            1.0
        };
        match self.mode {
            ScaleMode::Simple => {
                let sample = window.latest().unwrap_or(0.0);
                let mut changed = false;
                if sample > plot_height * self.scale as f64 {
                    let candidate = simple_scale(sample, plot_height);
                    if candidate > self.scale {
                        changed = self.set_scale(candidate);
                    }
                }
                self.min_value = 0.0;
                self.max_value = plot_height * self.scale as f64;
                changed
            }
            ScaleMode::Bounded => {
                let (mn, mx) = window.bounds();
                let changed = self.set_scale(bounded_scale(mx, plot_height));
                self.min_value = (mn * MIN_PAD).max(0.0);
                self.max_value = mx * MAX_PAD;
                if self.max_value - self.min_value < MIN_SPAN {
                    log::debug!(
                        "flat window [{}, {}], widening span to {MIN_SPAN}",
                        self.min_value,
                        self.max_value
                    );
                    self.max_value = self.min_value + MIN_SPAN;
                }
                changed
            }
        }
    }

    fn set_scale(&mut self, candidate: u64) -> bool {
        if candidate == self.scale {
            return false;
        }
        log::info!("scale {} -> {}", self.scale, candidate);
        self.scale = candidate;
        true
    }

    /// Pixel height of a bar for `value`, within `[0, plot_height]`.
    pub fn bar_height(&self, value: f64, plot_height: f64) -> f64 {
        let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
        let h = match self.mode {
            ScaleMode::Simple => value / self.scale as f64,
            ScaleMode::Bounded => {
                let span = (self.max_value - self.min_value).max(MIN_SPAN);
                plot_height - (plot_height / span) * (self.max_value - value)
            }
        };
        h.clamp(0.0, plot_height.max(0.0))
    }

    /// Label value of tick `i` out of `num_ticks` (tick 0 at the bottom).
    pub fn tick_value(&self, i: usize, num_ticks: usize, plot_height: f64) -> f64 {
        if num_ticks == 0 {
            return self.min_value;
        }
        let frac = i as f64 / num_ticks as f64;
        match self.mode {
            ScaleMode::Simple => plot_height * self.scale as f64 / num_ticks as f64 * i as f64,
            ScaleMode::Bounded => self.min_value + (self.max_value - self.min_value) * frac,
        }
    }
}

/// `max(1, round(sample / plot_height + 0.6))`
pub fn simple_scale(sample: f64, plot_height: f64) -> u64 {
    ((sample / plot_height + ROUND_BIAS).round() as u64).max(1)
}

/// `max(1, round(max / (plot_height * 0.9) + 0.6))`
pub fn bounded_scale(max: f64, plot_height: f64) -> u64 {
    ((max / (plot_height * HEADROOM) + ROUND_BIAS).round() as u64).max(1)
}
