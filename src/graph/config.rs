//! src/graph/config.rs
//!
//! Chart configuration: plot and bar geometry, behaviour flags, styling and
//! axis metadata, deserialised from TOML tables `[plot]`, `[bar]`, `[axis]`
//! and `[general]`.
//!
//! Required geometry is kept as `Option` so that a missing key is reported by
//! `validate()` (drawing disabled, engine still alive) instead of failing the
//! whole parse.

use std::time::Duration;

use serde::Deserialize;

use crate::surface::Rgb;

/// Everything that can be wrong with a chart configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error("`{name}` must be a finite positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("`bar.width + bar.spacing` must be a finite positive number, got {0}")]
    BarPitch(f64),
    #[error("`{name}` is not a colour: {value:?}")]
    BadColor { name: &'static str, value: String },
    #[error("surface must have finite positive dimensions, got {width}x{height}")]
    Surface { width: f64, height: f64 },
}

/// Which auto-scale policy drives the y axis.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Padded min/max bounds recomputed every tick.
    #[default]
    Bounded,
    /// Integer divisor that only ratchets upwards.
    Simple,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub title_bar_height: Option<f64>,
    /// Left offset of the first column.
    pub origin_x: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarConfig {
    pub width: f64,
    pub spacing: f64,
    /// Keep the pending count across ticks instead of resetting it.
    pub incremental_values: bool,
    pub update_frequency_ms: u64,
    /// Every n-th column is drawn in `marker_color`; 0 disables markers.
    pub marker_position: Option<usize>,
    pub marker_color: Option<String>,
    pub bar_color: Option<String>,
    pub bar_background_color: Option<String>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 5.0,
            spacing: 5.0,
            incremental_values: false,
            update_frequency_ms: 500,
            marker_position: None,
            marker_color: None,
            bar_color: None,
            bar_background_color: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisConfig {
    pub title: String,
    pub title_font_size: f64,
    pub title_font_color: Option<String>,
    pub num_ticks: usize,
    pub tick_font_size: f64,
    pub scale_mode: ScaleMode,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_font_size: 10.0,
            title_font_color: None,
            num_ticks: 4,
            tick_font_size: 10.0,
            scale_mode: ScaleMode::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralConfig {
    pub background: Option<String>,
    pub title: String,
    pub title_font_size: f64,
    /// Falls back to `axis.title_font_color` when unset.
    pub title_font_color: Option<String>,
    /// Palette cycled by the static bar chart.
    pub graph_colors: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            background: None,
            title: String::new(),
            title_font_size: 10.0,
            title_font_color: None,
            graph_colors: Vec::new(),
        }
    }
}

/// Full configuration owned by one chart instance.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarGraphConfig {
    pub plot: PlotConfig,
    pub bar: BarConfig,
    pub axis: AxisConfig,
    pub general: GeneralConfig,
}

/// Validated plot geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotGeometry {
    pub width: f64,
    pub height: f64,
    pub title_bar_height: f64,
    pub origin_x: f64,
}

impl BarGraphConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Check the geometry and return it in validated form.
    pub fn validate(&self) -> Result<PlotGeometry, ConfigError> {
        let width = positive("plot.width", self.plot.width)?;
        let height = positive("plot.height", self.plot.height)?;
        let title_bar_height = self
            .plot
            .title_bar_height
            .ok_or(ConfigError::Missing("plot.title_bar_height"))?;
        if !title_bar_height.is_finite() || title_bar_height < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "plot.title_bar_height",
                value: title_bar_height,
            });
        }
        let pitch = self.bar_pitch();
        if !pitch.is_finite() || pitch <= 0.0 || self.bar.width < 0.0 || self.bar.spacing < 0.0 {
            return Err(ConfigError::BarPitch(pitch));
        }
        Ok(PlotGeometry {
            width,
            height,
            title_bar_height,
            origin_x: if self.plot.origin_x.is_finite() {
                self.plot.origin_x
            } else {
                0.0
            },
        })
    }

    /// Horizontal distance between the starts of two neighbouring columns.
    pub fn bar_pitch(&self) -> f64 {
        self.bar.width + self.bar.spacing
    }

    pub fn update_period(&self) -> Duration {
        Duration::from_millis(self.bar.update_frequency_ms.max(1))
    }
}

fn positive(name: &'static str, value: Option<f64>) -> Result<f64, ConfigError> {
    let value = value.ok_or(ConfigError::Missing(name))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Resolve a required colour setting.
pub fn color(name: &'static str, value: Option<&str>) -> Result<Rgb, ConfigError> {
    let value = value.ok_or(ConfigError::Missing(name))?;
    value.parse().map_err(|_| ConfigError::BadColor {
        name,
        value: value.to_string(),
    })
}
