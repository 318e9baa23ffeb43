//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod chart;
pub mod controls;
pub mod info;
pub mod title;

pub use chart::ChartPanel;
pub use controls::ControlsPanel;
pub use info::InfoPanel;
pub use title::TitlePanel;

use moving_bar_monitor::graph::shared::SharedChart;
use moving_bar_monitor::render::MovingBarChart;
use moving_bar_monitor::surface::Raster;

/// The one chart the UI shows.
pub type SharedMovingChart = SharedChart<MovingBarChart, Raster>;
