//! src/lib.rs
//!
//! Real-time scrolling bar chart engine.
//!
//! Counts posted with `add`/`remove` between render ticks become one sample
//! per tick in a sliding window sized to the plot; the y axis rescales to the
//! window and a labelled bar chart is redrawn onto a `Surface` on a fixed
//! period.

pub mod engine;
pub mod graph;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod source;
pub mod surface;

/// Re-exports
pub use engine::{ChartEngine, Ingest, MovingBarGraph, StaticBarGraph};
pub use graph::{BarGraphConfig, ConfigError};
pub use render::{BarDatum, Drawable};
pub use surface::{Raster, Rgb, Surface};
