//! src/graph.rs
//!
//! Top-level `graph` module: configuration and the per-tick state machines
//! (accumulator, sliding window, auto-scale, marker cadence).

pub mod accumulator;
pub mod config;
pub mod marker;
pub mod scale;
pub mod shared;
pub mod window;

/// Re-exports
pub use accumulator::SampleAccumulator;
pub use config::{BarGraphConfig, ConfigError, ScaleMode};
pub use marker::MarkerCadence;
pub use scale::ScaleEstimator;
pub use window::SlidingWindow;
