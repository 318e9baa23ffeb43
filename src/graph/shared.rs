//! src/graph/shared.rs
//!
//! Shared per-chart state: the chart variant, the surface it draws on, and
//! whether drawing was enabled at initialization.
//!
//! Ingestion threads, the render tick and UI readers all go through one
//! `Arc<RwLock<..>>`, so a tick never observes a half-applied `add`.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::render::Drawable;
use crate::surface::Surface;

pub struct Chart<D, S> {
    pub drawable: D,
    pub surface: S,
    enabled: bool,
}

impl<D: Drawable, S: Surface> Chart<D, S> {
    /// Attach `drawable` to `surface`. Invalid geometry is logged once and
    /// leaves drawing disabled; the chart still accepts data.
    pub fn new(drawable: D, surface: S) -> Self {
        let enabled = match drawable.validate(&surface) {
            Ok(()) => true,
            Err(err) => {
                log::error!("chart initialization failed, drawing disabled: {err}");
                false
            }
        };
        Self {
            drawable,
            surface,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render one frame if drawing is enabled.
    pub fn tick(&mut self) {
        if !self.enabled {
            log::debug!("drawing disabled, tick ignored");
            return;
        }
        self.drawable.render(&mut self.surface);
    }
}

/// Alias: Arc<RwLock<Chart>>
pub type SharedChart<D, S> = Arc<RwLock<Chart<D, S>>>;

/// Write access that survives a panicked writer; chart state stays usable.
pub fn write<D, S>(shared: &SharedChart<D, S>) -> RwLockWriteGuard<'_, Chart<D, S>> {
    shared.write().unwrap_or_else(PoisonError::into_inner)
}

pub fn read<D, S>(shared: &SharedChart<D, S>) -> RwLockReadGuard<'_, Chart<D, S>> {
    shared.read().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BarGraphConfig;
    use crate::render::MovingBarChart;
    use crate::surface::Raster;

    #[test]
    fn invalid_geometry_disables_drawing() {
        let mut chart = Chart::new(MovingBarChart::new(BarGraphConfig::default()), Raster::new(10, 10));
        assert!(!chart.is_enabled());
        chart.drawable.add(2.0);
        chart.tick();
        assert!(chart.drawable.window().is_empty());
        assert_eq!(chart.drawable.accumulator().pending(), 2.0);
    }
}
