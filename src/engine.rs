//! src/engine.rs
//!
//! Engine handle: owns the shared chart and the render schedule driving it.
//!
//! `MovingBarGraph::initialize` is the main entry point. It validates the
//! configuration against the surface, starts the render schedule, and hands
//! back a handle whose `add`/`remove` feed the next frame. Dropping the handle
//! cancels the schedule before the chart state goes away.

use std::io;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::graph::BarGraphConfig;
use crate::graph::shared::{self, Chart, SharedChart};
use crate::render::{BarDatum, Drawable, MovingBarChart, StaticBarChart};
use crate::scheduler::RenderScheduler;
use crate::surface::Surface;

/// Redraw period of the static chart.
pub const STATIC_UPDATE_PERIOD: Duration = Duration::from_millis(1000);

pub struct ChartEngine<D, S>
where
    D: Drawable + Send + Sync + 'static,
    S: Surface + Send + Sync + 'static,
{
    shared: SharedChart<D, S>,
    period: Duration,
    scheduler: Option<RenderScheduler>,
}

impl<D, S> ChartEngine<D, S>
where
    D: Drawable + Send + Sync + 'static,
    S: Surface + Send + Sync + 'static,
{
    /// Attach without starting the schedule.
    pub fn new(drawable: D, surface: S, period: Duration) -> Self {
        Self {
            shared: Arc::new(RwLock::new(Chart::new(drawable, surface))),
            period,
            scheduler: None,
        }
    }

    /// Spawn the render schedule. Starting a running engine is a no-op.
    pub fn start(&mut self) -> io::Result<()> {
        if self.is_running() {
            return Ok(());
        }
        let shared = Arc::clone(&self.shared);
        self.scheduler = Some(RenderScheduler::spawn(self.period, move || {
            shared::write(&shared).tick();
        })?);
        log::info!("render schedule started, every {:?}", self.period);
        Ok(())
    }

    /// Cancel the render schedule. Waits for an in-flight frame.
    pub fn stop(&mut self) {
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.stop();
            log::info!("render schedule stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.as_ref().is_some_and(RenderScheduler::is_running)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Render one frame now, outside the schedule.
    pub fn tick(&self) {
        shared::write(&self.shared).tick();
    }

    /// Run `f` with exclusive access to the chart and its surface.
    pub fn with<R>(&self, f: impl FnOnce(&mut Chart<D, S>) -> R) -> R {
        f(&mut shared::write(&self.shared))
    }

    /// New plot size, used from the next frame.
    pub fn resize(&self, plot_width: f64, plot_height: f64) {
        self.with(|chart| chart.drawable.resize(plot_width, plot_height));
    }

    /// Handle to the chart state for readers such as UI panels.
    pub fn shared(&self) -> SharedChart<D, S> {
        Arc::clone(&self.shared)
    }
}

impl<D, S> Drop for ChartEngine<D, S>
where
    D: Drawable + Send + Sync + 'static,
    S: Surface + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.stop();
    }
}

pub type MovingBarGraph<S> = ChartEngine<MovingBarChart, S>;
pub type StaticBarGraph<S> = ChartEngine<StaticBarChart, S>;

impl<S> ChartEngine<MovingBarChart, S>
where
    S: Surface + Send + Sync + 'static,
{
    /// Attach a scrolling chart to `surface` and start rendering every
    /// `bar.update_frequency_ms`.
    pub fn initialize(surface: S, config: BarGraphConfig) -> Self {
        let period = config.update_period();
        let mut engine = Self::new(MovingBarChart::new(config), surface, period);
        if let Err(err) = engine.start() {
            log::error!("could not start render schedule: {err}");
        }
        engine
    }

    /// Add `amount` to the count committed by the next frame.
    pub fn add(&self, amount: f64) {
        shared::write(&self.shared).drawable.add(amount);
    }

    /// Subtract `amount` from the pending count.
    pub fn remove(&self, amount: f64) {
        shared::write(&self.shared).drawable.remove(amount);
    }

    /// Shorthand for `add(1.0)`.
    pub fn increment(&self) {
        self.add(1.0);
    }

    /// Shorthand for `remove(1.0)`.
    pub fn decrement(&self) {
        self.remove(1.0);
    }

    /// Cloneable add/remove handle for ingestion threads.
    pub fn ingest(&self) -> Ingest<S> {
        Ingest {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S> ChartEngine<StaticBarChart, S>
where
    S: Surface + Send + Sync + 'static,
{
    /// Attach a static chart to `surface` and redraw it every
    /// `STATIC_UPDATE_PERIOD`.
    pub fn initialize(surface: S, config: BarGraphConfig) -> Self {
        let mut engine = Self::new(StaticBarChart::new(config), surface, STATIC_UPDATE_PERIOD);
        if let Err(err) = engine.start() {
            log::error!("could not start render schedule: {err}");
        }
        engine
    }

    /// Replace the dataset drawn from the next frame on.
    pub fn set_data(&self, data: Vec<BarDatum>) {
        shared::write(&self.shared).drawable.set_data(data);
    }
}

/// Fire-and-forget counter feeding a moving chart from any thread.
pub struct Ingest<S> {
    shared: SharedChart<MovingBarChart, S>,
}

impl<S> Clone for Ingest<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S> Ingest<S> {
    /// Add `amount` to the count committed by the next frame.
    pub fn add(&self, amount: f64) {
        shared::write(&self.shared).drawable.add(amount);
    }

    /// Subtract `amount` from the pending count.
    pub fn remove(&self, amount: f64) {
        shared::write(&self.shared).drawable.remove(amount);
    }

    /// Shorthand for `add(1.0)`.
    pub fn increment(&self) {
        self.add(1.0);
    }

    /// Shorthand for `remove(1.0)`.
    pub fn decrement(&self) {
        self.remove(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Raster;

    #[test]
    fn new_engine_is_idle_until_started() {
        let mut cfg = BarGraphConfig::default();
        cfg.bar.update_frequency_ms = 10_000;
        let mut engine = MovingBarGraph::new(MovingBarChart::new(cfg), Raster::new(4, 4), Duration::from_secs(10));
        assert!(!engine.is_running());
        engine.start().unwrap();
        engine.start().unwrap();
        assert!(engine.is_running());
        engine.stop();
        assert!(!engine.is_running());
    }

    #[test]
    fn ingest_handles_share_one_accumulator() {
        let engine = MovingBarGraph::new(
            MovingBarChart::new(BarGraphConfig::default()),
            Raster::new(4, 4),
            Duration::from_secs(10),
        );
        let a = engine.ingest();
        let b = a.clone();
        a.add(3.0);
        b.decrement();
        engine.increment();
        assert_eq!(engine.with(|c| c.drawable.accumulator().pending()), 3.0);
    }
}
