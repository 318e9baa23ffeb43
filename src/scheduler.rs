//! src/scheduler.rs
//!
//! Fixed-period render ticks on a dedicated thread.
//!
//! Ticks run one after another on that thread, so they never overlap. A tick
//! that overruns its period collapses the missed ticks instead of queueing
//! them. Dropping the scheduler cancels it and joins the thread.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub struct RenderScheduler {
    period: Duration,
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RenderScheduler {
    /// Start calling `tick` every `period`, first call after one period.
    pub fn spawn<F>(period: Duration, tick: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let (cancel, cancelled) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("render-tick".into())
            .spawn(move || {
                let mut tick = tick;
                let mut next = Instant::now() + period;
                loop {
                    let wait = next.saturating_duration_since(Instant::now());
                    // A message or a dropped sender both mean stop.
                    match cancelled.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    tick();
                    next += period;
                    let now = Instant::now();
                    if now > next {
                        let behind = now - next;
                        let missed = (behind.as_nanos() / period.as_nanos()) as u32 + 1;
                        log::debug!("render tick overran by {behind:?}, skipping {missed} tick(s)");
                        next += period * missed;
                    }
                }
                log::debug!("render schedule stopped");
            })?;
        Ok(Self {
            period,
            cancel: Some(cancel),
            handle: Some(handle),
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancel the schedule and wait for an in-flight tick to finish.
    pub fn stop(&mut self) {
        drop(self.cancel.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("render thread panicked");
            }
        }
    }
}

impl Drop for RenderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
