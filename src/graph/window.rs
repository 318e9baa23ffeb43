//! src/graph/window.rs
//!
//! Fixed-capacity sliding window of non-negative samples (oldest at front).

use std::collections::VecDeque;

#[derive(Clone, Debug, Default)]
pub struct SlidingWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create an empty window with zero capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns that fit in `plot_width` at the given bar pitch.
    pub fn capacity_for(plot_width: f64, bar_pitch: f64) -> usize {
        if !plot_width.is_finite() || !bar_pitch.is_finite() || plot_width <= 0.0 || bar_pitch <= 0.0 {
            return 0;
        }
        (plot_width / bar_pitch).floor() as usize
    }

    /// Settle the window at exactly `capacity` entries.
    ///
    /// Shrinking drops the oldest samples in one batch; growing pads zeros on
    /// the oldest side so existing samples keep their right-edge positions.
    /// Returns whether anything changed.
    pub fn resize(&mut self, capacity: usize) -> bool {
        self.capacity = capacity;
        let len = self.samples.len();
        if len > capacity {
            self.samples.drain(..len - capacity);
            true
        } else if len < capacity {
            for _ in len..capacity {
                self.samples.push_front(0.0);
            }
            true
        } else {
            false
        }
    }

    /// Append one sample (clamped to zero) and evict the oldest when over
    /// capacity.
    pub fn push(&mut self, sample: f64) {
        let sample = if sample.is_finite() { sample.max(0.0) } else { 0.0 };
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Column count the window last settled at.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// `(min, max)` over the window; an empty window reads as all zeros.
    pub fn bounds(&self) -> (f64, f64) {
        let mut mn = f64::INFINITY;
        let mut mx = f64::NEG_INFINITY;
        for v in self.iter() {
            mn = mn.min(v);
            mx = mx.max(v);
        }
        if mn == f64::INFINITY || mx == f64::NEG_INFINITY {
            return (0.0, 0.0);
        }
        (mn, mx)
    }
}
