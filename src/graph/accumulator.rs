//! src/graph/accumulator.rs
//!
//! Net add/remove delta collected between two render ticks.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleAccumulator {
    pending: f64,
    incremental: bool,
}

impl SampleAccumulator {
    /// `incremental` keeps the pending value as a running total across
    /// commits instead of resetting it after each one.
    pub fn new(incremental: bool) -> Self {
        Self {
            pending: 0.0,
            incremental,
        }
    }

    /// Add `amount` to the pending value.
    pub fn add(&mut self, amount: f64) {
        self.pending += amount;
    }

    /// May drive the pending value negative; it is clamped when stored.
    pub fn remove(&mut self, amount: f64) {
        self.pending -= amount;
    }

    /// Add a single count.
    pub fn increment(&mut self) {
        self.add(1.0);
    }

    /// Remove a single count.
    pub fn decrement(&mut self) {
        self.remove(1.0);
    }

    /// Take the value for this tick.
    pub fn commit(&mut self) -> f64 {
        let value = self.pending;
        if !self.incremental {
            self.pending = 0.0;
        }
        value
    }

    /// Value the next commit will return.
    pub fn pending(&self) -> f64 {
        self.pending
    }

    /// Whether commits keep the running total.
    pub fn is_incremental(&self) -> bool {
        self.incremental
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_returns_algebraic_sum_and_resets() {
        let mut acc = SampleAccumulator::new(false);
        acc.add(5.0);
        acc.increment();
        acc.remove(2.0);
        acc.decrement();
        assert_eq!(acc.commit(), 3.0);
        assert_eq!(acc.pending(), 0.0);
        assert_eq!(acc.commit(), 0.0);
    }

    #[test]
    fn incremental_mode_carries_the_total() {
        let mut acc = SampleAccumulator::new(true);
        acc.add(2.0);
        assert_eq!(acc.commit(), 2.0);
        acc.add(3.0);
        assert_eq!(acc.commit(), 5.0);
        assert_eq!(acc.pending(), 5.0);
    }

    #[test]
    fn pending_may_go_negative() {
        let mut acc = SampleAccumulator::new(false);
        acc.remove(4.0);
        assert_eq!(acc.commit(), -4.0);
    }
}
