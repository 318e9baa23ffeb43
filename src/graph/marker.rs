//! src/graph/marker.rs
//!
//! Scrolling column highlight: every `marker_position`-th column is drawn in
//! the marker colour, and the set shifts one column left per drawn frame.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkerCadence {
    offset: usize,
}

impl MarkerCadence {
    /// Create a cadence starting at offset 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase of the highlight pattern.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Columns are numbered from the bar count at the left edge down to 1 at
    /// the right edge. A `marker_position` of 0 highlights nothing.
    pub fn should_highlight(&self, column_from_right: usize, marker_position: usize) -> bool {
        marker_position != 0 && column_from_right % marker_position == self.offset
    }

    /// Step the offset, wrapping to 0 after `marker_position - 1`.
    pub fn advance(&mut self, marker_position: usize) {
        if self.offset + 1 < marker_position {
            self.offset += 1;
        } else {
            self.offset = 0;
        }
    }
}
