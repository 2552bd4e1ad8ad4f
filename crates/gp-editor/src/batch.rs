//! Edit batches: the unit of undoable work.
//!
//! A batch records, for every cell a session touches, the color that was
//! there *before the session began*. Live preview repaints a figure dozens
//! of times, but only the first write per cell is kept, so undoing the
//! batch restores the true pre-session surface in one step.

use gp_core::{Color, Point};
use std::collections::HashSet;

/// An insertion-ordered, point-deduplicated record of
/// `(cell, color-before-edit)` pairs produced during one session.
#[derive(Debug, Clone, Default)]
pub struct EditBatch {
    entries: Vec<(Point, Color)>,
    seen: HashSet<Point>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cell's pre-edit color. Later calls for the same cell are
    /// no-ops; the recorded color stays the one from the first touch.
    /// Returns whether the cell was newly recorded.
    pub fn record_if_absent(&mut self, cell: Point, color_before: Color) -> bool {
        if self.seen.insert(cell) {
            self.entries.push((cell, color_before));
            true
        } else {
            false
        }
    }

    pub fn contains(&self, cell: Point) -> bool {
        self.seen.contains(&cell)
    }

    /// Recorded `(cell, pre-edit color)` pairs, in first-touch order.
    pub fn entries(&self) -> &[(Point, Color)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget everything recorded so far. Used by the preview cycle after
    /// the recorded colors have been written back to the surface.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.seen.clear();
    }
}

impl FromIterator<(Point, Color)> for EditBatch {
    fn from_iter<I: IntoIterator<Item = (Point, Color)>>(iter: I) -> Self {
        let mut batch = Self::new();
        for (cell, color) in iter {
            batch.record_if_absent(cell, color);
        }
        batch
    }
}
