//! Undo/redo stacks of sealed edit batches.
//!
//! Undoing a batch reads each recorded cell's *current* color into a fresh
//! inverse batch before writing the recorded color back, so redo is exact.
//! Cells within one batch are disjoint by construction, making the write
//! order within a batch irrelevant.

use crate::batch::EditBatch;
use gp_core::Surface;

/// Linear undo/redo history. Owns every committed batch.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<EditBatch>,
    redo_stack: Vec<EditBatch>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seal a finished batch into the undo stack. A successful commit
    /// clears the redo stack; an empty batch is discarded and leaves both
    /// stacks untouched.
    pub fn commit(&mut self, batch: EditBatch) {
        if batch.is_empty() {
            return;
        }
        log::debug!("commit batch of {} cells", batch.len());
        self.undo_stack.push(batch);
        self.redo_stack.clear();
    }

    /// Pop the most recent committed batch back out without touching the
    /// redo stack, so follow-up edits can merge into it. Re-commit puts it
    /// back.
    pub fn reopen_last(&mut self) -> Option<EditBatch> {
        self.undo_stack.pop()
    }

    /// Revert the most recent batch. No-op on an empty stack. Returns
    /// whether anything was undone.
    pub fn undo(&mut self, surface: &mut dyn Surface) -> bool {
        let Some(batch) = self.undo_stack.pop() else {
            return false;
        };
        log::debug!("undo batch of {} cells", batch.len());
        self.redo_stack.push(swap_batch(&batch, surface));
        true
    }

    /// Re-apply the most recently undone batch. No-op on an empty stack.
    pub fn redo(&mut self, surface: &mut dyn Surface) -> bool {
        let Some(batch) = self.redo_stack.pop() else {
            return false;
        };
        log::debug!("redo batch of {} cells", batch.len());
        self.undo_stack.push(swap_batch(&batch, surface));
        true
    }

    /// Whether an undo is available. Drives the UI's enabled state.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

/// Write `batch`'s recorded colors to the surface, returning the inverse
/// batch holding the colors that were just overwritten. Cells the surface
/// no longer covers are skipped.
fn swap_batch(batch: &EditBatch, surface: &mut dyn Surface) -> EditBatch {
    let mut inverse = EditBatch::new();
    for &(cell, color) in batch.entries() {
        let Ok(current) = surface.get(cell) else {
            continue;
        };
        inverse.record_if_absent(cell, current);
        let _ = surface.set(cell, color);
    }
    inverse
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::{Color, PixelGrid, Point};
    use pretty_assertions::assert_eq;

    fn paint(grid: &mut PixelGrid, cells: &[Point], color: Color) -> EditBatch {
        let mut batch = EditBatch::new();
        for &cell in cells {
            batch.record_if_absent(cell, grid.get(cell).unwrap());
            grid.set(cell, color).unwrap();
        }
        batch
    }

    #[test]
    fn undo_restores_pre_edit_colors() {
        let mut grid = PixelGrid::new(4, 4, Color::WHITE);
        let mut history = History::new();
        let cells = [Point::new(0, 0), Point::new(1, 1)];

        history.commit(paint(&mut grid, &cells, Color::BLACK));
        assert!(history.undo(&mut grid));

        for cell in cells {
            assert_eq!(grid.get(cell), Ok(Color::WHITE));
        }
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn redo_reapplies_exactly() {
        let mut grid = PixelGrid::new(4, 4, Color::WHITE);
        let mut history = History::new();
        let cell = Point::new(2, 3);

        history.commit(paint(&mut grid, &[cell], Color::BLACK));
        history.undo(&mut grid);
        assert!(history.redo(&mut grid));

        assert_eq!(grid.get(cell), Ok(Color::BLACK));
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_on_empty_stack_is_noop() {
        let mut grid = PixelGrid::new(2, 2, Color::WHITE);
        let mut history = History::new();
        assert!(!history.undo(&mut grid));
        assert!(!history.redo(&mut grid));
        assert_eq!(grid.get(Point::new(0, 0)), Ok(Color::WHITE));
    }

    #[test]
    fn commit_clears_redo() {
        let mut grid = PixelGrid::new(4, 4, Color::WHITE);
        let mut history = History::new();

        history.commit(paint(&mut grid, &[Point::new(0, 0)], Color::BLACK));
        history.undo(&mut grid);
        assert!(history.can_redo());

        history.commit(paint(&mut grid, &[Point::new(1, 0)], Color::BLACK));
        assert!(!history.can_redo());
    }

    #[test]
    fn empty_batch_commit_is_discarded() {
        let mut grid = PixelGrid::new(4, 4, Color::WHITE);
        let mut history = History::new();

        history.commit(paint(&mut grid, &[Point::new(0, 0)], Color::BLACK));
        history.undo(&mut grid);

        // an empty commit must not clear redo or grow undo
        history.commit(EditBatch::new());
        assert!(history.can_redo());
        assert!(!history.can_undo());
    }

    #[test]
    fn multi_batch_roundtrip() {
        let mut grid = PixelGrid::new(6, 6, Color::WHITE);
        let pristine = grid.clone();
        let mut history = History::new();

        history.commit(paint(&mut grid, &[Point::new(0, 0), Point::new(1, 0)], Color::BLACK));
        let red = Color::rgb(255, 0, 0);
        // second batch overlaps the first
        history.commit(paint(&mut grid, &[Point::new(1, 0), Point::new(2, 0)], red));
        let painted = grid.clone();

        assert!(history.undo(&mut grid));
        assert!(history.undo(&mut grid));
        for y in 0..6 {
            for x in 0..6 {
                let cell = Point::new(x, y);
                assert_eq!(grid.get(cell), pristine.get(cell), "mismatch at {cell}");
            }
        }

        assert!(history.redo(&mut grid));
        assert!(history.redo(&mut grid));
        for y in 0..6 {
            for x in 0..6 {
                let cell = Point::new(x, y);
                assert_eq!(grid.get(cell), painted.get(cell), "mismatch at {cell}");
            }
        }
    }

    #[test]
    fn reopen_last_keeps_redo() {
        let mut grid = PixelGrid::new(4, 4, Color::WHITE);
        let mut history = History::new();

        history.commit(paint(&mut grid, &[Point::new(0, 0)], Color::BLACK));
        let reopened = history.reopen_last().unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(!history.can_undo());
        assert!(history.reopen_last().is_none());
    }
}
