//! The interaction session: pointer events → surface edits.
//!
//! One `Session` value owns the active tool, the in-progress edit batch,
//! the undo/redo history, and the live resize handles. Embedders resolve
//! each pointer event to a grid cell, wrap it in an [`InputEvent`], and
//! feed it to [`Session::handle`] together with a `&mut` borrow of the
//! surface. The borrow lasts exactly one event, so only the session can
//! mutate cells while a session is open.
//!
//! Caller obligation: nothing else may repaint cells between a press and
//! its release, or the pre-edit colors recorded by the open batch go
//! stale and undo diverges.

use crate::batch::EditBatch;
use crate::fill::{FillEngine, FloodFill};
use crate::handles::{Anchor, HandleSet};
use crate::history::History;
use crate::input::{InputEvent, PointerButton};
use gp_core::{Color, Point, Surface, ellipse_cells, line_cells, rectangle_cells};
use serde::{Deserialize, Serialize};

/// The active drawing tool.
///
/// `Line`, `Square`, and `Circle` are figure tools: they preview while the
/// button is held and leave resize handles behind. `Pen` and `Fill` apply
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tool {
    Pen,
    Line,
    Square,
    Circle,
    Fill,
}

impl Tool {
    pub fn is_figure(self) -> bool {
        matches!(self, Tool::Line | Tool::Square | Tool::Circle)
    }
}

/// Where the session is in its event cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No button held. With a figure tool, live handles may exist; that
    /// is the "figure exists, may be resized" sub-state.
    Ready,
    /// Button held, painting (pen stroke or figure preview).
    Drawing,
    /// Button held on a grabbed handle, dragging one anchor of the last
    /// figure.
    Resizing(Anchor),
}

/// What a finished resize drag does to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeCommit {
    /// Reopen the figure's committed batch on grab and merge the resize
    /// into it: one undo entry covers the figure and all its resizes.
    #[default]
    MergeIntoPrevious,
    /// Leave the original commit alone; each resize drag commits its own
    /// batch.
    SeparateBatch,
}

/// The single mutator of the surface: a pointer-event state machine with
/// linear undo/redo.
pub struct Session {
    tool: Tool,
    state: SessionState,
    /// Figure anchors. For the pen, `end` doubles as the last painted
    /// cell, which jump interpolation measures against.
    start: Point,
    end: Point,
    batch: EditBatch,
    history: History,
    handles: HandleSet,
    fill: Box<dyn FillEngine>,
    primary: Color,
    secondary: Color,
    /// Brush latched at press time from the pressed button.
    brush: Color,
    resize_commit: ResizeCommit,
}

impl Session {
    pub fn new() -> Self {
        Self {
            tool: Tool::Pen,
            state: SessionState::Ready,
            start: Point::new(0, 0),
            end: Point::new(0, 0),
            batch: EditBatch::new(),
            history: History::new(),
            handles: HandleSet::new(),
            fill: Box::new(FloodFill),
            primary: Color::BLACK,
            secondary: Color::WHITE,
            brush: Color::BLACK,
            resize_commit: ResizeCommit::default(),
        }
    }

    // ─── Configuration ───────────────────────────────────────────────────

    pub fn set_primary_color(&mut self, color: Color) {
        self.primary = color;
    }

    pub fn set_secondary_color(&mut self, color: Color) {
        self.secondary = color;
    }

    pub fn set_resize_commit(&mut self, policy: ResizeCommit) {
        self.resize_commit = policy;
    }

    /// Swap in a different region-fill strategy.
    pub fn set_fill_engine(&mut self, engine: Box<dyn FillEngine>) {
        self.fill = engine;
    }

    /// Switch the active tool. Leaving `Drawing` or `Resizing` mid-drag is
    /// forced back to `Ready`: a non-empty active batch is committed
    /// through the normal path (the cells already painted stay undoable)
    /// and no partial figure survives; handles are cleared.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        if self.state != SessionState::Ready {
            log::debug!("tool change during {:?}: forcing Ready", self.state);
            self.commit_active();
        }
        self.handles.clear();
        self.state = SessionState::Ready;
        self.tool = tool;
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The live resize handles, for the renderer to draw.
    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    /// Anchors of the figure in progress (or last drawn).
    pub fn anchors(&self) -> (Point, Point) {
        (self.start, self.end)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Event entry points ──────────────────────────────────────────────

    /// Process one pointer event. Events are expected in arrival order;
    /// each is handled completely before the call returns.
    pub fn handle(&mut self, surface: &mut dyn Surface, event: InputEvent) {
        match event {
            InputEvent::PointerDown { cell, button } => self.press(surface, cell, button),
            InputEvent::PointerMove { cell, held } => {
                if held {
                    self.drag(surface, cell);
                }
            }
            InputEvent::PointerUp { cell } => self.release(surface, cell),
        }
    }

    /// Revert the most recent committed batch. Live handles are destroyed
    /// with it, since their figure no longer exists. No-op while a button
    /// is held or when the history is empty.
    pub fn undo(&mut self, surface: &mut dyn Surface) -> bool {
        if self.state != SessionState::Ready {
            return false;
        }
        let undone = self.history.undo(surface);
        if undone {
            self.handles.clear();
        }
        undone
    }

    /// Re-apply the most recently undone batch. Handles are not recreated;
    /// the figure can be redrawn instead. No-op mid-drag or when empty.
    pub fn redo(&mut self, surface: &mut dyn Surface) -> bool {
        if self.state != SessionState::Ready {
            return false;
        }
        self.history.redo(surface)
    }

    // ─── Transitions ─────────────────────────────────────────────────────

    fn press(&mut self, surface: &mut dyn Surface, cell: Point, button: PointerButton) {
        if self.state != SessionState::Ready {
            // second press without a release in between
            return;
        }
        self.brush = match button {
            PointerButton::Primary => self.primary,
            PointerButton::Secondary => self.secondary,
        };

        match self.tool {
            Tool::Fill => {
                let changed = self.fill.fill(surface, cell, self.brush);
                self.history.commit(changed.into_iter().collect());
            }
            Tool::Pen => {
                log::debug!("pen stroke from {cell}");
                self.start = cell;
                self.end = cell;
                self.batch = EditBatch::new();
                self.paint_cell(surface, cell);
                self.state = SessionState::Drawing;
            }
            Tool::Line | Tool::Square | Tool::Circle => {
                if let Some(anchor) = self.handles.hit(cell) {
                    log::debug!("grabbed {anchor:?} handle at {cell}");
                    self.batch = match self.resize_commit {
                        ResizeCommit::MergeIntoPrevious => {
                            self.history.reopen_last().unwrap_or_default()
                        }
                        ResizeCommit::SeparateBatch => EditBatch::new(),
                    };
                    self.state = SessionState::Resizing(anchor);
                } else {
                    log::debug!("{:?} figure from {cell}", self.tool);
                    self.handles.clear();
                    self.start = cell;
                    self.end = cell;
                    self.batch = EditBatch::new();
                    // paint the degenerate single-cell preview so a
                    // zero-motion click still commits one cell
                    self.paint_cell(surface, cell);
                    self.state = SessionState::Drawing;
                }
            }
        }
    }

    fn drag(&mut self, surface: &mut dyn Surface, cell: Point) {
        match self.state {
            SessionState::Ready => {}
            SessionState::Drawing => match self.tool {
                Tool::Pen => self.pen_paint(surface, cell),
                Tool::Line | Tool::Square | Tool::Circle => {
                    self.end = cell;
                    self.repaint_figure(surface);
                }
                Tool::Fill => {}
            },
            SessionState::Resizing(anchor) => {
                match anchor {
                    Anchor::Start => self.start = cell,
                    Anchor::End => self.end = cell,
                }
                self.repaint_figure(surface);
                self.handles.move_to(anchor, cell, surface.dimensions());
            }
        }
    }

    fn release(&mut self, surface: &mut dyn Surface, cell: Point) {
        match self.state {
            SessionState::Ready => {}
            SessionState::Drawing => {
                if self.tool == Tool::Pen {
                    self.pen_paint(surface, cell);
                } else if self.start != self.end && !self.batch.is_empty() {
                    let dims = surface.dimensions();
                    self.handles.place(self.start, Anchor::Start, dims);
                    self.handles.place(self.end, Anchor::End, dims);
                }
                // a zero-size figure commits its single cell, no handles
                self.commit_active();
                self.state = SessionState::Ready;
            }
            SessionState::Resizing(_) => {
                self.commit_active();
                self.state = SessionState::Ready;
            }
        }
    }

    // ─── Painting ────────────────────────────────────────────────────────

    /// Paint one cell with the latched brush, recording its prior color on
    /// first touch. Cells off the surface are silently dropped; this is
    /// the clipping boundary for all figure geometry.
    fn paint_cell(&mut self, surface: &mut dyn Surface, cell: Point) {
        let Ok(before) = surface.get(cell) else {
            return;
        };
        self.batch.record_if_absent(cell, before);
        let _ = surface.set(cell, self.brush);
    }

    /// Pen step: paint the new cell, interpolating a line from the last
    /// painted cell when the cursor jumped more than one cell between
    /// events (fast motion outpaces move sampling).
    fn pen_paint(&mut self, surface: &mut dyn Surface, cell: Point) {
        if (cell.x - self.end.x).abs() > 1 || (cell.y - self.end.y).abs() > 1 {
            for step in line_cells(self.end, cell) {
                self.paint_cell(surface, step);
            }
        } else {
            self.paint_cell(surface, cell);
        }
        self.end = cell;
    }

    /// Preview cycle: restore every cell the batch recorded, then rebuild
    /// the figure for the current anchors and repaint it. Atomic per
    /// event; nothing observes the reverted surface.
    fn repaint_figure(&mut self, surface: &mut dyn Surface) {
        for &(cell, color) in self.batch.entries() {
            let _ = surface.set(cell, color);
        }
        self.batch.clear();

        for cell in self.figure_cells() {
            self.paint_cell(surface, cell);
        }
    }

    /// The cell set for the current tool and anchors. Anchors sharing an
    /// axis collapse every figure to a line; this guard keeps zero-radius
    /// arithmetic out of the ellipse and rectangle paths.
    fn figure_cells(&self) -> Vec<Point> {
        if self.start.x == self.end.x || self.start.y == self.end.y {
            return line_cells(self.start, self.end);
        }
        match self.tool {
            Tool::Square => rectangle_cells(self.start, self.end),
            Tool::Circle => ellipse_cells(self.start, self.end),
            _ => line_cells(self.start, self.end),
        }
    }

    fn commit_active(&mut self) {
        self.history.commit(std::mem::take(&mut self.batch));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gp_core::PixelGrid;
    use pretty_assertions::assert_eq;

    fn grid() -> PixelGrid {
        PixelGrid::new(16, 16, Color::WHITE)
    }

    fn black_cells(grid: &PixelGrid) -> Vec<Point> {
        let (w, h) = grid.dimensions();
        let mut cells = Vec::new();
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let cell = Point::new(x, y);
                if grid.get(cell) == Ok(Color::BLACK) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    #[test]
    fn pen_press_paints_immediately() {
        let mut grid = grid();
        let mut session = Session::new();
        session.handle(&mut grid, InputEvent::press(Point::new(4, 4)));
        assert_eq!(grid.get(Point::new(4, 4)), Ok(Color::BLACK));
        assert_eq!(session.state(), SessionState::Drawing);
        // not committed until release
        assert!(!session.can_undo());
    }

    #[test]
    fn secondary_button_uses_secondary_color() {
        let mut grid = grid();
        let mut session = Session::new();
        let red = Color::rgb(255, 0, 0);
        session.set_secondary_color(red);

        let cell = Point::new(2, 2);
        session.handle(
            &mut grid,
            InputEvent::PointerDown {
                cell,
                button: PointerButton::Secondary,
            },
        );
        session.handle(&mut grid, InputEvent::release(cell));
        assert_eq!(grid.get(cell), Ok(red));
    }

    #[test]
    fn move_without_button_is_ignored() {
        let mut grid = grid();
        let mut session = Session::new();
        session.handle(
            &mut grid,
            InputEvent::PointerMove {
                cell: Point::new(5, 5),
                held: false,
            },
        );
        assert_eq!(black_cells(&grid), Vec::new());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut grid = grid();
        let mut session = Session::new();
        session.handle(&mut grid, InputEvent::release(Point::new(5, 5)));
        assert!(!session.can_undo());
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn figure_preview_reverts_between_moves() {
        let mut grid = grid();
        let mut session = Session::new();
        session.set_tool(Tool::Line);

        session.handle(&mut grid, InputEvent::press(Point::new(0, 0)));
        session.handle(&mut grid, InputEvent::drag(Point::new(8, 0)));
        session.handle(&mut grid, InputEvent::drag(Point::new(0, 8)));

        // the horizontal preview must be gone, only the vertical remains
        let cells = black_cells(&grid);
        assert_eq!(cells.len(), 9);
        assert!(cells.iter().all(|c| c.x == 0));
    }

    #[test]
    fn figure_clips_to_surface() {
        let mut grid = grid();
        let mut session = Session::new();
        session.set_tool(Tool::Line);

        session.handle(&mut grid, InputEvent::press(Point::new(12, 8)));
        // an embedder may hand the session cells past the edge; the
        // off-grid part of the preview is dropped, not an error
        session.handle(&mut grid, InputEvent::drag(Point::new(18, 8)));
        session.handle(&mut grid, InputEvent::release(Point::new(18, 8)));

        let cells = black_cells(&grid);
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|c| c.x >= 12 && c.y == 8));
        // the end anchor sits entirely off-grid, so its cluster is empty
        assert_eq!(session.handles().handles(Anchor::End).len(), 0);
        assert_eq!(session.handles().handles(Anchor::Start).len(), 9);
    }

    #[test]
    fn undo_mid_drag_is_refused() {
        let mut grid = grid();
        let mut session = Session::new();
        session.handle(&mut grid, InputEvent::press(Point::new(1, 1)));
        session.handle(&mut grid, InputEvent::release(Point::new(1, 1)));
        session.handle(&mut grid, InputEvent::press(Point::new(3, 3)));
        assert!(!session.undo(&mut grid));
        session.handle(&mut grid, InputEvent::release(Point::new(3, 3)));
        assert!(session.undo(&mut grid));
    }

    #[test]
    fn double_press_is_ignored() {
        let mut grid = grid();
        let mut session = Session::new();
        session.set_tool(Tool::Line);
        session.handle(&mut grid, InputEvent::press(Point::new(2, 2)));
        session.handle(&mut grid, InputEvent::drag(Point::new(6, 2)));
        // a stray second press must not reset the anchors
        session.handle(&mut grid, InputEvent::press(Point::new(9, 9)));
        assert_eq!(session.anchors(), (Point::new(2, 2), Point::new(6, 2)));
    }
}
