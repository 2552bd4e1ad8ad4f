//! Resize handles: the 9-cell clusters around a figure's anchors.
//!
//! Each anchor of the last-drawn figure gets a cluster of handle records
//! (the anchor cell itself plus its 8 neighbors) that act as the hit
//! targets for grabbing a resize. Handles are plain values bound to grid
//! cells; a renderer reads them off the session after each event and draws
//! them however it likes, using the border decoration to present the
//! cluster as one square split across 9 cells.

use gp_core::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Which end of the figure a handle (or a resize drag) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Start,
    End,
}

/// A border side of a handle cell that the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Relative cell offsets of a cluster: the center, then the 8 neighbors
/// clockwise from north.
const OFFSETS: [(i32, i32); 9] = [
    (0, 0),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Border decoration per offset. The center cell has none; each outer cell
/// draws the 1–2 sides needed to close the cluster's outline.
const BORDERS: [&[Side]; 9] = [
    &[],
    &[Side::Top],
    &[Side::Top, Side::Right],
    &[Side::Right],
    &[Side::Right, Side::Bottom],
    &[Side::Bottom],
    &[Side::Bottom, Side::Left],
    &[Side::Left],
    &[Side::Left, Side::Top],
];

/// One resize hit target, bound to a concrete grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle {
    pub cell: Point,
    pub borders: &'static [Side],
    pub anchor: Anchor,
}

/// The live handle clusters for both anchors. Empty when no resizable
/// figure exists.
#[derive(Debug, Default)]
pub struct HandleSet {
    start: SmallVec<[Handle; 9]>,
    end: SmallVec<[Handle; 9]>,
}

fn cluster(anchor_cell: Point, which: Anchor, dims: (u32, u32)) -> SmallVec<[Handle; 9]> {
    let (width, height) = dims;
    let mut handles = SmallVec::new();
    for (i, &(dx, dy)) in OFFSETS.iter().enumerate() {
        let cell = anchor_cell.offset(dx, dy);
        // cells past the grid edge get no handle, so a cluster near a
        // corner may hold as few as 4
        if cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < width && (cell.y as u32) < height {
            handles.push(Handle {
                cell,
                borders: BORDERS[i],
                anchor: which,
            });
        }
    }
    handles
}

impl HandleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the cluster for `which` around `anchor_cell`, replacing any
    /// previous cluster for that anchor.
    pub fn place(&mut self, anchor_cell: Point, which: Anchor, dims: (u32, u32)) {
        *self.cluster_mut(which) = cluster(anchor_cell, which, dims);
    }

    /// Relocate the cluster for `which` to a new anchor cell. All 9
    /// offsets are recomputed, so a cluster clipped at an edge grows back
    /// when the anchor moves inward.
    pub fn move_to(&mut self, which: Anchor, new_anchor_cell: Point, dims: (u32, u32)) {
        self.place(new_anchor_cell, which, dims);
    }

    /// Drop every handle for both anchors.
    pub fn clear(&mut self) {
        self.start.clear();
        self.end.clear();
    }

    /// The anchor whose cluster covers `cell`, if any. When the two
    /// clusters overlap, `Start` wins.
    pub fn hit(&self, cell: Point) -> Option<Anchor> {
        if self.start.iter().any(|h| h.cell == cell) {
            Some(Anchor::Start)
        } else if self.end.iter().any(|h| h.cell == cell) {
            Some(Anchor::End)
        } else {
            None
        }
    }

    /// The live handles for one anchor.
    pub fn handles(&self, which: Anchor) -> &[Handle] {
        match which {
            Anchor::Start => &self.start,
            Anchor::End => &self.end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    fn cluster_mut(&mut self, which: Anchor) -> &mut SmallVec<[Handle; 9]> {
        match which {
            Anchor::Start => &mut self.start,
            Anchor::End => &mut self.end,
        }
    }
}
