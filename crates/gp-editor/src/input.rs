//! Input abstraction layer.
//!
//! Normalizes pointer events into a unified `InputEvent` enum consumed by
//! the session. Coordinate resolution (screen position → grid cell) is the
//! embedder's job; events arrive already carrying the cell under the
//! cursor.

use gp_core::Point;
use serde::{Deserialize, Serialize};

/// Which pointer button is pressed. Selects the primary or secondary brush
/// color for the session that the press opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// A normalized pointer event over the drawing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer pressed on a cell.
    PointerDown { cell: Point, button: PointerButton },

    /// Pointer moved to a new cell. `held` is whether a button is still
    /// down; moves without it only update hover state, which the core
    /// ignores.
    PointerMove { cell: Point, held: bool },

    /// Pointer released.
    PointerUp { cell: Point },
}

impl InputEvent {
    /// Primary-button press.
    pub fn press(cell: Point) -> Self {
        Self::PointerDown {
            cell,
            button: PointerButton::Primary,
        }
    }

    /// Move with the button held.
    pub fn drag(cell: Point) -> Self {
        Self::PointerMove { cell, held: true }
    }

    pub fn release(cell: Point) -> Self {
        Self::PointerUp { cell }
    }

    /// The cell this event happened on.
    pub fn cell(&self) -> Point {
        match self {
            Self::PointerDown { cell, .. }
            | Self::PointerMove { cell, .. }
            | Self::PointerUp { cell } => *cell,
        }
    }
}
