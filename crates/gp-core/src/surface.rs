//! The paintable surface: bounds-checked cell access.
//!
//! The editor layer only ever talks to the [`Surface`] trait, so a renderer
//! (DOM grid, terminal, texture upload) can sit behind it. [`PixelGrid`] is
//! the owned in-memory implementation used by tests and headless embedders.

use crate::color::Color;
use crate::geom::Point;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("cell {cell} is outside the {width}x{height} surface")]
    OutOfBounds { cell: Point, width: u32, height: u32 },
}

/// A fixed-size grid of colored cells.
///
/// Both accessors fail with [`SurfaceError::OutOfBounds`] for cells outside
/// `[0, width) × [0, height)`. The session layer bounds-checks before every
/// write, so a conforming implementation never sees out-of-range traffic
/// from it.
pub trait Surface {
    /// `(width, height)` in cells.
    fn dimensions(&self) -> (u32, u32);

    fn get(&self, cell: Point) -> Result<Color, SurfaceError>;

    fn set(&mut self, cell: Point, color: Color) -> Result<(), SurfaceError>;

    fn in_bounds(&self, cell: Point) -> bool {
        let (width, height) = self.dimensions();
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < width && (cell.y as u32) < height
    }
}

/// Row-major in-memory surface.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    cells: Vec<Color>,
}

impl PixelGrid {
    /// A `width × height` grid uniformly filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        log::trace!("new {width}x{height} pixel grid");
        Self {
            width,
            height,
            cells: vec![background; (width * height) as usize],
        }
    }

    fn index(&self, cell: Point) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    fn oob(&self, cell: Point) -> SurfaceError {
        SurfaceError::OutOfBounds {
            cell,
            width: self.width,
            height: self.height,
        }
    }
}

impl Surface for PixelGrid {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn get(&self, cell: Point) -> Result<Color, SurfaceError> {
        let idx = self.index(cell).ok_or_else(|| self.oob(cell))?;
        Ok(self.cells[idx])
    }

    fn set(&mut self, cell: Point, color: Color) -> Result<(), SurfaceError> {
        let idx = self.index(cell).ok_or_else(|| self.oob(cell))?;
        self.cells[idx] = color;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn get_set_roundtrip() {
        let mut grid = PixelGrid::new(8, 6, Color::WHITE);
        let cell = Point::new(3, 4);
        assert_eq!(grid.get(cell), Ok(Color::WHITE));
        grid.set(cell, Color::BLACK).unwrap();
        assert_eq!(grid.get(cell), Ok(Color::BLACK));
    }

    #[test]
    fn out_of_bounds_rejected() {
        let mut grid = PixelGrid::new(4, 4, Color::WHITE);
        for cell in [
            Point::new(-1, 0),
            Point::new(0, -1),
            Point::new(4, 0),
            Point::new(0, 4),
        ] {
            assert!(grid.get(cell).is_err(), "get {cell} should fail");
            assert!(grid.set(cell, Color::BLACK).is_err(), "set {cell} should fail");
        }
    }

    #[test]
    fn in_bounds_matches_dimensions() {
        let grid = PixelGrid::new(5, 3, Color::WHITE);
        assert!(grid.in_bounds(Point::new(0, 0)));
        assert!(grid.in_bounds(Point::new(4, 2)));
        assert!(!grid.in_bounds(Point::new(5, 2)));
        assert!(!grid.in_bounds(Point::new(4, 3)));
    }
}
