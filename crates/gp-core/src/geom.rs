//! Figure rasterization: anchor points → grid cells.
//!
//! Pure arithmetic over integer cell coordinates. Every function here is
//! bounds-agnostic; callers clip the returned cells against their surface.
//! Rounding is `f64::round` (half away from zero) throughout, so the same
//! anchors always produce the same cells.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// An integer cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by a relative offset. May leave the grid; callers that
    /// care run the result through a bounds check.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cells approximating the straight segment from `p1` to `p2`, both
/// endpoints included, ordered from `p1` to `p2`.
///
/// Steps one cell at a time along the axis with the greater absolute delta
/// (the major axis) and rounds the minor coordinate from the slope/intercept
/// form of the line, so each major-axis value appears exactly once and the
/// result is duplicate-free by construction.
pub fn line_cells(p1: Point, p2: Point) -> Vec<Point> {
    if p1 == p2 {
        return vec![p1];
    }

    let x_major = (p1.x - p2.x).abs() >= (p1.y - p2.y).abs();
    let (t1, s1, t2, s2) = if x_major {
        (p1.x, p1.y, p2.x, p2.y)
    } else {
        (p1.y, p1.x, p2.y, p2.x)
    };

    // s = m·t + b along the major axis
    let m = f64::from(s2 - s1) / f64::from(t2 - t1);
    let b = f64::from(s1) - m * f64::from(t1);

    let mut cells = vec![p1];
    let step = if t1 <= t2 { 1 } else { -1 };
    let mut t = t1 + step;
    while t != t2 {
        let s = (m * f64::from(t) + b).round() as i32;
        cells.push(if x_major {
            Point::new(t, s)
        } else {
            Point::new(s, t)
        });
        t += step;
    }
    cells.push(p2);
    cells
}

/// Border cells of the axis-aligned rectangle with opposite corners `p1`,
/// `p2`. Only defined for non-degenerate boxes; callers route anchors that
/// share an axis to [`line_cells`] instead.
pub fn rectangle_cells(p1: Point, p2: Point) -> Vec<Point> {
    debug_assert!(
        p1.x != p2.x && p1.y != p2.y,
        "degenerate box {p1}..{p2} must be drawn as a line"
    );

    let top = line_cells(Point::new(p1.x, p1.y), Point::new(p2.x, p1.y));
    let bottom = line_cells(Point::new(p2.x, p2.y), Point::new(p1.x, p2.y));
    let left = line_cells(Point::new(p1.x, p1.y), Point::new(p1.x, p2.y));
    let right = line_cells(Point::new(p2.x, p2.y), Point::new(p2.x, p1.y));

    let mut cells = top;
    cells.extend(bottom);
    // The horizontal runs own the corner cells; slice them off both
    // vertical runs so no cell appears twice.
    cells.extend_from_slice(&left[1..left.len() - 1]);
    cells.extend_from_slice(&right[1..right.len() - 1]);
    cells
}

/// Outline cells of the ellipse inscribed in the bounding box of `p1`,
/// `p2`. Only defined for boxes with nonzero extent on both axes; the
/// zero-radius case divides by zero and callers must route it to
/// [`line_cells`].
///
/// Two passes: the x-pass solves for both y roots at every column, then a
/// symmetric y-pass fills the gaps the column sweep leaves near the poles,
/// where the outline is locally vertical. Cells already emitted by the
/// first pass are suppressed.
pub fn ellipse_cells(p1: Point, p2: Point) -> Vec<Point> {
    debug_assert!(
        p1.x != p2.x && p1.y != p2.y,
        "zero-radius ellipse {p1}..{p2} must be drawn as a line"
    );

    // (x-h)²/a² + (y-k)²/b² = 1
    let h = f64::from(p1.x + p2.x) / 2.0;
    let k = f64::from(p1.y + p2.y) / 2.0;
    let a = f64::from((p1.x - p2.x).abs()) / 2.0;
    let b = f64::from((p1.y - p2.y).abs()) / 2.0;

    let mut cells = Vec::new();
    let mut seen = HashSet::new();

    let x_step = if p1.x <= p2.x { 1 } else { -1 };
    let mut x = p1.x;
    loop {
        let dy = b * (1.0 - (f64::from(x) - h).powi(2) / (a * a)).sqrt();
        for y in [(k + dy).round() as i32, (k - dy).round() as i32] {
            let cell = Point::new(x, y);
            if seen.insert(cell) {
                cells.push(cell);
            }
        }
        if x == p2.x {
            break;
        }
        x += x_step;
    }

    let y_step = if p1.y <= p2.y { 1 } else { -1 };
    let mut y = p1.y;
    loop {
        let dx = a * (1.0 - (f64::from(y) - k).powi(2) / (b * b)).sqrt();
        for x in [(h + dx).round() as i32, (h - dx).round() as i32] {
            let cell = Point::new(x, y);
            if seen.insert(cell) {
                cells.push(cell);
            }
        }
        if y == p2.y {
            break;
        }
        y += y_step;
    }

    cells
}
