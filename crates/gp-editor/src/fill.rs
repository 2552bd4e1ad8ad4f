//! Region fill.
//!
//! The session treats filling as a black box: one press hands the seed
//! cell to a [`FillEngine`], which repaints a region and reports every
//! changed cell with its prior color. [`FloodFill`] is the default engine;
//! embedders with fancier semantics (tolerance, pattern fills) implement
//! the trait themselves.

use gp_core::{Color, Point, Surface};
use std::collections::{HashSet, VecDeque};

/// A region-fill strategy invoked once per fill-tool press.
pub trait FillEngine {
    /// Repaint the region connected to `seed` with `color`, returning each
    /// changed cell paired with the color it held before. An empty result
    /// means nothing changed and nothing will be committed.
    fn fill(
        &mut self,
        surface: &mut dyn Surface,
        seed: Point,
        color: Color,
    ) -> Vec<(Point, Color)>;
}

/// 4-connected flood fill over cells matching the seed's color exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloodFill;

impl FillEngine for FloodFill {
    fn fill(
        &mut self,
        surface: &mut dyn Surface,
        seed: Point,
        color: Color,
    ) -> Vec<(Point, Color)> {
        let Ok(target) = surface.get(seed) else {
            return Vec::new();
        };
        // region already has the fill color; recoloring it would record a
        // do-nothing undo entry
        if target == color {
            return Vec::new();
        }

        let mut changed = Vec::new();
        let mut queued: HashSet<Point> = HashSet::from([seed]);
        let mut frontier = VecDeque::from([seed]);

        while let Some(cell) = frontier.pop_front() {
            if surface.get(cell) != Ok(target) {
                continue;
            }
            let _ = surface.set(cell, color);
            changed.push((cell, target));

            for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
                let next = cell.offset(dx, dy);
                if surface.in_bounds(next) && queued.insert(next) {
                    frontier.push_back(next);
                }
            }
        }

        log::debug!("flood fill from {seed}: {} cells", changed.len());
        changed
    }
}
