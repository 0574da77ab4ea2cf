//! Field of view.
//!
//! Visibility is computed by casting one Bresenham ray from the observer to
//! every cell inside a circle of the given radius. A ray is blocked by any
//! opaque cell strictly between its endpoints, so walls themselves are seen
//! but nothing collinear behind them is.
//!
//! Each pass clears the `visible` flag of every tile and sets `visible` and
//! `explored` on the cells it reaches. `explored` is never cleared here.

use delve_core::{Point, Range};
use log::warn;

use crate::grid::TileGrid;

/// Default sight radius before biome modifiers.
pub const VISIBILITY_RADIUS: i32 = 8;

/// Iterator over the cells of a Bresenham line, both endpoints included.
#[derive(Debug, Clone)]
pub struct Line {
    cur: Point,
    to: Point,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl Line {
    pub fn new(from: Point, to: Point) -> Self {
        let dx = (to.x - from.x).abs();
        let dy = (to.y - from.y).abs();
        Self {
            cur: from,
            to,
            dx,
            dy,
            sx: if from.x < to.x { 1 } else { -1 },
            sy: if from.y < to.y { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let p = self.cur;
        if p == self.to {
            self.done = true;
            return Some(p);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.cur.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.cur.y += self.sy;
        }
        Some(p)
    }
}

/// Whether `to` can be seen from `from`.
///
/// Only cells strictly between the endpoints are tested; they block when
/// they are inside the grid and opaque.
pub fn los(grid: &TileGrid, from: Point, to: Point) -> bool {
    Line::new(from, to)
        .skip(1)
        .take_while(|&p| p != to)
        .all(|p| !grid.contains(p) || grid.is_transparent(p))
}

/// Field of view for one observer.
///
/// Keeps the last visible set so callers can query membership without
/// scanning the grid.
#[derive(Debug, Clone)]
pub struct FOV {
    range: Range,
    lit: Vec<bool>,
    visibles: Vec<Point>,
    observer: Point,
}

impl FOV {
    /// Create a new FOV for the given range.
    pub fn new(range: Range) -> Self {
        Self {
            range,
            lit: vec![false; range.len()],
            visibles: Vec::new(),
            observer: range.min,
        }
    }

    /// Return the current range.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Observer position used by the last pass, after clamping.
    pub fn observer(&self) -> Point {
        self.observer
    }

    fn set_range(&mut self, range: Range) {
        self.range = range;
        self.lit.clear();
        self.lit.resize(range.len(), false);
    }

    fn idx(&self, p: Point) -> usize {
        let q = p - self.range.min;
        (q.y * self.range.width() + q.x) as usize
    }

    /// Recompute visibility from `observer` and update the grid's flags.
    ///
    /// An observer outside the grid is clamped to the nearest cell. The
    /// returned list holds the observer first, then every other visible cell
    /// in row-major order. A negative radius behaves like 0 and any radius
    /// wider than the grid behaves like one that covers it.
    pub fn compute(&mut self, grid: &mut TileGrid, observer: Point, radius: i32) -> &[Point] {
        let bounds = grid.bounds();
        if self.range != bounds {
            self.set_range(bounds);
        }

        let obs = bounds.clamp(observer);
        if obs != observer {
            warn!("observer {observer} outside {bounds}, clamped to {obs}");
        }
        self.observer = obs;

        for (_, t) in grid.iter_mut() {
            t.visible = false;
        }
        self.lit.fill(false);
        self.visibles.clear();
        self.mark(grid, obs);

        // No cell is farther than width + height from the observer.
        let r = radius.clamp(0, bounds.width() + bounds.height());
        let r_sq = i64::from(r) * i64::from(r);
        let scan = Range::new(obs.x - r, obs.y - r, obs.x + r + 1, obs.y + r + 1).intersect(bounds);
        for p in scan {
            if p == obs {
                continue;
            }
            let d = p - obs;
            let dist_sq = i64::from(d.x) * i64::from(d.x) + i64::from(d.y) * i64::from(d.y);
            if dist_sq > r_sq {
                continue;
            }
            if los(grid, obs, p) {
                self.mark(grid, p);
            }
        }
        &self.visibles
    }

    fn mark(&mut self, grid: &mut TileGrid, p: Point) {
        if let Some(t) = grid.at_mut(p) {
            t.visible = true;
            t.explored = true;
        }
        let i = self.idx(p);
        self.lit[i] = true;
        self.visibles.push(p);
    }

    /// Whether `p` was visible in the last pass.
    pub fn visible(&self, p: Point) -> bool {
        self.range.contains(p) && self.lit[self.idx(p)]
    }

    /// Iterate over the points visible in the last pass.
    pub fn iter_visible(&self) -> impl Iterator<Item = Point> + '_ {
        self.visibles.iter().copied()
    }
}

/// One-shot visibility pass. See [`FOV::compute`].
pub fn compute_visible(grid: &mut TileGrid, observer: Point, radius: i32) -> Vec<Point> {
    FOV::new(grid.bounds()).compute(grid, observer, radius).to_vec()
}
