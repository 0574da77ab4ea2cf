//! Boolean walkability snapshots and the agent-facing path query.

use delve_core::{Point, Range};

use crate::PathRange;
use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// A transient per-query grid of cells an agent may enter.
///
/// Built fresh for each planning call from static terrain plus the cells
/// other agents currently occupy, then discarded. The mask is never written
/// during a search, so one snapshot can be shared read-only by any number
/// of concurrent searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkMask {
    range: Range,
    cells: Vec<bool>,
}

impl WalkMask {
    /// Create a mask over `range` where every cell is blocked.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    pub fn new(range: Range) -> Self {
        assert!(!range.is_empty(), "walk mask over empty range {range}");
        Self {
            range,
            cells: vec![false; range.len()],
        }
    }

    /// Create a mask by asking `walkable` about every cell of `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` is empty.
    pub fn from_fn(range: Range, mut walkable: impl FnMut(Point) -> bool) -> Self {
        let mut mask = Self::new(range);
        for (i, p) in range.iter().enumerate() {
            mask.cells[i] = walkable(p);
        }
        mask
    }

    /// The rectangle this mask covers.
    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if !self.range.contains(p) {
            return None;
        }
        let w = self.range.width() as usize;
        let x = (p.x - self.range.min.x) as usize;
        let y = (p.y - self.range.min.y) as usize;
        Some(y * w + x)
    }

    /// Whether `p` may be entered. Cells outside the mask never can.
    #[inline]
    pub fn walkable(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.cells[i])
    }

    /// Set a single cell. Out-of-range points are ignored.
    pub fn set_walkable(&mut self, p: Point, walkable: bool) {
        if let Some(i) = self.idx(p) {
            self.cells[i] = walkable;
        }
    }

    /// Block every occupied cell except `start`, the planning agent's own
    /// position.
    pub fn block_occupied(&mut self, occupied: impl IntoIterator<Item = Point>, start: Point) {
        for p in occupied {
            if p != start {
                self.set_walkable(p, false);
            }
        }
    }
}

impl Pather for WalkMask {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.walkable(n) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for WalkMask {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for WalkMask {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl PathRange {
    /// Shortest 4-directional path over `mask`, start and goal inclusive.
    ///
    /// An empty result means "no path": either endpoint is outside the
    /// mask, the goal is not walkable, or nothing connects them. When
    /// `start == goal` the path is just `[start]`. The start cell itself is
    /// never checked for walkability.
    pub fn find_path(&mut self, mask: &WalkMask, start: Point, goal: Point) -> Vec<Point> {
        let range = mask.range();
        if !range.contains(start) || !range.contains(goal) {
            return Vec::new();
        }
        if start == goal {
            return vec![start];
        }
        if !mask.walkable(goal) {
            return Vec::new();
        }
        if self.range() != range {
            self.set_range(range);
        }
        self.astar_path(mask, start, goal).unwrap_or_default()
    }
}

/// One-shot version of [`PathRange::find_path`] that allocates its own
/// caches. Agents replanning every tick should keep a [`PathRange`] instead.
pub fn find_path(mask: &WalkMask, start: Point, goal: Point) -> Vec<Point> {
    PathRange::new(mask.range()).find_path(mask, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    /// Two 3×3 rooms in opposite corners of a 10×10 map, joined by an
    /// L-shaped corridor along y=1 then x=8.
    fn corner_rooms() -> WalkMask {
        WalkMask::from_fn(Range::new(0, 0, 10, 10), |p| {
            let room_a = p.x <= 2 && p.y <= 2;
            let room_b = p.x >= 7 && p.y >= 7;
            let corridor = (p.y == 1 && p.x <= 8) || (p.x == 8 && p.y >= 1);
            room_a || room_b || corridor
        })
    }

    #[test]
    fn corner_rooms_path_is_manhattan_length() {
        let mask = corner_rooms();
        let path = find_path(&mask, Point::new(1, 1), Point::new(8, 8));
        assert_eq!(path.len(), 15);
        assert_eq!(path.first(), Some(&Point::new(1, 1)));
        assert_eq!(path.last(), Some(&Point::new(8, 8)));
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1);
            assert!(mask.walkable(w[1]));
        }
    }

    #[test]
    fn start_equals_goal() {
        let mask = corner_rooms();
        let p = Point::new(1, 1);
        assert_eq!(find_path(&mask, p, p), vec![p]);
    }

    #[test]
    fn out_of_bounds_endpoints() {
        let mask = corner_rooms();
        assert!(find_path(&mask, Point::new(-1, 1), Point::new(8, 8)).is_empty());
        assert!(find_path(&mask, Point::new(1, 1), Point::new(10, 8)).is_empty());
    }

    #[test]
    fn unwalkable_goal() {
        let mask = corner_rooms();
        assert!(find_path(&mask, Point::new(1, 1), Point::new(5, 5)).is_empty());
    }

    #[test]
    fn goal_enclosed_by_walls() {
        let mut mask = WalkMask::from_fn(Range::new(0, 0, 7, 7), |_| true);
        let goal = Point::new(3, 3);
        for n in goal.neighbors_4() {
            mask.set_walkable(n, false);
        }
        assert!(find_path(&mask, Point::new(0, 0), goal).is_empty());
    }

    #[test]
    fn occupied_cells_block_except_start() {
        let mut mask = WalkMask::from_fn(Range::new(0, 0, 5, 1), |_| true);
        let start = Point::new(0, 0);
        mask.block_occupied([start, Point::new(2, 0)], start);
        assert!(mask.walkable(start));
        assert!(!mask.walkable(Point::new(2, 0)));
        assert!(find_path(&mask, start, Point::new(4, 0)).is_empty());
    }

    #[test]
    fn reused_range_adapts_to_new_mask() {
        let mut pr = PathRange::new(Range::new(0, 0, 3, 3));
        let mask = corner_rooms();
        let path = pr.find_path(&mask, Point::new(1, 1), Point::new(8, 8));
        assert_eq!(path.len(), 15);
        assert_eq!(pr.range(), mask.range());
    }

    #[test]
    fn astar_matches_bfs_on_random_masks() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let range = Range::new(0, 0, 8, 8);
            let mask = WalkMask::from_fn(range, |_| rng.random_bool(0.7));
            let start = Point::new(rng.random_range(0..8), rng.random_range(0..8));
            let goal = Point::new(rng.random_range(0..8), rng.random_range(0..8));

            let mut pr = PathRange::new(range);
            let path = pr.find_path(&mask, start, goal);

            pr.bfs_map(&mask, &[start], i32::MAX);
            let shortest = pr.bfs_at(goal);

            if start == goal {
                assert_eq!(path, vec![start]);
            } else if !mask.walkable(goal) || shortest == crate::UNREACHABLE {
                assert!(path.is_empty());
            } else {
                assert_eq!(path.len() as i32 - 1, shortest, "{start} -> {goal}");
            }
        }
    }

    #[test]
    #[should_panic]
    fn empty_mask_panics() {
        let _ = WalkMask::new(Range::new(0, 0, 0, 4));
    }
}
