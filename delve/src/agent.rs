//! Agents that chase a goal with A* once it comes within reach, and
//! shuffle about at random otherwise.

use std::collections::VecDeque;

use delve_core::Point;
use delve_paths::{PathRange, euclidean_sq, manhattan};
use delve_rl::TileGrid;
use rand::{Rng, RngExt};

/// Euclidean distance within which an agent notices its goal.
pub const AGGRO_RANGE: i32 = 10;

/// A non-player walker with a cached route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub pos: Point,
    path: VecDeque<Point>,
}

impl Agent {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            path: VecDeque::new(),
        }
    }

    /// Remaining steps, next step first.
    pub fn path(&self) -> impl Iterator<Item = Point> + '_ {
        self.path.iter().copied()
    }

    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Whether `goal` is within [`AGGRO_RANGE`].
    pub fn in_range(&self, goal: Point) -> bool {
        let r = i64::from(AGGRO_RANGE);
        euclidean_sq(self.pos, goal) <= r * r
    }

    /// Drop any route and take one step in a random cardinal direction,
    /// trying the others in turn when the first is a wall or in `blocked`.
    /// Returns whether the agent moved.
    pub fn wander<R: Rng>(&mut self, grid: &TileGrid, blocked: &[Point], rng: &mut R) -> bool {
        self.path.clear();
        let dirs = self.pos.neighbors_4();
        let first = rng.random_range(0..dirs.len());
        for i in 0..dirs.len() {
            let to = dirs[(first + i) % dirs.len()];
            if grid.is_walkable(to) && !blocked.contains(&to) {
                self.pos = to;
                return true;
            }
        }
        false
    }

    /// Plan a route to `goal` around walls and the cells in `others`.
    ///
    /// Agents already next to the goal do not plan. Returns whether a route
    /// was found; the agent's own cell is not part of it.
    pub fn plan(
        &mut self,
        pr: &mut PathRange,
        grid: &TileGrid,
        others: &[Point],
        goal: Point,
    ) -> bool {
        self.path.clear();
        if manhattan(self.pos, goal) <= 1 {
            return false;
        }
        let mask = grid.walk_mask(others.iter().copied(), self.pos);
        self.path.extend(pr.find_path(&mask, self.pos, goal).into_iter().skip(1));
        self.has_path()
    }

    /// Take the next step of the route if the cell is still walkable and
    /// not in `blocked`. Otherwise the route is dropped so the caller can
    /// replan. Returns whether the agent moved.
    pub fn advance(&mut self, grid: &TileGrid, blocked: &[Point]) -> bool {
        let Some(&next) = self.path.front() else {
            return false;
        };
        if !grid.is_walkable(next) || blocked.contains(&next) || manhattan(self.pos, next) != 1 {
            self.path.clear();
            return false;
        }
        self.path.pop_front();
        self.pos = next;
        true
    }
}
