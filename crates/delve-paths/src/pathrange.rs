use delve_core::{Point, Range};

use crate::astar::SearchCell;

/// A reached cell and its step count from the nearest source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// Distance of a cell no search has reached.
pub const UNREACHABLE: i32 = i32::MAX;

/// Reusable search state for one floor.
///
/// An agent that replans every turn hands the same `PathRange` each new
/// [`WalkMask`] snapshot; after the first query on a floor no search
/// allocates. The range itself holds no terrain.
///
/// [`WalkMask`]: crate::WalkMask
pub struct PathRange {
    pub(crate) bounds: Range,
    pub(crate) stride: usize,
    pub(crate) search: Vec<SearchCell>,
    /// Bumped per A* query so `search` never needs clearing.
    pub(crate) stamp: u32,
    pub(crate) dist: Vec<i32>,
    pub(crate) reached: Vec<PathNode>,
    pub(crate) seen: Vec<bool>,
    pub(crate) stack: Vec<usize>,
    pub(crate) scratch: Vec<Point>,
}

impl PathRange {
    pub fn new(bounds: Range) -> Self {
        let cells = bounds.len();
        Self {
            bounds,
            stride: bounds.width().max(0) as usize,
            search: vec![SearchCell::default(); cells],
            stamp: 0,
            dist: vec![UNREACHABLE; cells],
            reached: Vec::new(),
            seen: vec![false; cells],
            stack: Vec::new(),
            scratch: Vec::with_capacity(4),
        }
    }

    /// Move to another floor's bounds. Buffers only grow; a floor that fits
    /// in the old allocation just invalidates the previous A* state.
    pub fn set_range(&mut self, bounds: Range) {
        let cells = bounds.len();
        self.bounds = bounds;
        self.stride = bounds.width().max(0) as usize;
        self.reached.clear();
        self.stack.clear();

        if cells > self.search.len() {
            self.search = vec![SearchCell::default(); cells];
            self.stamp = 0;
            self.dist = vec![UNREACHABLE; cells];
            self.seen = vec![false; cells];
        } else {
            self.stamp = self.stamp.wrapping_add(1);
        }
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.bounds.contains(p).then(|| {
            let q = p - self.bounds.min;
            q.y as usize * self.stride + q.x as usize
        })
    }

    #[inline]
    pub(crate) fn point(&self, i: usize) -> Point {
        self.bounds.min + Point::new((i % self.stride) as i32, (i / self.stride) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_floor_smaller_keeps_buffers() {
        let mut pr = PathRange::new(Range::new(0, 0, 60, 40));
        let stamp = pr.stamp;

        let cave = Range::new(0, 0, 30, 20);
        pr.set_range(cave);
        assert_eq!(pr.range(), cave);
        assert_eq!(pr.search.len(), 2400);
        assert_eq!(pr.stride, 30);
        assert_ne!(pr.stamp, stamp);
    }

    #[test]
    fn next_floor_larger_grows_buffers() {
        let mut pr = PathRange::new(Range::new(0, 0, 16, 16));
        pr.set_range(Range::new(0, 0, 60, 40));
        assert_eq!(pr.search.len(), 2400);
        assert_eq!(pr.dist.len(), 2400);
        assert_eq!(pr.seen.len(), 2400);
        assert_eq!(pr.stride, 60);
    }

    #[test]
    fn offset_bounds_index_round_trip() {
        let pr = PathRange::new(Range::new(3, 4, 13, 9));
        for p in pr.range() {
            let i = pr.idx(p).unwrap();
            assert_eq!(pr.point(i), p);
        }
        assert_eq!(pr.idx(Point::new(2, 4)), None);
        assert_eq!(pr.idx(Point::new(13, 8)), None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_node_json() {
        let node = PathNode {
            pos: Point::new(3, 7),
            cost: 42,
        };
        let json = serde_json::to_string(&node).unwrap();
        let back: PathNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
