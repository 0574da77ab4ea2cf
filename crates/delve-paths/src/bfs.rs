use std::collections::VecDeque;

use delve_core::Point;

use crate::PathRange;
use crate::pathrange::{PathNode, UNREACHABLE};
use crate::traits::Pather;

impl PathRange {
    /// Compute a multi-source breadth-first distance map.
    ///
    /// Each step costs 1; cells farther than `max_dist` are left unreached.
    /// Returns every reached node in visiting order. On a uniform-cost grid
    /// these distances are the exact shortest path lengths, which makes
    /// this the reference that A* results are checked against.
    pub fn bfs_map<P: Pather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_dist: i32,
    ) -> &[PathNode] {
        self.dist.fill(UNREACHABLE);
        self.reached.clear();

        let mut queue: VecDeque<usize> = VecDeque::new();

        for &src in sources {
            let Some(si) = self.idx(src) else {
                continue;
            };
            if self.dist[si] != UNREACHABLE {
                continue;
            }
            self.dist[si] = 0;
            queue.push_back(si);
            self.reached.push(PathNode { pos: src, cost: 0 });
        }

        let mut nbrs = std::mem::take(&mut self.scratch);

        while let Some(ci) = queue.pop_front() {
            let nd = self.dist[ci] + 1;
            if nd > max_dist {
                continue;
            }
            let cp = self.point(ci);

            nbrs.clear();
            pather.neighbors(cp, &mut nbrs);

            for &np in nbrs.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.dist[ni] != UNREACHABLE {
                    continue;
                }
                self.dist[ni] = nd;
                queue.push_back(ni);
                self.reached.push(PathNode { pos: np, cost: nd });
            }
        }

        self.scratch = nbrs;
        &self.reached
    }

    /// Distance of `p` in the last [`bfs_map`](Self::bfs_map), or
    /// [`UNREACHABLE`] if it was not reached or lies outside the range.
    pub fn bfs_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.dist[i],
            None => UNREACHABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WalkMask;
    use delve_core::Range;

    #[test]
    fn distances_grow_by_one() {
        let mask = WalkMask::from_fn(Range::new(0, 0, 6, 1), |_| true);
        let mut pr = PathRange::new(mask.range());
        pr.bfs_map(&mask, &[Point::new(0, 0)], i32::MAX);
        for x in 0..6 {
            assert_eq!(pr.bfs_at(Point::new(x, 0)), x);
        }
    }

    #[test]
    fn max_dist_limits_expansion() {
        let mask = WalkMask::from_fn(Range::new(0, 0, 10, 10), |_| true);
        let mut pr = PathRange::new(mask.range());
        let reached = pr.bfs_map(&mask, &[Point::new(5, 5)], 2).len();
        // Diamond of radius 2: 1 + 4 + 8.
        assert_eq!(reached, 13);
        assert_eq!(pr.bfs_at(Point::new(5, 8)), UNREACHABLE);
    }

    #[test]
    fn blocked_cells_are_unreached() {
        let wall = Point::new(1, 0);
        let mask = WalkMask::from_fn(Range::new(0, 0, 3, 1), |p| p != wall);
        let mut pr = PathRange::new(mask.range());
        pr.bfs_map(&mask, &[Point::new(0, 0)], i32::MAX);
        assert_eq!(pr.bfs_at(Point::new(2, 0)), UNREACHABLE);
        assert_eq!(pr.bfs_at(Point::new(-1, 0)), UNREACHABLE);
    }
}
