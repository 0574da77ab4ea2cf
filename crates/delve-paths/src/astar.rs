use std::cmp::Ordering;
use std::collections::BinaryHeap;

use delve_core::Point;

use crate::PathRange;
use crate::traits::AstarPather;

/// Per-cell A* bookkeeping, valid only while `stamp` matches the range's.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SearchCell {
    cost: i32,
    parent: Option<usize>,
    stamp: u32,
    closed: bool,
}

/// Frontier entry. The heap pops the lowest `f` first and, among equal
/// `f`, the earliest push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    f: i32,
    seq: u64,
    idx: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PathRange {
    /// Shortest route from `from` to `to`, both included, or `None` when
    /// `to` cannot be reached inside the range.
    ///
    /// A cell improved after it was pushed is pushed again; the older
    /// entry is dropped when it surfaces.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start = self.idx(from)?;
        let goal = self.idx(to)?;
        if start == goal {
            return Some(vec![from]);
        }

        self.stamp = self.stamp.wrapping_add(1);
        let stamp = self.stamp;
        self.search[start] = SearchCell {
            cost: 0,
            parent: None,
            stamp,
            closed: false,
        };

        let mut seq = 0;
        let mut frontier = BinaryHeap::new();
        frontier.push(Frontier {
            f: pather.estimate(from, to),
            seq,
            idx: start,
        });
        let mut nbrs = std::mem::take(&mut self.scratch);
        let mut found = false;

        while let Some(Frontier { idx, .. }) = frontier.pop() {
            let cell = self.search[idx];
            if cell.stamp != stamp || cell.closed {
                continue;
            }
            if idx == goal {
                found = true;
                break;
            }
            self.search[idx].closed = true;

            let here = self.point(idx);
            nbrs.clear();
            pather.neighbors(here, &mut nbrs);
            for &next in &nbrs {
                let Some(ni) = self.idx(next) else {
                    continue;
                };
                let cost = cell.cost + pather.cost(here, next);
                let seen = self.search[ni];
                if seen.stamp == stamp && seen.cost <= cost {
                    continue;
                }
                self.search[ni] = SearchCell {
                    cost,
                    parent: Some(idx),
                    stamp,
                    closed: false,
                };
                seq += 1;
                frontier.push(Frontier {
                    f: cost + pather.estimate(next, to),
                    seq,
                    idx: ni,
                });
            }
        }
        self.scratch = nbrs;

        if !found {
            return None;
        }
        let mut path: Vec<Point> = std::iter::successors(Some(goal), |&i| self.search[i].parent)
            .map(|i| self.point(i))
            .collect();
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pather, WalkMask, WeightedPather, manhattan};
    use delve_core::Range;

    /// Open floor where wading through `water` cells costs 5 steps.
    struct Marsh {
        range: Range,
        water: Vec<Point>,
    }

    impl Pather for Marsh {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            buf.extend(p.neighbors_4().into_iter().filter(|&n| self.range.contains(n)));
        }
    }

    impl WeightedPather for Marsh {
        fn cost(&self, _from: Point, to: Point) -> i32 {
            if self.water.contains(&to) { 5 } else { 1 }
        }
    }

    impl AstarPather for Marsh {
        fn estimate(&self, from: Point, to: Point) -> i32 {
            manhattan(from, to)
        }
    }

    fn route_cost(m: &Marsh, path: &[Point]) -> i32 {
        path.windows(2).map(|w| m.cost(w[0], w[1])).sum()
    }

    /// Two 4x3 rooms joined by a single doorway at (4, 1).
    fn two_rooms() -> WalkMask {
        WalkMask::from_fn(Range::new(0, 0, 9, 3), |p| p.x != 4 || p.y == 1)
    }

    #[test]
    fn route_threads_the_doorway() {
        let mask = two_rooms();
        let mut pr = PathRange::new(mask.range());
        let path = pr.astar_path(&mask, Point::new(0, 2), Point::new(8, 0)).unwrap();
        assert_eq!(path.first(), Some(&Point::new(0, 2)));
        assert_eq!(path.last(), Some(&Point::new(8, 0)));
        assert!(path.contains(&Point::new(4, 1)));
        assert_eq!(path.len(), 11);
        assert!(path.windows(2).all(|w| manhattan(w[0], w[1]) == 1));
    }

    #[test]
    fn detour_beats_wading() {
        // A water column at x=3 with a dry cell at the far bottom end.
        let range = Range::new(0, 0, 7, 7);
        let water: Vec<Point> = (0..6).map(|y| Point::new(3, y)).collect();
        let m = Marsh { range, water };
        let mut pr = PathRange::new(range);
        let path = pr.astar_path(&m, Point::new(0, 0), Point::new(6, 0)).unwrap();
        // Wading straight across costs 10; the dry detour costs 18.
        assert_eq!(route_cost(&m, &path), 10);

        let path = pr.astar_path(&m, Point::new(1, 6), Point::new(5, 6)).unwrap();
        assert!(path.contains(&Point::new(3, 6)));
        assert_eq!(route_cost(&m, &path), 4);
    }

    #[test]
    fn ties_resolve_the_same_way_every_time() {
        let mask = WalkMask::from_fn(Range::new(0, 0, 8, 8), |p| p != Point::new(3, 3));
        let mut pr = PathRange::new(mask.range());
        let first = pr.astar_path(&mask, Point::new(0, 0), Point::new(7, 7));
        let _ = pr.astar_path(&mask, Point::new(7, 0), Point::new(0, 7));
        let again = pr.astar_path(&mask, Point::new(0, 0), Point::new(7, 7));
        assert_eq!(first, again);
        assert_eq!(first.map(|p| p.len()), Some(15));
    }

    #[test]
    fn frontier_pops_lowest_f_then_oldest() {
        let mut heap = BinaryHeap::new();
        for (seq, (idx, f)) in [(10, 5), (11, 5), (12, 3), (13, 5)].into_iter().enumerate() {
            heap.push(Frontier {
                f,
                seq: seq as u64,
                idx,
            });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.idx)).collect();
        assert_eq!(order, vec![12, 10, 11, 13]);
    }

    #[test]
    fn sealed_room_has_no_route() {
        // The doorway is bricked up.
        let mask = WalkMask::from_fn(Range::new(0, 0, 9, 3), |p| p.x != 4);
        let mut pr = PathRange::new(mask.range());
        assert_eq!(pr.astar_path(&mask, Point::new(0, 0), Point::new(8, 2)), None);
    }

    #[test]
    fn endpoint_off_the_floor_has_no_route() {
        let mask = two_rooms();
        let mut pr = PathRange::new(mask.range());
        assert_eq!(pr.astar_path(&mask, Point::new(0, 0), Point::new(9, 1)), None);
        assert_eq!(pr.astar_path(&mask, Point::new(-1, 1), Point::new(0, 0)), None);
    }
}
