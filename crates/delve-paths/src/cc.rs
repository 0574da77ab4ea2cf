//! Flood fill over a pather's neighbour graph.

use delve_core::Point;

use crate::PathRange;
use crate::traits::Pather;

impl PathRange {
    /// Every cell connected to `p` through `pather`, `p` first and the rest
    /// in discovery order. Out-of-range `p` yields an empty list.
    pub fn cc_map<P: Pather>(&mut self, pather: &P, p: Point) -> Vec<Point> {
        self.seen.fill(false);

        let mut result = Vec::new();
        let Some(si) = self.idx(p) else {
            return result;
        };

        let mut nbrs = std::mem::take(&mut self.scratch);
        self.seen[si] = true;
        self.stack.clear();
        self.stack.push(si);
        result.push(p);

        while let Some(ci) = self.stack.pop() {
            let cp = self.point(ci);
            nbrs.clear();
            pather.neighbors(cp, &mut nbrs);

            for &np in nbrs.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if !self.seen[ni] {
                    self.seen[ni] = true;
                    self.stack.push(ni);
                    result.push(np);
                }
            }
        }

        self.scratch = nbrs;
        result
    }
}
