//! Connected regions.

use fieldpath_core::Point;

use crate::PathRange;
use crate::traits::Pather;

impl PathRange {
    /// Label the connected regions of the range and return how many there
    /// are.
    ///
    /// Only tiles for which `passable` holds start a region, so a wall never
    /// joins the floor on either side of it. Two tiles share a label when
    /// `pather` can walk from one to the other. Read labels back with
    /// [`cc_at`](Self::cc_at).
    pub fn cc_map_all<P: Pather>(&mut self, pather: &P, passable: impl Fn(Point) -> bool) -> usize {
        self.labels.fill(-1);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut regions = 0;

        for seed in 0..self.rng.len() {
            if self.labels[seed] >= 0 || !passable(self.point(seed)) {
                continue;
            }
            let label = regions as i32;
            self.labels[seed] = label;
            self.stack.clear();
            self.stack.push(seed);
            while let Some(cur) = self.stack.pop() {
                nbuf.clear();
                pather.neighbors(self.point(cur), &mut nbuf);
                for &next in &nbuf {
                    if let Some(ni) = self.idx(next).filter(|&i| self.labels[i] < 0) {
                        self.labels[ni] = label;
                        self.stack.push(ni);
                    }
                }
            }
            regions += 1;
        }

        self.nbuf = nbuf;
        regions
    }

    /// Region of `p` from the last [`cc_map_all`](Self::cc_map_all), `None`
    /// for unlabelled or out-of-range tiles.
    pub fn cc_at(&self, p: Point) -> Option<usize> {
        let label = self.labels[self.idx(p)?];
        usize::try_from(label).ok()
    }
}
