use std::collections::VecDeque;

use fieldpath_core::Point;

use crate::PathRange;
use crate::pathrange::UNREACHABLE;
use crate::traits::Pather;

impl PathRange {
    /// Unit-cost distances from the nearest of `sources`, up to `max_dist`.
    ///
    /// Returns how many tiles were reached, sources included. Query the
    /// result with [`bfs_at`](Self::bfs_at).
    pub fn bfs_map<P: Pather>(&mut self, pather: &P, sources: &[Point], max_dist: i32) -> usize {
        self.dist.fill(UNREACHABLE);
        let mut queue = VecDeque::new();
        for &src in sources {
            if let Some(i) = self.idx(src).filter(|&i| self.dist[i] == UNREACHABLE) {
                self.dist[i] = 0;
                queue.push_back(i);
            }
        }

        let mut reached = queue.len();
        let mut nbuf = std::mem::take(&mut self.nbuf);
        while let Some(cur) = queue.pop_front() {
            let d = self.dist[cur] + 1;
            if d > max_dist {
                continue;
            }
            nbuf.clear();
            pather.neighbors(self.point(cur), &mut nbuf);
            for &next in &nbuf {
                if let Some(ni) = self.idx(next).filter(|&i| self.dist[i] == UNREACHABLE) {
                    self.dist[ni] = d;
                    queue.push_back(ni);
                    reached += 1;
                }
            }
        }
        self.nbuf = nbuf;
        reached
    }

    /// Distance at `p` from the last [`bfs_map`](Self::bfs_map), or
    /// [`UNREACHABLE`].
    pub fn bfs_at(&self, p: Point) -> i32 {
        self.idx(p).map_or(UNREACHABLE, |i| self.dist[i])
    }
}

#[cfg(test)]
mod tests {
    use fieldpath_core::Point;

    use crate::testmap::TestMap;
    use crate::{PathRange, UNREACHABLE};

    #[test]
    fn distances_around_a_wall() {
        let map = TestMap::parse("...\n.#.\n...");
        let mut pr = PathRange::new(map.range());
        assert_eq!(pr.bfs_map(&map, &[Point::new(0, 0)], i32::MAX), 8);
        assert_eq!(pr.bfs_at(Point::new(2, 2)), 4);
        assert_eq!(pr.bfs_at(Point::new(1, 1)), UNREACHABLE);
        assert_eq!(pr.bfs_at(Point::new(7, 7)), UNREACHABLE);
    }

    #[test]
    fn max_dist_limits_expansion() {
        let map = TestMap::parse(".....");
        let mut pr = PathRange::new(map.range());
        assert_eq!(pr.bfs_map(&map, &[Point::new(0, 0)], 2), 3);
        assert_eq!(pr.bfs_at(Point::new(2, 0)), 2);
        assert_eq!(pr.bfs_at(Point::new(3, 0)), UNREACHABLE);
    }

    #[test]
    fn nearest_source_wins() {
        let map = TestMap::parse(".....");
        let mut pr = PathRange::new(map.range());
        let sources = [Point::new(0, 0), Point::new(4, 0), Point::new(4, 0)];
        assert_eq!(pr.bfs_map(&map, &sources, i32::MAX), 5);
        assert_eq!(pr.bfs_at(Point::new(1, 0)), 1);
        assert_eq!(pr.bfs_at(Point::new(3, 0)), 1);
    }
}
