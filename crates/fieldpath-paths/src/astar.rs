use std::collections::BinaryHeap;

use fieldpath_core::Point;

use crate::PathRange;
use crate::pathrange::{NO_PARENT, Node, OpenEntry};
use crate::traits::AstarPather;

impl PathRange {
    /// Shortest path from `from` to `to`, both included, and its cost.
    ///
    /// `None` when either end lies outside the range or the goal cannot be
    /// reached. Only tiles produced by
    /// [`Pather::neighbors`](crate::Pather::neighbors) are entered, so the
    /// start itself is never checked.
    ///
    /// A frontier node is re-queued when a strictly cheaper route to it turns
    /// up. With unit step costs and a consistent heuristic that cannot
    /// happen, and the first route recorded for a node stands; weighted
    /// pathers rely on it to stay optimal. Expanded nodes are never reopened,
    /// which needs the heuristic to be consistent.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<(Vec<Point>, i32)> {
        let start = self.idx(from)?;
        let goal = self.idx(to)?;
        if start == goal {
            return Some((vec![from], 0));
        }

        let generation = self.next_generation();
        let h = pather.estimate(from, to);
        self.nodes[start].g = 0;
        self.nodes[start].parent = NO_PARENT;
        self.nodes[start].generation = generation;
        self.nodes[start].open = true;

        let mut seq = 0u32;
        let mut frontier = BinaryHeap::new();
        frontier.push(OpenEntry {
            idx: start,
            f: h,
            h,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut reached = false;

        while let Some(OpenEntry { idx: cur, .. }) = frontier.pop() {
            let node = self.nodes[cur];
            // Superseded by a cheaper entry for the same tile.
            if node.generation != generation || !node.open {
                continue;
            }
            if cur == goal {
                reached = true;
                break;
            }
            self.nodes[cur].open = false;

            let here = self.point(cur);
            nbuf.clear();
            pather.neighbors(here, &mut nbuf);

            for &next in &nbuf {
                let Some(ni) = self.idx(next) else {
                    continue;
                };
                let g = node.g + pather.cost(here, next);
                let n = &mut self.nodes[ni];
                if n.generation == generation && (!n.open || g >= n.g) {
                    continue;
                }
                *n = Node {
                    g,
                    parent: cur,
                    generation,
                    open: true,
                };
                let h = pather.estimate(next, to);
                seq = seq.wrapping_add(1);
                frontier.push(OpenEntry {
                    idx: ni,
                    f: g + h,
                    h,
                    seq,
                });
            }
        }

        self.nbuf = nbuf;
        if !reached {
            return None;
        }

        let mut path = Vec::new();
        let mut at = goal;
        while at != NO_PARENT {
            path.push(self.point(at));
            at = self.nodes[at].parent;
        }
        path.reverse();
        Some((path, self.nodes[goal].g))
    }
}

#[cfg(test)]
mod tests {
    use fieldpath_core::{Point, Range};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::testmap::{TestMap, assert_walk};
    use crate::{PathRange, UNREACHABLE, manhattan};

    #[test]
    fn open_3x3_corner_to_corner() {
        let map = TestMap::parse("...\n...\n...");
        let mut pr = PathRange::new(map.range());
        let (path, cost) = pr
            .astar_path(&map, (0, 0).into(), (2, 2).into())
            .unwrap();
        assert_eq!(cost, 4);
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Point::new(0, 0));
        assert_eq!(path[4], Point::new(2, 2));
        assert_walk(&map, &path);
    }

    #[test]
    fn same_start_and_goal() {
        let map = TestMap::parse("..\n..");
        let mut pr = PathRange::new(map.range());
        let got = pr.astar_path(&map, (1, 1).into(), (1, 1).into());
        assert_eq!(got, Some((vec![Point::new(1, 1)], 0)));
    }

    #[test]
    fn detour_is_longer_than_manhattan() {
        let map = TestMap::parse(
            "\
.....
###.#
.....",
        );
        let mut pr = PathRange::new(map.range());
        let from = (0, 0).into();
        let to = (0, 2).into();
        let (path, cost) = pr.astar_path(&map, from, to).unwrap();
        assert_eq!(cost, 8);
        assert!(cost > manhattan(from, to));
        assert_eq!(path.len(), cost as usize + 1);
        assert_walk(&map, &path);
    }

    #[test]
    fn separated_regions_are_not_found() {
        let map = TestMap::parse("...\n###\n...");
        let mut pr = PathRange::new(map.range());
        assert!(pr.astar_path(&map, (0, 0).into(), (2, 2).into()).is_none());
        // The arena is reusable after a failed search.
        assert!(pr.astar_path(&map, (0, 0).into(), (2, 0).into()).is_some());
    }

    #[test]
    fn goal_outside_range_is_not_found() {
        let map = TestMap::parse("..\n..");
        let mut pr = PathRange::new(map.range());
        assert!(pr.astar_path(&map, (0, 0).into(), (5, 5).into()).is_none());
        assert!(pr.astar_path(&map, (-1, 0).into(), (1, 1).into()).is_none());
    }

    #[test]
    fn weighted_tiles_are_avoided_when_cheaper() {
        // Straight through the 9 costs 10, around it costs 4.
        let map = TestMap::parse(
            "\
.9..
....",
        );
        let mut pr = PathRange::new(map.range());
        let (path, cost) = pr
            .astar_path(&map, (0, 0).into(), (2, 0).into())
            .unwrap();
        assert_eq!(cost, 4);
        assert!(!path.contains(&Point::new(1, 0)));
        assert_walk(&map, &path);
    }

    #[test]
    fn repeated_searches_are_deterministic() {
        let map = TestMap::parse("....\n.#..\n....\n..#.");
        let mut pr = PathRange::new(map.range());
        let a = pr.astar_path(&map, (0, 0).into(), (3, 3).into());
        let b = pr.astar_path(&map, (0, 0).into(), (3, 3).into());
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn matches_bfs_distance_on_random_maps() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let w = rng.random_range(3..12);
            let h = rng.random_range(3..12);
            let text: Vec<String> = (0..h)
                .map(|_| {
                    (0..w)
                        .map(|_| if rng.random_bool(0.3) { '#' } else { '.' })
                        .collect()
                })
                .collect();
            let map = TestMap::parse(&text.join("\n"));
            let rng_map = map.range();
            let mut pr = PathRange::new(rng_map);
            let floor: Vec<_> = Range::iter(rng_map).filter(|&p| map.passable(p)).collect();
            for &from in &floor {
                pr.bfs_map(&map, &[from], i32::MAX);
                let dist: Vec<i32> = floor.iter().map(|&p| pr.bfs_at(p)).collect();
                for (&to, &d) in floor.iter().zip(&dist) {
                    match pr.astar_path(&map, from, to) {
                        Some((path, cost)) => {
                            assert_eq!(cost, d, "{from} -> {to}");
                            assert_eq!(path.len(), d as usize + 1);
                            assert_walk(&map, &path);
                        }
                        None => assert_eq!(d, UNREACHABLE, "{from} -> {to}"),
                    }
                }
            }
        }
    }
}
