//! ASCII maps for search tests.
//!
//! `#` is a wall, `.` a floor tile with entry cost 1, and a digit `2`-`9` a
//! floor tile whose entry cost is that digit.

use fieldpath_core::{Point, Range};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

pub(crate) struct TestMap {
    rows: Vec<Vec<u8>>,
}

impl TestMap {
    pub(crate) fn parse(s: &str) -> Self {
        let rows: Vec<Vec<u8>> = s.lines().map(|l| l.trim().as_bytes().to_vec()).collect();
        Self { rows }
    }

    pub(crate) fn range(&self) -> Range {
        Range::sized(self.rows[0].len() as i32, self.rows.len() as i32)
    }

    fn at(&self, p: Point) -> Option<u8> {
        if !self.range().contains(p) {
            return None;
        }
        Some(self.rows[p.y as usize][p.x as usize])
    }

    pub(crate) fn passable(&self, p: Point) -> bool {
        matches!(self.at(p), Some(b) if b != b'#')
    }
}

impl Pather for TestMap {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.passable(n)));
    }
}

impl WeightedPather for TestMap {
    fn cost(&self, _from: Point, to: Point) -> i32 {
        match self.at(to) {
            Some(b @ b'2'..=b'9') => (b - b'0') as i32,
            _ => 1,
        }
    }
}

impl AstarPather for TestMap {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

/// Checks that `path` is a contiguous chain of passable, adjacent tiles.
pub(crate) fn assert_walk(map: &TestMap, path: &[Point]) {
    assert!(!path.is_empty());
    for w in path.windows(2) {
        assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
    }
    assert!(path.iter().all(|&p| map.passable(p)));
}
