use std::cmp::Ordering;

use fieldpath_core::{Point, Range};

/// Distance stored for tiles a BFS did not reach.
pub const UNREACHABLE: i32 = i32::MAX;

/// Marks the start node, which has no parent.
pub(crate) const NO_PARENT: usize = usize::MAX;

/// A* bookkeeping for one tile.
///
/// Nodes are reset lazily: a node whose `generation` differs from the
/// current search's has not been touched by that search yet.
#[derive(Clone, Copy)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    /// On the frontier; `false` once expanded.
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: NO_PARENT,
            generation: 0,
            open: false,
        }
    }
}

/// A frontier entry.
///
/// `BinaryHeap` is a max-heap, so the ordering is inverted: the entry with
/// the lowest `f` is the greatest, ties go to the lowest `h`, then to the
/// lowest `seq` (first pushed).
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) h: i32,
    pub(crate) seq: u32,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (other.f, other.h, other.seq).cmp(&(self.f, self.h, self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Search workspace for one rectangle of tiles.
///
/// Every per-tile array is indexed row-major relative to `rng.min` and is
/// allocated once, so a `PathRange` can serve any number of searches on the
/// same map. It is not shareable between threads while searching; give each
/// worker its own.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) dist: Vec<i32>,
    pub(crate) labels: Vec<i32>,
    pub(crate) stack: Vec<usize>,
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); len],
            generation: 0,
            dist: vec![UNREACHABLE; len],
            labels: vec![-1; len],
            stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// The rectangle searches are confined to.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let dx = (p.x - self.rng.min.x) as usize;
        let dy = (p.y - self.rng.min.y) as usize;
        Some(dy * self.width + dx)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        Point::new(
            self.rng.min.x + (idx % self.width) as i32,
            self.rng.min.y + (idx / self.width) as i32,
        )
    }

    /// Start a new A* generation, invalidating every node at once.
    pub(crate) fn next_generation(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale nodes could now look current.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn indices_follow_the_range_origin() {
        let pr = PathRange::new(Range::new(2, 3, 6, 8));
        assert_eq!(pr.idx(Point::new(2, 3)), Some(0));
        assert_eq!(pr.idx(Point::new(5, 4)), Some(7));
        assert_eq!(pr.point(7), Point::new(5, 4));
        assert_eq!(pr.idx(Point::new(6, 3)), None);
        assert_eq!(pr.idx(Point::new(1, 3)), None);
        assert_eq!(pr.nodes.len(), 20);
    }

    #[test]
    fn frontier_order() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { idx: 0, f: 5, h: 3, seq: 0 });
        heap.push(OpenEntry { idx: 1, f: 4, h: 4, seq: 1 });
        heap.push(OpenEntry { idx: 2, f: 5, h: 1, seq: 2 });
        heap.push(OpenEntry { idx: 3, f: 5, h: 1, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.idx)).collect();
        assert_eq!(order, [1, 2, 3, 0]);
    }

    #[test]
    fn generation_wrap_resets_nodes() {
        let mut pr = PathRange::new(Range::sized(2, 1));
        pr.generation = u32::MAX;
        pr.nodes[1].generation = 1;
        assert_eq!(pr.next_generation(), 1);
        assert_eq!(pr.nodes[1].generation, 0);
    }
}
