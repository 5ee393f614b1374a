//! The (start, goal) keyed path table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use fieldpath_core::Point;

// ---------------------------------------------------------------------------
// CachedPath
// ---------------------------------------------------------------------------

/// A cached path: a window into a shared point sequence.
///
/// Sub-paths cut from the same search result share one allocation, so
/// seeding the `O(L²)` entries of a path of length `L` costs no copies.
#[derive(Clone, Debug)]
pub struct CachedPath {
    points: Arc<[Point]>,
    start: usize,
    end: usize,
}

impl CachedPath {
    /// Wrap a full path. `points` must not be empty.
    pub fn new(points: impl Into<Arc<[Point]>>) -> Self {
        let points = points.into();
        let end = points.len();
        debug_assert!(end > 0, "cached paths hold at least one point");
        Self {
            points,
            start: 0,
            end,
        }
    }

    /// Sub-path `[from, to)` relative to this window, sharing storage.
    pub(crate) fn window(&self, from: usize, to: usize) -> Self {
        debug_assert!(from < to && to <= self.len());
        Self {
            points: Arc::clone(&self.points),
            start: self.start + from,
            end: self.start + to,
        }
    }

    /// The same route walked backwards, in fresh storage.
    pub(crate) fn reversed(&self) -> Self {
        let rev: Vec<Point> = self.points().iter().rev().copied().collect();
        Self::new(rev)
    }

    /// The points from start to goal, inclusive.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points[self.start..self.end]
    }

    /// Number of points (one more than the number of steps).
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Total cost under unit step cost.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.len() as i32 - 1
    }

    #[inline]
    pub fn first(&self) -> Point {
        self.points[self.start]
    }

    #[inline]
    pub fn last(&self) -> Point {
        self.points[self.end - 1]
    }
}

impl PartialEq for CachedPath {
    fn eq(&self, other: &Self) -> bool {
        self.points() == other.points()
    }
}

impl Eq for CachedPath {}

impl AsRef<[Point]> for CachedPath {
    fn as_ref(&self) -> &[Point] {
        self.points()
    }
}

// ---------------------------------------------------------------------------
// PathCache
// ---------------------------------------------------------------------------

/// Paths keyed by start tile, then by goal tile.
///
/// Entries are write-once: the only way in is
/// [`insert_if_absent`](Self::insert_if_absent), so the first path stored
/// for a pair is the one that stays.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathCache {
    paths: HashMap<Point, HashMap<Point, CachedPath>>,
    len: usize,
}

impl PathCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached path from `start` to `goal`, if any.
    #[inline]
    pub fn lookup(&self, start: Point, goal: Point) -> Option<&[Point]> {
        self.get(start, goal).map(CachedPath::points)
    }

    /// The cached entry from `start` to `goal`, if any.
    #[inline]
    pub fn get(&self, start: Point, goal: Point) -> Option<&CachedPath> {
        self.paths.get(&start)?.get(&goal)
    }

    /// Whether an entry exists for the pair.
    #[inline]
    pub fn contains(&self, start: Point, goal: Point) -> bool {
        self.get(start, goal).is_some()
    }

    /// Store `path` for `(start, goal)` unless an entry already exists.
    ///
    /// Returns `true` if the path was stored.
    pub(crate) fn insert_if_absent(&mut self, start: Point, goal: Point, path: CachedPath) -> bool {
        match self.paths.entry(start).or_default().entry(goal) {
            Entry::Occupied(_) => false,
            Entry::Vacant(v) => {
                v.insert(path);
                self.len += 1;
                true
            }
        }
    }

    /// Number of (start, goal) entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start tiles with at least one entry, in no particular order.
    pub fn starts(&self) -> impl Iterator<Item = Point> + '_ {
        self.paths.keys().copied()
    }

    /// Goals reachable from `start` and their paths, in no particular order.
    pub fn goals(&self, start: Point) -> impl Iterator<Item = (Point, &CachedPath)> + '_ {
        self.paths
            .get(&start)
            .into_iter()
            .flat_map(|m| m.iter().map(|(&g, p)| (g, p)))
    }

    /// Every `(start, goal, path)` entry, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Point, &CachedPath)> + '_ {
        self.paths
            .iter()
            .flat_map(|(&s, m)| m.iter().map(move |(&g, p)| (s, g, p)))
    }
}
