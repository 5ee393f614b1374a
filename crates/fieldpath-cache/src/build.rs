//! All-pairs precomputation.
//!
//! Every ordered pair of walkable tiles is visited in row-major order. A pair
//! that is still missing triggers one A* search, and the path it returns is
//! then decomposed: any two points on a shortest path are joined by the
//! sub-path between them, which is itself shortest. One search of length `L`
//! therefore seeds up to `O(L²)` entries in both directions, and most pairs
//! are already resolved by the time the loop reaches them.

use std::fmt;

use fieldpath_core::Point;
use fieldpath_map::Grid;
use fieldpath_paths::PathRange;

use crate::cache::{CachedPath, PathCache};

/// Knobs for [`CacheBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Label connected components first and skip pairs that lie in different
    /// ones instead of letting A* exhaust the start's region to find out.
    pub skip_disconnected: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            skip_disconnected: true,
        }
    }
}

impl BuildOptions {
    pub fn skip_disconnected(mut self, on: bool) -> Self {
        self.skip_disconnected = on;
        self
    }
}

/// Counters reported at the end of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Walkable tiles in the grid.
    pub walkable: usize,
    /// A* searches run.
    pub searches: usize,
    /// Ordered pairs left without an entry.
    pub unreachable: usize,
    /// Entries in the finished cache.
    pub entries: usize,
}

impl fmt::Display for BuildStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} walkable tiles, {} searches, {} unreachable pairs, {} entries",
            self.walkable, self.searches, self.unreachable, self.entries
        )
    }
}

/// Drives the all-pairs precomputation over one grid.
pub struct CacheBuilder<'g> {
    grid: &'g Grid,
    opts: BuildOptions,
    pr: PathRange,
    cache: PathCache,
    stats: BuildStats,
}

impl<'g> CacheBuilder<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            opts: BuildOptions::default(),
            pr: grid.path_range(),
            cache: PathCache::new(),
            stats: BuildStats::default(),
        }
    }

    pub fn options(mut self, opts: BuildOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Resolve every walkable pair and return the finished cache.
    pub fn build(mut self) -> (PathCache, BuildStats) {
        let grid = self.grid;
        let walkable: Vec<Point> = grid.walkable_points().collect();
        self.stats.walkable = walkable.len();
        log::info!(
            "building path cache for {}x{} map ({} walkable tiles)",
            grid.width(),
            grid.height(),
            walkable.len()
        );

        if self.opts.skip_disconnected {
            let regions = self.pr.cc_map_all(grid, |p| grid.is_walkable(p));
            log::debug!("{regions} connected regions");
        }

        let mut row = None;
        for &start in &walkable {
            if row != Some(start.y) {
                row = Some(start.y);
                log::debug!(
                    "row {}/{}: {} entries, {} searches",
                    start.y,
                    grid.height(),
                    self.cache.len(),
                    self.stats.searches
                );
            }
            for &goal in &walkable {
                self.solve(start, goal);
            }
        }

        self.stats.entries = self.cache.len();
        log::info!("path cache built: {}", self.stats);
        (self.cache, self.stats)
    }

    fn solve(&mut self, start: Point, goal: Point) {
        if self.cache.contains(start, goal) {
            return;
        }
        if self.opts.skip_disconnected && self.pr.cc_at(start) != self.pr.cc_at(goal) {
            self.stats.unreachable += 1;
            return;
        }

        self.stats.searches += 1;
        match self.pr.astar_path(self.grid, start, goal) {
            Some((points, _)) => decompose(&mut self.cache, points),
            None => {
                self.stats.unreachable += 1;
                log::debug!("path not found from {start} to {goal}");
            }
        }
    }
}

/// Build the full cache for `grid` with default options.
pub fn build_all(grid: &Grid) -> PathCache {
    CacheBuilder::new(grid).build().0
}

/// Seed the cache from one shortest path, in both directions.
pub(crate) fn decompose(cache: &mut PathCache, points: Vec<Point>) {
    let forward = CachedPath::new(points);
    let start = forward.first();
    let goal = forward.last();

    seed_suffixes(cache, &forward, goal);
    seed_prefixes(cache, &forward, start);

    let backward = forward.reversed();
    seed_suffixes(cache, &backward, start);
    seed_prefixes(cache, &backward, goal);
}

/// `(path[i], goal) = path[i..]` for every `i`.
fn seed_suffixes(cache: &mut PathCache, path: &CachedPath, goal: Point) {
    let len = path.len();
    for (i, &p) in path.points().iter().enumerate() {
        if !cache.contains(p, goal) {
            cache.insert_if_absent(p, goal, path.window(i, len));
        }
    }
}

/// `(start, path[i]) = path[..=i]` for every `i`, walking back from the goal.
fn seed_prefixes(cache: &mut PathCache, path: &CachedPath, start: Point) {
    for (i, &p) in path.points().iter().enumerate().rev() {
        if !cache.contains(start, p) {
            cache.insert_if_absent(start, p, path.window(0, i + 1));
        }
    }
}
