//! The immutable tile grid.

use fieldpath_core::{Point, Range};
use fieldpath_paths::{AstarPather, PathRange, Pather, WeightedPather, manhattan};

use crate::error::MapError;
use crate::tile::Tile;

/// A 2D map of [`Tile`]s, stored row-major.
///
/// A `Grid` is read-only once built: every constructor validates the
/// dimensions and nothing hands out mutable access to the tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a grid from row-major tiles.
    ///
    /// Fails with [`MapError::SizeMismatch`] unless `tiles.len()` is exactly
    /// `width * height`.
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<Tile>) -> Result<Self, MapError> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(MapError::TooLarge { width, height });
        };
        if tiles.len() != width * height {
            return Err(MapError::SizeMismatch {
                width,
                height,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width: w,
            height: h,
            tiles,
        })
    }

    /// Width in tiles.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width as i32
    }

    /// Height in tiles.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height as i32
    }

    /// The rectangle `[0, width) x [0, height)`.
    #[inline]
    pub fn range(&self) -> Range {
        Range::sized(self.width(), self.height())
    }

    /// All tiles, row-major.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.range().contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// The tile at `p`, or `None` if out of bounds.
    #[inline]
    pub fn tile_at(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// Whether `p` is inside the grid and walkable.
    #[inline]
    pub fn is_walkable(&self, p: Point) -> bool {
        self.tile_at(p).is_some_and(Tile::walkable)
    }

    /// Row-major iterator over all walkable positions.
    pub fn walkable_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.range().iter().filter(|&p| self.is_walkable(p))
    }

    /// Number of walkable tiles.
    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.walkable()).count()
    }

    /// A search arena sized for this grid.
    pub fn path_range(&self) -> PathRange {
        PathRange::new(self.range())
    }

    /// Shortest walking path from `from` to `to` and its cost.
    ///
    /// Returns `None` when either endpoint is out of bounds or not walkable,
    /// or when no walkable connection exists. `pr` must cover this grid's
    /// range (see [`path_range`](Self::path_range)).
    pub fn find_path(
        &self,
        pr: &mut PathRange,
        from: Point,
        to: Point,
    ) -> Option<(Vec<Point>, i32)> {
        if !self.is_walkable(from) || !self.is_walkable(to) {
            return None;
        }
        pr.astar_path(self, from, to)
    }
}

impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.is_walkable(n) {
                buf.push(n);
            }
        }
    }
}

/// Every step costs 1, whatever the tile flags.
impl WeightedPather for Grid {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
