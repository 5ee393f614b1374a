//! Maps written as text.
//!
//! Handy for fixtures and small hand-made fields:
//!
//! | Rune | Tile |
//! |---|---|
//! | `.` | walkable |
//! | `,` | walkable, snipe |
//! | `#` | blocked |
//! | `~` | water |
//! | `^` | cliff |

use fieldpath_core::Point;

use crate::error::MapError;
use crate::grid::Grid;
use crate::tile::Tile;

fn rune_tile(ch: char) -> Option<Tile> {
    match ch {
        '.' => Some(Tile::WALK),
        ',' => Some(Tile::WALK | Tile::SNIPE),
        '#' => Some(Tile::NOWALK),
        '~' => Some(Tile::WATER),
        '^' => Some(Tile::CLIFF),
        _ => None,
    }
}

impl Grid {
    /// Build a grid from a text layout, one line per row.
    ///
    /// Leading/trailing whitespace is trimmed from the whole string and from
    /// each line, and every row must have the same width.
    pub fn from_layout(s: &str) -> Result<Self, MapError> {
        let s = s.trim();
        let mut tiles = Vec::with_capacity(s.len());
        let mut width = None;
        let mut height = 0;

        for (y, line) in s.lines().enumerate() {
            let line = line.trim();
            let mut w = 0;
            for (x, ch) in line.chars().enumerate() {
                let Some(t) = rune_tile(ch) else {
                    return Err(MapError::InvalidRune {
                        ch,
                        pos: Point::new(x as i32, y as i32),
                    });
                };
                tiles.push(t);
                w += 1;
            }
            if *width.get_or_insert(w) != w {
                return Err(MapError::InconsistentRows { row: y });
            }
            height += 1;
        }

        Self::from_tiles(width.unwrap_or(0), height, tiles)
    }
}
