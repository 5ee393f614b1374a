//! `.fld2` map file codec.
//!
//! ## Layout
//! ```text
//! [width:  u16, bytes swapped relative to big-endian]
//! [height: u16, bytes swapped relative to big-endian]
//! [tiles:  width * height bytes, row-major]
//! ```
//! The dimension fields are read as a big-endian pair taken in the order
//! byte 1, byte 0. Each tile byte carries the [`Tile`] flag bits.

use std::fs;
use std::path::Path;

use crate::error::MapError;
use crate::grid::Grid;
use crate::tile::Tile;

/// Width and height fields.
pub const HEADER_LEN: usize = 4;

#[inline]
fn read_dim(b0: u8, b1: u8) -> u16 {
    u16::from_be_bytes([b1, b0])
}

#[inline]
fn write_dim(v: u16) -> [u8; 2] {
    let [hi, lo] = v.to_be_bytes();
    [lo, hi]
}

impl Grid {
    /// Parse a map from the raw bytes of a `.fld2` file.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MapError> {
        if data.len() < HEADER_LEN {
            return Err(MapError::TooShort { len: data.len() });
        }
        let width = read_dim(data[0], data[1]) as usize;
        let height = read_dim(data[2], data[3]) as usize;
        let payload = &data[HEADER_LEN..];
        if payload.len() != width * height {
            return Err(MapError::SizeMismatch {
                width,
                height,
                actual: payload.len(),
            });
        }
        let tiles = payload.iter().map(|&b| Tile(b)).collect();
        Self::from_tiles(width, height, tiles)
    }

    /// Read and parse a `.fld2` file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let grid = Self::from_bytes(&data)?;
        log::info!(
            "loaded map {}: {}x{}, {} walkable tiles",
            path.display(),
            grid.width(),
            grid.height(),
            grid.walkable_count()
        );
        Ok(grid)
    }

    /// Encode the grid in the `.fld2` layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.tiles().len());
        out.extend_from_slice(&write_dim(self.width() as u16));
        out.extend_from_slice(&write_dim(self.height() as u16));
        out.extend(self.tiles().iter().map(|t| t.0));
        out
    }

    /// Write the grid to a `.fld2` file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }
}
