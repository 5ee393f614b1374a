//! Tile maps for fieldpath.
//!
//! A [`Grid`] is loaded once from a `.fld2` file ([`Grid::open`],
//! [`Grid::from_bytes`]) or a text layout ([`Grid::from_layout`]) and is
//! read-only afterwards. It implements the search traits of
//! `fieldpath-paths` with 4-connected, unit-cost movement between walkable
//! tiles.

mod error;
pub mod fld;
mod grid;
mod layout;
mod tile;

pub use error::MapError;
pub use grid::Grid;
pub use tile::Tile;
