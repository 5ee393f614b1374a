//! Geometry shared by the fieldpath crates: tile coordinates ([`Point`]) and
//! half-open rectangles ([`Range`]).

pub mod geom;

pub use geom::{Point, Range};
