//! Searches over 2D tile grids.
//!
//! - A\* shortest paths ([`PathRange::astar_path`])
//! - breadth-first distance maps ([`PathRange::bfs_map`])
//! - connected-region labelling ([`PathRange::cc_map_all`])
//!
//! The grid itself stays with the caller and is seen through the [`Pather`]
//! traits. [`PathRange`] owns the per-tile scratch arrays, sized once for a
//! rectangle and reused by every search; nodes point to their parent by
//! arena index.
//!
//! | Trait | Needed by |
//! |---|---|
//! | [`Pather`] | BFS, regions |
//! | [`WeightedPather`] | (step costs) |
//! | [`AstarPather`] | A\* |

mod astar;
mod bfs;
mod cc;
mod distance;
mod pathrange;
mod traits;

#[cfg(test)]
mod testmap;

pub use distance::manhattan;
pub use pathrange::{PathRange, UNREACHABLE};
pub use traits::{AstarPather, Pather, WeightedPather};
