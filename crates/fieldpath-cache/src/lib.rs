//! All-pairs path cache for fieldpath maps.
//!
//! [`CacheBuilder`] walks every pair of walkable tiles, runs A* only for
//! pairs that are still unresolved and decomposes each path it finds into
//! entries for all of its sub-paths. The resulting [`PathCache`] is saved
//! and loaded by [`store`] and queried through [`FindRequest`].

mod build;
mod cache;
mod query;
pub mod store;

pub use build::{BuildOptions, BuildStats, CacheBuilder, build_all};
pub use cache::{CachedPath, PathCache};
pub use query::{FindRequest, FindResponse, QueryError};
pub use store::StoreError;
