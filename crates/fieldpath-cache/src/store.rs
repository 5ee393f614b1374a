//! JSON persistence for [`PathCache`].
//!
//! ## Format
//! ```text
//! {
//!   "(x,y)": {                      start tile
//!     "(x,y)": [{"x": 0, "y": 0}]   goal tile -> points, start to goal
//!   }
//! }
//! ```
//! Keys are written in row-major order so equal caches produce equal files.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use fieldpath_core::Point;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::cache::{CachedPath, PathCache};

/// Errors that can occur while saving or loading a cache file.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the file failed.
    Io(io::Error),
    /// The file is not valid JSON of the expected shape.
    Json(serde_json::Error),
    /// The JSON is well-formed but its content is not a valid cache.
    Format(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "path cache: {e}"),
            Self::Json(e) => write!(f, "path cache: malformed JSON: {e}"),
            Self::Format(msg) => write!(f, "path cache: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Format(_) => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Self::Io(e.into())
        } else {
            Self::Json(e)
        }
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Format a tile as a cache key: `(x,y)`.
pub fn format_key(p: Point) -> String {
    format!("({},{})", p.x, p.y)
}

/// Parse a `(x,y)` cache key.
pub fn parse_key(s: &str) -> Option<Point> {
    let inner = s.strip_prefix('(')?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    Some(Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

struct CacheDoc<'a>(&'a PathCache);

struct GoalsDoc<'a>(Vec<(Point, &'a CachedPath)>);

impl Serialize for CacheDoc<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut starts: Vec<Point> = self.0.starts().collect();
        starts.sort();
        let mut map = serializer.serialize_map(Some(starts.len()))?;
        for start in starts {
            let mut goals: Vec<(Point, &CachedPath)> = self.0.goals(start).collect();
            goals.sort_by_key(|&(g, _)| g);
            map.serialize_entry(&format_key(start), &GoalsDoc(goals))?;
        }
        map.end()
    }
}

impl Serialize for GoalsDoc<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for &(goal, path) in &self.0 {
            map.serialize_entry(&format_key(goal), path.points())?;
        }
        map.end()
    }
}

/// Write `cache` as pretty-printed JSON.
pub fn write_to<W: Write>(cache: &PathCache, writer: W) -> Result<(), StoreError> {
    serde_json::to_writer_pretty(writer, &CacheDoc(cache))?;
    Ok(())
}

/// Save `cache` to a file, replacing any existing one.
pub fn save(cache: &PathCache, path: impl AsRef<Path>) -> Result<(), StoreError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(cache, &mut writer)?;
    writer.flush()?;
    log::info!("saved {} cached paths to {}", cache.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Ordered so that error reports and duplicate detection are deterministic.
type RawCache = BTreeMap<String, BTreeMap<String, Vec<Point>>>;

fn key(s: &str) -> Result<Point, StoreError> {
    parse_key(s).ok_or_else(|| StoreError::Format(format!("invalid key {s:?}")))
}

fn check_path(start: Point, goal: Point, points: &[Point]) -> Result<(), StoreError> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Err(StoreError::Format(format!("empty path from {start} to {goal}")));
    };
    if first != start || last != goal {
        return Err(StoreError::Format(format!(
            "path stored under {start} -> {goal} runs from {first} to {last}"
        )));
    }
    if let Some(w) = points.windows(2).find(|w| !w[0].is_adjacent(w[1])) {
        return Err(StoreError::Format(format!(
            "path from {start} to {goal} jumps from {} to {}",
            w[0], w[1]
        )));
    }
    Ok(())
}

/// Read a cache written by [`write_to`].
pub fn read_from<R: Read>(reader: R) -> Result<PathCache, StoreError> {
    let raw: RawCache = serde_json::from_reader(reader)?;

    let mut cache = PathCache::new();
    for (start_key, goals) in raw {
        let start = key(&start_key)?;
        for (goal_key, points) in goals {
            let goal = key(&goal_key)?;
            check_path(start, goal, &points)?;
            if !cache.insert_if_absent(start, goal, CachedPath::new(points)) {
                return Err(StoreError::Format(format!(
                    "duplicate entry for {start} -> {goal}"
                )));
            }
        }
    }
    Ok(cache)
}

/// Load a cache file written by [`save`].
pub fn load(path: impl AsRef<Path>) -> Result<PathCache, StoreError> {
    let path = path.as_ref();
    let cache = read_from(BufReader::new(File::open(path)?))?;
    log::info!("loaded {} cached paths from {}", cache.len(), path.display());
    Ok(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_all;
    use fieldpath_map::Grid;

    fn field() -> PathCache {
        let grid = Grid::from_layout(
            "\
            ..#.
            ....
            ~.^.",
        )
        .unwrap();
        build_all(&grid)
    }

    #[test]
    fn keys() {
        assert_eq!(format_key(Point::new(3, 12)), "(3,12)");
        assert_eq!(parse_key("(3,12)"), Some(Point::new(3, 12)));
        assert_eq!(parse_key("(-1, 4)"), Some(Point::new(-1, 4)));
        assert_eq!(parse_key("3,12"), None);
        assert_eq!(parse_key("(3;12)"), None);
        assert_eq!(parse_key("(a,1)"), None);
    }

    #[test]
    fn json_shape() {
        let mut cache = PathCache::new();
        let path = vec![Point::new(0, 0), Point::new(1, 0)];
        cache.insert_if_absent(Point::new(0, 0), Point::new(1, 0), CachedPath::new(path));
        let mut buf = Vec::new();
        write_to(&cache, &mut buf).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "(0,0)": { "(1,0)": [ { "x": 0, "y": 0 }, { "x": 1, "y": 0 } ] }
            })
        );
    }

    #[test]
    fn round_trip_in_memory() {
        let cache = field();
        let mut buf = Vec::new();
        write_to(&cache, &mut buf).unwrap();
        let back = read_from(buf.as_slice()).unwrap();
        assert_eq!(back.len(), cache.len());
        assert_eq!(back, cache);
    }

    #[test]
    fn output_is_deterministic() {
        let cache = field();
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_to(&cache, &mut a).unwrap();
        write_to(&cache.clone(), &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paths.json");
        let cache = field();
        save(&cache, &path).unwrap();
        let back = load(&path).unwrap();
        for (s, g, p) in cache.iter() {
            assert_eq!(back.lookup(s, g), Some(p.points()));
        }
        assert_eq!(back.len(), cache.len());
    }

    #[test]
    fn empty_cache_round_trips() {
        let mut buf = Vec::new();
        write_to(&PathCache::new(), &mut buf).unwrap();
        assert!(read_from(buf.as_slice()).unwrap().is_empty());
    }

    #[test]
    fn malformed_json() {
        let err = read_from(&b"{\"(0,0)\": [1, 2"[..]).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn bad_key() {
        let err = read_from(&br#"{"0,0": {}}"#[..]).unwrap_err();
        assert!(matches!(err, StoreError::Format(_)));
    }

    #[test]
    fn path_must_match_its_key() {
        let json = br#"{"(0,0)": {"(2,0)": [{"x":0,"y":0},{"x":1,"y":0}]}}"#;
        assert!(matches!(read_from(&json[..]), Err(StoreError::Format(_))));
        let empty = br#"{"(0,0)": {"(0,0)": []}}"#;
        assert!(matches!(read_from(&empty[..]), Err(StoreError::Format(_))));
        let jump = br#"{"(0,0)": {"(2,0)": [{"x":0,"y":0},{"x":2,"y":0}]}}"#;
        assert!(matches!(read_from(&jump[..]), Err(StoreError::Format(_))));
    }

    #[test]
    fn duplicate_keys_after_normalizing() {
        let json = br#"{"(0,0)": {"(1,0)": [{"x":0,"y":0},{"x":1,"y":0}],
                                  "(1, 0)": [{"x":0,"y":0},{"x":1,"y":0}]}}"#;
        assert!(matches!(read_from(&json[..]), Err(StoreError::Format(_))));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
