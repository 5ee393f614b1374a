//! The `/find/{x1}/{y1}/{x2}/{y2}` query.
//!
//! A [`FindRequest`] names two tiles; answering it against a [`PathCache`]
//! (or a live search on the [`Grid`]) yields a [`FindResponse`] whose
//! `Display` is the plain-text reply served for the route.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use fieldpath_core::Point;
use fieldpath_map::Grid;
use fieldpath_paths::PathRange;

use crate::cache::PathCache;

const ROUTE_PREFIX: &str = "/find/";

/// A path query between two tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindRequest {
    pub from: Point,
    pub to: Point,
}

impl FindRequest {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            from: Point::new(x1, y1),
            to: Point::new(x2, y2),
        }
    }

    /// Answer from a precomputed cache.
    pub fn answer(&self, cache: &PathCache) -> FindResponse {
        match cache.get(self.from, self.to) {
            Some(path) => FindResponse::Found {
                request: *self,
                points: path.points().to_vec(),
                cost: path.cost(),
            },
            None => FindResponse::NotFound { request: *self },
        }
    }

    /// Answer by searching `grid` directly. `pr` must cover the grid.
    pub fn answer_live(&self, grid: &Grid, pr: &mut PathRange) -> FindResponse {
        match grid.find_path(pr, self.from, self.to) {
            Some((points, cost)) => FindResponse::Found {
                request: *self,
                points,
                cost,
            },
            None => FindResponse::NotFound { request: *self },
        }
    }
}

impl fmt::Display for FindRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ROUTE_PREFIX}{}/{}/{}/{}",
            self.from.x, self.from.y, self.to.x, self.to.y
        )
    }
}

impl FromStr for FindRequest {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .strip_prefix(ROUTE_PREFIX)
            .ok_or_else(|| QueryError::Route(s.to_string()))?;
        let segments: Vec<&str> = rest.split('/').collect();
        let [x1, y1, x2, y2] = segments[..] else {
            return Err(QueryError::Route(s.to_string()));
        };
        let num = |seg: &str| {
            seg.parse::<i32>().map_err(|source| QueryError::Coordinate {
                segment: seg.to_string(),
                source,
            })
        };
        Ok(Self::new(num(x1)?, num(y1)?, num(x2)?, num(y2)?))
    }
}

/// Errors from parsing a `/find` route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The route does not have the `/find/{x1}/{y1}/{x2}/{y2}` shape.
    Route(String),
    /// A coordinate segment is not an integer.
    Coordinate {
        segment: String,
        source: ParseIntError,
    },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route(s) => {
                write!(f, "expected {ROUTE_PREFIX}{{x1}}/{{y1}}/{{x2}}/{{y2}}, got {s:?}")
            }
            Self::Coordinate { segment, .. } => write!(f, "invalid coordinate {segment:?}"),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Route(_) => None,
            Self::Coordinate { source, .. } => Some(source),
        }
    }
}

/// The outcome of a [`FindRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindResponse {
    Found {
        request: FindRequest,
        points: Vec<Point>,
        cost: i32,
    },
    NotFound {
        request: FindRequest,
    },
}

impl FindResponse {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// The path, empty when not found.
    pub fn points(&self) -> &[Point] {
        match self {
            Self::Found { points, .. } => points,
            Self::NotFound { .. } => &[],
        }
    }
}

impl fmt::Display for FindResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found {
                request,
                points,
                cost,
            } => {
                writeln!(f, "You requested {request}")?;
                writeln!(f, "Path length: {}", points.len())?;
                writeln!(f, "Distance: {cost}")?;
                let steps: Vec<String> = points.iter().map(Point::to_string).collect();
                write!(f, "{}", steps.join(" "))
            }
            Self::NotFound { request } => {
                writeln!(f, "You requested {request}")?;
                write!(f, "Path not found")
            }
        }
    }
}
