use std::fmt;
use std::io;

use fieldpath_core::Point;

/// Errors that can occur while loading or building a map.
#[derive(Debug)]
pub enum MapError {
    /// The map file could not be read.
    Io(io::Error),
    /// Fewer than the four header bytes.
    TooShort { len: usize },
    /// The tile payload does not hold exactly `width * height` bytes.
    SizeMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },
    /// Dimensions do not fit the 16-bit header fields.
    TooLarge { width: usize, height: usize },
    /// Rows of a text layout have different widths.
    InconsistentRows { row: usize },
    /// A character with no tile meaning was found in a text layout.
    InvalidRune { ch: char, pos: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map: {e}"),
            Self::TooShort { len } => write!(
                f,
                "map: file is too short to contain width and height ({len} bytes)"
            ),
            Self::SizeMismatch {
                width,
                height,
                actual,
            } => write!(
                f,
                "map: expected {} tile bytes for {width}x{height}, got {actual}",
                width * height
            ),
            Self::TooLarge { width, height } => {
                write!(f, "map: {width}x{height} exceeds 65535 on an axis")
            }
            Self::InconsistentRows { row } => {
                write!(f, "map layout: row {row} has a different width")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "map layout: invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
