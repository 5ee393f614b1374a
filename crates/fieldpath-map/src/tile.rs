//! Per-tile flags.

use std::ops::{BitAnd, BitOr};

/// Flags of a single map tile, stored as the raw byte from the map file.
///
/// Bit 0 is walkable, bit 1 snipe, bit 2 water and bit 3 cliff. Higher bits
/// are kept as-is so a loaded map re-encodes byte for byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Tile(pub u8);

impl Tile {
    pub const NOWALK: Self = Self(0);
    pub const WALK: Self = Self(1 << 0);
    pub const SNIPE: Self = Self(1 << 1);
    pub const WATER: Self = Self(1 << 2);
    pub const CLIFF: Self = Self(1 << 3);

    /// Whether all bits of `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Tile) -> bool {
        self.0 & other.0 == other.0
    }

    /// Passable by movement.
    #[inline]
    pub const fn walkable(self) -> bool {
        self.contains(Self::WALK)
    }

    #[inline]
    pub const fn snipe(self) -> bool {
        self.contains(Self::SNIPE)
    }

    #[inline]
    pub const fn water(self) -> bool {
        self.contains(Self::WATER)
    }

    #[inline]
    pub const fn cliff(self) -> bool {
        self.contains(Self::CLIFF)
    }
}

impl BitOr for Tile {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Tile {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
