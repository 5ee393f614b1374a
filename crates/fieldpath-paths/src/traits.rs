use fieldpath_core::Point;

/// A graph over tiles.
pub trait Pather {
    /// Push the tiles reachable in one step from `p` onto `buf`, which the
    /// caller has cleared.
    ///
    /// The order must be the same on every call for the same `p`: among
    /// equally short paths, it decides which one a search returns.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// A [`Pather`] whose steps have a cost.
pub trait WeightedPather: Pather {
    /// Cost of the step from `from` to the adjacent `to`; at least 1.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// A [`WeightedPather`] with a heuristic, as A* needs.
pub trait AstarPather: WeightedPather {
    /// Lower bound on the cost from `from` to `to`. It must also be
    /// consistent: `estimate(a, c) <= cost(a, b) + estimate(b, c)` for
    /// adjacent `a` and `b`.
    fn estimate(&self, from: Point, to: Point) -> i32;
}
