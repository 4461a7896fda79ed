use maze_core::Point;

/// Neighbour enumeration for the unit-step searches.
pub trait Pather {
    /// Append the cells reachable in one step from `p` into `buf`. The
    /// caller clears `buf` before calling. Every pushed point must be an
    /// axis-aligned neighbour of `p`.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// Terrain for searches that may step onto blocked cells at a price.
pub trait Terrain {
    /// Whether `p` is inside the map.
    fn contains(&self, p: Point) -> bool;

    /// Whether the in-bounds cell `p` blocks ordinary movement.
    fn is_blocked(&self, p: Point) -> bool;
}
