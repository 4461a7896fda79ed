use maze_core::{Grid, Point, Range};

/// Sentinel value meaning "unreachable" in BFS distance maps.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Owner of the cost tables and frontiers used by every search on one grid
/// rectangle.
///
/// Each query starts from a fresh cost table: tables are either reset or
/// invalidated through a generation counter, so repeated queries (such as a
/// reachability check after every dropped obstacle) do not reallocate.
/// Nothing is shared between two `Search` values.
pub struct Search {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    // turn-penalty Dijkstra: visited marks per (cell, facing)
    pub(crate) turn_marks: Vec<u32>,
    pub(crate) turn_generation: u32,
    // all-optimal-paths: best cost seen per cell
    pub(crate) cell_best: Vec<i64>,
    // BFS distance table
    pub(crate) bfs_map: Vec<i32>,
    // reachability flood caches
    pub(crate) flood_marks: Vec<u32>,
    pub(crate) flood_generation: u32,
    pub(crate) flood_stack: Vec<usize>,
    // shared scratch buffer for neighbour queries
    pub(crate) nbuf: Vec<Point>,
}

impl Search {
    /// Create a new `Search` for the given rectangle.
    pub fn new(rng: Range) -> Self {
        let w = rng.width().max(0) as usize;
        let len = rng.len();
        Self {
            rng,
            width: w,
            turn_marks: vec![0; len * 4],
            turn_generation: 0,
            cell_best: vec![i64::MAX; len],
            bfs_map: vec![UNREACHABLE; len],
            flood_marks: vec![0; len],
            flood_generation: 0,
            flood_stack: Vec::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Create a `Search` covering the whole of `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.bounds())
    }

    /// The rectangle being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

/// Advance a generation counter, clearing `marks` when it wraps so that no
/// stale mark can match the new generation.
pub(crate) fn next_generation(generation: &mut u32, marks: &mut [u32]) -> u32 {
    *generation = generation.wrapping_add(1);
    if *generation == 0 {
        marks.fill(0);
        *generation = 1;
    }
    *generation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idx_and_point_round_trip() {
        let s = Search::new(Range::new(2, 3, 7, 6));
        assert_eq!(s.idx(Point::new(2, 3)), Some(0));
        assert_eq!(s.idx(Point::new(6, 5)), Some(14));
        assert_eq!(s.idx(Point::new(7, 5)), None);
        for i in 0..15 {
            assert_eq!(s.idx(s.point(i)), Some(i));
        }
    }

    #[test]
    fn generation_wrap_clears_marks() {
        let mut generation = u32::MAX;
        let mut marks = vec![1, u32::MAX, 7];
        assert_eq!(next_generation(&mut generation, &mut marks), 1);
        assert_eq!(marks, [0, 0, 0]);
    }
}
