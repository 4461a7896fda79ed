//! Falling bytes: walls appear one at a time in a square memory space, and
//! the question is how long the exit stays reachable.

use maze_core::{Grid, Point, tile};
use maze_paths::{Passable, Search, UNREACHABLE};

use crate::PuzzleError;
use crate::error::parse_field;

/// Parse one `x,y` pair per line. Blank lines are skipped.
pub fn parse_bytes(input: &str) -> Result<Vec<Point>, PuzzleError> {
    let mut bytes = Vec::new();
    for (i, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (x, y) = line
            .split_once(',')
            .ok_or_else(|| PuzzleError::line(i + 1, format!("expected \"x,y\", got {line:?}")))?;
        bytes.push(Point::new(parse_field(x, i + 1)?, parse_field(y, i + 1)?));
    }
    Ok(bytes)
}

/// A square memory space spanning `(0, 0)` to `(size, size)` inclusive.
pub struct MemorySpace {
    grid: Grid,
    search: Search,
}

impl MemorySpace {
    pub fn new(size: usize) -> Self {
        let grid = Grid::new(size + 1, size + 1, tile::EMPTY);
        let search = Search::for_grid(&grid);
        Self { grid, search }
    }

    /// Top-left corner.
    pub fn entrance(&self) -> Point {
        Point::ZERO
    }

    /// Bottom-right corner.
    pub fn exit(&self) -> Point {
        Point::new(self.grid.width() as i32 - 1, self.grid.height() as i32 - 1)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Corrupt every listed cell. Bytes outside the space are ignored.
    pub fn drop_bytes(&mut self, bytes: &[Point]) {
        for &b in bytes {
            if !self.grid.set(b, tile::WALL) {
                log::debug!("byte {b} falls outside the memory space");
            }
        }
    }

    fn is_open(&self, p: Point) -> bool {
        self.grid.at(p).is_some_and(tile::is_passable)
    }

    /// Fewest steps from the entrance to the exit.
    pub fn steps_to_exit(&mut self) -> Option<i32> {
        if !self.is_open(self.entrance()) {
            return None;
        }
        let (from, to) = (self.entrance(), self.exit());
        self.search.bfs_map(&Passable::walls(&self.grid), from);
        let d = self.search.bfs_at(to);
        (d != UNREACHABLE).then_some(d)
    }

    /// Whether the exit can be reached at all.
    pub fn exit_reachable(&mut self) -> bool {
        let (from, to) = (self.entrance(), self.exit());
        self.is_open(from)
            && self.is_open(to)
            && self.search.reachable(&Passable::walls(&self.grid), from, to)
    }
}

/// Steps to the exit once the first `fallen` bytes have landed.
pub fn shortest_exit(bytes: &[Point], fallen: usize, size: usize) -> Option<i32> {
    let mut space = MemorySpace::new(size);
    space.drop_bytes(&bytes[..fallen.min(bytes.len())]);
    space.steps_to_exit()
}

/// The first byte, by index, whose landing cuts the entrance off from the
/// exit.
///
/// The first `fallen` bytes are dropped at once; the space is checked after
/// each byte past them. If those bytes already cut the exit off, the scan
/// starts over from the first byte.
pub fn first_blocker(bytes: &[Point], fallen: usize, size: usize) -> Option<(usize, Point)> {
    let mut space = MemorySpace::new(size);
    let mut from = fallen.min(bytes.len());
    space.drop_bytes(&bytes[..from]);
    if !space.exit_reachable() {
        log::debug!("exit already blocked after {from} bytes, rescanning");
        space = MemorySpace::new(size);
        from = 0;
    }
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        space.drop_bytes(&[b]);
        if !space.exit_reachable() {
            return Some((i, b));
        }
    }
    None
}

/// Steps to the exit after `fallen` bytes, and the first blocking byte.
pub fn solve(
    input: &str,
    size: usize,
    fallen: usize,
) -> Result<(Option<i32>, Option<(usize, Point)>), PuzzleError> {
    let bytes = parse_bytes(input)?;
    log::debug!("{} bytes parsed", bytes.len());
    Ok((
        shortest_exit(&bytes, fallen, size),
        first_blocker(&bytes, fallen, size),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = indoc::indoc! {"
        5,4
        4,2
        4,5
        3,0
        2,1
        6,3
        2,4
        1,5
        0,6
        3,3
        2,6
        5,1
        1,2
        5,5
        2,5
        6,5
        1,4
        0,4
        6,4
        1,1
        6,1
        1,0
        0,5
        1,6
        2,0
    "};

    #[test]
    fn example_steps_and_blocker() {
        let bytes = parse_bytes(EXAMPLE).unwrap();
        assert_eq!(bytes.len(), 25);
        assert_eq!(shortest_exit(&bytes, 12, 6), Some(22));
        assert_eq!(first_blocker(&bytes, 12, 6), Some((20, Point::new(6, 1))));
    }

    #[test]
    fn blocker_found_when_initial_bytes_already_cut_the_exit() {
        let bytes = parse_bytes(EXAMPLE).unwrap();
        assert_eq!(first_blocker(&bytes, 25, 6), Some((20, Point::new(6, 1))));
    }

    #[test]
    fn empty_space() {
        assert_eq!(shortest_exit(&[], 0, 6), Some(12));
        assert_eq!(first_blocker(&[], 0, 6), None);
    }

    #[test]
    fn byte_on_the_entrance_blocks() {
        let bytes = [Point::new(2, 2), Point::ZERO];
        assert_eq!(shortest_exit(&bytes, 2, 3), None);
        assert_eq!(first_blocker(&bytes, 0, 3), Some((1, Point::ZERO)));
    }

    #[test]
    fn strict_parsing() {
        assert_eq!(
            parse_bytes("1,2\n\n3;4\n"),
            Err(PuzzleError::line(3, "expected \"x,y\", got \"3;4\""))
        );
        assert!(matches!(
            parse_bytes("1,x"),
            Err(PuzzleError::Line { line: 1, .. })
        ));
    }
}
