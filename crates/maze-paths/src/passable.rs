use maze_core::{Grid, Point, tile};

use crate::traits::{Pather, Terrain};

/// A [`Grid`] viewed as a maze: cells whose tag is in `blocked` cannot be
/// entered, every other in-bounds cell can.
#[derive(Debug, Clone, Copy)]
pub struct Passable<'a> {
    grid: &'a Grid,
    blocked: &'a [char],
}

impl<'a> Passable<'a> {
    /// View `grid` with a custom set of blocking tags.
    pub fn new(grid: &'a Grid, blocked: &'a [char]) -> Self {
        Self { grid, blocked }
    }

    /// View `grid` with walls and dead-end fill as the blocking tags.
    pub fn walls(grid: &'a Grid) -> Self {
        Self::new(grid, &tile::BLOCKING)
    }

    /// The underlying grid.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }
}

impl Pather for Passable<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(self.grid.neighbors(p, self.blocked).map(|(_, n)| n));
    }
}

impl Terrain for Passable<'_> {
    fn contains(&self, p: Point) -> bool {
        self.grid.contains(p)
    }

    fn is_blocked(&self, p: Point) -> bool {
        self.grid.at(p).is_some_and(|tag| self.blocked.contains(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_block_and_floor_does_not() {
        let g: Grid = "#.\n=S".parse().unwrap();
        let p = Passable::walls(&g);
        assert!(p.is_blocked(Point::new(0, 0)));
        assert!(p.is_blocked(Point::new(0, 1)));
        assert!(!p.is_blocked(Point::new(1, 0)));
        assert!(!p.is_blocked(Point::new(5, 5)));

        let mut buf = Vec::new();
        p.neighbors(Point::new(1, 1), &mut buf);
        assert_eq!(buf, [Point::new(1, 0)]);
    }

    #[test]
    fn custom_blocked_set() {
        let g: Grid = "a.b".parse().unwrap();
        let p = Passable::new(&g, &['b']);
        let mut buf = Vec::new();
        p.neighbors(Point::new(1, 0), &mut buf);
        assert_eq!(buf, [Point::new(0, 0)]);
    }
}
