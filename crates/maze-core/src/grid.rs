//! The [`Grid`] type: a rectangular map from [`Point`] to a character tag.
//!
//! A `Grid` owns its cells. Cloning copies them, and transformations such as
//! [`rotate`](Grid::rotate) and [`overlay`](Grid::overlay) return new grids,
//! so two logical views of a maze never alias the same storage.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;
use crate::geom::{Direction, Point, Range, Rotation};

/// A 2D grid of single-character cell tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGrid")
)]
pub struct Grid {
    cells: Vec<char>,
    width: usize,
    height: usize,
}

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    cells: Vec<char>,
    width: usize,
    height: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, GridError> {
        let expected = raw.width.checked_mul(raw.height);
        if expected != Some(raw.cells.len()) {
            return Err(GridError::CellCount {
                width: raw.width,
                height: raw.height,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            cells: raw.cells,
            width: raw.width,
            height: raw.height,
        })
    }
}

impl Grid {
    /// Create a `width` × `height` grid with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: char) -> Self {
        Self {
            cells: vec![fill; width * height],
            width,
            height,
        }
    }

    /// Build a grid from rows of equal length.
    ///
    /// Line numbers in [`GridError::Ragged`] are 1-based positions within
    /// `rows`.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0;
        for (l, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row.as_ref().chars());
            let found = cells.len() - before;
            let expected = *width.get_or_insert(found);
            if found != expected || found == 0 {
                return Err(GridError::Ragged {
                    line: l + 1,
                    expected,
                    found,
                });
            }
            height += 1;
        }
        let width = width.ok_or(GridError::Empty)?;
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The rectangle `[(0, 0), (width, height))`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.contains(p).then(|| p.y as usize * self.width + p.x as usize)
    }

    /// The tag at `p`, or `None` if `p` is out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<char> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the tag at `p`. Returns `false` (and does nothing) if `p` is out
    /// of bounds.
    pub fn set(&mut self, p: Point, tag: char) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = tag;
                true
            }
            None => false,
        }
    }

    /// The in-bounds axis-aligned neighbours of `p` whose tag is not in
    /// `blocked`, keyed by direction and always yielded north, east, south,
    /// west.
    pub fn neighbors<'a>(
        &'a self,
        p: Point,
        blocked: &'a [char],
    ) -> impl Iterator<Item = (Direction, Point)> + 'a {
        p.neighbors_4()
            .into_iter()
            .filter(move |&(_, n)| self.at(n).is_some_and(|tag| !blocked.contains(&tag)))
    }

    /// First occurrence of `tag` scanning row-major from (0, 0).
    pub fn location_of(&self, tag: char) -> Option<Point> {
        self.cells
            .iter()
            .position(|&c| c == tag)
            .map(|i| Point::new((i % self.width) as i32, (i / self.width) as i32))
    }

    /// Like [`location_of`](Self::location_of), but a missing tag is an error.
    pub fn require(&self, tag: char) -> Result<Point, GridError> {
        self.location_of(tag).ok_or(GridError::MissingTile(tag))
    }

    /// How many cells carry `tag`.
    pub fn count(&self, tag: char) -> usize {
        self.cells.iter().filter(|&&c| c == tag).count()
    }

    /// Row-major iterator over `(Point, tag)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, char)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// The rows as slices of tags.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    /// A new grid turned a quarter turn in the given direction.
    pub fn rotate(&self, rotation: Rotation) -> Grid {
        let (w, h) = (self.width, self.height);
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..w {
            for x in 0..h {
                let src = match rotation {
                    Rotation::Clockwise => (h - 1 - x) * w + y,
                    Rotation::CounterClockwise => x * w + (w - 1 - y),
                };
                cells.push(self.cells[src]);
            }
        }
        Grid {
            cells,
            width: h,
            height: w,
        }
    }

    /// A copy of this grid with every in-bounds point of `points` set to
    /// `mark`.
    pub fn overlay<'a>(&self, points: impl IntoIterator<Item = &'a Point>, mark: char) -> Grid {
        let mut out = self.clone();
        for &p in points {
            out.set(p, mark);
        }
        out
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse one row per line. Blank lines before and after the grid are
    /// ignored; blank lines inside it are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        let first = lines.iter().position(|l| !l.is_empty());
        let last = lines.iter().rposition(|l| !l.is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            return Err(GridError::Empty);
        };
        Grid::from_rows(lines[first..=last].iter()).map_err(|e| match e {
            GridError::Ragged {
                line,
                expected,
                found,
            } => GridError::Ragged {
                line: line + first,
                expected,
                found,
            },
            other => other,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for &c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{BLOCKING, END, START, WALL};

    const ROOM: &str = indoc::indoc! {"
        #####
        #S..#
        #.#E#
        #####
    "};

    #[test]
    fn parse_and_size() {
        let g: Grid = ROOM.parse().unwrap();
        assert_eq!(g.width(), 5);
        assert_eq!(g.height(), 4);
        assert_eq!(g.len(), 20);
        assert_eq!(g.to_string(), ROOM.trim_end());
    }

    #[test]
    fn contains_and_at_agree_everywhere() {
        let g: Grid = ROOM.parse().unwrap();
        for y in -2..6 {
            for x in -2..7 {
                let p = Point::new(x, y);
                let inside = (0..5).contains(&x) && (0..4).contains(&y);
                assert_eq!(g.contains(p), inside, "{p}");
                assert_eq!(g.at(p).is_some(), inside, "{p}");
            }
        }
        assert_eq!(g.at(Point::new(1, 1)), Some(START));
        assert_eq!(g.at(Point::new(3, 2)), Some(END));
    }

    #[test]
    fn set_out_of_bounds_is_noop() {
        let mut g = Grid::new(3, 2, '.');
        assert!(g.set(Point::new(2, 1), 'X'));
        assert!(!g.set(Point::new(3, 1), 'X'));
        assert_eq!(g.at(Point::new(2, 1)), Some('X'));
        assert_eq!(g.count('X'), 1);
    }

    #[test]
    fn neighbors_skip_blocked_and_out_of_bounds() {
        let g: Grid = ROOM.parse().unwrap();
        let n: Vec<_> = g.neighbors(Point::new(1, 1), &BLOCKING).collect();
        assert_eq!(
            n,
            [
                (Direction::East, Point::new(2, 1)),
                (Direction::South, Point::new(1, 2)),
            ]
        );
        let corner: Vec<_> = g.neighbors(Point::new(0, 0), &[]).collect();
        assert_eq!(corner.len(), 2);
    }

    #[test]
    fn location_of_scans_row_major() {
        let g: Grid = "..x\nx..".parse().unwrap();
        assert_eq!(g.location_of('x'), Some(Point::new(2, 0)));
        assert_eq!(g.location_of('?'), None);
        assert_eq!(g.require('?'), Err(GridError::MissingTile('?')));
        assert_eq!(g.require(WALL), Err(GridError::MissingTile(WALL)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!("\n\n".parse::<Grid>(), Err(GridError::Empty));
        assert_eq!(
            "\nAB\nCDE\n".parse::<Grid>(),
            Err(GridError::Ragged {
                line: 3,
                expected: 2,
                found: 3
            })
        );
        assert!("AB\n\nCD".parse::<Grid>().is_err());
    }

    #[test]
    fn rotate_returns_new_grid() {
        let g: Grid = "AB\nCD".parse().unwrap();
        let cw = g.rotate(Rotation::Clockwise);
        assert_eq!(cw.to_string(), "CA\nDB");
        let ccw = g.rotate(Rotation::CounterClockwise);
        assert_eq!(ccw.to_string(), "BD\nAC");
        assert_eq!(g.to_string(), "AB\nCD");
    }

    #[test]
    fn rotate_non_square() {
        let g: Grid = "ABC\nDEF".parse().unwrap();
        let cw = g.rotate(Rotation::Clockwise);
        assert_eq!((cw.width(), cw.height()), (2, 3));
        assert_eq!(cw.to_string(), "DA\nEB\nFC");
        assert_eq!(cw.rotate(Rotation::CounterClockwise), g);
    }

    #[test]
    fn overlay_marks_a_copy() {
        let g: Grid = ROOM.parse().unwrap();
        let marked = g.overlay(&[Point::new(2, 1), Point::new(9, 9)], 'O');
        assert_eq!(marked.at(Point::new(2, 1)), Some('O'));
        assert_eq!(g.at(Point::new(2, 1)), Some('.'));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g: Grid = "S.#\n..E".parse().unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn cell_count_must_match_dimensions() {
        let short = r#"{"cells":["a"],"width":2,"height":2}"#;
        let err = serde_json::from_str::<Grid>(short).unwrap_err();
        assert!(err.to_string().contains("2x2 grid"), "{err}");

        let overflow = format!(r#"{{"cells":[],"width":{},"height":2}}"#, usize::MAX);
        assert!(serde_json::from_str::<Grid>(&overflow).is_err());

        let empty: Grid = serde_json::from_str(r#"{"cells":[],"width":0,"height":3}"#).unwrap();
        assert_eq!(empty.height(), 3);
    }
}
