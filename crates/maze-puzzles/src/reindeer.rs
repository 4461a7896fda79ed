//! Reindeer maze: the cheapest walk from `S` to `E` when every turn costs
//! a thousand steps, and the tiles shared by all such walks.

use maze_core::{Direction, Grid, Point, tile};
use maze_paths::{BestPaths, Passable, Search, TurnPenalty, fill_dead_ends};

use crate::PuzzleError;

/// A parsed maze with its dead ends already filled.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    start: Point,
    end: Point,
    filled: usize,
}

impl Maze {
    /// Parse a maze holding exactly one `S` and one `E`.
    pub fn parse(input: &str) -> Result<Self, PuzzleError> {
        let mut grid: Grid = input.parse()?;
        let start = grid.require(tile::START)?;
        let end = grid.require(tile::END)?;
        for tag in [tile::START, tile::END] {
            if grid.count(tag) > 1 {
                return Err(PuzzleError::DuplicateTile(tag));
            }
        }
        let filled = fill_dead_ends(&mut grid);
        Ok(Self {
            grid,
            start,
            end,
            filled,
        })
    }

    /// The reduced grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// How many cells dead-end reduction filled.
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Lowest score from the start, facing east, to the end.
    pub fn lowest_score(&self) -> Option<i64> {
        Search::for_grid(&self.grid).turn_cost(
            &Passable::walls(&self.grid),
            self.start,
            Direction::East,
            self.end,
            TurnPenalty::default(),
        )
    }

    /// Every tile on some lowest-score walk.
    pub fn best_seats(&self) -> BestPaths {
        let best = Search::for_grid(&self.grid).best_paths(
            &Passable::walls(&self.grid),
            self.start,
            Direction::East,
            self.end,
            TurnPenalty::default(),
        );
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("best seats:\n{}", self.grid.overlay(&best.tiles, 'O'));
        }
        best
    }
}

/// Lowest score and number of best seats.
pub fn solve(input: &str) -> Result<(i64, usize), PuzzleError> {
    let maze = Maze::parse(input)?;
    log::debug!("filled {} dead-end cells", maze.filled());
    let score = maze.lowest_score().ok_or(PuzzleError::Unreachable)?;
    let seats = maze.best_seats();
    Ok((score, seats.tile_count()))
}
