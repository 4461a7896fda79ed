//! Race track cheats: how much time is saved by briefly passing through
//! walls on a single-lane track.

use maze_core::{Grid, Point, tile};
use maze_paths::{Budget, Passable, Search, UNREACHABLE, manhattan};

use crate::PuzzleError;

/// A parsed track with every cell's distance to the end.
pub struct Track {
    grid: Grid,
    start: Point,
    end: Point,
    // steps to the end, indexed row-major
    to_end: Vec<i32>,
}

impl Track {
    pub fn parse(input: &str) -> Result<Self, PuzzleError> {
        let grid: Grid = input.parse()?;
        let start = grid.require(tile::START)?;
        let end = grid.require(tile::END)?;

        let mut search = Search::for_grid(&grid);
        let to_end = search.bfs_map(&Passable::walls(&grid), end).to_vec();

        let track = Self {
            grid,
            start,
            end,
            to_end,
        };
        if track.distance(start).is_none() {
            return Err(PuzzleError::Unreachable);
        }
        Ok(track)
    }

    fn distance(&self, p: Point) -> Option<i32> {
        if !self.grid.contains(p) {
            return None;
        }
        let d = self.to_end[p.y as usize * self.grid.width() + p.x as usize];
        (d != UNREACHABLE).then_some(d)
    }

    /// Steps from start to end without cheating.
    pub fn baseline(&self) -> i32 {
        self.distance(self.start).unwrap_or(UNREACHABLE)
    }

    /// Count cheats of at most `max_cheat` steps that save at least
    /// `min_savings` steps.
    ///
    /// A cheat jumps from any track cell to an open track cell within
    /// `max_cheat` Manhattan distance; its saving is the drop in remaining
    /// distance minus the length of the jump.
    pub fn count_cheats(&self, min_savings: i32, max_cheat: u32) -> usize {
        // no jump within the grid is longer than its width plus height
        let span = u32::try_from(self.grid.width() + self.grid.height()).unwrap_or(u32::MAX);
        let max_jump = i32::try_from(max_cheat.min(span)).unwrap_or(i32::MAX);
        let mut count = 0;
        for (from, _) in self.grid.iter() {
            let Some(df) = self.distance(from) else {
                continue;
            };
            for dy in -max_jump..=max_jump {
                let reach = max_jump - dy.abs();
                for dx in -reach..=reach {
                    let to = from.shift(dx, dy);
                    if !matches!(self.grid.at(to), Some(tile::EMPTY | tile::END)) {
                        continue;
                    }
                    let Some(dt) = self.distance(to) else {
                        continue;
                    };
                    if df - dt - manhattan(from, to) >= min_savings {
                        count += 1;
                    }
                }
            }
        }
        log::debug!("{count} cheats of up to {max_cheat} save at least {min_savings}");
        count
    }

    /// Steps saved by the best route allowed to spend `budget` on walls.
    pub fn best_cheat_saving(&self, budget: Budget) -> Option<i64> {
        let cost = Search::for_grid(&self.grid).budget_cost(
            &Passable::walls(&self.grid),
            self.start,
            self.end,
            budget,
        )?;
        Some(i64::from(self.baseline()) - cost)
    }
}

/// Cheat counts for short and long cheats.
pub fn solve(
    input: &str,
    min_savings: i32,
    short: u32,
    long: u32,
) -> Result<(usize, usize), PuzzleError> {
    let track = Track::parse(input)?;
    log::debug!("baseline {} steps", track.baseline());
    Ok((
        track.count_cheats(min_savings, short),
        track.count_cheats(min_savings, long),
    ))
}
