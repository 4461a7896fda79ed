//! Weighted shortest path where changing facing costs extra.

use std::collections::BinaryHeap;

use maze_core::{Direction, Point};

use crate::Search;
use crate::search::next_generation;
use crate::traits::Pather;

/// Movement prices for the turn-penalty searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPenalty {
    /// Cost of one forward step.
    pub step: i64,
    /// Extra cost of a step whose direction differs from the current facing.
    pub turn: i64,
}

impl Default for TurnPenalty {
    fn default() -> Self {
        Self {
            step: 1,
            turn: 1000,
        }
    }
}

impl TurnPenalty {
    /// Price of moving one cell in `dir` while facing `facing`.
    #[inline]
    pub fn step_cost(self, facing: Direction, dir: Direction) -> i64 {
        if facing == dir {
            self.step
        } else {
            self.step + self.turn
        }
    }
}

/// Frontier entry, ordered so that `BinaryHeap` pops the cheapest first.
#[derive(Clone, Copy, PartialEq, Eq)]
struct TurnRef {
    cost: i64,
    idx: usize,
    facing: Direction,
}

impl Ord for TurnRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.idx.cmp(&other.idx))
            .then_with(|| self.facing.cmp(&other.facing))
    }
}

impl PartialOrd for TurnRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Search {
    /// Minimum cost from `start` (initially facing `facing`) to `goal`, in
    /// any final facing.
    ///
    /// A `(cell, facing)` pair is expanded at most once, on its first pop.
    /// Returns `None` if the goal cannot be reached or either endpoint lies
    /// outside the range.
    pub fn turn_cost<P: Pather>(
        &mut self,
        pather: &P,
        start: Point,
        facing: Direction,
        goal: Point,
        penalty: TurnPenalty,
    ) -> Option<i64> {
        let start_idx = self.idx(start)?;
        let goal_idx = self.idx(goal)?;

        let cur_gen = next_generation(&mut self.turn_generation, &mut self.turn_marks);

        let mut open = BinaryHeap::new();
        open.push(TurnRef {
            cost: 0,
            idx: start_idx,
            facing,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut found = None;

        while let Some(current) = open.pop() {
            if current.idx == goal_idx {
                found = Some(current.cost);
                break;
            }

            let key = current.idx * 4 + current.facing.index();
            if self.turn_marks[key] == cur_gen {
                continue;
            }
            self.turn_marks[key] = cur_gen;

            let cp = self.point(current.idx);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let Some(dir) = Direction::from_delta(np - cp) else {
                    continue;
                };
                if self.turn_marks[ni * 4 + dir.index()] == cur_gen {
                    continue;
                }
                open.push(TurnRef {
                    cost: current.cost + penalty.step_cost(current.facing, dir),
                    idx: ni,
                    facing: dir,
                });
            }
        }

        self.nbuf = nbuf;
        log::debug!("turn search {start} -> {goal}: {found:?}");
        found
    }
}
