//! Shortest paths that may cross a limited number of blocked cells.

use std::collections::{HashSet, VecDeque};

use maze_core::Point;

use crate::Search;
use crate::traits::Terrain;

/// How a spent crossing budget comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Regen {
    /// Spent budget is gone for good.
    #[default]
    None,
    /// A state standing on a cell with no blocked in-bounds neighbour
    /// regains one unit, up to `cap`, before it expands.
    WhenClear { cap: u32 },
}

/// Crossing allowance for [`Search::budget_cost`].
///
/// Stepping onto a blocked cell spends one unit; a walker left with zero
/// units while on a blocked cell is dead. Crossing a single wall therefore
/// needs a `limit` of at least 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Budget {
    pub limit: u32,
    pub regen: Regen,
}

impl Budget {
    /// A budget of `limit` units that never regenerates.
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            regen: Regen::None,
        }
    }

    /// The same budget with a regeneration rule.
    pub fn with_regen(self, regen: Regen) -> Self {
        Self { regen, ..self }
    }
}

impl Search {
    /// Fewest unit steps from `start` to `goal` when blocked cells may be
    /// entered at the price of budget.
    ///
    /// States are `(cell, remaining)` pairs explored breadth-first, each at
    /// most once. Returns `None` if no route fits the budget.
    pub fn budget_cost<T: Terrain>(
        &mut self,
        terrain: &T,
        start: Point,
        goal: Point,
        budget: Budget,
    ) -> Option<i64> {
        let start_idx = self.idx(start)?;
        let goal_idx = self.idx(goal)?;

        let mut seen: HashSet<(usize, u32)> = HashSet::new();
        let mut queue: VecDeque<(usize, u32, i64)> = VecDeque::new();
        seen.insert((start_idx, budget.limit));
        queue.push_back((start_idx, budget.limit, 0));

        let mut found = None;

        while let Some((ci, mut remaining, cost)) = queue.pop_front() {
            if ci == goal_idx {
                found = Some(cost);
                break;
            }
            let cp = self.point(ci);
            let around = cp
                .neighbors_4()
                .map(|(_, n)| n)
                .into_iter()
                .filter(|&n| self.idx(n).is_some() && terrain.contains(n));

            if let Regen::WhenClear { cap } = budget.regen {
                if remaining < cap && !around.clone().any(|n| terrain.is_blocked(n)) {
                    remaining += 1;
                }
            }

            for np in around {
                let next = if terrain.is_blocked(np) {
                    match remaining.checked_sub(1) {
                        Some(r) if r > 0 => r,
                        _ => continue,
                    }
                } else {
                    remaining
                };
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if seen.insert((ni, next)) {
                    queue.push_back((ni, next, cost + 1));
                }
            }
        }

        log::debug!(
            "budget search {start} -> {goal} (limit {}): {found:?}",
            budget.limit
        );
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Passable;
    use crate::fixtures::{endpoints, random_maze};
    use maze_core::Grid;

    fn cost_of(input: &str, budget: Budget) -> Option<i64> {
        let grid: Grid = input.parse().unwrap();
        let (start, goal) = endpoints(&grid);
        Search::for_grid(&grid).budget_cost(&Passable::walls(&grid), start, goal, budget)
    }

    #[test]
    fn zero_budget_walks_open_cells() {
        assert_eq!(cost_of("S...E", Budget::new(0)), Some(4));
        assert_eq!(cost_of("S.#.E", Budget::new(0)), None);
    }

    #[test]
    fn a_wall_needs_two_units() {
        assert_eq!(cost_of("S.#.E", Budget::new(1)), None);
        assert_eq!(cost_of("S.#.E", Budget::new(2)), Some(4));
        assert_eq!(cost_of("S##.E", Budget::new(2)), None);
        assert_eq!(cost_of("S##.E", Budget::new(3)), Some(4));
    }

    #[test]
    fn prefers_open_route_when_shorter() {
        let grid = indoc::indoc! {"
            S.E
            .#.
            ...
        "};
        assert_eq!(cost_of(grid, Budget::new(5)), Some(2));
    }

    #[test]
    fn budget_regenerates_when_clear() {
        let track = "S.#.#.E";
        assert_eq!(cost_of(track, Budget::new(2)), None);
        assert_eq!(cost_of(track, Budget::new(3)), Some(6));
        let regen = Budget::new(2).with_regen(Regen::WhenClear { cap: 2 });
        assert_eq!(cost_of(track, regen), Some(6));
    }

    #[test]
    fn regen_respects_cap() {
        let track = "S..#.E";
        let regen = |cap| Budget::new(1).with_regen(Regen::WhenClear { cap });
        assert_eq!(cost_of(track, Budget::new(1)), None);
        assert_eq!(cost_of(track, regen(1)), None);
        assert_eq!(cost_of(track, regen(2)), Some(5));
        assert_eq!(cost_of(track, regen(3)), Some(5));
        // next to a wall from the start, nothing regenerates
        assert_eq!(cost_of("S#E", regen(3)), None);
    }

    #[test]
    fn unit_budget_matches_plain_bfs() {
        for seed in 0..20 {
            let grid = random_maze(seed, 8, 8, 0.3);
            let (start, goal) = endpoints(&grid);
            let pather = Passable::walls(&grid);
            let mut search = Search::for_grid(&grid);
            search.bfs_map(&pather, start);
            let d = search.bfs_at(goal);
            let expected = (d != crate::UNREACHABLE).then_some(d as i64);
            let got = search.budget_cost(&pather, start, goal, Budget::new(1));
            assert_eq!(got, expected, "seed {seed}:\n{grid}");
        }
    }
}
