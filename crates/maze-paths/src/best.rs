//! Every minimum-cost route between two cells, under turn penalties.

use std::collections::BTreeSet;

use maze_core::{Direction, Point};

use crate::Search;
use crate::traits::Pather;
use crate::turns::TurnPenalty;

/// Result of [`Search::best_paths`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BestPaths {
    /// Minimum total cost, or `None` if the goal is unreachable.
    pub cost: Option<i64>,
    /// Every distinct cell lying on at least one minimum-cost path.
    pub tiles: BTreeSet<Point>,
    /// How many minimum-cost paths were found.
    pub paths: usize,
}

impl BestPaths {
    /// Number of distinct cells on some best path.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

/// An in-flight route. Owns the full sequence of cells it walked.
struct Walker {
    pos: Point,
    facing: Direction,
    cost: i64,
    path: Vec<Point>,
}

impl Search {
    /// Find the minimum cost from `start` to `goal` together with every cell
    /// that lies on any route achieving it.
    ///
    /// This is an exhaustive depth-first enumeration: a walker never
    /// re-enters a cell already on its own path, and it is dropped once its
    /// cost exceeds the goal cost, or exceeds the best cost
    /// recorded for its cell by more than one turn penalty. The slack keeps
    /// routes that arrive at a cell in a worse facing but can still win
    /// after their next turn. The goal cost is known up front from
    /// [`turn_cost`](Self::turn_cost), so walkers are pruned against it from
    /// the first step.
    pub fn best_paths<P: Pather>(
        &mut self,
        pather: &P,
        start: Point,
        facing: Direction,
        goal: Point,
        penalty: TurnPenalty,
    ) -> BestPaths {
        let mut out = BestPaths::default();
        let Some(best) = self.turn_cost(pather, start, facing, goal, penalty) else {
            return out;
        };

        self.cell_best.fill(i64::MAX);
        let mut stack = vec![Walker {
            pos: start,
            facing,
            cost: 0,
            path: vec![start],
        }];

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(walker) = stack.pop() {
            let Some(ci) = self.idx(walker.pos) else {
                continue;
            };
            let local = &mut self.cell_best[ci];
            if walker.cost < *local {
                *local = walker.cost;
            }
            let local = *local;

            if walker.cost > best || walker.cost > local.saturating_add(penalty.turn) {
                continue;
            }

            if walker.pos == goal {
                out.tiles.extend(walker.path.iter().copied());
                out.paths += 1;
                continue;
            }

            nbuf.clear();
            pather.neighbors(walker.pos, &mut nbuf);

            for &np in nbuf.iter() {
                if walker.path.contains(&np) {
                    continue;
                }
                let Some(dir) = Direction::from_delta(np - walker.pos) else {
                    continue;
                };
                let mut path = Vec::with_capacity(walker.path.len() + 1);
                path.extend_from_slice(&walker.path);
                path.push(np);
                stack.push(Walker {
                    pos: np,
                    facing: dir,
                    cost: walker.cost + penalty.step_cost(walker.facing, dir),
                    path,
                });
            }
        }

        self.nbuf = nbuf;

        if out.paths > 0 {
            out.cost = Some(best);
        }
        log::debug!(
            "best paths {start} -> {goal}: cost {:?}, {} paths over {} tiles",
            out.cost,
            out.paths,
            out.tiles.len()
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Passable;
    use crate::fixtures::{MEDIUM_MAZE, OPEN_ROOM, SMALL_MAZE, endpoints, random_maze};
    use maze_core::Grid;

    fn best_of(grid: &Grid) -> BestPaths {
        let (start, goal) = endpoints(grid);
        Search::for_grid(grid).best_paths(
            &Passable::walls(grid),
            start,
            Direction::East,
            goal,
            TurnPenalty::default(),
        )
    }

    #[test]
    fn reference_mazes() {
        let small = best_of(&SMALL_MAZE.parse().unwrap());
        assert_eq!(small.cost, Some(7036));
        assert_eq!(small.tile_count(), 45);

        let medium = best_of(&MEDIUM_MAZE.parse().unwrap());
        assert_eq!(medium.cost, Some(11048));
        assert_eq!(medium.tile_count(), 64);
    }

    #[test]
    fn open_room_has_one_best_route() {
        let grid: Grid = OPEN_ROOM.parse().unwrap();
        let best = best_of(&grid);
        assert_eq!(best.cost, Some(1006));
        assert_eq!(best.paths, 1);
        let expected: BTreeSet<Point> = [(0, 0), (1, 0), (2, 0), (3, 0), (3, 1), (3, 2), (3, 3)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect();
        assert_eq!(best.tiles, expected);
    }

    #[test]
    fn large_open_room_is_pruned_by_the_known_cost() {
        let mut grid = Grid::new(20, 20, maze_core::tile::EMPTY);
        grid.set(Point::new(0, 0), maze_core::tile::START);
        grid.set(Point::new(19, 19), maze_core::tile::END);
        let best = best_of(&grid);
        assert_eq!(best.cost, Some(1038));
        assert_eq!(best.paths, 1);
        assert_eq!(best.tile_count(), 39);
    }

    #[test]
    fn tied_routes_share_tiles_once() {
        // Around the pillar either way costs the same.
        let grid: Grid = indoc::indoc! {"
            #####
            #...#
            #S#E#
            #...#
            #####
        "}
        .parse()
        .unwrap();
        let best = best_of(&grid);
        assert_eq!(best.cost, Some(3004));
        assert_eq!(best.paths, 2);
        assert_eq!(best.tile_count(), 8);
    }

    #[test]
    fn unreachable_goal_has_no_tiles() {
        let best = best_of(&"S#E".parse().unwrap());
        assert_eq!(best.cost, None);
        assert!(best.tiles.is_empty());
        assert_eq!(best.paths, 0);
    }

    #[test]
    fn agrees_with_turn_cost_on_random_mazes() {
        for seed in 0..20 {
            let grid = random_maze(seed, 7, 6, 0.3);
            let (start, goal) = endpoints(&grid);
            let pather = Passable::walls(&grid);
            let mut search = Search::for_grid(&grid);
            let penalty = TurnPenalty::default();
            let scalar = search.turn_cost(&pather, start, Direction::East, goal, penalty);
            let best = search.best_paths(&pather, start, Direction::East, goal, penalty);
            assert_eq!(best.cost, scalar, "seed {seed}:\n{grid}");
            if best.cost.is_some() {
                assert!(best.tile_count() >= 2, "seed {seed}");
                assert!(best.tiles.contains(&start) && best.tiles.contains(&goal));
            } else {
                assert!(best.tiles.is_empty());
            }
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn best_paths_round_trip() {
        let best = BestPaths {
            cost: Some(1004),
            tiles: [Point::new(0, 0), Point::new(1, 0)].into_iter().collect(),
            paths: 1,
        };
        let json = serde_json::to_string(&best).unwrap();
        let back: BestPaths = serde_json::from_str(&json).unwrap();
        assert_eq!(best, back);
    }
}
