//! Search algorithms over character grids.
//!
//! This crate provides the search engine used by the maze puzzles:
//!
//! - **Turn-penalty Dijkstra** over `(cell, facing)` states ([`Search::turn_cost`])
//! - **All optimal paths** with the set of tiles they cover ([`Search::best_paths`])
//! - **BFS** unweighted distance maps ([`Search::bfs_map`])
//! - **Reachability** flood fill for incremental obstacles ([`Search::reachable`])
//! - **Budgeted search** that may cross a bounded number of blocked cells
//!   ([`Search::budget_cost`])
//! - **Dead-end reduction** of a maze before searching it ([`fill_dead_ends`])
//!
//! All searches run through [`Search`], which owns its cost tables and
//! reinitializes them for every query.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | turn costs, best paths, BFS, reachability |
//! | [`Terrain`] | budgeted search |

mod best;
mod bfs;
mod budget;
mod deadend;
mod distance;
mod passable;
mod search;
mod traits;
mod turns;

pub use best::BestPaths;
pub use budget::{Budget, Regen};
pub use deadend::fill_dead_ends;
pub use distance::manhattan;
pub use passable::Passable;
pub use search::{Search, UNREACHABLE};
pub use traits::{Pather, Terrain};
pub use turns::TurnPenalty;
