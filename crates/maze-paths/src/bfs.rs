use std::collections::VecDeque;

use maze_core::Point;

use crate::Search;
use crate::search::{UNREACHABLE, next_generation};
use crate::traits::Pather;

impl Search {
    /// Breadth-first distances from `source` to every cell of the range.
    ///
    /// Each step costs 1. Returns the row-major distance table, with
    /// [`UNREACHABLE`] for cells that were not reached; it stays valid for
    /// [`bfs_at`](Self::bfs_at) until the next call.
    pub fn bfs_map<P: Pather>(&mut self, pather: &P, source: Point) -> &[i32] {
        self.bfs_map.fill(UNREACHABLE);
        let Some(si) = self.idx(source) else {
            return &self.bfs_map;
        };

        let mut queue: VecDeque<usize> = VecDeque::new();
        self.bfs_map[si] = 0;
        queue.push_back(si);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let next_dist = self.bfs_map[ci] + 1;
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[ni] = next_dist;
                queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;
        &self.bfs_map
    }

    /// Query the BFS distance at a specific point.
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached by the last `bfs_map` call.
    pub fn bfs_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.bfs_map[i],
            None => UNREACHABLE,
        }
    }

    /// Whether `to` can be reached from `from`.
    ///
    /// A depth-first flood that stops as soon as `to` is popped; it answers
    /// feasibility only and computes no costs.
    pub fn reachable<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> bool {
        let (Some(si), Some(gi)) = (self.idx(from), self.idx(to)) else {
            return false;
        };

        let cur_gen = next_generation(&mut self.flood_generation, &mut self.flood_marks);
        let mut nbuf = std::mem::take(&mut self.nbuf);

        self.flood_stack.clear();
        self.flood_stack.push(si);
        self.flood_marks[si] = cur_gen;

        let mut found = false;
        while let Some(ci) = self.flood_stack.pop() {
            if ci == gi {
                found = true;
                break;
            }
            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                if let Some(ni) = self.idx(np) {
                    if self.flood_marks[ni] != cur_gen {
                        self.flood_marks[ni] = cur_gen;
                        self.flood_stack.push(ni);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        found
    }
}
