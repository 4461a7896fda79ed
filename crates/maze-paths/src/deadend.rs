use maze_core::{Grid, Point, tile};

/// Whether `p` is an open cell, other than the start or goal, with exactly
/// one open neighbour. Returns that neighbour.
fn dead_end_exit(grid: &Grid, p: Point) -> Option<Point> {
    match grid.at(p) {
        Some(tile::START | tile::END) | None => return None,
        Some(tag) if !tile::is_passable(tag) => return None,
        Some(_) => {}
    }
    let mut open = grid.neighbors(p, &tile::BLOCKING).map(|(_, n)| n);
    let exit = open.next()?;
    open.next().is_none().then_some(exit)
}

/// Fill every dead-end corridor of `grid` with [`tile::FILL`].
///
/// Each scan looks for dead ends and walks from each one toward the rest of
/// the maze, filling as it goes, until it reaches a junction, the start or
/// the goal. Scans repeat until one fills nothing. Returns the number of
/// filled cells; a second call on the result returns 0.
pub fn fill_dead_ends(grid: &mut Grid) -> usize {
    let mut filled = 0;
    loop {
        let mut pass = 0;
        for p in grid.bounds() {
            let mut cur = p;
            while let Some(next) = dead_end_exit(grid, cur) {
                grid.set(cur, tile::FILL);
                pass += 1;
                cur = next;
            }
        }
        if pass == 0 {
            break;
        }
        filled += pass;
    }
    log::debug!("dead-end reduction filled {filled} cells");
    if log::log_enabled!(log::Level::Trace) {
        log::trace!("reduced maze:\n{grid}");
    }
    filled
}
