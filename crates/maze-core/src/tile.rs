//! Cell tags understood by the maze searches.

/// Impassable wall.
pub const WALL: char = '#';
/// Open floor.
pub const EMPTY: char = '.';
/// Search origin.
pub const START: char = 'S';
/// Search goal.
pub const END: char = 'E';
/// Marker left behind by dead-end reduction. Blocks like a wall but stays
/// distinguishable from one.
pub const FILL: char = '=';

/// Tags that stop movement during search.
pub const BLOCKING: [char; 2] = [WALL, FILL];

/// Whether `tag` can be walked on.
#[inline]
pub fn is_passable(tag: char) -> bool {
    !BLOCKING.contains(&tag)
}
