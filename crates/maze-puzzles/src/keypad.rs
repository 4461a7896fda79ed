//! Keypad robot chain: a code is typed on a numeric keypad by a robot,
//! which is driven from a directional keypad by another robot, and so on
//! until the directional keypad a human presses.

use std::collections::HashMap;

use maze_core::{Grid, Point};

use crate::PuzzleError;
use crate::error::parse_field;

/// Tag of the cell no robot arm may hover over.
const GAP: char = ' ';
/// The confirm key present on both keypads.
const ACTIVATE: char = 'A';

const NUMERIC: [&str; 4] = ["789", "456", "123", " 0A"];
const DIRECTIONAL: [&str; 2] = [" ^A", "<v>"];

/// A keypad layout, with the gap position looked up once.
#[derive(Debug, Clone)]
pub struct Keypad {
    grid: Grid,
    gap: Option<Point>,
}

impl Keypad {
    fn from_layout(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Grid::new(width, rows.len(), GAP);
        for (y, row) in rows.iter().enumerate() {
            for (x, key) in row.chars().enumerate() {
                grid.set(Point::new(x as i32, y as i32), key);
            }
        }
        let gap = grid.location_of(GAP);
        Self { grid, gap }
    }

    /// The door keypad: digits and `A`.
    pub fn numeric() -> Self {
        Self::from_layout(&NUMERIC)
    }

    /// The robot keypad: arrows and `A`.
    pub fn directional() -> Self {
        Self::from_layout(&DIRECTIONAL)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Position of `key`, if this keypad has it.
    pub fn position(&self, key: char) -> Option<Point> {
        if key == GAP {
            return None;
        }
        self.grid.location_of(key)
    }

    /// The press sequences (each ending in `A`) that move an arm from `from`
    /// to `to` and press it: all horizontal moves first, or all vertical
    /// moves first, skipping any that pass over the gap.
    fn candidates(&self, from: Point, to: Point) -> Vec<Vec<char>> {
        let d = to - from;
        let h_key = if d.x < 0 { '<' } else { '>' };
        let v_key = if d.y < 0 { '^' } else { 'v' };
        let horizontal = std::iter::repeat_n(h_key, d.x.unsigned_abs() as usize);
        let vertical = std::iter::repeat_n(v_key, d.y.unsigned_abs() as usize);

        let mut out = Vec::with_capacity(2);
        if self.gap != Some(Point::new(to.x, from.y)) {
            let seq: Vec<char> = horizontal
                .clone()
                .chain(vertical.clone())
                .chain([ACTIVATE])
                .collect();
            out.push(seq);
        }
        if self.gap != Some(Point::new(from.x, to.y)) {
            let seq: Vec<char> = vertical.chain(horizontal).chain([ACTIVATE]).collect();
            if !out.contains(&seq) {
                out.push(seq);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PressKey {
    from: char,
    to: char,
    depth: usize,
}

/// Counts human key presses through a chain of robots.
///
/// Memoizes per `(from, to, depth)` move on the directional keypads; a
/// solver is meant to live for one batch of codes.
#[derive(Debug, Clone)]
pub struct KeypadSolver {
    numeric: Keypad,
    directional: Keypad,
    cache: HashMap<PressKey, u64>,
}

impl Default for KeypadSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeypadSolver {
    pub fn new() -> Self {
        Self {
            numeric: Keypad::numeric(),
            directional: Keypad::directional(),
            cache: HashMap::new(),
        }
    }

    /// Presses needed to type `keys` on a directional keypad that sits
    /// `depth` robots above the human.
    fn sequence_presses(&mut self, keys: &[char], depth: usize) -> u64 {
        let mut prev = ACTIVATE;
        let mut total = 0;
        for &key in keys {
            total = self.move_presses(prev, key, depth).saturating_add(total);
            prev = key;
        }
        total
    }

    fn move_presses(&mut self, from: char, to: char, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }
        let key = PressKey { from, to, depth };
        if let Some(&n) = self.cache.get(&key) {
            return n;
        }
        let pad = &self.directional;
        let (Some(a), Some(b)) = (pad.position(from), pad.position(to)) else {
            return u64::MAX;
        };
        let mut best = u64::MAX;
        for seq in self.directional.candidates(a, b) {
            best = best.min(self.sequence_presses(&seq, depth - 1));
        }
        self.cache.insert(key, best);
        best
    }

    /// Fewest human presses that make the door robot type `code`, with
    /// `robots` robot-driven directional keypads in between.
    ///
    /// Returns `None` if `code` holds a key the numeric keypad lacks.
    pub fn code_presses(&mut self, code: &str, robots: usize) -> Option<u64> {
        let mut prev = self.numeric.position(ACTIVATE)?;
        let mut total = 0;
        for key in code.chars() {
            let next = self.numeric.position(key)?;
            let mut best = u64::MAX;
            for seq in self.numeric.candidates(prev, next) {
                best = best.min(self.sequence_presses(&seq, robots));
            }
            total = best.saturating_add(total);
            prev = next;
        }
        Some(total)
    }
}

/// Sum over `input` codes of their numeric part times their press count.
pub fn complexity(input: &str, robots: usize) -> Result<u64, PuzzleError> {
    let mut solver = KeypadSolver::new();
    let mut sum = 0;
    for (i, raw) in input.lines().enumerate() {
        let code = raw.trim();
        if code.is_empty() {
            continue;
        }
        let presses = solver
            .code_presses(code, robots)
            .ok_or_else(|| PuzzleError::line(i + 1, format!("invalid keypad code {code:?}")))?;
        let value: u64 = parse_field(code.trim_end_matches(ACTIVATE), i + 1)?;
        log::debug!("{code}: {presses} presses");
        sum = presses
            .checked_mul(value)
            .and_then(|c| c.checked_add(sum))
            .ok_or_else(|| PuzzleError::line(i + 1, format!("complexity of {code:?} overflows")))?;
    }
    Ok(sum)
}

/// Complexities with a short and a long robot chain.
pub fn solve(input: &str, robots: usize, more_robots: usize) -> Result<(u64, u64), PuzzleError> {
    Ok((complexity(input, robots)?, complexity(input, more_robots)?))
}
