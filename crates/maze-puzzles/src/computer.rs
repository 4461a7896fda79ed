//! A 3-bit computer: three registers, eight instructions, and a program
//! made of octal digits.

use thiserror::Error;

use crate::PuzzleError;
use crate::error::parse_field;

/// Fatal faults while running a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComputerError {
    /// Combo operand 7 never appears in valid programs.
    #[error("reserved combo operand 7 at instruction {pointer}")]
    ReservedOperand { pointer: usize },
    #[error("invalid opcode {opcode} at instruction {pointer}")]
    InvalidOpcode { opcode: u64, pointer: usize },
    #[error("opcode at instruction {pointer} has no operand")]
    MissingOperand { pointer: usize },
    #[error("program still running after {limit} instructions")]
    StepLimit { limit: usize },
}

/// Instructions [`Computer::run`] executes before giving up.
pub const STEP_LIMIT: usize = 1 << 24;
/// Instructions each quine candidate may execute.
const SEARCH_STEP_LIMIT: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Adv,
    Bxl,
    Bst,
    Jnz,
    Bxc,
    Out,
    Bdv,
    Cdv,
}

impl Op {
    fn decode(opcode: u64) -> Option<Self> {
        Some(match opcode {
            0 => Op::Adv,
            1 => Op::Bxl,
            2 => Op::Bst,
            3 => Op::Jnz,
            4 => Op::Bxc,
            5 => Op::Out,
            6 => Op::Bdv,
            7 => Op::Cdv,
            _ => return None,
        })
    }
}

/// `value / 2^shift`, truncated.
fn divide(value: u64, shift: u64) -> u64 {
    u32::try_from(shift)
        .ok()
        .and_then(|s| value.checked_shr(s))
        .unwrap_or(0)
}

/// Registers plus program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computer {
    pub a: u64,
    pub b: u64,
    pub c: u64,
    pub program: Vec<u64>,
}

impl Computer {
    pub fn new(a: u64, b: u64, c: u64, program: Vec<u64>) -> Self {
        Self { a, b, c, program }
    }

    /// Parse the `Register X: n` lines and the `Program:` line. Blank lines
    /// are skipped; every register and the program must be present.
    pub fn parse(input: &str) -> Result<Self, PuzzleError> {
        let mut registers: [Option<u64>; 3] = [None; 3];
        let mut program = None;
        let mut last = 0;

        for (i, raw) in input.lines().enumerate() {
            let line = raw.trim();
            let n = i + 1;
            last = n;
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix("Register ") {
                let (name, value) = rest
                    .split_once(':')
                    .ok_or_else(|| PuzzleError::line(n, "expected \"Register X: n\""))?;
                let slot = match name {
                    "A" => 0,
                    "B" => 1,
                    "C" => 2,
                    other => {
                        return Err(PuzzleError::line(n, format!("unknown register {other:?}")));
                    }
                };
                registers[slot] = Some(parse_field(value, n)?);
            } else if let Some(rest) = line.strip_prefix("Program:") {
                let mut codes = Vec::new();
                for field in rest.split(',') {
                    let code: u64 = parse_field(field, n)?;
                    if code > 7 {
                        return Err(PuzzleError::line(n, format!("{code} is not a 3-bit value")));
                    }
                    codes.push(code);
                }
                program = Some(codes);
            } else {
                return Err(PuzzleError::line(n, format!("unexpected line {line:?}")));
            }
        }

        let missing = |what: &str| PuzzleError::line(last, format!("missing {what}"));
        let [a, b, c] = registers;
        Ok(Self {
            a: a.ok_or_else(|| missing("register A"))?,
            b: b.ok_or_else(|| missing("register B"))?,
            c: c.ok_or_else(|| missing("register C"))?,
            program: program.ok_or_else(|| missing("program"))?,
        })
    }

    fn combo(&self, operand: u64, pointer: usize) -> Result<u64, ComputerError> {
        match operand {
            0..=3 => Ok(operand),
            4 => Ok(self.a),
            5 => Ok(self.b),
            6 => Ok(self.c),
            _ => Err(ComputerError::ReservedOperand { pointer }),
        }
    }

    /// Run until the instruction pointer leaves the program, returning the
    /// values written by `out`. Registers keep their final state.
    ///
    /// Fails with [`ComputerError::StepLimit`] after [`STEP_LIMIT`]
    /// instructions.
    pub fn run(&mut self) -> Result<Vec<u64>, ComputerError> {
        self.run_with_limit(STEP_LIMIT)
    }

    /// Like [`run`](Self::run), with an explicit instruction budget.
    pub fn run_with_limit(&mut self, limit: usize) -> Result<Vec<u64>, ComputerError> {
        let mut output = Vec::new();
        self.execute(limit, |value| {
            output.push(value);
            true
        })?;
        log::trace!("program halted with output {}", render(&output));
        Ok(output)
    }

    /// Execute at most `limit` instructions, handing every `out` value to
    /// `emit`. Returns `Ok(true)` once the program halts and `Ok(false)` as
    /// soon as `emit` returns `false`.
    fn execute(
        &mut self,
        limit: usize,
        mut emit: impl FnMut(u64) -> bool,
    ) -> Result<bool, ComputerError> {
        let mut pointer = 0;
        let mut steps = 0;

        while let Some(&opcode) = self.program.get(pointer) {
            if steps == limit {
                return Err(ComputerError::StepLimit { limit });
            }
            steps += 1;

            let op = Op::decode(opcode).ok_or(ComputerError::InvalidOpcode { opcode, pointer })?;
            let &operand = self
                .program
                .get(pointer + 1)
                .ok_or(ComputerError::MissingOperand { pointer })?;

            match op {
                Op::Adv => self.a = divide(self.a, self.combo(operand, pointer)?),
                Op::Bxl => self.b ^= operand,
                Op::Bst => self.b = self.combo(operand, pointer)? % 8,
                Op::Jnz => {
                    if self.a != 0 {
                        pointer = operand as usize;
                        continue;
                    }
                }
                Op::Bxc => self.b ^= self.c,
                Op::Out => {
                    if !emit(self.combo(operand, pointer)? % 8) {
                        return Ok(false);
                    }
                }
                Op::Bdv => self.b = divide(self.a, self.combo(operand, pointer)?),
                Op::Cdv => self.c = divide(self.a, self.combo(operand, pointer)?),
            }
            pointer += 2;
        }
        Ok(true)
    }

    /// Whether a copy started with register A set to `a` prints exactly
    /// `tail` and halts. Stops at the first mismatching value; a run that
    /// exceeds [`SEARCH_STEP_LIMIT`] does not match.
    fn prints_with(&self, a: u64, tail: &[u64]) -> Result<bool, ComputerError> {
        let mut copy = self.clone();
        copy.a = a;
        let mut printed = 0;
        let halted = copy.execute(SEARCH_STEP_LIMIT, |value| {
            let same = tail.get(printed) == Some(&value);
            printed += 1;
            same
        });
        match halted {
            Ok(halted) => Ok(halted && printed == tail.len()),
            Err(ComputerError::StepLimit { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Smallest value of register A that makes the program print itself.
    ///
    /// Assumes the usual program shape, which shifts A right by three bits
    /// per output: candidates are grown one octal digit at a time so that
    /// each one reproduces a longer tail of the program.
    pub fn find_quine(&self) -> Result<Option<u64>, ComputerError> {
        if self.program.is_empty() {
            return Ok(None);
        }
        self.quine_digit(self.program.len() - 1, 0)
    }

    fn quine_digit(&self, pos: usize, prefix: u64) -> Result<Option<u64>, ComputerError> {
        for digit in 0..8 {
            let Some(a) = prefix.checked_mul(8).map(|p| p + digit) else {
                return Ok(None);
            };
            if !self.prints_with(a, &self.program[pos..])? {
                continue;
            }
            if pos == 0 {
                if a == 0 {
                    continue;
                }
                return Ok(Some(a));
            }
            if let Some(found) = self.quine_digit(pos - 1, a)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

/// Join output values with commas.
pub fn render(output: &[u64]) -> String {
    output
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Rendered output of the program, and its smallest quine seed.
pub fn solve(input: &str) -> Result<(String, Option<u64>), PuzzleError> {
    let computer = Computer::parse(input)?;
    let output = computer.clone().run()?;
    let seed = computer.find_quine()?;
    Ok((render(&output), seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(a: u64, b: u64, c: u64, program: &[u64]) -> (Computer, Vec<u64>) {
        let mut computer = Computer::new(a, b, c, program.to_vec());
        let out = computer.run().unwrap();
        (computer, out)
    }

    #[test]
    fn small_programs() {
        let (computer, _) = run(0, 0, 9, &[2, 6]);
        assert_eq!(computer.b, 1);

        let (_, out) = run(10, 0, 0, &[5, 0, 5, 1, 5, 4]);
        assert_eq!(out, [0, 1, 2]);

        let (computer, out) = run(2024, 0, 0, &[0, 1, 5, 4, 3, 0]);
        assert_eq!(render(&out), "4,2,5,6,7,7,7,7,3,1,0");
        assert_eq!(computer.a, 0);

        let (computer, _) = run(0, 29, 0, &[1, 7]);
        assert_eq!(computer.b, 26);

        let (computer, _) = run(0, 2024, 43690, &[4, 0]);
        assert_eq!(computer.b, 44354);
    }

    #[test]
    fn divisions_write_their_own_register() {
        let (computer, _) = run(64, 0, 0, &[6, 2, 7, 3]);
        assert_eq!((computer.a, computer.b, computer.c), (64, 16, 8));
        let (computer, _) = run(5, 0, 0, &[0, 3]);
        assert_eq!(computer.a, 0);
    }

    #[test]
    fn example_program() {
        let input = indoc::indoc! {"
            Register A: 729
            Register B: 0
            Register C: 0

            Program: 0,1,5,4,3,0
        "};
        let mut computer = Computer::parse(input).unwrap();
        assert_eq!(computer.program, [0, 1, 5, 4, 3, 0]);
        assert_eq!(render(&computer.run().unwrap()), "4,6,3,5,6,3,5,2,1,0");
    }

    #[test]
    fn quine_seed() {
        let input = indoc::indoc! {"
            Register A: 2024
            Register B: 0
            Register C: 0

            Program: 0,3,5,4,3,0
        "};
        let computer = Computer::parse(input).unwrap();
        assert_eq!(computer.find_quine(), Ok(Some(117440)));
        assert_eq!(computer.prints_with(117440, &computer.program), Ok(true));
        assert_eq!(computer.prints_with(117448, &computer.program), Ok(false));
    }

    #[test]
    fn looping_candidates_do_not_hang() {
        // halts at once with A = 0, loops forever for any other A
        let input = indoc::indoc! {"
            Register A: 0
            Register B: 0
            Register C: 0

            Program: 1,1,3,0
        "};
        assert_eq!(solve(input), Ok((String::new(), None)));

        let mut computer = Computer::new(1, 0, 0, vec![1, 1, 3, 0]);
        assert_eq!(
            computer.run_with_limit(100),
            Err(ComputerError::StepLimit { limit: 100 })
        );
    }

    #[test]
    fn faults() {
        let mut reserved = Computer::new(1, 0, 0, vec![5, 7]);
        assert_eq!(
            reserved.run(),
            Err(ComputerError::ReservedOperand { pointer: 0 })
        );
        let mut missing = Computer::new(1, 0, 0, vec![1, 2, 5]);
        assert_eq!(
            missing.run(),
            Err(ComputerError::MissingOperand { pointer: 2 })
        );
        let mut invalid = Computer::new(1, 0, 0, vec![9, 0]);
        assert_eq!(
            invalid.run(),
            Err(ComputerError::InvalidOpcode { opcode: 9, pointer: 0 })
        );
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Computer::parse("Register A: 1\nRegister B: x\n"),
            Err(PuzzleError::Line { line: 2, .. })
        ));
        assert!(matches!(
            Computer::parse("Register A: 1\nRegister B: 2\nRegister C: 3\n"),
            Err(PuzzleError::Line { line: 3, .. })
        ));
        assert!(matches!(
            Computer::parse("Register A: 1\nRegister B: 2\nRegister C: 3\nProgram: 0,8"),
            Err(PuzzleError::Line { line: 4, .. })
        ));
        assert!(matches!(
            Computer::parse("Register D: 1"),
            Err(PuzzleError::Line { line: 1, .. })
        ));
    }
}
