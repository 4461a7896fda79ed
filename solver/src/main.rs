//! Command-line runner: reads a puzzle input file and prints the answers.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maze_puzzles::{computer, keypad, memory, race, reindeer};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    puzzle: Puzzle,
}

#[derive(Subcommand)]
enum Puzzle {
    /// Lowest maze score with turn costs, and the tiles on every best path
    Reindeer {
        /// Puzzle input
        #[arg(default_value = "input.txt")]
        input: PathBuf,
    },
    /// Falling bytes: shortest exit, then the first byte that cuts it off
    Memory {
        #[arg(default_value = "input.txt")]
        input: PathBuf,
        /// Largest coordinate of the memory space
        #[arg(long, default_value_t = 70)]
        size: usize,
        /// Bytes fallen before measuring the exit
        #[arg(long, default_value_t = 1024)]
        fallen: usize,
    },
    /// Race track cheats that save enough time
    Race {
        #[arg(default_value = "input.txt")]
        input: PathBuf,
        /// Smallest saving worth counting
        #[arg(long, default_value_t = 100)]
        min_savings: i32,
        /// Length of a short cheat
        #[arg(long, default_value_t = 2)]
        short: u32,
        /// Length of a long cheat
        #[arg(long, default_value_t = 20)]
        long: u32,
    },
    /// Keypad robot chain complexities
    Keypad {
        #[arg(default_value = "input.txt")]
        input: PathBuf,
        /// Directional keypads driven by robots
        #[arg(long, default_value_t = 2)]
        robots: usize,
        /// Robot keypads for the second answer
        #[arg(long, default_value_t = 25)]
        more_robots: usize,
    },
    /// 3-bit computer output and its quine seed
    Computer {
        #[arg(default_value = "input.txt")]
        input: PathBuf,
    },
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read puzzle input from {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.puzzle {
        Puzzle::Reindeer { input } => {
            let text = read_input(&input)?;
            let (score, seats) = reindeer::solve(&text).context("reindeer maze")?;
            println!("Lowest score: {score}");
            println!("Tiles on a best path: {seats}");
        }
        Puzzle::Memory {
            input,
            size,
            fallen,
        } => {
            let text = read_input(&input)?;
            let (steps, blocker) = memory::solve(&text, size, fallen).context("falling bytes")?;
            match steps {
                Some(steps) => println!("Steps to the exit after {fallen} bytes: {steps}"),
                None => println!("No exit after {fallen} bytes"),
            }
            match blocker {
                Some((i, p)) => println!("First blocking byte: {p} (#{i})"),
                None => println!("The exit is never cut off"),
            }
        }
        Puzzle::Race {
            input,
            min_savings,
            short,
            long,
        } => {
            let text = read_input(&input)?;
            let (few, many) =
                race::solve(&text, min_savings, short, long).context("race track")?;
            println!("Cheats of up to {short} saving {min_savings}+: {few}");
            println!("Cheats of up to {long} saving {min_savings}+: {many}");
        }
        Puzzle::Keypad {
            input,
            robots,
            more_robots,
        } => {
            let text = read_input(&input)?;
            let (short, long) =
                keypad::solve(&text, robots, more_robots).context("keypad codes")?;
            println!("Complexity with {robots} robots: {short}");
            println!("Complexity with {more_robots} robots: {long}");
        }
        Puzzle::Computer { input } => {
            let text = read_input(&input)?;
            let (output, seed) = computer::solve(&text).context("3-bit computer")?;
            println!("Output: {output}");
            match seed {
                Some(a) => println!("Register A for a quine: {a}"),
                None => println!("No register A makes the program print itself"),
            }
        }
    }

    log::debug!("done");
    Ok(())
}
