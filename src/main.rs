//! Isotope Boat — a search engine and solver for a grid puzzle where a boat
//! must reach a goal cell while minimising accumulated radiation exposure,
//! rearranging mobile obstacles (alligators, turtles) as it goes.
//!
//! ## CLI overview
//!
//! Run with no subcommand to enter the interactive shell (`solve`,
//! `algorithm`, `heuristic`, `help`, `exit`). Run `solve <in> <out>` directly
//! for a one-shot, non-interactive solve.

use clap::Parser;
use clap::Subcommand;

use crate::solver::{Algorithm, Heuristic, Solver};

pub(crate) mod board_state;
pub(crate) mod cli;
pub(crate) mod cost;
pub(crate) mod entities;
pub(crate) mod error;
pub(crate) mod geometry;
pub(crate) mod priority_queue;
pub(crate) mod puzzle_io;
pub(crate) mod search;
pub(crate) mod solver;
pub(crate) mod stats;

#[derive(Parser)]
#[command(about = "Search engine and solver for the Isotope Boat grid puzzle")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a single puzzle file and write the result, without entering the shell
    Solve {
        input: String,
        output: String,
        #[arg(long, default_value = "grbfgs")]
        algorithm: String,
        #[arg(long, default_value = "smart")]
        heuristic: String,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn run_one_shot(input: String, output: String, algorithm: String, heuristic: String, seed: u64) -> std::process::ExitCode {
    let Some(algorithm) = Algorithm::from_name(&algorithm) else {
        eprintln!("unknown algorithm: {algorithm}");
        return std::process::ExitCode::FAILURE;
    };
    let Some(heuristic) = Heuristic::from_name(&heuristic) else {
        eprintln!("unknown heuristic: {heuristic}");
        return std::process::ExitCode::FAILURE;
    };

    let initial = match puzzle_io::read_puzzle(&input) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("error: {e}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let solver = Solver::new(algorithm, heuristic, seed);
    match solver.run(initial) {
        Ok(report) => {
            if let Err(e) = puzzle_io::write_solution(&output, &report) {
                eprintln!("error writing {output}: {e}");
                return std::process::ExitCode::FAILURE;
            }
            stats::print_run_stats(&report);
            stats::print_board_snapshot(&report.final_state);
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

fn main() -> std::process::ExitCode {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Some(Commands::Solve {
            input,
            output,
            algorithm,
            heuristic,
            seed,
        }) => run_one_shot(input, output, algorithm, heuristic, seed),
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            cli::Shell::default().run(stdin.lock(), stdout.lock());
            std::process::ExitCode::SUCCESS
        }
    }
}
