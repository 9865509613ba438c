//! The interactive shell: a small hand-rolled REPL over stdin, matching the
//! shape of the original `cmd.Cmd`-based shell without pulling in a TUI
//! framework the rest of the pack doesn't use.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::puzzle_io;
use crate::solver::{Algorithm, Heuristic, Solver};
use crate::stats::{print_board_snapshot, print_run_stats};

const HELP: &str = "\
Commands:
  solve <inFile> <outFile>   solve a puzzle and write the result
  algorithm <name>           asgs | grbfgs | id-dfgs | bfts
  heuristic <name>           smart | admissable | consistent
  help [command]             show this message, or help for one command
  exit                       quit";

/// Mutable shell state: the currently selected algorithm and heuristic.
/// Unknown selections leave this unchanged.
pub struct Shell {
    algorithm: Algorithm,
    heuristic: Heuristic,
    seed: u64,
}

impl Default for Shell {
    fn default() -> Self {
        // GrBFGS + the greedy ("smart") heuristic, the original CLI's default.
        Self {
            algorithm: Algorithm::GrBfgs,
            heuristic: Heuristic::Smart,
            seed: 0,
        }
    }
}

impl Shell {
    pub fn new(algorithm: Algorithm, heuristic: Heuristic, seed: u64) -> Self {
        Self {
            algorithm,
            heuristic,
            seed,
        }
    }

    /// Run the REPL to completion, reading commands from `input` until
    /// `exit` or EOF. Piped (non-TTY) input is echoed before execution so a
    /// transcript reads the same whether driven from a terminal or a script.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) {
        let echo = !io::stdin().is_terminal();
        let mut lines = input.lines();

        loop {
            write!(output, "isotope-boat> ").ok();
            output.flush().ok();

            let Some(Ok(line)) = lines.next() else {
                break;
            };
            if echo {
                writeln!(output, "{line}").ok();
            }

            if self.dispatch(line.trim(), &mut output) {
                break;
            }
        }
    }

    /// Handle one command line. Returns `true` if the shell should exit.
    fn dispatch(&mut self, line: &str, mut output: impl Write) -> bool {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            return false;
        };
        let rest: Vec<&str> = parts.collect();

        match cmd {
            "exit" | "quit" => return true,
            "help" => {
                if let Some(topic) = rest.first() {
                    writeln!(output, "{}", help_for(topic)).ok();
                } else {
                    writeln!(output, "{HELP}").ok();
                }
            }
            "algorithm" => match rest.first().and_then(|n| Algorithm::from_name(n)) {
                Some(algorithm) => {
                    self.algorithm = algorithm;
                    writeln!(output, "algorithm set to {}", algorithm.name()).ok();
                }
                None => {
                    writeln!(output, "unknown algorithm; try: asgs, grbfgs, id-dfgs, bfts").ok();
                }
            },
            "heuristic" => match rest.first().and_then(|n| Heuristic::from_name(n)) {
                Some(heuristic) => {
                    self.heuristic = heuristic;
                    writeln!(output, "heuristic set to {}", heuristic.name()).ok();
                }
                None => {
                    writeln!(output, "unknown heuristic; try: smart, admissable, consistent").ok();
                }
            },
            "solve" => match (rest.first(), rest.get(1)) {
                (Some(input_path), Some(output_path)) => {
                    self.solve(input_path, output_path, &mut output);
                }
                _ => {
                    writeln!(output, "usage: solve <inFile> <outFile>").ok();
                }
            },
            "" => {}
            other => {
                writeln!(output, "unknown command: {other} (try 'help')").ok();
            }
        }
        false
    }

    fn solve(&self, input_path: &str, output_path: &str, mut output: impl Write) {
        let initial = match puzzle_io::read_puzzle(input_path) {
            Ok(state) => state,
            Err(e) => {
                writeln!(output, "error: {e}").ok();
                return;
            }
        };

        let solver = Solver::new(self.algorithm, self.heuristic, self.seed);
        match solver.run(initial) {
            Ok(report) => {
                if let Err(e) = puzzle_io::write_solution(output_path, &report) {
                    writeln!(output, "error writing {output_path}: {e}").ok();
                    return;
                }
                print_run_stats(&report);
                print_board_snapshot(&report.final_state);
            }
            Err(e) => {
                writeln!(output, "error: {e}").ok();
            }
        }
    }
}

fn help_for(topic: &str) -> &'static str {
    match topic {
        "solve" => "solve <inFile> <outFile>: solve a puzzle and write the result file",
        "algorithm" => "algorithm <name>: select asgs, grbfgs, id-dfgs, or bfts",
        "heuristic" => "heuristic <name>: select smart, admissable, or consistent",
        "exit" => "exit: quit the shell",
        _ => "no help for that command",
    }
}
