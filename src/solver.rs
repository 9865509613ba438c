//! The solver facade: binds an algorithm and heuristic choice to an initial
//! state, times the search, and formats the result for the puzzle output
//! file format.

use std::time::Instant;

use crate::board_state::BoardState;
use crate::cost::{admissible_heuristic, consistent_heuristic, greedy_heuristic, min_rad_cost};
use crate::entities::Action;
use crate::error::{GameError, Result};
use crate::search::{astar, bfts, dlgs, grbfgs};

/// One of the four named search algorithms, keyed by the CLI's `algorithm`
/// command names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Bfts,
    IdDfgs,
    GrBfgs,
    AStarGs,
}

impl Algorithm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bfts" => Some(Algorithm::Bfts),
            "id-dfgs" => Some(Algorithm::IdDfgs),
            "grbfgs" => Some(Algorithm::GrBfgs),
            "asgs" => Some(Algorithm::AStarGs),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfts => "bfts",
            Algorithm::IdDfgs => "id-dfgs",
            Algorithm::GrBfgs => "grbfgs",
            Algorithm::AStarGs => "asgs",
        }
    }
}

/// One of the three named heuristics, keyed by the CLI's `heuristic` command
/// names (spelling of "admissable" kept verbatim from the original CLI).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    Smart,
    Admissable,
    Consistent,
}

impl Heuristic {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "smart" => Some(Heuristic::Smart),
            "admissable" => Some(Heuristic::Admissable),
            "consistent" => Some(Heuristic::Consistent),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Smart => "smart",
            Heuristic::Admissable => "admissable",
            Heuristic::Consistent => "consistent",
        }
    }
}

/// Maximum IDDFGS depth, capping a search the original Python would run
/// forever on an unsolvable puzzle. Board-size-scaled so trivial puzzles
/// still get a generous budget.
pub fn default_max_depth(initial: &BoardState) -> usize {
    (initial.board.width as usize) * (initial.board.height as usize) * 4
}

pub struct Solver {
    pub algorithm: Algorithm,
    pub heuristic: Heuristic,
    pub seed: u64,
}

impl Solver {
    pub fn new(algorithm: Algorithm, heuristic: Heuristic, seed: u64) -> Self {
        Self {
            algorithm,
            heuristic,
            seed,
        }
    }

    /// Run the configured algorithm against `initial`, timing the whole
    /// search. Returns `Unsolvable` if no goal state was reached.
    pub fn run(&self, initial: BoardState) -> Result<SolveReport> {
        let max_depth = default_max_depth(&initial);
        let mrc = min_rad_cost(&initial);

        let start = Instant::now();
        let outcome = match self.algorithm {
            Algorithm::Bfts => bfts::search(initial, BoardState::is_goal),
            Algorithm::IdDfgs => dlgs::iterative_deepening(initial, BoardState::is_goal, max_depth),
            Algorithm::GrBfgs => {
                grbfgs::search(initial, BoardState::is_goal, |s| self.heuristic_fn(s, mrc), self.seed)
            }
            Algorithm::AStarGs => {
                astar::search(initial, BoardState::is_goal, |s| self.heuristic_fn(s, mrc), self.seed)
            }
        };
        let elapsed_us = start.elapsed().as_micros() as u64;

        tracing::info!(
            algorithm = self.algorithm.name(),
            path_found = outcome.path_found(),
            nodes_expanded = outcome.nodes_expanded,
            elapsed_us,
            "search finished"
        );

        if !outcome.path_found() {
            return Err(GameError::Unsolvable);
        }

        let actions = outcome.action_path();
        let final_state = outcome
            .board_state_path()
            .pop()
            .expect("a found path always has at least a root node");

        Ok(SolveReport {
            elapsed_us,
            path_cost: outcome.path_cost(),
            actions,
            final_state,
            nodes_expanded: outcome.nodes_expanded,
        })
    }

    fn heuristic_fn(&self, state: &BoardState, min_rad_cost: i64) -> i64 {
        match self.heuristic {
            Heuristic::Smart => greedy_heuristic(state),
            Heuristic::Admissable => admissible_heuristic(state, min_rad_cost),
            Heuristic::Consistent => consistent_heuristic(state, min_rad_cost),
        }
    }
}

/// A completed solve, ready to be formatted per the puzzle output format.
pub struct SolveReport {
    pub elapsed_us: u64,
    pub path_cost: i64,
    pub actions: Vec<Action>,
    pub final_state: BoardState,
    pub nodes_expanded: usize,
}

impl SolveReport {
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Boat, Goal, RadiationSource};
    use crate::geometry::{Direction, Point, Pose, Rectangle};

    fn trivial_board() -> BoardState {
        BoardState::new(
            Rectangle::new(3, 3),
            RadiationSource::new(Point::new(0, 0), 0, 0),
            Boat::new(Pose::new(0, 0, Direction::Right)),
            Goal::new(Point::new(2, 0)),
            vec![],
            vec![],
            vec![],
        )
    }

    #[test]
    fn solves_the_trivial_scenario_with_every_algorithm() {
        for algorithm in [Algorithm::Bfts, Algorithm::IdDfgs, Algorithm::GrBfgs, Algorithm::AStarGs] {
            let solver = Solver::new(algorithm, Heuristic::Consistent, 0);
            let report = solver.run(trivial_board()).expect("trivial board is solvable");
            assert_eq!(report.action_count(), 2);
            assert_eq!(report.path_cost, 0);
        }
    }

    #[test]
    fn reports_unsolvable_without_panicking() {
        let initial = BoardState::new(
            Rectangle::new(3, 3),
            RadiationSource::new(Point::new(0, 0), 0, 0),
            Boat::new(Pose::new(0, 0, Direction::Right)),
            Goal::new(Point::new(2, 2)),
            vec![],
            vec![],
            vec![
                crate::entities::Tree::new(Point::new(2, 0)),
                crate::entities::Tree::new(Point::new(1, 1)),
                crate::entities::Tree::new(Point::new(2, 1)),
                crate::entities::Tree::new(Point::new(0, 2)),
                crate::entities::Tree::new(Point::new(1, 2)),
            ],
        );
        let solver = Solver::new(Algorithm::IdDfgs, Heuristic::Smart, 0);
        let result = solver.run(initial);
        assert!(matches!(result, Err(GameError::Unsolvable)));
    }

    #[test]
    fn algorithm_and_heuristic_names_round_trip() {
        for name in ["bfts", "id-dfgs", "grbfgs", "asgs"] {
            assert_eq!(Algorithm::from_name(name).unwrap().name(), name);
        }
        assert!(Algorithm::from_name("bogus").is_none());
        for name in ["smart", "admissable", "consistent"] {
            assert_eq!(Heuristic::from_name(name).unwrap().name(), name);
        }
        assert!(Heuristic::from_name("bogus").is_none());
    }
}
