//! The puzzle file parser and the result-file writer.
//!
//! Both sides share the exact textual layout [`crate::board_state::BoardState`]'s
//! `Display` impl produces, so a solved puzzle's output block can be fed back
//! in as a fresh input file.

use std::fs;
use std::path::Path;

use crate::board_state::BoardState;
use crate::entities::{Alligator, Boat, Goal, RadiationSource, Tree, Turtle};
use crate::error::{GameError, Result};
use crate::geometry::{Direction, Point, Pose, Rectangle};
use crate::solver::SolveReport;

fn malformed(msg: impl Into<String>) -> GameError {
    GameError::InputMalformed(msg.into())
}

struct Lines<'a> {
    lines: std::str::Lines<'a>,
    number: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            number: 0,
        }
    }

    fn next(&mut self) -> Result<&'a str> {
        self.number += 1;
        self.lines
            .next()
            .ok_or_else(|| malformed(format!("expected a line {} but the file ended", self.number)))
    }

    fn ints(&mut self, count: usize) -> Result<Vec<i32>> {
        let line = self.next()?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != count {
            return Err(malformed(format!(
                "line {}: expected {count} integers, found {}",
                self.number,
                tokens.len()
            )));
        }
        tokens
            .iter()
            .map(|t| {
                t.parse::<i32>()
                    .map_err(|_| malformed(format!("line {}: '{t}' is not an integer", self.number)))
            })
            .collect()
    }

    fn pose(&mut self) -> Result<Pose> {
        let line = self.next()?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(malformed(format!(
                "line {}: expected 'x y dir', found '{line}'",
                self.number
            )));
        }
        let x = tokens[0]
            .parse::<i32>()
            .map_err(|_| malformed(format!("line {}: '{}' is not an integer", self.number, tokens[0])))?;
        let y = tokens[1]
            .parse::<i32>()
            .map_err(|_| malformed(format!("line {}: '{}' is not an integer", self.number, tokens[1])))?;
        let dir = Direction::from_char(tokens[2].chars().next().unwrap_or('?')).ok_or_else(|| {
            malformed(format!("line {}: '{}' is not a direction letter", self.number, tokens[2]))
        })?;
        Ok(Pose::new(x, y, dir))
    }

    fn point(&mut self) -> Result<Point> {
        let coords = self.ints(2)?;
        Ok(Point::new(coords[0], coords[1]))
    }
}

/// Parse a puzzle file's text into a [`BoardState`], rejecting malformed
/// shapes ([`GameError::InputMalformed`]) and inconsistent initial layouts
/// ([`GameError::InputInconsistent`]: a footprint off the board or
/// overlapping another entity's).
pub fn parse(text: &str) -> Result<BoardState> {
    let mut lines = Lines::new(text);

    let dims = lines.ints(2)?;
    let board = Rectangle::new(dims[0], dims[1]);
    if board.width <= 0 || board.height <= 0 {
        return Err(GameError::InputInconsistent("board dimensions must be positive".into()));
    }

    let rad_loc = lines.point()?;
    let rad_vals = lines.ints(2)?;
    let rad = RadiationSource::new(rad_loc, rad_vals[0] as i64, rad_vals[1] as i64);

    let counts = lines.ints(3)?;
    let (num_alligators, num_turtles, num_trees) = (counts[0] as usize, counts[1] as usize, counts[2] as usize);

    let mut alligators = Vec::with_capacity(num_alligators);
    for _ in 0..num_alligators {
        alligators.push(Alligator::new(lines.pose()?));
    }
    let mut turtles = Vec::with_capacity(num_turtles);
    for _ in 0..num_turtles {
        turtles.push(Turtle::new(lines.pose()?));
    }
    let mut trees = Vec::with_capacity(num_trees);
    for _ in 0..num_trees {
        trees.push(Tree::new(lines.point()?));
    }

    let boat = Boat::new(lines.pose()?);
    let goal = Goal::new(lines.point()?);

    let state = BoardState::new(board, rad, boat, goal, alligators, turtles, trees);
    check_consistency(&state)?;
    Ok(state)
}

/// Checks every footprint lies on the board and that no two entities overlap,
/// with one exception: the goal is allowed to coincide with the boat (a
/// trivially pre-solved puzzle), since that overlap is the win condition
/// itself, not a collision.
fn check_consistency(state: &BoardState) -> Result<()> {
    let boat_footprint = state.boat.footprint();
    let mut seen = std::collections::HashSet::new();
    for (name, footprint) in state.all_footprints() {
        if !state.board.contains_all(&footprint) {
            return Err(GameError::InputInconsistent(format!("{name} footprint lies outside the board")));
        }
        for p in footprint {
            if name == "goal" && boat_footprint.contains(&p) {
                continue;
            }
            if !seen.insert(p) {
                return Err(GameError::InputInconsistent(format!(
                    "{name} footprint overlaps another entity at {p}"
                )));
            }
        }
    }
    Ok(())
}

/// Parse the puzzle file at `path`.
pub fn read_puzzle(path: impl AsRef<Path>) -> Result<BoardState> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Render a completed solve per the output file format: elapsed
/// microseconds, path cost, action count, comma-joined actions, then the
/// final board state block.
pub fn format_output(report: &SolveReport) -> String {
    let actions = report
        .actions
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "{}\n{}\n{}\n{}\n{}",
        report.elapsed_us,
        report.path_cost,
        report.action_count(),
        actions,
        report.final_state
    )
}

/// Write a completed solve's output file per [`format_output`].
pub fn write_solution(path: impl AsRef<Path>, report: &SolveReport) -> Result<()> {
    fs::write(path, format_output(report))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIVIAL: &str = "3 3\n0 0\n0 0\n0 0 0\n0 0 R\n2 0";

    #[test]
    fn parses_a_well_formed_trivial_puzzle() {
        let state = parse(TRIVIAL).expect("well-formed input parses");
        assert_eq!(state.board, Rectangle::new(3, 3));
        assert_eq!(state.goal.pos, Point::new(2, 0));
        assert!(!state.is_goal());
    }

    #[test]
    fn rejects_wrong_token_count_as_malformed() {
        let bad = "3 3 3\n0 0\n0 0\n0 0 0\n0 0 R\n2 0";
        let err = parse(bad).unwrap_err();
        assert!(matches!(err, GameError::InputMalformed(_)));
    }

    #[test]
    fn rejects_unrecognised_direction_letter_as_malformed() {
        let bad = "3 3\n0 0\n0 0\n0 0 0\n0 0 Q\n2 0";
        let err = parse(bad).unwrap_err();
        assert!(matches!(err, GameError::InputMalformed(_)));
    }

    #[test]
    fn rejects_out_of_board_footprint_as_inconsistent() {
        let bad = "3 3\n0 0\n0 0\n0 0 0\n2 0 R\n2 0";
        let err = parse(bad).unwrap_err();
        assert!(matches!(err, GameError::InputInconsistent(_)));
    }

    #[test]
    fn rejects_overlapping_entities_as_inconsistent() {
        let bad = "3 3\n0 0\n0 0\n1 0 0\n0 0 R\n0 0 R\n2 0";
        let err = parse(bad).unwrap_err();
        assert!(matches!(err, GameError::InputInconsistent(_)));
    }

    #[test]
    fn rejects_out_of_board_goal_as_inconsistent() {
        let bad = "3 3\n0 0\n0 0\n0 0 0\n0 0 R\n5 0";
        let err = parse(bad).unwrap_err();
        assert!(matches!(err, GameError::InputInconsistent(_)));
    }

    #[test]
    fn rejects_goal_overlapping_a_tree_as_inconsistent() {
        let bad = "3 3\n0 0\n0 0\n0 0 1\n2 0\n0 0 R\n2 0";
        let err = parse(bad).unwrap_err();
        assert!(matches!(err, GameError::InputInconsistent(_)));
    }

    #[test]
    fn accepts_boat_starting_on_the_goal() {
        let text = "3 3\n0 0\n0 0\n0 0 0\n0 0 R\n0 0";
        let state = parse(text).expect("boat-on-goal is a consistent, trivially solved puzzle");
        assert!(state.is_goal());
    }

    #[test]
    fn round_trips_through_board_state_display() {
        let state = parse(TRIVIAL).expect("parses");
        let text = state.to_string();
        let reparsed = parse(&text).expect("re-parses its own serialisation");
        assert_eq!(state, reparsed);
    }
}
