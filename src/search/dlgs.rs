//! Depth-limited graph search and its iteratively-deepened wrapper.
//!
//! DLGS is a LIFO (stack) frontier with an explored set keyed by board
//! state. A node is only expanded if its depth is within the limit;
//! otherwise it's kept as a frontier leaf. Successors already present in
//! the frontier or explored set are discarded — including states at other
//! depths, so re-running DLGS at a deeper limit can still find a shallower
//! path to a state DLGS at the shallower limit only reached once.

use std::collections::HashSet;

use crate::board_state::BoardState;
use crate::cost::step_cost;

use super::node::{NodeArena, NodeId};
use super::SearchOutcome;

pub fn search(
    initial: BoardState,
    is_goal: impl Fn(&BoardState) -> bool,
    depth_limit: usize,
) -> SearchOutcome {
    let mut arena = NodeArena::new();
    let root = arena.push_root(initial);
    let mut frontier: Vec<NodeId> = vec![root];
    let mut frontier_states: HashSet<BoardState> = HashSet::new();
    frontier_states.insert(arena.get(root).state.clone());
    let mut explored: HashSet<BoardState> = HashSet::new();
    let mut nodes_expanded = 0;

    while let Some(current) = frontier.pop() {
        frontier_states.remove(&arena.get(current).state);
        nodes_expanded += 1;

        if is_goal(&arena.get(current).state) {
            return SearchOutcome {
                path: Some(arena.path_to(current)),
                arena,
                nodes_expanded,
            };
        }

        explored.insert(arena.get(current).state.clone());
        if arena.get(current).depth >= depth_limit {
            continue;
        }

        let parent_cost = arena.get(current).path_cost;
        let neighbors = arena.get(current).state.neighbors();
        for (state, action) in neighbors {
            if frontier_states.contains(&state) || explored.contains(&state) {
                continue;
            }
            let node_cost = parent_cost + step_cost(&state);
            frontier_states.insert(state.clone());
            let child = arena.push_child(state, current, action, node_cost);
            frontier.push(child);
        }
    }

    SearchOutcome {
        arena,
        path: None,
        nodes_expanded,
    }
}

/// Run [`search`] at depth limits `0, 1, 2, ...` until a path is found or
/// `max_depth` is exceeded (the `Unsolvable` cap — the original has no such
/// cap and can iterate forever on an unsolvable puzzle).
pub fn iterative_deepening(
    initial: BoardState,
    is_goal: impl Fn(&BoardState) -> bool + Copy,
    max_depth: usize,
) -> SearchOutcome {
    let mut last = None;
    for depth_limit in 0..=max_depth {
        let outcome = search(initial.clone(), is_goal, depth_limit);
        let found = outcome.path_found();
        last = Some(outcome);
        if found {
            break;
        }
    }
    last.expect("max_depth loop runs at least once")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Boat, Goal, RadiationSource};
    use crate::geometry::{Direction, Point, Pose, Rectangle};

    #[test]
    fn finds_path_requiring_rotation() {
        let initial = BoardState::new(
            Rectangle::new(3, 3),
            RadiationSource::new(Point::new(0, 0), 0, 0),
            Boat::new(Pose::new(0, 0, Direction::Right)),
            Goal::new(Point::new(0, 2)),
            vec![],
            vec![],
            vec![],
        );
        let outcome = iterative_deepening(initial, BoardState::is_goal, 20);
        assert!(outcome.path_found());
        let uses_rotation = outcome.action_path().iter().any(|a| {
            matches!(
                a.mv,
                crate::entities::MoveKind::Clockwise | crate::entities::MoveKind::CounterClockwise
            )
        });
        assert!(uses_rotation);
    }

    #[test]
    fn caps_out_on_unsolvable_puzzle() {
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
        let outcome = iterative_deepening(initial, BoardState::is_goal, 10);
        assert!(!outcome.path_found());
    }
}
