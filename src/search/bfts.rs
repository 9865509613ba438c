//! Breadth-first tree search: FIFO frontier, no explored set. Finds the
//! path with the fewest edges; not cost-optimal since it ignores step cost
//! when ordering the frontier.

use std::collections::VecDeque;

use crate::board_state::BoardState;
use crate::cost::step_cost;

use super::node::NodeArena;
use super::SearchOutcome;

pub fn search(initial: BoardState, is_goal: impl Fn(&BoardState) -> bool) -> SearchOutcome {
    let mut arena = NodeArena::new();
    let root = arena.push_root(initial);
    let mut frontier = VecDeque::new();
    frontier.push_back(root);
    let mut nodes_expanded = 0;

    while let Some(current) = frontier.pop_front() {
        nodes_expanded += 1;
        if is_goal(&arena.get(current).state) {
            return SearchOutcome {
                path: Some(arena.path_to(current)),
                arena,
                nodes_expanded,
            };
        }
        let parent_cost = arena.get(current).path_cost;
        let neighbors = arena.get(current).state.neighbors();
        for (state, action) in neighbors {
            let node_cost = parent_cost + step_cost(&state);
            let child = arena.push_child(state, current, action, node_cost);
            frontier.push_back(child);
        }
    }

    SearchOutcome {
        arena,
        path: None,
        nodes_expanded,
    }
}
