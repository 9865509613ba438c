//! Greedy best-first graph search: frontier ordered by `h(state)` alone,
//! with an explored set by board state. Not cost-optimal — it ignores `g`.

use std::collections::{HashMap, HashSet};

use crate::board_state::BoardState;
use crate::cost::step_cost;
use crate::priority_queue::PriorityQueue;

use super::node::{NodeArena, NodeId};
use super::SearchOutcome;

pub fn search(
    initial: BoardState,
    is_goal: impl Fn(&BoardState) -> bool,
    heuristic: impl Fn(&BoardState) -> i64,
    seed: u64,
) -> SearchOutcome {
    let mut arena = NodeArena::new();
    let root = arena.push_root(initial.clone());
    let mut frontier = PriorityQueue::new(seed);
    let mut node_of: HashMap<BoardState, NodeId> = HashMap::new();
    let mut explored: HashSet<BoardState> = HashSet::new();
    let mut nodes_expanded = 0;

    let h0 = heuristic(&initial);
    frontier.push(initial.clone(), h0);
    node_of.insert(initial, root);

    while let Some(state) = frontier.pop() {
        if explored.contains(&state) {
            continue;
        }
        let current = *node_of.get(&state).expect("popped state always has a tracked node");
        nodes_expanded += 1;

        if is_goal(&state) {
            return SearchOutcome {
                path: Some(arena.path_to(current)),
                arena,
                nodes_expanded,
            };
        }

        explored.insert(state.clone());
        let parent_cost = arena.get(current).path_cost;
        for (succ, action) in state.neighbors() {
            if explored.contains(&succ) {
                continue;
            }
            let priority = heuristic(&succ);
            if frontier.unique_push(succ.clone(), priority) {
                let node_cost = parent_cost + step_cost(&succ);
                let child = arena.push_child(succ.clone(), current, action, node_cost);
                node_of.insert(succ, child);
            }
        }
    }

    SearchOutcome {
        arena,
        path: None,
        nodes_expanded,
    }
}
