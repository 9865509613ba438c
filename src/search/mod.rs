//! The search algorithm family: breadth-first tree search, depth-limited
//! (and iteratively deepened) depth-first graph search, greedy best-first
//! graph search, and A* graph search. All four share the node arena in
//! [`node`] and the [`SearchOutcome`] result contract below.

pub mod astar;
pub mod bfts;
pub mod dlgs;
pub mod grbfgs;
pub mod node;

use crate::board_state::BoardState;
use crate::entities::Action;
use node::{NodeArena, NodeId};

/// Uniform result of any search algorithm: an arena owning every node it
/// created, and (if a goal was found) the root-to-goal path through it.
pub struct SearchOutcome {
    pub arena: NodeArena,
    pub path: Option<Vec<NodeId>>,
    pub nodes_expanded: usize,
}

impl SearchOutcome {
    pub fn path_found(&self) -> bool {
        self.path.is_some()
    }

    pub fn board_state_path(&self) -> Vec<BoardState> {
        match &self.path {
            Some(path) => path.iter().map(|&id| self.arena.get(id).state.clone()).collect(),
            None => Vec::new(),
        }
    }

    /// Actions for `path[1..]`, i.e. excluding the (action-less) root.
    pub fn action_path(&self) -> Vec<Action> {
        match &self.path {
            Some(path) => path[1..]
                .iter()
                .map(|&id| self.arena.get(id).action.expect("non-root node always has an action"))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Sum of step costs along the path, taken from the penultimate node's
    /// cumulative cost — the final move onto the goal is not charged, since
    /// a goal-adjacent state always has a free move available to it.
    pub fn path_cost(&self) -> i64 {
        match &self.path {
            Some(path) if path.len() >= 2 => self.arena.get(path[path.len() - 2]).path_cost,
            _ => 0,
        }
    }
}
