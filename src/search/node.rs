//! An arena of search nodes linked by integer parent indices.
//!
//! Using indices instead of `Rc`/`RefCell` parent pointers keeps ownership
//! non-cyclic and makes path reconstruction a simple walk with no
//! allocation beyond the returned `Vec`.

use crate::board_state::BoardState;
use crate::entities::Action;

pub type NodeId = usize;

pub struct SearchNode {
    pub state: BoardState,
    pub parent: Option<NodeId>,
    pub action: Option<Action>,
    pub path_cost: i64,
    pub depth: usize,
}

/// Owns every [`SearchNode`] created during one search. Dropping the arena
/// drops every state and action it holds — a search never outlives its
/// arena, so nothing can leak past the algorithm's own lifetime.
#[derive(Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push_root(&mut self, state: BoardState) -> NodeId {
        self.nodes.push(SearchNode {
            state,
            parent: None,
            action: None,
            path_cost: 0,
            depth: 0,
        });
        self.nodes.len() - 1
    }

    pub fn push_child(
        &mut self,
        state: BoardState,
        parent: NodeId,
        action: Action,
        path_cost: i64,
    ) -> NodeId {
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(SearchNode {
            state,
            parent: Some(parent),
            action: Some(action),
            path_cost,
            depth,
        });
        self.nodes.len() - 1
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    /// Walk parent pointers from `id` back to the root, returning the path
    /// root-first.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}
