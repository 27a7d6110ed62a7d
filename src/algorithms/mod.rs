//! Implementation of search algorithms.
//!
//! These algorithms do path-finding and adversarial search over the graphs
//! in [`crate::graph`].

pub mod astar;
pub mod best_first;
pub mod minimax;
pub mod multi_goal;
pub mod uniform_cost;
pub mod uninformed;

use rustc_hash::FxHashMap;

use crate::space::Node;

/// Walks parent links back from `goal` and returns the route start-first.
///
/// `parents` maps each reached node to the node it was reached from, with
/// `None` marking the start.
pub(crate) fn reconstruct<N: Node>(parents: &FxHashMap<N, Option<N>>, goal: &N) -> Vec<N> {
    let mut nodes = vec![goal.clone()];
    let mut cursor = parents.get(goal).cloned().flatten();
    while let Some(parent) = cursor {
        debug_assert!(nodes.len() <= parents.len(), "Parent links form a cycle");
        cursor = parents.get(&parent).cloned().flatten();
        nodes.push(parent);
    }
    nodes.reverse();
    nodes
}
