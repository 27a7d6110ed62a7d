//! Seeded random graphs for tests and benchmarks.
//!
//! Nodes are numbered `0..nodes` and all of them are inserted up front, so
//! some may end up isolated.

use rand::Rng;

use crate::graph::Graph;
use crate::graph::WeightedGraph;

/// Undirected graph with up to `edges` edges.
///
/// Self-loops and repeated pairs are drawn but dropped, so the graph may end
/// up with fewer edges.
pub fn random_graph<R: Rng>(r: &mut R, nodes: u32, edges: usize) -> Graph<u32> {
    let mut g = Graph::new();
    for n in 0..nodes {
        g.add_node(n);
    }
    if nodes < 2 {
        return g;
    }
    for _ in 0..edges {
        let a = r.random_range(0..nodes);
        let b = r.random_range(0..nodes);
        if a != b {
            g.add_edge(a, b);
        }
    }
    g
}

/// Bidirectional weighted graph with costs in `0..=max_cost`.
pub fn random_weighted_graph<R: Rng>(
    r: &mut R,
    nodes: u32,
    edges: usize,
    max_cost: u32,
) -> WeightedGraph<u32, u32> {
    let mut g = WeightedGraph::new();
    for n in 0..nodes {
        g.add_node(n);
    }
    if nodes < 2 {
        return g;
    }
    for _ in 0..edges {
        let a = r.random_range(0..nodes);
        let b = r.random_range(0..nodes);
        let c = r.random_range(0..=max_cost);
        if a != b && g.cost(&a, &b).is_none() {
            g.add_bidirectional_edge(a, b, c);
        }
    }
    g
}
