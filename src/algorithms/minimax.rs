//! Minimax with alpha-beta pruning over an unweighted graph.
//!
//! The agent and the adversary share the graph's edges and take turns moving
//! the same token, the agent first. There's no visited set, so on cyclic
//! graphs `max_depth` is the only thing bounding the recursion.

use num_traits::bounds::Bounded;

use crate::graph::Graph;
use crate::space::Node;
use crate::utility::Utility;

/// The outcome of a minimax search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimaxResult<V, N> {
    /// Value of the root under optimal play from both sides.
    pub value: V,
    /// Nodes visited under optimal play, starting with the root.
    pub principal_path: Vec<N>,
    /// Terminal nodes scored. Pruning only lowers this.
    pub leaves_evaluated: usize,
}

impl<V, N> MinimaxResult<V, N> {
    /// The node the game ends on.
    pub fn destination(&self) -> Option<&N> {
        self.principal_path.last()
    }
}

/// Depth-limited minimax.
///
/// A node is terminal when the depth runs out or it has no neighbours, and
/// gets scored by `utility(node, maximizing)` where `maximizing` is the side
/// that would move there. Ties between siblings go to the first neighbour.
#[derive(Debug, Clone)]
pub struct MinimaxSearch<'g, N, U>
where
    N: Node,
    U: Utility<N>,
{
    graph: &'g Graph<N>,
    utility: U,
    max_depth: usize,
    pruning: bool,
}

impl<'g, N, U> MinimaxSearch<'g, N, U>
where
    N: Node,
    U: Utility<N>,
{
    #[must_use]
    pub fn new(graph: &'g Graph<N>, utility: U, max_depth: usize) -> Self {
        Self {
            graph,
            utility,
            max_depth,
            pruning: true,
        }
    }

    /// Toggles alpha-beta pruning. The value found is the same either way.
    #[must_use]
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn utility(&self) -> &U {
        &self.utility
    }

    pub fn search(&self, start: &N) -> MinimaxResult<U::Value, N> {
        let mut leaves = 0;
        let (value, mut principal_path) = self.minimax(
            start,
            self.max_depth,
            true,
            <U::Value as Bounded>::min_value(),
            <U::Value as Bounded>::max_value(),
            &mut leaves,
        );
        principal_path.reverse();
        log::debug!(
            "Minimax from {start:?} (depth={}, pruning={}): value={value:?}, leaves={leaves}",
            self.max_depth,
            self.pruning
        );
        MinimaxResult {
            value,
            principal_path,
            leaves_evaluated: leaves,
        }
    }

    /// Returns the node's value and its principal path, leaf first.
    fn minimax(
        &self,
        node: &N,
        depth: usize,
        maximizing: bool,
        mut alpha: U::Value,
        mut beta: U::Value,
        leaves: &mut usize,
    ) -> (U::Value, Vec<N>) {
        let neighbours = self.graph.neighbours(node);
        if depth == 0 || neighbours.is_empty() {
            *leaves += 1;
            return (self.utility.utility(node, maximizing), vec![node.clone()]);
        }

        let mut best: Option<(U::Value, Vec<N>)> = None;
        for neigh in neighbours {
            let (value, path) = self.minimax(neigh, depth - 1, !maximizing, alpha, beta, leaves);
            let improves = match &best {
                None => true,
                Some((b, _)) if maximizing => value > *b,
                Some((b, _)) => value < *b,
            };
            if improves {
                best = Some((value, path));
            }

            if maximizing {
                alpha = alpha.max(value);
            } else {
                beta = beta.min(value);
            }
            if self.pruning && beta <= alpha {
                log::trace!("Pruning the siblings of {neigh:?} under {node:?}");
                break;
            }
        }

        match best {
            Some((value, mut path)) => {
                path.push(node.clone());
                (value, path)
            }
            // Only reachable without neighbours, which is handled above.
            None => (self.utility.utility(node, maximizing), vec![node.clone()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::problems::random::random_graph;
    use crate::utility::UtilityTable;

    /// A textbook two-ply tree.
    ///
    /// ```text
    ///          R
    ///     /    |    \
    ///    A     B     C
    ///   / \   / \   / \
    ///  3  12 2   4 14  1
    /// ```
    ///
    /// Edges are undirected, so the adversary may also move back to R, which
    /// scores high enough to never be its pick.
    fn tree() -> (Graph<&'static str>, UtilityTable<&'static str, i64>) {
        let g = Graph::from_edges([
            ("R", "A"),
            ("R", "B"),
            ("R", "C"),
            ("A", "a1"),
            ("A", "a2"),
            ("B", "b1"),
            ("B", "b2"),
            ("C", "c1"),
            ("C", "c2"),
        ]);
        let u = UtilityTable::new(
            [
                ("a1", 3),
                ("a2", 12),
                ("b1", 2),
                ("b2", 4),
                ("c1", 14),
                ("c2", 1),
                ("R", 100),
            ],
            0,
        );
        (g, u)
    }

    #[test]
    fn two_plies() {
        let (g, u) = tree();
        let r = MinimaxSearch::new(&g, u, 2).search(&"R");
        assert_eq!(r.value, 3);
        assert_eq!(r.principal_path, vec!["R", "A", "a1"]);
        assert_eq!(r.destination(), Some(&"a1"));
    }

    #[test]
    fn pruning_skips_leaves() {
        let (g, u) = tree();
        let pruned = MinimaxSearch::new(&g, u.clone(), 2).search(&"R");
        let full = MinimaxSearch::new(&g, u, 2).with_pruning(false).search(&"R");
        assert_eq!(pruned.value, full.value);
        assert_eq!(pruned.principal_path, full.principal_path);
        assert_eq!(full.leaves_evaluated, 9);
        // b2 is skipped once b1 scores below A's 3.
        assert_eq!(pruned.leaves_evaluated, 8);
    }

    #[test]
    fn terminal_nodes() {
        let (g, u) = tree();
        // Depth 0 scores the root itself.
        let r = MinimaxSearch::new(&g, u.clone(), 0).search(&"R");
        assert_eq!(r.value, 100);
        assert_eq!(r.principal_path, vec!["R"]);
        assert_eq!(r.leaves_evaluated, 1);

        // Depth 1 scores the children from the adversary's side.
        let mut u1 = u.clone();
        u1.insert("A", 5);
        u1.insert("B", 7);
        u1.insert("C", 6);
        let r = MinimaxSearch::new(&g, u1, 1).search(&"R");
        assert_eq!(r.value, -5);
        assert_eq!(r.principal_path, vec!["R", "A"]);

        // Nodes without neighbours are terminal whatever the depth.
        let lone = Graph::from_adjacency([("X", vec![])]);
        let r = MinimaxSearch::new(&lone, u, 5).search(&"X");
        assert_eq!(r.value, 0);
        assert_eq!(r.principal_path, vec!["X"]);
    }

    #[test]
    fn cycles_are_bounded_by_depth() {
        let g = Graph::from_edges([("A", "B"), ("B", "C"), ("C", "A")]);
        let u = UtilityTable::new([("A", 1i64), ("B", 2), ("C", 3)], 0);
        let r = MinimaxSearch::new(&g, u.clone(), 7).search(&"A");
        assert_eq!(r.principal_path.len(), 8);
        // Leaves are reached after an odd number of plies, on the adversary's turn.
        let leaf = r.destination().unwrap();
        assert_eq!(r.value, -u.score(leaf));
    }

    #[test]
    fn alpha_beta_matches_minimax_on_random_graphs() {
        for seed in 0..25 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let g = random_graph(&mut rng, 9, 14);
            let u = UtilityTable::new(
                g.nodes().iter().map(|n| (*n, rng.random_range(-20i64..=20))),
                0,
            );
            for depth in 0..5 {
                for start in g.nodes() {
                    let full = MinimaxSearch::new(&g, u.clone(), depth)
                        .with_pruning(false)
                        .search(start);
                    let pruned = MinimaxSearch::new(&g, u.clone(), depth).search(start);
                    assert_eq!(pruned.value, full.value, "seed={seed} depth={depth}");
                    assert!(pruned.leaves_evaluated <= full.leaves_evaluated);

                    for r in [&full, &pruned] {
                        assert_eq!(r.principal_path.first(), Some(start));
                        assert!(r.principal_path.len() <= depth + 1);
                        assert!(
                            r.principal_path
                                .windows(2)
                                .all(|w| g.neighbours(&w[0]).contains(&w[1]))
                        );
                        // The value is the principal leaf's utility.
                        let plies = r.principal_path.len() - 1;
                        let leaf = r.destination().unwrap();
                        assert_eq!(u.utility(leaf, plies % 2 == 0), r.value);
                    }
                }
            }
        }
    }
}
