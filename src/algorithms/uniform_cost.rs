//! Uniform-cost search (Dijkstra's algorithm with an early exit on the goal).

use crate::algorithms::best_first::Termination;
use crate::algorithms::best_first::best_first;
use crate::graph::WeightedGraph;
use crate::space::Cost;
use crate::space::Node;
use crate::space::SearchResult;

/// Finds minimum-cost paths on a [`WeightedGraph`].
///
/// The frontier is ordered by accumulated cost with ties going to the entry
/// pushed first. With non-negative costs the first time the goal is
/// finalized its cost is optimal.
#[derive(Debug, Clone, Copy)]
pub struct UniformCostSearch<'g, N, C>
where
    N: Node,
    C: Cost,
{
    graph: &'g WeightedGraph<N, C>,
}

impl<'g, N, C> UniformCostSearch<'g, N, C>
where
    N: Node,
    C: Cost,
{
    #[must_use]
    pub fn new(graph: &'g WeightedGraph<N, C>) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g WeightedGraph<N, C> {
        self.graph
    }

    pub fn search(&self, start: &N, goal: &N) -> SearchResult<N, C> {
        let (result, _) = best_first(self.graph, start, goal, |_, g| g, None);
        log::debug!(
            "UCS {start:?} -> {goal:?}: cost={:?}, expanded={}",
            result.cost(),
            result.explored.len()
        );
        result
    }

    /// Like [`Self::search`], but gives up after finalizing `max_expansions`
    /// nodes.
    ///
    /// The [`Termination`] tells an unreachable goal apart from a spent
    /// budget.
    pub fn search_bounded(
        &self,
        start: &N,
        goal: &N,
        max_expansions: usize,
    ) -> (SearchResult<N, C>, Termination) {
        best_first(self.graph, start, goal, |_, g| g, Some(max_expansions))
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;
    use rustc_hash::FxHashSet;

    use super::*;
    use crate::problems::random::random_weighted_graph;

    fn cycle() -> WeightedGraph<&'static str, u32> {
        WeightedGraph::from_edges(
            [
                ("A", "B", 1),
                ("B", "C", 1),
                ("C", "D", 1),
                ("D", "E", 1),
                ("E", "A", 1),
            ],
            true,
        )
    }

    /// The cheapest simple path by exhaustive enumeration.
    fn brute_force<N: Node, C: Cost>(g: &WeightedGraph<N, C>, start: &N, goal: &N) -> Option<C> {
        fn visit<N: Node, C: Cost>(
            g: &WeightedGraph<N, C>,
            at: &N,
            goal: &N,
            cost: C,
            seen: &mut FxHashSet<N>,
            best: &mut Option<C>,
        ) {
            if at == goal {
                if best.is_none_or(|b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            for (n, c) in g.neighbours(at) {
                if seen.insert(n.clone()) {
                    visit(g, n, goal, cost + *c, seen, best);
                    seen.remove(n);
                }
            }
        }
        let mut seen = FxHashSet::default();
        seen.insert(start.clone());
        let mut best = None;
        visit(g, start, goal, C::zero(), &mut seen, &mut best);
        best
    }

    #[test]
    fn cycle_costs() {
        let g = cycle();
        let ucs = UniformCostSearch::new(&g);
        let r = ucs.search(&"A", &"C");
        assert_eq!(r.cost(), Some(2));
        assert_eq!(r.nodes(), Some(&["A", "B", "C"][..]));
        assert_eq!(r.explored, vec!["A", "B", "E", "C"]);
    }

    #[test]
    fn trivial() {
        let g = cycle();
        let r = UniformCostSearch::new(&g).search(&"D", &"D");
        assert_eq!(r, SearchResult::trivial("D"));

        let empty = WeightedGraph::<&str, u32>::new();
        let r = UniformCostSearch::new(&empty).search(&"X", &"X");
        assert_eq!(r.cost(), Some(0));
    }

    #[test]
    fn unreachable() {
        let mut g = cycle();
        g.add_edge("Y", "Z", 3);
        let r = UniformCostSearch::new(&g).search(&"A", &"Z");
        assert!(!r.is_found());
        assert_eq!(r.cost(), None);
        assert_eq!(r.explored.len(), 5);
    }

    #[test]
    fn cheaper_detour_wins() {
        let g = WeightedGraph::from_edges(
            [("S", "G", 10u32), ("S", "A", 2), ("A", "B", 2), ("B", "G", 2)],
            true,
        );
        let r = UniformCostSearch::new(&g).search(&"S", &"G");
        assert_eq!(r.nodes(), Some(&["S", "A", "B", "G"][..]));
        assert_eq!(r.cost(), Some(6));
    }

    #[test]
    fn directed_edges_are_respected() {
        let g = WeightedGraph::from_edges([("A", "B", 1u32), ("B", "C", 1)], false);
        let ucs = UniformCostSearch::new(&g);
        assert_eq!(ucs.search(&"A", &"C").cost(), Some(2));
        assert!(!ucs.search(&"C", &"A").is_found());
    }

    #[test]
    fn optimal_on_random_graphs() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let g = random_weighted_graph(&mut rng, 8, 14, 9);
            let ucs = UniformCostSearch::new(&g);
            for start in g.nodes() {
                for goal in g.nodes() {
                    let r = ucs.search(start, goal);
                    assert_eq!(r.cost(), brute_force(&g, start, goal), "seed={seed}");
                    if let Some(p) = &r.path {
                        // The reported cost is the sum of the edges walked.
                        let walked: u32 = p
                            .nodes
                            .windows(2)
                            .map(|w| g.cost(&w[0], &w[1]).unwrap())
                            .sum();
                        assert_eq!(walked, p.cost);
                    }
                }
            }
        }
    }
}
