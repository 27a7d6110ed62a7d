//! A* search over weighted graphs.

use crate::algorithms::best_first::best_first;
use crate::graph::WeightedGraph;
use crate::heuristic::Heuristic;
use crate::heuristic::SelfComputedHeuristic;
use crate::space::Cost;
use crate::space::Node;
use crate::space::SearchResult;

/// A* search.
///
/// The frontier is ordered by `f = g + h` with ties going to the entry pushed
/// first. Nodes are finalized when popped, like in uniform-cost search, and a
/// neighbour is only re-pushed when its `g` strictly improves.
///
/// The returned cost is optimal with consistent heuristics. Finalized nodes
/// are never reopened, so an admissible but inconsistent heuristic may settle
/// for a costlier path.
#[derive(Debug)]
pub struct AStarSearch<'g, N, C, H>
where
    N: Node,
    C: Cost,
    H: Heuristic<N, C>,
{
    graph: &'g WeightedGraph<N, C>,
    heuristic: H,
}

impl<'g, N, C, H> AStarSearch<'g, N, C, H>
where
    N: Node,
    C: Cost,
    H: Heuristic<N, C>,
{
    #[must_use]
    pub fn new(graph: &'g WeightedGraph<N, C>, heuristic: H) -> Self {
        Self { graph, heuristic }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    pub fn graph(&self) -> &'g WeightedGraph<N, C> {
        self.graph
    }

    pub fn search(&mut self, start: &N, goal: &N) -> SearchResult<N, C> {
        let graph = self.graph;
        let heuristic = &mut self.heuristic;
        let (result, _) = best_first(
            graph,
            start,
            goal,
            |n, g| g.saturating_add(&heuristic.h(graph, n, goal)),
            None,
        );
        log::debug!(
            "A* {start:?} -> {goal:?}: cost={:?}, expanded={}",
            result.cost(),
            result.explored.len()
        );
        result
    }
}

impl<'g, N, C> AStarSearch<'g, N, C, SelfComputedHeuristic<N, C>>
where
    N: Node,
    C: Cost,
{
    /// A* deriving its own heuristic from bounded uniform-cost searches.
    #[must_use]
    pub fn self_computed(graph: &'g WeightedGraph<N, C>) -> Self {
        Self::new(graph, SelfComputedHeuristic::default())
    }

    #[must_use]
    pub fn with_exploration_cap(graph: &'g WeightedGraph<N, C>, exploration_cap: usize) -> Self {
        Self::new(graph, SelfComputedHeuristic::new(exploration_cap))
    }
}
