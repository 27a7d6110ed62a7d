//! Breadth-first and depth-first search over unweighted graphs.

use std::collections::VecDeque;
use std::str::FromStr;

use derive_more::Display;
use rustc_hash::FxHashMap;

use crate::algorithms::reconstruct;
use crate::error::SearchError;
use crate::graph::Graph;
use crate::space::Node;
use crate::space::Path;
use crate::space::SearchResult;

/// How the frontier is consumed.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Default)]
pub enum Strategy {
    /// FIFO frontier. Finds paths with the fewest edges.
    #[default]
    #[display("bfs")]
    BreadthFirst,
    /// LIFO frontier.
    #[display("dfs")]
    DepthFirst,
}

impl FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Strategy::BreadthFirst),
            "dfs" | "depth-first" => Ok(Strategy::DepthFirst),
            _ => Err(SearchError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Uninformed search. Path costs are edge counts.
///
/// Nodes are marked as visited as soon as they enter the frontier, and the
/// search stops the moment the goal shows up as a neighbour, so the goal is
/// never popped. The exploration trace holds the popped nodes in order
/// followed by the goal when it's found.
#[derive(Debug, Clone, Copy)]
pub struct UninformedSearch<'g, N>
where
    N: Node,
{
    graph: &'g Graph<N>,
}

impl<'g, N> UninformedSearch<'g, N>
where
    N: Node,
{
    #[must_use]
    pub fn new(graph: &'g Graph<N>) -> Self {
        Self { graph }
    }

    /// Searches with a strategy given by name (`bfs` or `dfs`).
    pub fn search_named(
        &self,
        start: &N,
        goal: &N,
        strategy: &str,
    ) -> Result<SearchResult<N, usize>, SearchError> {
        let strategy = strategy.parse::<Strategy>()?;
        Ok(self.search(start, goal, strategy))
    }

    pub fn search(&self, start: &N, goal: &N, strategy: Strategy) -> SearchResult<N, usize> {
        if start == goal {
            return SearchResult::trivial(start.clone());
        }

        let mut frontier = VecDeque::<N>::new();
        // Doubles as the visited set.
        let mut parents = FxHashMap::<N, Option<N>>::default();
        let mut explored = vec![];

        parents.insert(start.clone(), None);
        frontier.push_back(start.clone());

        loop {
            let current = match strategy {
                Strategy::BreadthFirst => frontier.pop_front(),
                Strategy::DepthFirst => frontier.pop_back(),
            };
            let Some(current) = current else {
                break;
            };
            log::trace!("{strategy}: expanding {current:?}");
            explored.push(current.clone());

            for neigh in self.graph.neighbours(&current) {
                if neigh == goal {
                    parents.insert(goal.clone(), Some(current.clone()));
                    explored.push(goal.clone());
                    let nodes = reconstruct(&parents, goal);
                    let path = Path {
                        cost: nodes.len() - 1,
                        nodes,
                    };
                    log::debug!(
                        "{strategy} {start:?} -> {goal:?}: {} edges, explored={}",
                        path.cost,
                        explored.len()
                    );
                    return SearchResult::found(path, explored);
                }
                if !parents.contains_key(neigh) {
                    parents.insert(neigh.clone(), Some(current.clone()));
                    frontier.push_back(neigh.clone());
                }
            }
        }

        log::debug!(
            "{strategy} {start:?} -> {goal:?}: not found, explored={}",
            explored.len()
        );
        SearchResult::not_found(explored)
    }

    pub fn breadth_first(&self, start: &N, goal: &N) -> SearchResult<N, usize> {
        self.search(start, goal, Strategy::BreadthFirst)
    }

    pub fn depth_first(&self, start: &N, goal: &N) -> SearchResult<N, usize> {
        self.search(start, goal, Strategy::DepthFirst)
    }
}
