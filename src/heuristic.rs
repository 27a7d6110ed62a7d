//! Remaining-cost estimates for A*.
//!
//! A* only guarantees optimal paths with admissible heuristics, ones that
//! never overestimate the true remaining cost.

use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::algorithms::best_first::Termination;
use crate::algorithms::uniform_cost::UniformCostSearch;
use crate::error::TableParseError;
use crate::graph::WeightedGraph;
use crate::parse::node_values;
use crate::parse::read_table;
use crate::space::Cost;
use crate::space::Node;

/// Expansions allowed to the bounded search behind [`SelfComputedHeuristic`].
pub const DEFAULT_EXPLORATION_CAP: usize = 1_000;

/// Estimates the cost of reaching `goal` from `node`.
///
/// Takes `&mut self` so implementations can memoize.
pub trait Heuristic<N, C>: std::fmt::Debug
where
    N: Node,
    C: Cost,
{
    fn h(&mut self, graph: &WeightedGraph<N, C>, node: &N, goal: &N) -> C;
}

/// Always 0. Turns A* into uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<N, C> Heuristic<N, C> for ZeroHeuristic
where
    N: Node,
    C: Cost,
{
    #[inline(always)]
    fn h(&mut self, _graph: &WeightedGraph<N, C>, _node: &N, _goal: &N) -> C {
        C::zero()
    }
}

/// Estimates looked up from a `(node, goal)` table.
///
/// Pairs missing from the table estimate 0, which keeps the heuristic
/// admissible when the table is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicTable<N, C>
where
    N: Node,
    C: Cost,
{
    values: FxHashMap<(N, N), C>,
}

impl<N, C> Default for HeuristicTable<N, C>
where
    N: Node,
    C: Cost,
{
    fn default() -> Self {
        Self {
            values: FxHashMap::default(),
        }
    }
}

impl<N, C> HeuristicTable<N, C>
where
    N: Node,
    C: Cost,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// A table of estimates towards a single `goal`.
    pub fn for_goal<I>(goal: N, estimates: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
    {
        let mut table = Self::new();
        for (node, h) in estimates {
            table.insert(node, goal.clone(), h);
        }
        table
    }

    pub fn insert(&mut self, node: N, goal: N, h: C) {
        self.values.insert((node, goal), h);
    }

    pub fn get(&self, node: &N, goal: &N) -> Option<C> {
        // TODO: Look up borrowed pairs without cloning both keys.
        self.values.get(&(node.clone(), goal.clone())).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<C> HeuristicTable<String, C>
where
    C: Cost + FromStr,
{
    /// Parses `city, estimate` lines as estimates towards `goal`.
    pub fn parse_for_goal(goal: &str, text: &str) -> Result<Self, TableParseError> {
        Ok(Self::for_goal(goal.to_string(), node_values::<C>(text)?))
    }

    pub fn load_for_goal(goal: &str, p: &std::path::Path) -> Result<Self, TableParseError> {
        Ok(Self::for_goal(goal.to_string(), read_table::<C>(p)?))
    }
}

impl<N, C> Heuristic<N, C> for HeuristicTable<N, C>
where
    N: Node,
    C: Cost,
{
    fn h(&mut self, _graph: &WeightedGraph<N, C>, node: &N, goal: &N) -> C {
        if node == goal {
            return C::zero();
        }
        self.get(node, goal).unwrap_or_else(C::zero)
    }
}

/// Adapts a closure `(node, goal) -> estimate`.
#[derive(Clone, Copy)]
pub struct FnHeuristic<F>(pub F);

impl<F> std::fmt::Debug for FnHeuristic<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "FnHeuristic")
    }
}

impl<N, C, F> Heuristic<N, C> for FnHeuristic<F>
where
    N: Node,
    C: Cost,
    F: FnMut(&N, &N) -> C,
{
    #[inline(always)]
    fn h(&mut self, _graph: &WeightedGraph<N, C>, node: &N, goal: &N) -> C {
        (self.0)(node, goal)
    }
}

/// Derives estimates from the graph itself.
///
/// Each `(node, goal)` pair runs a uniform-cost search capped at
/// `exploration_cap` expansions. A cost found within the cap is exact. When
/// the cap runs out the estimate falls back to the cheapest edge times the
/// unweighted hop count, which can't overestimate either. Goals that can't
/// be reached at all estimate `C::max_value()`.
///
/// Exact costs and hop bounds are each consistent on their own, but a mix of
/// both may not be.
///
/// Results are memoized for the lifetime of the instance, so an instance
/// must only ever be used with one graph.
#[derive(Debug, Clone)]
pub struct SelfComputedHeuristic<N, C>
where
    N: Node,
    C: Cost,
{
    exploration_cap: usize,
    cache: FxHashMap<(N, N), C>,
}

impl<N, C> Default for SelfComputedHeuristic<N, C>
where
    N: Node,
    C: Cost,
{
    fn default() -> Self {
        Self::new(DEFAULT_EXPLORATION_CAP)
    }
}

impl<N, C> SelfComputedHeuristic<N, C>
where
    N: Node,
    C: Cost,
{
    pub fn new(exploration_cap: usize) -> Self {
        Self {
            exploration_cap,
            cache: FxHashMap::default(),
        }
    }

    pub fn exploration_cap(&self) -> usize {
        self.exploration_cap
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Computes an estimate without touching the cache.
    pub fn estimate(&self, graph: &WeightedGraph<N, C>, node: &N, goal: &N) -> C {
        let ucs = UniformCostSearch::new(graph);
        let (result, termination) = ucs.search_bounded(node, goal, self.exploration_cap);
        match (result.cost(), termination) {
            (Some(c), _) => c,
            (None, Termination::BudgetSpent) => {
                log::warn!(
                    "Estimating {node:?} -> {goal:?} took over {} expansions, using a hop-count bound",
                    self.exploration_cap
                );
                Self::hop_bound(graph, node, goal)
            }
            (None, _) => C::max_value(),
        }
    }

    /// `min_edge_cost × hops`, a lower bound on any route's cost.
    fn hop_bound(graph: &WeightedGraph<N, C>, node: &N, goal: &N) -> C {
        match (graph.min_edge_cost(), graph.hop_distance(node, goal)) {
            (Some(min_cost), Some(hops)) => match C::from_usize(hops) {
                Some(hops) => min_cost.saturating_mul(&hops),
                None => C::zero(),
            },
            _ => C::max_value(),
        }
    }
}

impl<N, C> Heuristic<N, C> for SelfComputedHeuristic<N, C>
where
    N: Node,
    C: Cost,
{
    fn h(&mut self, graph: &WeightedGraph<N, C>, node: &N, goal: &N) -> C {
        if node == goal {
            return C::zero();
        }
        let key = (node.clone(), goal.clone());
        if let Some(h) = self.cache.get(&key) {
            return *h;
        }
        let h = self.estimate(graph, node, goal);
        self.cache.insert(key, h);
        h
    }
}
