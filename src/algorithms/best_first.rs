//! The best-first search loop shared by uniform-cost search and A*.
//!
//! Nodes are finalized when they're popped, never when they're pushed. A
//! neighbour only gets a new frontier entry when its cost strictly improves,
//! and entries that surface after their node was finalized are skipped.

use rustc_hash::FxHashMap;

use crate::algorithms::reconstruct;
use crate::graph::WeightedGraph;
use crate::open_list::OpenList;
use crate::space::Cost;
use crate::space::Node;
use crate::space::Path;
use crate::space::SearchResult;

/// The ranking tuple for best-first searches.
///
/// We prefer lower priorities (`g` for uniform-cost, `g + h` for A*), and
/// tie-break on insertion order so runs are reproducible.
///
/// ```
/// use wayfinder::algorithms::best_first::BestFirstRank;
///
/// assert!(BestFirstRank::<u32>::new(1, 9) < BestFirstRank::new(2, 0));
/// assert!(BestFirstRank::<u32>::new(2, 0) < BestFirstRank::new(2, 1));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct BestFirstRank<C: Cost> {
    priority: C,
    seq: u64,
}

impl<C> BestFirstRank<C>
where
    C: Cost,
{
    pub fn new(priority: C, seq: u64) -> Self {
        Self { priority, seq }
    }
    pub fn priority(&self) -> C {
        self.priority
    }
}

/// A frontier entry.
///
/// Carries its own parent so the finalized entry is the one that decides how
/// its node was reached.
#[derive(Debug)]
struct OpenNode<N, C>
where
    N: Node,
    C: Cost,
{
    rank: BestFirstRank<C>,
    g: C,
    state: N,
    parent: Option<N>,
}

/// PartialEq is forwarded to self.rank's PartialEq
impl<N: Node, C: Cost> PartialEq for OpenNode<N, C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<N: Node, C: Cost> Eq for OpenNode<N, C> {}

impl<N: Node, C: Cost> PartialOrd for OpenNode<N, C> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
/// Ord is forwarded to self.rank's Ord
impl<N: Node, C: Cost> Ord for OpenNode<N, C> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Why a best-first search stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The goal was finalized.
    Found,
    /// The frontier ran dry. The goal is unreachable.
    Exhausted,
    /// The expansion budget ran out before reaching the goal.
    BudgetSpent,
}

/// Runs a best-first search ranking nodes by `priority(node, g)`.
///
/// `max_expansions` caps the number of finalized nodes.
pub(crate) fn best_first<N, C, F>(
    graph: &WeightedGraph<N, C>,
    start: &N,
    goal: &N,
    mut priority: F,
    max_expansions: Option<usize>,
) -> (SearchResult<N, C>, Termination)
where
    N: Node,
    C: Cost,
    F: FnMut(&N, C) -> C,
{
    if start == goal {
        return (SearchResult::trivial(start.clone()), Termination::Found);
    }

    let mut open = OpenList::<OpenNode<N, C>>::new();
    // Best known `g` for every reached node.
    let mut best_g = FxHashMap::<N, C>::default();
    // Amalgamation of the closed set and the parent links of finalized nodes.
    let mut closed = FxHashMap::<N, Option<N>>::default();
    let mut explored = vec![];
    let mut seq = 0u64;

    let g = C::zero();
    best_g.insert(start.clone(), g);
    open.push(OpenNode {
        rank: BestFirstRank::new(priority(start, g), seq),
        g,
        state: start.clone(),
        parent: None,
    });

    while let Some(node) = open.pop() {
        if closed.contains_key(&node.state) {
            // Stale entry, the node was finalized through a better one.
            continue;
        }
        if max_expansions.is_some_and(|cap| explored.len() >= cap) {
            return (
                SearchResult::not_found(explored),
                Termination::BudgetSpent,
            );
        }

        // Finalize
        log::trace!("Expanding {:?} (g={}, rank={:?})", node.state, node.g, node.rank);
        closed.insert(node.state.clone(), node.parent);
        explored.push(node.state.clone());

        if node.state == *goal {
            let path = Path {
                nodes: reconstruct(&closed, goal),
                cost: node.g,
            };
            return (SearchResult::found(path, explored), Termination::Found);
        }

        for (neigh, c) in graph.neighbours(&node.state) {
            if closed.contains_key(neigh) {
                continue;
            }
            let neigh_g = node.g.saturating_add(c);
            if best_g.get(neigh).is_some_and(|best| *best <= neigh_g) {
                continue;
            }
            best_g.insert(neigh.clone(), neigh_g);

            seq += 1;
            open.push(OpenNode {
                rank: BestFirstRank::new(priority(neigh, neigh_g), seq),
                g: neigh_g,
                state: neigh.clone(),
                parent: Some(node.state.clone()),
            });
        }
    }

    (SearchResult::not_found(explored), Termination::Exhausted)
}
