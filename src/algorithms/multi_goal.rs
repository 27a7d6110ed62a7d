//! Greedy tours through several goals.
//!
//! This is the nearest-neighbour heuristic, not a travelling-salesman solver.
//! Each leg is cost-optimal, the tour as a whole usually isn't.

use crate::algorithms::uniform_cost::UniformCostSearch;
use crate::graph::WeightedGraph;
use crate::space::Cost;
use crate::space::Node;
use crate::space::Path;
use crate::space::write_nodes;

/// A tour stitched together from uniform-cost legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourResult<N, C>
where
    N: Node,
    C: Cost,
{
    /// The whole route, from the start to the last goal visited.
    pub path: Path<N, C>,
    /// Goals in the order they were reached.
    pub visit_order: Vec<N>,
    /// One cost-optimal path per visited goal.
    pub legs: Vec<Path<N, C>>,
    /// Number of distinct goals asked for.
    pub requested: usize,
}

impl<N, C> TourResult<N, C>
where
    N: Node,
    C: Cost,
{
    /// Whether every requested goal was visited.
    pub fn is_complete(&self) -> bool {
        self.visit_order.len() == self.requested
    }

    pub fn cost(&self) -> C {
        self.path.cost
    }
}

impl<N, C> std::fmt::Display for TourResult<N, C>
where
    N: Node,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Tour({}/{} goals, cost {}, ",
            self.visit_order.len(),
            self.requested,
            self.path.cost
        )?;
        write_nodes(f, &self.visit_order)?;
        write!(f, ")")
    }
}

/// Visits goals one at a time, always heading to the cheapest one left.
///
/// From the current position every remaining goal gets its own uniform-cost
/// search. Ties go to the goal listed first. The tour stops early, without
/// backtracking, once no remaining goal can be reached.
#[derive(Debug, Clone, Copy)]
pub struct MultiGoalSearch<'g, N, C>
where
    N: Node,
    C: Cost,
{
    ucs: UniformCostSearch<'g, N, C>,
}

impl<'g, N, C> MultiGoalSearch<'g, N, C>
where
    N: Node,
    C: Cost,
{
    #[must_use]
    pub fn new(graph: &'g WeightedGraph<N, C>) -> Self {
        Self {
            ucs: UniformCostSearch::new(graph),
        }
    }

    /// Tours `goals` starting at `start`.
    ///
    /// Repeated goals count once.
    pub fn search(&self, start: &N, goals: &[N]) -> TourResult<N, C> {
        let mut remaining = Vec::<N>::with_capacity(goals.len());
        for g in goals {
            if !remaining.contains(g) {
                remaining.push(g.clone());
            }
        }
        let requested = remaining.len();

        let mut path = Path::new_from_start(start.clone());
        let mut visit_order = vec![];
        let mut legs = vec![];
        let mut current = start.clone();

        while !remaining.is_empty() {
            let mut nearest: Option<(usize, Path<N, C>)> = None;
            for (i, goal) in remaining.iter().enumerate() {
                let Some(leg) = self.ucs.search(&current, goal).path else {
                    continue;
                };
                if nearest.as_ref().is_none_or(|(_, best)| leg.cost < best.cost) {
                    nearest = Some((i, leg));
                }
            }

            let Some((i, leg)) = nearest else {
                log::debug!(
                    "Tour stuck at {current:?}, {} goals unreachable: {remaining:?}",
                    remaining.len()
                );
                break;
            };
            let goal = remaining.remove(i);
            log::debug!("Tour leg {current:?} -> {goal:?}: cost={}", leg.cost);

            path.extend(leg.clone());
            legs.push(leg);
            visit_order.push(goal.clone());
            current = goal;
        }

        TourResult {
            path,
            visit_order,
            legs,
            requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::problems::random::random_weighted_graph;

    /// ```text
    /// S -1- A -1- B -6- C
    ///  \               /
    ///   ------ 3 ------
    /// ```
    fn line() -> WeightedGraph<&'static str, u32> {
        WeightedGraph::from_edges(
            [("S", "A", 1), ("A", "B", 1), ("B", "C", 6), ("S", "C", 3)],
            true,
        )
    }

    #[test]
    fn nearest_goal_first() {
        let g = line();
        let tour = MultiGoalSearch::new(&g).search(&"S", &["C", "B"]);
        assert!(tour.is_complete());
        assert_eq!(tour.visit_order, vec!["B", "C"]);
        assert_eq!(tour.path.nodes, vec!["S", "A", "B", "A", "S", "C"]);
        assert_eq!(tour.cost(), 7);
        assert_eq!(tour.legs.len(), 2);
        assert_eq!(tour.to_string(), r#"Tour(2/2 goals, cost 7, "B" -> "C")"#);
    }

    #[test]
    fn no_goals() {
        let g = line();
        let tour = MultiGoalSearch::new(&g).search(&"A", &[]);
        assert!(tour.is_complete());
        assert_eq!(tour.path, Path::new_from_start("A"));
        assert!(tour.visit_order.is_empty());
        assert!(tour.legs.is_empty());
    }

    #[test]
    fn start_and_repeated_goals() {
        let g = line();
        let tour = MultiGoalSearch::new(&g).search(&"S", &["A", "S", "A"]);
        assert_eq!(tour.requested, 2);
        assert_eq!(tour.visit_order, vec!["S", "A"]);
        assert_eq!(tour.path.nodes, vec!["S", "A"]);
        assert_eq!(tour.cost(), 1);
    }

    #[test]
    fn ties_go_to_the_first_goal() {
        let g = WeightedGraph::from_edges([("M", "L", 2u32), ("M", "R", 2)], true);
        let s = MultiGoalSearch::new(&g);
        assert_eq!(s.search(&"M", &["R", "L"]).visit_order, vec!["R", "L"]);
        assert_eq!(s.search(&"M", &["L", "R"]).visit_order, vec!["L", "R"]);
    }

    #[test]
    fn partial_tours() {
        let mut g = line();
        g.add_bidirectional_edge("X", "Y", 1);
        let tour = MultiGoalSearch::new(&g).search(&"S", &["Y", "C"]);
        assert!(!tour.is_complete());
        assert_eq!(tour.requested, 2);
        assert_eq!(tour.visit_order, vec!["C"]);
        assert_eq!(tour.path.nodes, vec!["S", "C"]);
        assert_eq!(tour.cost(), 3);
    }

    #[test]
    fn legs_add_up_on_random_graphs() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let g = random_weighted_graph(&mut rng, 12, 16, 9);
            let ucs = UniformCostSearch::new(&g);
            let goals = vec![3, 7, 7, 11, 5];
            let tour = MultiGoalSearch::new(&g).search(&0, &goals);

            assert_eq!(tour.requested, 4);
            assert!(tour.visit_order.len() <= tour.requested);
            assert_eq!(tour.legs.len(), tour.visit_order.len());
            assert_eq!(tour.path.start(), Some(&0));
            if let Some(last) = tour.visit_order.last() {
                assert_eq!(tour.path.end(), Some(last));
            }

            let mut from = 0;
            let mut total = 0;
            for (leg, goal) in tour.legs.iter().zip(&tour.visit_order) {
                // Every leg is as cheap as a fresh search says it can be.
                assert_eq!(Some(leg.cost), ucs.search(&from, goal).cost(), "seed={seed}");
                total += leg.cost;
                from = *goal;
            }
            assert_eq!(tour.cost(), total);
        }
    }
}
