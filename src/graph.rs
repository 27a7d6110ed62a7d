//! Adjacency structures searched by the algorithms.
//!
//! Both graphs keep neighbour lists in insertion order. That order is
//! observable: it decides how uninformed searches and minimax break ties.

use std::collections::VecDeque;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use crate::error::GraphParseError;
use crate::parse::records;
use crate::space::Cost;
use crate::space::Node;

/// An unweighted graph.
///
/// [`Graph::add_edge`] stores both directions and never duplicates a
/// neighbour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph<N>
where
    N: Node,
{
    adjacency: FxHashMap<N, Vec<N>>,
    /// Nodes in the order they were first seen.
    order: Vec<N>,
}

impl<N> Default for Graph<N>
where
    N: Node,
{
    fn default() -> Self {
        Self {
            adjacency: FxHashMap::default(),
            order: vec![],
        }
    }
}

impl<N> Graph<N>
where
    N: Node,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut g = Self::new();
        for (a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    /// Builds from `node -> [neighbours]` listings.
    ///
    /// Every listed pair is inserted as an undirected edge, so listings don't
    /// need to be symmetric.
    pub fn from_adjacency<I, L>(listing: I) -> Self
    where
        I: IntoIterator<Item = (N, L)>,
        L: IntoIterator<Item = N>,
    {
        let mut g = Self::new();
        for (node, neighbours) in listing {
            g.add_node(node.clone());
            for n in neighbours {
                g.add_edge(node.clone(), n);
            }
        }
        g
    }

    pub fn add_node(&mut self, n: N) {
        self.neighbours_mut(n);
    }

    /// Adds an undirected edge.
    pub fn add_edge(&mut self, a: N, b: N) {
        self.add_arc(a.clone(), b.clone());
        self.add_arc(b, a);
    }

    /// Adds `a -> b` unless it's already there.
    fn add_arc(&mut self, a: N, b: N) {
        self.add_node(a.clone());
        self.add_node(b.clone());
        let neighbours = self.neighbours_mut(a);
        if !neighbours.contains(&b) {
            neighbours.push(b);
        }
    }

    fn neighbours_mut(&mut self, n: N) -> &mut Vec<N> {
        if !self.adjacency.contains_key(&n) {
            self.order.push(n.clone());
        }
        self.adjacency.entry(n).or_default()
    }

    /// Neighbours of `n`, empty for unknown nodes.
    #[inline(always)]
    pub fn neighbours(&self, n: &N) -> &[N] {
        self.adjacency.get(n).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[N] {
        &self.order
    }

    pub fn contains(&self, n: &N) -> bool {
        self.adjacency.contains_key(n)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn degree(&self, n: &N) -> usize {
        self.neighbours(n).len()
    }
}

/// A graph with non-negative integer edge costs.
///
/// Storage is directed. The first cost inserted for a `from -> to` pair wins,
/// later insertions of the same pair are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedGraph<N, C>
where
    N: Node,
    C: Cost,
{
    adjacency: FxHashMap<N, Vec<(N, C)>>,
    order: Vec<N>,
}

impl<N, C> Default for WeightedGraph<N, C>
where
    N: Node,
    C: Cost,
{
    fn default() -> Self {
        Self {
            adjacency: FxHashMap::default(),
            order: vec![],
        }
    }
}

impl<N, C> WeightedGraph<N, C>
where
    N: Node,
    C: Cost,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I>(edges: I, bidirectional: bool) -> Self
    where
        I: IntoIterator<Item = (N, N, C)>,
    {
        let mut g = Self::new();
        for (from, to, c) in edges {
            if bidirectional {
                g.add_bidirectional_edge(from, to, c);
            } else {
                g.add_edge(from, to, c);
            }
        }
        g
    }

    pub fn add_node(&mut self, n: N) {
        self.neighbours_mut(n);
    }

    /// Adds `from -> to`. Returns whether the edge is new.
    pub fn add_edge(&mut self, from: N, to: N, c: C) -> bool {
        self.add_node(from.clone());
        self.add_node(to.clone());
        let neighbours = self.neighbours_mut(from);
        if neighbours.iter().any(|(n, _)| *n == to) {
            return false;
        }
        neighbours.push((to, c));
        true
    }

    /// Adds `from -> to` and `to -> from` with the same cost.
    pub fn add_bidirectional_edge(&mut self, from: N, to: N, c: C) {
        self.add_edge(from.clone(), to.clone(), c);
        self.add_edge(to, from, c);
    }

    fn neighbours_mut(&mut self, n: N) -> &mut Vec<(N, C)> {
        if !self.adjacency.contains_key(&n) {
            self.order.push(n.clone());
        }
        self.adjacency.entry(n).or_default()
    }

    #[inline(always)]
    pub fn neighbours(&self, n: &N) -> &[(N, C)] {
        self.adjacency.get(n).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The cost of the `from -> to` edge, if there is one.
    pub fn cost(&self, from: &N, to: &N) -> Option<C> {
        self.neighbours(from)
            .iter()
            .find(|(n, _)| n == to)
            .map(|(_, c)| *c)
    }

    pub fn nodes(&self) -> &[N] {
        &self.order
    }

    pub fn contains(&self, n: &N) -> bool {
        self.adjacency.contains_key(n)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// The cheapest edge in the graph.
    pub fn min_edge_cost(&self) -> Option<C> {
        self.adjacency
            .values()
            .flat_map(|neighbours| neighbours.iter().map(|(_, c)| *c))
            .min()
    }

    /// Number of edges on the shortest unweighted route, if any.
    pub fn hop_distance(&self, from: &N, to: &N) -> Option<usize> {
        if from == to {
            return Some(0);
        }
        let mut hops = FxHashMap::<&N, usize>::default();
        let mut queue = VecDeque::<&N>::new();
        hops.insert(from, 0);
        queue.push_back(from);

        while let Some(n) = queue.pop_front() {
            let h = hops.get(n).copied().unwrap_or_default() + 1;
            for (neigh, _) in self.neighbours(n) {
                if neigh == to {
                    return Some(h);
                }
                if !hops.contains_key(neigh) {
                    hops.insert(neigh, h);
                    queue.push_back(neigh);
                }
            }
        }
        None
    }

    /// The same adjacency without costs.
    ///
    /// Directed entries are copied as they are, so a graph built with
    /// bidirectional edges stays symmetric.
    pub fn to_unweighted(&self) -> Graph<N> {
        let mut g = Graph::new();
        for n in &self.order {
            g.add_node(n.clone());
            for (neigh, _) in self.neighbours(n) {
                g.add_arc(n.clone(), neigh.clone());
            }
        }
        g
    }
}

fn edge_endpoints<'a>(
    line: usize,
    text: &'a str,
    fields: &[&'a str],
) -> Result<(&'a str, &'a str), GraphParseError> {
    let field = |i: usize, name: &'static str| match fields.get(i) {
        Some(f) if !f.is_empty() => Ok(*f),
        _ => Err(GraphParseError::MissingField {
            line,
            field: name,
            text: text.to_string(),
        }),
    };
    Ok((field(0, "from")?, field(1, "to")?))
}

/// Parses `from, to[, cost]` lines as undirected edges.
///
/// Costs are accepted and ignored so the same file feeds both graph kinds.
impl std::convert::TryFrom<&str> for Graph<String> {
    type Error = GraphParseError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        let mut g = Graph::new();
        for r in records(text) {
            let (from, to) = edge_endpoints(r.line, r.text, &r.fields)?;
            if let Some(extra) = r.fields.get(3) {
                return Err(GraphParseError::TrailingField {
                    line: r.line,
                    text: extra.to_string(),
                });
            }
            g.add_edge(from.to_string(), to.to_string());
        }
        log::debug!("Parsed unweighted graph with {} nodes", g.len());
        Ok(g)
    }
}

/// Parses `from, to, cost` lines as bidirectional edges.
impl<C> std::convert::TryFrom<&str> for WeightedGraph<String, C>
where
    C: Cost + FromStr,
{
    type Error = GraphParseError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        let mut g = WeightedGraph::new();
        for r in records(text) {
            let (from, to) = edge_endpoints(r.line, r.text, &r.fields)?;
            let cost = r.fields.get(2).ok_or_else(|| GraphParseError::MissingField {
                line: r.line,
                field: "cost",
                text: r.text.to_string(),
            })?;
            let cost = cost.parse::<C>().map_err(|_| GraphParseError::InvalidCost {
                line: r.line,
                text: cost.to_string(),
            })?;
            if let Some(extra) = r.fields.get(3) {
                return Err(GraphParseError::TrailingField {
                    line: r.line,
                    text: extra.to_string(),
                });
            }
            g.add_bidirectional_edge(from.to_string(), to.to_string(), cost);
        }
        log::debug!(
            "Parsed weighted graph with {} nodes and {} directed edges",
            g.len(),
            g.edge_count()
        );
        Ok(g)
    }
}

fn read_graph_file(p: &std::path::Path) -> Result<String, GraphParseError> {
    std::fs::read_to_string(p).map_err(|e| GraphParseError::IOError {
        p: p.to_path_buf(),
        e,
    })
}

impl std::convert::TryFrom<&std::path::Path> for Graph<String> {
    type Error = GraphParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        Graph::try_from(read_graph_file(p)?.as_str())
    }
}

impl<C> std::convert::TryFrom<&std::path::Path> for WeightedGraph<String, C>
where
    C: Cost + FromStr,
{
    type Error = GraphParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        WeightedGraph::try_from(read_graph_file(p)?.as_str())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn undirected_edges_are_symmetric_and_unique() {
        let g = Graph::from_edges([("A", "B"), ("B", "A"), ("A", "C"), ("A", "B")]);
        assert_eq!(g.neighbours(&"A"), &["B", "C"]);
        assert_eq!(g.neighbours(&"B"), &["A"]);
        assert_eq!(g.neighbours(&"C"), &["A"]);
        assert_eq!(g.nodes(), &["A", "B", "C"]);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.degree(&"A"), 2);
        assert!(g.neighbours(&"Z").is_empty());
    }

    #[test]
    fn adjacency_listing_is_symmetrised() {
        let g = Graph::from_adjacency([("A", vec!["B"]), ("C", vec![]), ("B", vec!["C"])]);
        assert_eq!(g.neighbours(&"A"), &["B"]);
        assert_eq!(g.neighbours(&"B"), &["A", "C"]);
        assert_eq!(g.neighbours(&"C"), &["B"]);
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn first_cost_wins() {
        let mut g = WeightedGraph::<&str, u32>::new();
        assert!(g.add_edge("A", "B", 3));
        assert!(!g.add_edge("A", "B", 1));
        assert_eq!(g.neighbours(&"A"), &[("B", 3)]);
        assert_eq!(g.cost(&"A", &"B"), Some(3));
        // Directed storage
        assert_eq!(g.cost(&"B", &"A"), None);
        assert!(g.contains(&"B"));
    }

    #[test]
    fn bidirectional_edges() {
        let g = WeightedGraph::from_edges([("A", "B", 2u32), ("B", "C", 5)], true);
        assert_eq!(g.cost(&"B", &"A"), Some(2));
        assert_eq!(g.cost(&"C", &"B"), Some(5));
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.min_edge_cost(), Some(2));
    }

    #[test]
    fn hop_distance() {
        let g = WeightedGraph::from_edges(
            [("A", "B", 1u32), ("B", "C", 1), ("C", "D", 1), ("A", "D", 9)],
            true,
        );
        assert_eq!(g.hop_distance(&"A", &"A"), Some(0));
        assert_eq!(g.hop_distance(&"A", &"C"), Some(2));
        assert_eq!(g.hop_distance(&"A", &"D"), Some(1));
        assert_eq!(g.hop_distance(&"A", &"Z"), None);
    }

    #[test]
    fn unweighted_view_keeps_order() {
        let g = WeightedGraph::from_edges([("A", "C", 1u32), ("A", "B", 1)], true);
        let u = g.to_unweighted();
        assert_eq!(u.neighbours(&"A"), &["C", "B"]);
        assert_eq!(u.neighbours(&"B"), &["A"]);
    }

    #[test]
    fn parse_weighted() {
        let text = indoc! {"
            # Roads
            Addis Ababa, Adama, 3
            Adama, Batu, 4

            Addis Ababa, Adama, 7  # ignored duplicate
        "};
        let g = WeightedGraph::<String, u32>::try_from(text).unwrap();
        let addis = "Addis Ababa".to_string();
        let adama = "Adama".to_string();
        assert_eq!(g.cost(&addis, &adama), Some(3));
        assert_eq!(g.cost(&adama, &addis), Some(3));
        assert_eq!(g.len(), 3);
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            WeightedGraph::<String, u32>::try_from("A, B"),
            Err(GraphParseError::MissingField { line: 1, field: "cost", .. })
        ));
        assert!(matches!(
            WeightedGraph::<String, u32>::try_from("A, B, -1"),
            Err(GraphParseError::InvalidCost { line: 1, .. })
        ));
        assert!(matches!(
            Graph::<String>::try_from("A"),
            Err(GraphParseError::MissingField { line: 1, field: "to", .. })
        ));
        assert!(matches!(
            Graph::<String>::try_from("A, B, 1, 2"),
            Err(GraphParseError::TrailingField { line: 1, .. })
        ));
    }

    #[test]
    fn parse_unweighted_ignores_costs() {
        let g = Graph::<String>::try_from("A, B, 4\nB, C").unwrap();
        assert_eq!(g.neighbours(&"B".to_string()), &["A".to_string(), "C".to_string()]);
    }
}
