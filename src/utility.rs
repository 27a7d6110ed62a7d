//! Terminal values for adversarial search.

use std::fmt::Debug;
use std::ops::Neg;
use std::str::FromStr;

use num_traits::bounds::Bounded;
use rustc_hash::FxHashMap;

use crate::error::TableParseError;
use crate::parse::node_values;
use crate::parse::read_table;
use crate::space::Node;

/// A game value. Bigger is better for the maximizing agent.
pub trait Value: Copy + Debug + Ord + Bounded {}
impl<T> Value for T where T: Copy + Debug + Ord + Bounded {}

/// Scores a node where the game stops.
///
/// `maximizing` tells whose turn it would be at `node`. Implementations
/// encode each side's perspective themselves.
pub trait Utility<N>: Debug
where
    N: Node,
{
    type Value: Value;

    fn utility(&self, node: &N, maximizing: bool) -> Self::Value;
}

/// Node scores from the agent's point of view.
///
/// The adversary's utility is the negation of the agent's. Nodes missing from
/// the table score `default`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityTable<N, V>
where
    N: Node,
    V: Value + Neg<Output = V>,
{
    values: FxHashMap<N, V>,
    default: V,
}

impl<N, V> UtilityTable<N, V>
where
    N: Node,
    V: Value + Neg<Output = V>,
{
    pub fn new<I>(values: I, default: V) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
    {
        Self {
            values: values.into_iter().collect(),
            default,
        }
    }

    pub fn insert(&mut self, node: N, v: V) {
        self.values.insert(node, v);
    }

    /// The agent's score for `node`.
    pub fn score(&self, node: &N) -> V {
        self.values.get(node).copied().unwrap_or(self.default)
    }

    pub fn default_value(&self) -> V {
        self.default
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V> UtilityTable<String, V>
where
    V: Value + Neg<Output = V> + FromStr,
{
    /// Parses `city, score` lines.
    pub fn parse(text: &str, default: V) -> Result<Self, TableParseError> {
        Ok(Self::new(node_values::<V>(text)?, default))
    }

    pub fn load(p: &std::path::Path, default: V) -> Result<Self, TableParseError> {
        Ok(Self::new(read_table::<V>(p)?, default))
    }
}

impl<N, V> Utility<N> for UtilityTable<N, V>
where
    N: Node,
    V: Value + Neg<Output = V>,
{
    type Value = V;

    fn utility(&self, node: &N, maximizing: bool) -> V {
        let v = self.score(node);
        if maximizing { v } else { -v }
    }
}
