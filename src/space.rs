use std::fmt::Debug;
use std::hash::Hash;

use num_traits::FromPrimitive;
use num_traits::SaturatingAdd;
use num_traits::SaturatingMul;
use num_traits::sign::Unsigned;

/// Maximum number of nodes shown when displaying paths and traces.
const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// An opaque location identifier.
///
/// Anything hashable and comparable works. City names are `String`s,
/// synthetic graphs use plain integers.
pub trait Node: Clone + Debug + Eq + Hash + Ord {}
impl<T> Node for T where T: Clone + Debug + Eq + Hash + Ord {}

/// A non-negative edge or path cost.
///
/// `Cost::max_value()` is reserved to mean "unreachable".
pub trait Cost:
    Copy
    + Clone
    + Debug
    + std::fmt::Display
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + Hash
    + SaturatingAdd
    + SaturatingMul
    + Unsigned
    + FromPrimitive
    + num_traits::bounds::UpperBounded
    + std::ops::Add<Output = Self>
    + std::ops::AddAssign
{
    fn valid(&self) -> bool {
        *self != Self::max_value()
    }
}
impl Cost for u16 {}
impl Cost for u32 {}
impl Cost for u64 {}
impl Cost for usize {}

/// A route through a graph.
///
/// The first node is the start and the last one the goal. Consecutive nodes
/// are joined by an edge of the graph the path was found on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<N, C>
where
    N: Node,
    C: Cost,
{
    pub nodes: Vec<N>,
    pub cost: C,
}

impl<N, C> Path<N, C>
where
    N: Node,
    C: Cost,
{
    /// The zero-length path that stays at `start`.
    #[inline(always)]
    pub fn new_from_start(start: N) -> Self {
        Self {
            nodes: vec![start],
            cost: C::zero(),
        }
    }

    #[inline(always)]
    pub fn start(&self) -> Option<&N> {
        self.nodes.first()
    }

    #[inline(always)]
    pub fn end(&self) -> Option<&N> {
        self.nodes.last()
    }

    /// Number of edges travelled.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn append(&mut self, n: N, c: C) {
        self.nodes.push(n);
        self.cost = self.cost.saturating_add(&c);
    }

    /// Appends `other`, which must start where `self` ends.
    ///
    /// The junction node is kept once.
    pub fn extend(&mut self, other: Path<N, C>) {
        debug_assert_eq!(self.end(), other.start());
        self.nodes.extend(other.nodes.into_iter().skip(1));
        self.cost = self.cost.saturating_add(&other.cost);
    }

    /// Runs sanity checks
    #[inline(always)]
    pub fn seems_valid(&self) -> bool {
        !self.nodes.is_empty() && self.cost.valid()
    }
}

impl<N, C> std::fmt::Display for Path<N, C>
where
    N: Node,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Path({}, ", self.cost)?;
        write_nodes(f, &self.nodes)?;
        write!(f, ")")
    }
}

/// Writes `a -> b -> c`, eliding the middle of long sequences.
pub(crate) fn write_nodes<N: Debug>(f: &mut std::fmt::Formatter, nodes: &[N]) -> std::fmt::Result {
    let len = nodes.len();
    for (i, n) in nodes.iter().enumerate() {
        if len > MAX_ELEMENTS_DISPLAYED && i == MAX_ELEMENTS_DISPLAYED - 1 {
            write!(f, " -> ...({} more)", len - i - 1)?;
        }
        if len > MAX_ELEMENTS_DISPLAYED && i >= MAX_ELEMENTS_DISPLAYED - 1 && i != len - 1 {
            continue;
        }
        if i != 0 {
            write!(f, " -> ")?;
        }
        write!(f, "{n:?}")?;
    }
    Ok(())
}

/// The outcome of a single-goal search.
///
/// A missing `path` means the goal could not be reached. The exploration
/// trace is kept either way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult<N, C>
where
    N: Node,
    C: Cost,
{
    pub path: Option<Path<N, C>>,
    pub explored: Vec<N>,
}

impl<N, C> SearchResult<N, C>
where
    N: Node,
    C: Cost,
{
    pub fn found(path: Path<N, C>, explored: Vec<N>) -> Self {
        Self {
            path: Some(path),
            explored,
        }
    }

    pub fn not_found(explored: Vec<N>) -> Self {
        Self {
            path: None,
            explored,
        }
    }

    /// The answer to `search(g, x, x)`.
    pub fn trivial(start: N) -> Self {
        Self::found(Path::new_from_start(start.clone()), vec![start])
    }

    #[inline(always)]
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    #[inline(always)]
    pub fn cost(&self) -> Option<C> {
        self.path.as_ref().map(|p| p.cost)
    }

    pub fn nodes(&self) -> Option<&[N]> {
        self.path.as_ref().map(|p| p.nodes.as_slice())
    }
}
