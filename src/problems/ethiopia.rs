//! The Ethiopian road network used by the demos.
//!
//! Costs are abstract travel units. The data files live under
//! `data/ethiopia/` and are bundled into the binary.

use crate::error::GraphParseError;
use crate::error::TableParseError;
use crate::graph::Graph;
use crate::graph::WeightedGraph;
use crate::heuristic::HeuristicTable;
use crate::utility::UtilityTable;

pub const ROADS: &str = include_str!("../../data/ethiopia/roads.txt");
pub const HEURISTICS_TO_MOYALE: &str = include_str!("../../data/ethiopia/moyale_estimates.txt");
pub const COFFEE_QUALITY: &str = include_str!("../../data/ethiopia/coffee_quality.txt");

pub const CAPITAL: &str = "Addis Ababa";
pub const MOYALE: &str = "Moyale";
/// Coffee quality of cities missing from the table.
pub const DEFAULT_COFFEE_QUALITY: i64 = 50;

/// Roads with their costs, travelled both ways.
pub fn road_network() -> Result<WeightedGraph<String, u32>, GraphParseError> {
    WeightedGraph::try_from(ROADS)
}

/// Roads without costs.
pub fn roads() -> Result<Graph<String>, GraphParseError> {
    Graph::try_from(ROADS)
}

/// Admissible estimates of the cost of reaching Moyale.
pub fn heuristics_to_moyale() -> Result<HeuristicTable<String, u32>, TableParseError> {
    HeuristicTable::parse_for_goal(MOYALE, HEURISTICS_TO_MOYALE)
}

pub fn coffee_quality() -> Result<UtilityTable<String, i64>, TableParseError> {
    UtilityTable::parse(COFFEE_QUALITY, DEFAULT_COFFEE_QUALITY)
}
