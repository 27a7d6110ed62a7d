//! Problem instances to search on.
//!
//! A bundled road network for demos and seeded random graphs for tests and
//! benchmarks.

pub mod ethiopia;
pub mod random;
