//! Graph representation and algorithms module

pub mod algorithms;
pub mod builder;
pub mod compressed;
pub mod stats;

pub use builder::{build_coauthor_graph, GraphBuilder};
pub use compressed::CoauthorGraph;
pub use stats::NetworkStats;
