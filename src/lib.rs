//! Co-authorship network construction and analysis
//!
//! Paper records go in, a weighted co-authorship graph comes out, together
//! with per-author centrality metrics and a greedy-modularity community
//! partition. Everything is keyed by author name so a presentation layer can
//! join the three results.

pub mod analysis;
pub mod centrality;
pub mod community;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod storage;
pub mod viz;

pub use anyhow::{Result, anyhow};

pub use analysis::{analyze, Analysis};
pub use centrality::{compute_metrics, MetricsTable, NodeMetrics};
pub use community::{detect_communities, modularity, Community, CommunityAssignment};
pub use config::{Config, PathMetric};
pub use data::PaperRecord;
pub use error::AnalysisError;
pub use graph::{build_coauthor_graph, CoauthorGraph, GraphBuilder, NetworkStats};
