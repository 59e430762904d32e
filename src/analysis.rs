//! One analysis pass over a set of paper records

use serde::Serialize;

use crate::centrality::{compute_metrics_with, MetricsTable};
use crate::community::{detect_communities, summarize_communities, Community, CommunityAssignment};
use crate::config::Config;
use crate::data::PaperRecord;
use crate::error::AnalysisError;
use crate::graph::{build_coauthor_graph, CoauthorGraph, NetworkStats};

/// Finalized graph plus everything computed from it, keyed by author name
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub config: Config,
    pub graph: CoauthorGraph,
    pub metrics: MetricsTable,
    pub communities: CommunityAssignment,
    pub stats: NetworkStats,
}

impl Analysis {
    /// Per-community summaries, ordered by id
    pub fn community_summaries(&self) -> Vec<Community> {
        summarize_communities(&self.graph, &self.communities)
    }
}

/// Build the graph, then compute metrics and communities side by side
pub fn analyze(records: &[PaperRecord], config: &Config) -> Result<Analysis, AnalysisError> {
    let graph = build_coauthor_graph(
        records,
        config.seed_author.as_deref(),
        config.min_coauthor_count,
    )?;

    // Both passes only read the finalized graph
    let (metrics, communities) = rayon::join(
        || compute_metrics_with(&graph, config.path_metric),
        || detect_communities(&graph),
    );
    let metrics = metrics?;
    let communities = communities?;

    let stats = NetworkStats::compute(&graph, Some(&metrics));
    log::info!(
        "Network: {} authors, {} edges, {} components, {} communities",
        stats.nodes,
        stats.edges,
        stats.connected_components,
        communities.community_count()
    );

    Ok(Analysis {
        config: config.clone(),
        graph,
        metrics,
        communities,
        stats,
    })
}
