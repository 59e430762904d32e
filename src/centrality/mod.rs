//! Per-author centrality and structure metrics
//!
//! Four metrics are computed over the whole graph (not per component):
//!
//! - **Degree centrality**: `deg(v) / (N - 1)`, 0 for a single-node graph
//! - **Betweenness centrality**: Brandes' algorithm, normalized for
//!   undirected graphs
//! - **Closeness centrality**: reachable-set closeness with the
//!   Wasserman-Faust correction for disconnected graphs
//! - **Local clustering coefficient**: fraction of neighbor pairs that are
//!   themselves co-authors
//!
//! Path lengths for betweenness and closeness follow a [`PathMetric`]:
//! hop count by default, or inverse co-authorship count.

pub mod betweenness;
pub mod closeness;
pub mod clustering;

use std::collections::HashMap;

use serde::Serialize;

use crate::config::PathMetric;
use crate::error::AnalysisError;
use crate::graph::CoauthorGraph;

pub use betweenness::betweenness_centrality;
pub use closeness::closeness_centrality;
pub use clustering::clustering_coefficients;

/// Metrics of a single author
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMetrics {
    pub author: String,
    pub affiliation: Option<String>,
    pub paper_count: u32,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
    pub clustering_coefficient: f64,
}

/// Metrics for every node, in graph node order
#[derive(Debug, Clone, Serialize)]
pub struct MetricsTable {
    rows: Vec<NodeMetrics>,

    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl MetricsTable {
    fn new(rows: Vec<NodeMetrics>) -> Self {
        let index = rows
            .iter()
            .enumerate()
            .map(|(i, row)| (row.author.clone(), i))
            .collect();
        Self { rows, index }
    }

    /// Metrics of an author by name
    pub fn get(&self, author: &str) -> Option<&NodeMetrics> {
        self.index.get(author).map(|&i| &self.rows[i])
    }

    /// Rows indexed like the graph's nodes
    pub fn rows(&self) -> &[NodeMetrics] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Mean local clustering coefficient, 0 for an empty table
    pub fn average_clustering(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.rows.iter().map(|r| r.clustering_coefficient).sum::<f64>() / self.rows.len() as f64
    }

    /// Rows by degree centrality, highest first, ties by author name
    pub fn ranked_by_degree(&self) -> Vec<&NodeMetrics> {
        let mut ranked: Vec<&NodeMetrics> = self.rows.iter().collect();
        ranked.sort_by(|a, b| {
            b.degree_centrality
                .total_cmp(&a.degree_centrality)
                .then_with(|| a.author.cmp(&b.author))
        });
        ranked
    }
}

/// Normalized degree of every node
pub fn degree_centrality(graph: &CoauthorGraph) -> Vec<f64> {
    let n = graph.node_count();
    if n < 2 {
        return vec![0.0; n];
    }

    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|v| graph.degree(v) as f64 * scale).collect()
}

/// Compute all metrics with hop-count shortest paths
pub fn compute_metrics(graph: &CoauthorGraph) -> Result<MetricsTable, AnalysisError> {
    compute_metrics_with(graph, PathMetric::Hops)
}

/// Compute all metrics using the given path metric
pub fn compute_metrics_with(
    graph: &CoauthorGraph,
    metric: PathMetric,
) -> Result<MetricsTable, AnalysisError> {
    if graph.is_empty() {
        return Err(AnalysisError::EmptyGraph);
    }

    log::info!(
        "Computing centrality metrics for {} authors ({:?} paths)",
        graph.node_count(),
        metric
    );

    let degree = degree_centrality(graph);
    let betweenness = betweenness_centrality(graph, metric);
    let closeness = closeness_centrality(graph, metric);
    let clustering = clustering_coefficients(graph);

    let rows = (0..graph.node_count())
        .map(|v| NodeMetrics {
            author: graph.author(v).to_string(),
            affiliation: graph.affiliation(v).map(str::to_string),
            paper_count: graph.paper_count(v),
            degree_centrality: degree[v],
            betweenness_centrality: betweenness[v],
            closeness_centrality: closeness[v],
            clustering_coefficient: clustering[v],
        })
        .collect();

    Ok(MetricsTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> CoauthorGraph {
        CoauthorGraph::from_edges(&["A", "B", "C"], &[("A", "B", 1), ("B", "C", 1)])
    }

    #[test]
    fn chain_metrics() {
        let table = compute_metrics(&chain()).unwrap();

        let a = table.get("A").unwrap();
        let b = table.get("B").unwrap();
        assert_eq!(a.degree_centrality, 0.5);
        assert_eq!(b.degree_centrality, 1.0);
        assert_eq!(a.betweenness_centrality, 0.0);
        assert_eq!(b.betweenness_centrality, 1.0);
        assert_eq!(b.clustering_coefficient, 0.0);
        assert_eq!(b.closeness_centrality, 1.0);
    }

    #[test]
    fn handshake_lemma_holds() {
        let g = CoauthorGraph::from_edges(
            &["A", "B", "C", "D", "E"],
            &[("A", "B", 1), ("A", "C", 2), ("B", "C", 1), ("C", "D", 5)],
        );
        let table = compute_metrics(&g).unwrap();
        let n = g.node_count() as f64;
        let total: f64 = table.rows().iter().map(|r| r.degree_centrality * (n - 1.0)).sum();
        assert!((total - 2.0 * g.edge_count() as f64).abs() < 1e-9);
    }

    #[test]
    fn isolated_nodes_score_zero() {
        let g = CoauthorGraph::from_edges(&["A", "B", "Lone"], &[("A", "B", 1)]);
        let table = compute_metrics(&g).unwrap();
        let lone = table.get("Lone").unwrap();
        assert_eq!(lone.degree_centrality, 0.0);
        assert_eq!(lone.closeness_centrality, 0.0);
        assert_eq!(lone.betweenness_centrality, 0.0);
        assert_eq!(lone.clustering_coefficient, 0.0);
    }

    #[test]
    fn single_node_graph_is_degenerate_but_valid() {
        let g = CoauthorGraph::from_edges::<&str>(&["Seed"], &[]);
        let table = compute_metrics(&g).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Seed").unwrap().degree_centrality, 0.0);
    }

    #[test]
    fn empty_graph_rejected() {
        let g = CoauthorGraph::from_edges::<&str>(&[], &[]);
        assert_eq!(compute_metrics(&g).unwrap_err(), AnalysisError::EmptyGraph);
    }

    #[test]
    fn ranking_and_average() {
        let table = compute_metrics(&chain()).unwrap();
        let ranked = table.ranked_by_degree();
        let ranked: Vec<&str> = ranked.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(ranked, vec!["B", "A", "C"]);
        assert_eq!(table.average_clustering(), 0.0);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let g = CoauthorGraph::from_edges(
            &["A", "B", "C", "D"],
            &[("A", "B", 3), ("B", "C", 1), ("C", "D", 2), ("D", "A", 1), ("A", "C", 1)],
        );
        for metric in [PathMetric::Hops, PathMetric::InverseWeight] {
            let first = compute_metrics_with(&g, metric).unwrap();
            let second = compute_metrics_with(&g, metric).unwrap();
            assert_eq!(first.rows(), second.rows());
        }
    }
}
