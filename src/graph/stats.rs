//! Whole-network statistics

use serde::Serialize;

use crate::centrality::MetricsTable;
use crate::graph::algorithms::connected_components;
use crate::graph::CoauthorGraph;

/// Summary statistics of a co-authorship graph
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,

    /// Existing edges over possible edges, 0 when fewer than two nodes
    pub density: f64,

    pub connected_components: usize,
    pub largest_component_size: usize,

    /// Mean local clustering coefficient
    pub avg_clustering: f64,
}

impl NetworkStats {
    /// Compute statistics; `metrics` supplies the clustering coefficients
    pub fn compute(graph: &CoauthorGraph, metrics: Option<&MetricsTable>) -> Self {
        let nodes = graph.node_count();
        if nodes == 0 {
            return Self::default();
        }

        let edges = graph.edge_count();
        let density = if nodes < 2 {
            0.0
        } else {
            2.0 * edges as f64 / (nodes * (nodes - 1)) as f64
        };

        let components = connected_components(graph);
        let largest_component_size = components.iter().map(Vec::len).max().unwrap_or(0);

        Self {
            nodes,
            edges,
            density,
            connected_components: components.len(),
            largest_component_size,
            avg_clustering: metrics.map_or(0.0, MetricsTable::average_clustering),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centrality::compute_metrics;

    #[test]
    fn stats_of_triangle_plus_pair() {
        let g = CoauthorGraph::from_edges(
            &["A", "B", "C", "D", "E"],
            &[("A", "B", 1), ("B", "C", 1), ("A", "C", 1), ("D", "E", 2)],
        );
        let metrics = compute_metrics(&g).unwrap();
        let stats = NetworkStats::compute(&g, Some(&metrics));

        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.edges, 4);
        assert!((stats.density - 0.4).abs() < 1e-12);
        assert_eq!(stats.connected_components, 2);
        assert_eq!(stats.largest_component_size, 3);
        assert!((stats.avg_clustering - 0.6).abs() < 1e-12);
    }

    #[test]
    fn empty_graph_reports_zeros() {
        let g = CoauthorGraph::from_edges::<&str>(&[], &[]);
        assert_eq!(NetworkStats::compute(&g, None), NetworkStats::default());
    }

    #[test]
    fn single_node_graph() {
        let g = CoauthorGraph::from_edges::<&str>(&["Seed"], &[]);
        let stats = NetworkStats::compute(&g, None);
        assert_eq!(stats.nodes, 1);
        assert_eq!(stats.density, 0.0);
        assert_eq!(stats.connected_components, 1);
    }
}
