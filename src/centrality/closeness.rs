//! Closeness centrality

use crate::config::PathMetric;
use crate::graph::algorithms::shortest_paths;
use crate::graph::CoauthorGraph;

/// Closeness of every node.
///
/// With `R` nodes reachable from `v` and total distance `S` to them,
/// `closeness(v) = (R / (N-1)) * (R / S)`. This reduces to `(N-1) / S` on a
/// connected graph and is 0 when nothing is reachable.
pub fn closeness_centrality(graph: &CoauthorGraph, metric: PathMetric) -> Vec<f64> {
    let n = graph.node_count();

    (0..n)
        .map(|v| {
            let paths = shortest_paths(graph, v, metric);
            let reachable = paths.reachable();
            let total = paths.distance_sum();
            if reachable == 0 || total <= 0.0 {
                return 0.0;
            }

            let r = reachable as f64;
            (r / (n - 1) as f64) * (r / total)
        })
        .collect()
}
