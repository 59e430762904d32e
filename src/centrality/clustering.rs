//! Local clustering coefficient
//!
//! For a node `v` with neighbor set `Nb(v)`, the coefficient is the number of
//! co-author links among its neighbors divided by the number of possible
//! links:
//!
//! ```text
//! C(v) = 2 × |{(u, w) : u, w ∈ Nb(v), u ~ w}| / (k × (k - 1)),  k = |Nb(v)|
//! ```
//!
//! A value near 1 means the author's co-authors also publish with each other,
//! a tight research team. A value near 0 means the author bridges people who
//! do not otherwise collaborate. Nodes with fewer than two neighbors score 0.
//!
//! Edge weights are ignored here; only the presence of an edge counts.

use std::cmp::Ordering;

use crate::graph::CoauthorGraph;

/// Size of the intersection of two ascending slices
fn count_common(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut common) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                common += 1;
                i += 1;
                j += 1;
            }
        }
    }
    common
}

/// Number of edges among the neighbors of `node`
pub fn neighbor_links(graph: &CoauthorGraph, node: usize) -> usize {
    let nb = graph.neighbors(node);
    // Every link u~w is counted once from u and once from w
    nb.iter()
        .map(|&u| count_common(nb, graph.neighbors(u as usize)))
        .sum::<usize>()
        / 2
}

/// Local clustering coefficient of every node
pub fn clustering_coefficients(graph: &CoauthorGraph) -> Vec<f64> {
    (0..graph.node_count())
        .map(|v| {
            let k = graph.degree(v);
            if k < 2 {
                return 0.0;
            }
            let links = neighbor_links(graph, v) as f64;
            2.0 * links / (k * (k - 1)) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_fully_clustered() {
        let g = CoauthorGraph::from_edges(
            &["A", "B", "C"],
            &[("A", "B", 1), ("B", "C", 1), ("A", "C", 1)],
        );
        assert_eq!(clustering_coefficients(&g), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn chain_has_no_triangles() {
        let g = CoauthorGraph::from_edges(&["A", "B", "C"], &[("A", "B", 1), ("B", "C", 1)]);
        assert_eq!(clustering_coefficients(&g), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn clusters_of_triangles() {
        // 1-2-3 triangle, 1-4 and 4-5 tails
        let g = CoauthorGraph::from_edges(
            &["1", "2", "3", "4", "5"],
            &[("1", "2", 1), ("1", "3", 1), ("2", "3", 1), ("1", "4", 1), ("4", "5", 1)],
        );
        let actual = clustering_coefficients(&g);
        assert!((actual[0] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(&actual[1..], &[1.0, 1.0, 0.0, 0.0]);
        assert_eq!(neighbor_links(&g, 0), 1);
    }

    #[test]
    fn weights_do_not_matter() {
        let g = CoauthorGraph::from_edges(
            &["A", "B", "C"],
            &[("A", "B", 7), ("B", "C", 1), ("A", "C", 2)],
        );
        assert_eq!(clustering_coefficients(&g), vec![1.0, 1.0, 1.0]);
    }
}
