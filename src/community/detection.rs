//! Greedy modularity community detection

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use ordered_float::OrderedFloat;

use crate::community::CommunityAssignment;
use crate::error::AnalysisError;
use crate::graph::algorithms::DisjointSets;
use crate::graph::CoauthorGraph;

/// One agglomeration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Surviving community (the lower id)
    pub kept: u32,
    /// Community folded into `kept`
    pub absorbed: u32,
    /// Modularity gain of the step
    pub gain: f64,
}

/// Heap entry: largest gain first, then the lowest `(i, j)` pair
type Candidate = (OrderedFloat<f64>, Reverse<(u32, u32)>);

/// Agglomerative merging state over communities
struct MergeState {
    /// Twice the total edge weight
    two_m: f64,

    /// Fraction of edge ends attached to each community
    a: Vec<f64>,

    /// Edge weight between each pair of connected communities
    links: Vec<BTreeMap<u32, u64>>,

    alive: Vec<bool>,

    heap: BinaryHeap<Candidate>,
}

impl MergeState {
    fn new(graph: &CoauthorGraph) -> Self {
        let n = graph.node_count();
        let two_m = 2.0 * graph.total_weight() as f64;

        let a: Vec<f64> = (0..n)
            .map(|v| graph.weighted_degree(v) as f64 / two_m)
            .collect();

        let links: Vec<BTreeMap<u32, u64>> = (0..n)
            .map(|v| {
                graph
                    .weighted_neighbors(v)
                    .map(|(u, w)| (u, w as u64))
                    .collect()
            })
            .collect();

        let mut state = Self {
            two_m,
            a,
            links,
            alive: vec![true; n],
            heap: BinaryHeap::new(),
        };

        for (u, v, w) in graph.edges() {
            state.push(u as u32, v as u32, w as u64);
        }

        state
    }

    /// ΔQ(i, j) = 2 * (e_ij / 2m - a_i * a_j)
    fn gain(&self, i: u32, j: u32, e_ij: u64) -> f64 {
        2.0 * (e_ij as f64 / self.two_m - self.a[i as usize] * self.a[j as usize])
    }

    fn push(&mut self, i: u32, j: u32, e_ij: u64) {
        let pair = if i < j { (i, j) } else { (j, i) };
        let gain = self.gain(pair.0, pair.1, e_ij);
        self.heap.push((OrderedFloat(gain), Reverse(pair)));
    }

    /// Best live candidate, discarding stale heap entries
    fn pop_best(&mut self) -> Option<(u32, u32, f64)> {
        while let Some((OrderedFloat(stored), Reverse((i, j)))) = self.heap.pop() {
            if !self.alive[i as usize] || !self.alive[j as usize] {
                continue;
            }
            let Some(&e_ij) = self.links[i as usize].get(&j) else {
                continue;
            };
            let current = self.gain(i, j, e_ij);
            if current != stored {
                continue;
            }
            return Some((i, j, current));
        }
        None
    }

    /// Fold community `j` into `i`, then refresh gains of `i`'s neighbors
    fn merge(&mut self, i: u32, j: u32) {
        let absorbed = std::mem::take(&mut self.links[j as usize]);
        self.links[i as usize].remove(&j);

        for (k, w) in absorbed {
            if k == i {
                continue;
            }
            let k_links = &mut self.links[k as usize];
            k_links.remove(&j);
            *k_links.entry(i).or_insert(0) += w;
            *self.links[i as usize].entry(k).or_insert(0) += w;
        }

        self.a[i as usize] += self.a[j as usize];
        self.a[j as usize] = 0.0;
        self.alive[j as usize] = false;

        let neighbors: Vec<(u32, u64)> = self.links[i as usize]
            .iter()
            .map(|(&k, &w)| (k, w))
            .collect();
        for (k, w) in neighbors {
            self.push(i, k, w);
        }
    }

    /// Modularity of the all-singletons partition
    fn initial_modularity(&self) -> f64 {
        -self.a.iter().map(|a| a * a).sum::<f64>()
    }
}

/// Run greedy agglomeration until no merge has positive gain.
///
/// Returns the modularity of the singleton partition and the merges in order.
pub fn greedy_merges(graph: &CoauthorGraph) -> (f64, Vec<Merge>) {
    if graph.total_weight() == 0 {
        return (0.0, Vec::new());
    }

    let mut state = MergeState::new(graph);
    let initial = state.initial_modularity();
    let mut merges = Vec::new();

    while let Some((i, j, gain)) = state.pop_best() {
        if gain <= 0.0 {
            break;
        }
        state.merge(i, j);
        merges.push(Merge {
            kept: i,
            absorbed: j,
            gain,
        });
    }

    (initial, merges)
}

/// Partition the graph's authors into communities
pub fn detect_communities(graph: &CoauthorGraph) -> Result<CommunityAssignment, AnalysisError> {
    if graph.is_empty() {
        return Err(AnalysisError::EmptyGraph);
    }

    let n = graph.node_count();
    let (initial, merges) = greedy_merges(graph);

    // Keep the prefix of merges with the highest cumulative modularity
    let mut q = initial;
    let mut best_q = initial;
    let mut best_step = 0;
    for (step, merge) in merges.iter().enumerate() {
        q += merge.gain;
        if q > best_q {
            best_q = q;
            best_step = step + 1;
        }
    }

    let mut sets = DisjointSets::new(n);
    for merge in &merges[..best_step] {
        sets.union(merge.kept, merge.absorbed);
    }
    let roots: Vec<u32> = (0..n as u32).map(|v| sets.find(v)).collect();

    let assignment = CommunityAssignment::from_groups(&roots, best_q);

    log::info!(
        "Detected {} communities after {} merges (modularity {:.4})",
        assignment.community_count(),
        best_step,
        best_q
    );

    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::modularity;

    fn two_triangles() -> CoauthorGraph {
        CoauthorGraph::from_edges(
            &["A", "B", "C", "D", "E", "F"],
            &[
                ("A", "B", 1),
                ("B", "C", 1),
                ("A", "C", 1),
                ("D", "E", 1),
                ("E", "F", 1),
                ("D", "F", 1),
            ],
        )
    }

    #[test]
    fn disjoint_triangles_form_two_communities() {
        let assignment = detect_communities(&two_triangles()).unwrap();

        assert_eq!(assignment.community_count(), 2);
        assert_eq!(assignment.labels(), &[0, 0, 0, 1, 1, 1]);
        assert!((assignment.modularity() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn bridged_triangles_split_at_the_bridge() {
        let mut edges = vec![
            ("A", "B", 1),
            ("B", "C", 1),
            ("A", "C", 1),
            ("D", "E", 1),
            ("E", "F", 1),
            ("D", "F", 1),
        ];
        edges.push(("C", "D", 1));
        let g = CoauthorGraph::from_edges(&["A", "B", "C", "D", "E", "F"], edges.as_slice());

        let assignment = detect_communities(&g).unwrap();
        assert_eq!(assignment.labels(), &[0, 0, 0, 1, 1, 1]);
        assert!((assignment.modularity() - modularity(&g, &assignment)).abs() < 1e-12);
    }

    #[test]
    fn edgeless_graph_keeps_singletons() {
        let g = CoauthorGraph::from_edges::<&str>(&["A", "B", "C"], &[]);
        let assignment = detect_communities(&g).unwrap();

        assert_eq!(assignment.labels(), &[0, 1, 2]);
        assert_eq!(assignment.modularity(), 0.0);
    }

    #[test]
    fn isolated_nodes_never_merge() {
        let g = CoauthorGraph::from_edges(
            &["Lone", "A", "B", "C"],
            &[("A", "B", 1), ("B", "C", 1), ("A", "C", 1)],
        );
        let assignment = detect_communities(&g).unwrap();

        assert_eq!(assignment.labels(), &[0, 1, 1, 1]);
    }

    #[test]
    fn strong_ties_pull_authors_together() {
        // Path A-B-C-D with a heavy middle edge: {B, C} attracts, weak ends attach
        let g = CoauthorGraph::from_edges(
            &["A", "B", "C", "D"],
            &[("A", "B", 1), ("B", "C", 5), ("C", "D", 1)],
        );
        let (_, merges) = greedy_merges(&g);
        assert_eq!(merges[0].kept, 1);
        assert_eq!(merges[0].absorbed, 2);
    }

    #[test]
    fn ties_resolve_to_lowest_pair() {
        // Square: all four edges have equal gain, (0, 1) must go first
        let g = CoauthorGraph::from_edges(
            &["A", "B", "C", "D"],
            &[("A", "B", 1), ("B", "C", 1), ("C", "D", 1), ("D", "A", 1)],
        );
        let (_, merges) = greedy_merges(&g);
        assert_eq!((merges[0].kept, merges[0].absorbed), (0, 1));
    }

    #[test]
    fn partition_covers_every_node() {
        let g = two_triangles();
        let assignment = detect_communities(&g).unwrap();
        let total: usize = (0..assignment.community_count() as u32)
            .map(|id| assignment.members(id).len())
            .sum();
        assert_eq!(total, g.node_count());
    }

    #[test]
    fn detection_is_deterministic() {
        let g = two_triangles();
        assert_eq!(detect_communities(&g).unwrap(), detect_communities(&g).unwrap());
    }

    #[test]
    fn empty_graph_rejected() {
        let g = CoauthorGraph::from_edges::<&str>(&[], &[]);
        assert_eq!(detect_communities(&g).unwrap_err(), AnalysisError::EmptyGraph);
    }
}
