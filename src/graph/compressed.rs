//! Compressed weighted undirected graph

use std::collections::{HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

use crate::error::AnalysisError;

/// Per-author attributes, stored apart from the adjacency arrays
#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeMetadata {
    /// Number of distinct consumed papers listing each author
    pub paper_counts: Vec<u32>,

    /// First non-empty affiliation recorded for each author
    pub affiliations: Vec<Option<String>>,
}

impl NodeMetadata {
    /// Metadata with zero papers and no affiliation for `node_count` authors
    pub fn empty(node_count: usize) -> Self {
        Self {
            paper_counts: vec![0; node_count],
            affiliations: vec![None; node_count],
        }
    }
}

/// Co-authorship graph in compressed sparse row form.
///
/// Every undirected edge is stored in both endpoint rows; rows are sorted by
/// neighbor index so lookups can binary search. Nodes are identified by
/// their position, which follows first appearance in the consumed records.
#[derive(Debug, Clone, Serialize)]
pub struct CoauthorGraph {
    node_count: usize,

    /// offsets[i]..offsets[i+1] is the row of node i
    offsets: Vec<u32>,

    /// Concatenated neighbor rows
    neighbors: Vec<u32>,

    /// Co-authorship count parallel to `neighbors`
    weights: Vec<u32>,

    /// Author name of each node
    node_ids: Vec<String>,

    metadata: NodeMetadata,

    #[serde(skip)]
    id_to_index: HashMap<String, u32>,
}

impl CoauthorGraph {
    /// Assemble a graph from author names, per-author metadata and `(u, v, weight)` edges.
    ///
    /// Each unordered pair must appear at most once, `u != v` and `weight >= 1`.
    pub(crate) fn from_parts(
        node_ids: Vec<String>,
        metadata: NodeMetadata,
        edges: &[(u32, u32, u32)],
    ) -> Self {
        let node_count = node_ids.len();
        debug_assert_eq!(metadata.paper_counts.len(), node_count);
        debug_assert_eq!(metadata.affiliations.len(), node_count);

        let mut rows: Vec<Vec<(u32, u32)>> = vec![Vec::new(); node_count];
        for &(u, v, w) in edges {
            debug_assert_ne!(u, v, "self-loop in co-authorship graph");
            rows[u as usize].push((v, w));
            rows[v as usize].push((u, w));
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut neighbors = Vec::with_capacity(edges.len() * 2);
        let mut weights = Vec::with_capacity(edges.len() * 2);
        offsets.push(0);

        for row in &mut rows {
            row.sort_unstable();
            for &(v, w) in row.iter() {
                neighbors.push(v);
                weights.push(w);
            }
            offsets.push(neighbors.len() as u32);
        }

        let id_to_index = node_ids
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i as u32))
            .collect();

        Self {
            node_count,
            offsets,
            neighbors,
            weights,
            node_ids,
            metadata,
            id_to_index,
        }
    }

    /// Build a graph straight from named edges. Paper counts are left at zero.
    ///
    /// Authors must be distinct. Every edge must join two different listed
    /// authors with a weight of at least 1, and each unordered pair may
    /// appear only once.
    pub fn try_from_edges<S: AsRef<str>>(
        authors: &[S],
        edges: &[(S, S, u32)],
    ) -> Result<Self, AnalysisError> {
        let node_ids: Vec<String> = authors.iter().map(|a| a.as_ref().to_string()).collect();
        let mut index: HashMap<&str, u32> = HashMap::with_capacity(node_ids.len());
        for (i, name) in node_ids.iter().enumerate() {
            if index.insert(name.as_str(), i as u32).is_some() {
                return Err(AnalysisError::DuplicateAuthor { name: name.clone() });
            }
        }

        let mut pairs = HashSet::with_capacity(edges.len());
        let mut indexed = Vec::with_capacity(edges.len());
        for (from, to, weight) in edges {
            let (from, to) = (from.as_ref(), to.as_ref());
            let invalid = |reason| AnalysisError::InvalidEdge {
                from: from.to_string(),
                to: to.to_string(),
                reason,
            };

            let (Some(&u), Some(&v)) = (index.get(from), index.get(to)) else {
                return Err(invalid("endpoint is not a listed author"));
            };
            if u == v {
                return Err(invalid("self-loop"));
            }
            if *weight == 0 {
                return Err(invalid("weight must be at least 1"));
            }
            if !pairs.insert((u.min(v), u.max(v))) {
                return Err(invalid("pair listed more than once"));
            }
            indexed.push((u, v, *weight));
        }

        let metadata = NodeMetadata::empty(node_ids.len());
        Ok(Self::from_parts(node_ids, metadata, &indexed))
    }

    /// Test shorthand for [`try_from_edges`](Self::try_from_edges) on known-good input
    #[cfg(test)]
    pub(crate) fn from_edges<S: AsRef<str>>(authors: &[S], edges: &[(S, S, u32)]) -> Self {
        Self::try_from_edges(authors, edges).expect("valid test graph")
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Neighbors of a node, ascending
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.neighbors[start..end]
    }

    /// Co-authorship counts aligned with [`neighbors`](Self::neighbors)
    pub fn neighbor_weights(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.weights[start..end]
    }

    /// Iterate `(neighbor, weight)` pairs of a node
    pub fn weighted_neighbors(&self, node: usize) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.neighbors(node)
            .iter()
            .copied()
            .zip(self.neighbor_weights(node).iter().copied())
    }

    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Sum of incident edge weights
    pub fn weighted_degree(&self, node: usize) -> u64 {
        self.neighbor_weights(node).iter().map(|&w| w as u64).sum()
    }

    /// Sum of all edge weights, each edge counted once
    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| w as u64).sum::<u64>() / 2
    }

    pub fn has_edge(&self, u: usize, v: u32) -> bool {
        self.neighbors(u).binary_search(&v).is_ok()
    }

    /// Weight of the edge between `u` and `v`, if materialized
    pub fn edge_weight(&self, u: usize, v: u32) -> Option<u32> {
        self.neighbors(u)
            .binary_search(&v)
            .ok()
            .map(|pos| self.neighbor_weights(u)[pos])
    }

    /// Iterate every edge once as `(u, v, weight)` with `u < v`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        (0..self.node_count).flat_map(move |u| {
            self.weighted_neighbors(u)
                .filter(move |&(v, _)| (v as usize) > u)
                .map(move |(v, w)| (u, v as usize, w))
        })
    }

    /// Largest edge weight, 0 for an edgeless graph
    pub fn max_weight(&self) -> u32 {
        self.weights.iter().copied().max().unwrap_or(0)
    }

    pub fn node_index(&self, author: &str) -> Option<usize> {
        self.id_to_index.get(author).map(|&i| i as usize)
    }

    pub fn author(&self, node: usize) -> &str {
        &self.node_ids[node]
    }

    pub fn authors(&self) -> &[String] {
        &self.node_ids
    }

    pub fn paper_count(&self, node: usize) -> u32 {
        self.metadata.paper_counts[node]
    }

    pub fn affiliation(&self, node: usize) -> Option<&str> {
        self.metadata.affiliations[node].as_deref()
    }

    /// Largest paper count of any author, 0 for an empty graph
    pub fn max_paper_count(&self) -> u32 {
        self.metadata.paper_counts.iter().copied().max().unwrap_or(0)
    }

    /// Weight between two authors by name
    pub fn coauthorship(&self, a: &str, b: &str) -> Option<u32> {
        let u = self.node_index(a)?;
        let v = self.node_index(b)?;
        self.edge_weight(u, v as u32)
    }

    /// Convert to a petgraph graph; node indices are preserved
    pub fn to_petgraph(&self) -> UnGraph<String, u32> {
        let mut graph = UnGraph::with_capacity(self.node_count, self.edge_count());
        for name in &self.node_ids {
            graph.add_node(name.clone());
        }
        for (u, v, w) in self.edges() {
            graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), w);
        }
        graph
    }
}
