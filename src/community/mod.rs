//! Community detection module
//!
//! Authors are grouped by greedy modularity maximization in the style of
//! Clauset, Newman and Moore: start from singletons and keep merging the
//! connected pair of communities with the largest modularity gain.
//!
//! ```text
//! Q = Σ_c [ L_c / m - (d_c / 2m)² ]
//! ```
//!
//! where `m` is the total edge weight, `L_c` the weight inside community `c`
//! and `d_c` the summed weighted degree of its members.

pub mod detection;
pub mod metrics;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::graph::CoauthorGraph;

pub use detection::detect_communities;
pub use metrics::{modularity, summarize_communities};

/// Partition of the graph's nodes into communities.
///
/// Ids are contiguous from 0, numbered by the first node (in graph order)
/// of each community.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunityAssignment {
    /// Community id of each node, in node order
    labels: Vec<u32>,

    /// Number of communities
    count: usize,

    /// Modularity of the partition
    modularity: f64,
}

impl CommunityAssignment {
    /// Relabel arbitrary group keys into contiguous first-appearance ids
    pub(crate) fn from_groups(groups: &[u32], modularity: f64) -> Self {
        let mut relabel: BTreeMap<u32, u32> = BTreeMap::new();
        let labels = groups
            .iter()
            .map(|&group| {
                let next = relabel.len() as u32;
                *relabel.entry(group).or_insert(next)
            })
            .collect();

        Self {
            labels,
            count: relabel.len(),
            modularity,
        }
    }

    /// Community id of a node
    pub fn community_of(&self, node: usize) -> u32 {
        self.labels[node]
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn community_count(&self) -> usize {
        self.count
    }

    pub fn modularity(&self) -> f64 {
        self.modularity
    }

    /// Node indices of one community, ascending
    pub fn members(&self, id: u32) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == id)
            .map(|(node, _)| node)
            .collect()
    }

    /// Community id of an author by name
    pub fn get(&self, graph: &CoauthorGraph, author: &str) -> Option<u32> {
        graph.node_index(author).map(|node| self.labels[node])
    }

    /// Author name to community id
    pub fn by_author(&self, graph: &CoauthorGraph) -> BTreeMap<String, u32> {
        self.labels
            .iter()
            .enumerate()
            .map(|(node, &label)| (graph.author(node).to_string(), label))
            .collect()
    }
}

/// Summary of one detected community
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Community {
    pub id: u32,

    /// Member author names, sorted
    pub members: Vec<String>,

    pub size: usize,

    /// Internal edges over possible internal edges
    pub density: f64,

    /// Up to five members with the most co-authors inside the community
    pub central_authors: Vec<String>,
}
