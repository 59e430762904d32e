//! Configuration management for the co-authorship analyzer

use serde::{Deserialize, Serialize};

/// How shortest-path lengths are measured by closeness and betweenness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathMetric {
    /// Every edge has length 1 (hop count)
    #[default]
    Hops,

    /// Edge length is the inverse of the co-authorship count, so frequent
    /// collaborators are "closer"
    InverseWeight,
}

/// Settings for one analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Author the query was centred on; always kept as a node
    pub seed_author: Option<String>,

    /// Upper bound on the number of records taken from the provider
    pub max_records: usize,

    /// Minimum number of shared papers for an edge to be materialized
    pub min_coauthor_count: usize,

    /// Path length policy for closeness and betweenness
    pub path_metric: PathMetric,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_author: None,
            max_records: 30,
            min_coauthor_count: 1,
            path_metric: PathMetric::Hops,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        seed_author: Option<String>,
        max_records: usize,
        min_coauthor_count: usize,
        path_metric: PathMetric,
    ) -> Self {
        Self {
            seed_author,
            max_records,
            min_coauthor_count,
            path_metric,
        }
    }

    pub fn with_seed_author(mut self, seed: impl Into<String>) -> Self {
        self.seed_author = Some(seed.into());
        self
    }

    pub fn with_min_coauthor_count(mut self, count: usize) -> Self {
        self.min_coauthor_count = count;
        self
    }

    pub fn with_path_metric(mut self, metric: PathMetric) -> Self {
        self.path_metric = metric;
        self
    }
}
