//! Graph construction module

use std::collections::{HashMap, HashSet};

use itertools::Itertools;

use crate::data::PaperRecord;
use crate::error::AnalysisError;
use crate::graph::compressed::NodeMetadata;
use crate::graph::CoauthorGraph;

/// Builder accumulating co-authorship counts before materializing a [`CoauthorGraph`]
pub struct GraphBuilder {
    /// Edges below this count are never materialized
    min_coauthor_count: usize,

    /// Staging index of the seed author, kept even when isolated
    seed: Option<u32>,

    /// Mapping from author names to staging indices
    id_to_index: HashMap<String, u32>,

    /// Author names by staging index
    node_ids: Vec<String>,

    /// Papers per author
    paper_counts: Vec<u32>,

    /// First non-empty affiliation seen for each author
    affiliations: Vec<Option<String>>,

    /// Shared paper count per unordered pair, keyed `(low, high)`
    pair_weights: HashMap<(u32, u32), u32>,

    /// Ids of records already consumed
    seen_papers: HashSet<String>,
}

impl GraphBuilder {
    /// Create a builder with the given minimum co-authorship threshold
    pub fn new(min_coauthor_count: usize) -> Result<Self, AnalysisError> {
        if min_coauthor_count < 1 {
            return Err(AnalysisError::InvalidThreshold {
                value: min_coauthor_count,
            });
        }

        Ok(Self {
            min_coauthor_count,
            seed: None,
            id_to_index: HashMap::new(),
            node_ids: Vec::new(),
            paper_counts: Vec::new(),
            affiliations: Vec::new(),
            pair_weights: HashMap::new(),
            seen_papers: HashSet::new(),
        })
    }

    /// Anchor the graph on a seed author
    pub fn with_seed_author(mut self, seed: &str) -> Self {
        let idx = self.get_or_create_author(seed);
        self.seed = Some(idx);
        self
    }

    /// Get or create the staging index for an author name
    fn get_or_create_author(&mut self, name: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(name) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(name.to_string(), idx);
        self.node_ids.push(name.to_string());
        self.paper_counts.push(0);
        self.affiliations.push(None);

        idx
    }

    /// Count every author pair of one paper.
    ///
    /// Returns `false` when a record with the same id was already consumed.
    pub fn add_paper(&mut self, record: &PaperRecord) -> bool {
        if !self.seen_papers.insert(record.id.clone()) {
            log::warn!("Ignoring duplicate paper record {}", record.id);
            return false;
        }

        // Authors listed twice on one paper count once
        let mut authors: Vec<u32> = Vec::with_capacity(record.authors.len());
        let mut listed = HashSet::with_capacity(record.authors.len());
        for (position, name) in record.authors.iter().enumerate() {
            if !listed.insert(name.as_str()) {
                continue;
            }

            let idx = self.get_or_create_author(name);
            let slot = &mut self.affiliations[idx as usize];
            if slot.is_none() {
                *slot = record.affiliation(position).map(str::to_string);
            }
            authors.push(idx);
        }

        for &idx in &authors {
            self.paper_counts[idx as usize] += 1;
        }

        for (a, b) in authors.iter().copied().tuple_combinations() {
            let key = if a < b { (a, b) } else { (b, a) };
            *self.pair_weights.entry(key).or_insert(0) += 1;
        }

        true
    }

    /// Number of distinct papers consumed so far
    pub fn paper_count(&self) -> usize {
        self.seen_papers.len()
    }

    /// Materialize the graph: retained edges plus the seed author
    pub fn build(self) -> Result<CoauthorGraph, AnalysisError> {
        if self.seen_papers.is_empty() && self.seed.is_none() {
            return Err(AnalysisError::EmptyInput);
        }

        let threshold = self.min_coauthor_count as u32;
        let mut retained: Vec<(u32, u32, u32)> = self
            .pair_weights
            .iter()
            .filter(|(_, &w)| w >= threshold)
            .map(|(&(a, b), &w)| (a, b, w))
            .collect();
        retained.sort_unstable();

        log::debug!(
            "Retained {} of {} co-author pairs at threshold {}",
            retained.len(),
            self.pair_weights.len(),
            threshold
        );

        let mut keep = vec![false; self.node_ids.len()];
        for &(a, b, _) in &retained {
            keep[a as usize] = true;
            keep[b as usize] = true;
        }
        if let Some(seed) = self.seed {
            keep[seed as usize] = true;
        }

        // Reindex surviving authors in staging order
        let mut staging_to_node = vec![u32::MAX; self.node_ids.len()];
        let mut node_ids = Vec::new();
        let mut paper_counts = Vec::new();
        let mut affiliations = Vec::new();
        for (idx, ((name, count), affiliation)) in self
            .node_ids
            .into_iter()
            .zip(self.paper_counts)
            .zip(self.affiliations)
            .enumerate()
        {
            if keep[idx] {
                staging_to_node[idx] = node_ids.len() as u32;
                node_ids.push(name);
                paper_counts.push(count);
                affiliations.push(affiliation);
            }
        }

        let edges: Vec<(u32, u32, u32)> = retained
            .into_iter()
            .map(|(a, b, w)| (staging_to_node[a as usize], staging_to_node[b as usize], w))
            .collect();

        let metadata = NodeMetadata {
            paper_counts,
            affiliations,
        };
        let graph = CoauthorGraph::from_parts(node_ids, metadata, &edges);

        log::info!(
            "Built co-authorship graph with {} authors and {} edges from {} papers",
            graph.node_count(),
            graph.edge_count(),
            self.seen_papers.len()
        );

        Ok(graph)
    }
}

/// Build the co-authorship graph for one query
pub fn build_coauthor_graph(
    records: &[PaperRecord],
    seed_author: Option<&str>,
    min_coauthor_count: usize,
) -> Result<CoauthorGraph, AnalysisError> {
    if records.is_empty() && seed_author.is_none() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut builder = GraphBuilder::new(min_coauthor_count)?;
    if let Some(seed) = seed_author {
        builder = builder.with_seed_author(seed);
    }

    for record in records {
        builder.add_paper(record);
    }

    builder.build()
}
