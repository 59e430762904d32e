//! Community statistics and metrics

use std::collections::HashSet;

use crate::community::{Community, CommunityAssignment};
use crate::graph::CoauthorGraph;

/// Modularity of a partition, 0 for a graph without edges
pub fn modularity(graph: &CoauthorGraph, assignment: &CommunityAssignment) -> f64 {
    let m = graph.total_weight() as f64;
    if m == 0.0 {
        return 0.0;
    }

    let k = assignment.community_count();
    let mut internal = vec![0.0; k];
    let mut degree = vec![0.0; k];

    for v in 0..graph.node_count() {
        degree[assignment.community_of(v) as usize] += graph.weighted_degree(v) as f64;
    }
    for (u, v, w) in graph.edges() {
        let c = assignment.community_of(u);
        if c == assignment.community_of(v) {
            internal[c as usize] += w as f64;
        }
    }

    internal
        .iter()
        .zip(&degree)
        .map(|(l, d)| l / m - (d / (2.0 * m)).powi(2))
        .sum()
}

/// Calculate density (actual edges / potential edges)
pub fn calculate_density(graph: &CoauthorGraph, members: &[usize]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton communities have density 1
    }

    let member_set: HashSet<u32> = members.iter().map(|&m| m as u32).collect();
    let endpoints: usize = members
        .iter()
        .map(|&v| {
            graph
                .neighbors(v)
                .iter()
                .filter(|&&u| member_set.contains(&u))
                .count()
        })
        .sum();

    // Each internal edge was seen from both ends
    endpoints as f64 / (n * (n - 1)) as f64
}

/// Members with the most co-authors inside the community, at most `top_n`
pub fn central_members(graph: &CoauthorGraph, members: &[usize], top_n: usize) -> Vec<usize> {
    let member_set: HashSet<u32> = members.iter().map(|&m| m as u32).collect();

    let mut degrees: Vec<(usize, usize)> = members
        .iter()
        .map(|&v| {
            let degree = graph
                .neighbors(v)
                .iter()
                .filter(|&&u| member_set.contains(&u))
                .count();
            (v, degree)
        })
        .collect();

    // Stable sort keeps node order among equal degrees
    degrees.sort_by(|a, b| b.1.cmp(&a.1));

    degrees.into_iter().take(top_n).map(|(v, _)| v).collect()
}

/// Build a summary for every community, ordered by id
pub fn summarize_communities(
    graph: &CoauthorGraph,
    assignment: &CommunityAssignment,
) -> Vec<Community> {
    (0..assignment.community_count() as u32)
        .map(|id| {
            let members = assignment.members(id);

            let mut names: Vec<String> = members
                .iter()
                .map(|&v| graph.author(v).to_string())
                .collect();
            names.sort();

            let central_authors = central_members(graph, &members, 5)
                .into_iter()
                .map(|v| graph.author(v).to_string())
                .collect();

            Community {
                id,
                size: members.len(),
                density: calculate_density(graph, &members),
                members: names,
                central_authors,
            }
        })
        .collect()
}
