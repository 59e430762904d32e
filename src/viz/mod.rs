//! Visualization export module
//!
//! Produces files a renderer can consume directly: a Graphviz DOT diagram
//! coloured by community and flat node/edge tables.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use petgraph::dot::{Config as DotConfig, Dot};

use crate::analysis::Analysis;

/// Colour cycle for communities
pub const COMMUNITY_COLORS: [&str; 17] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4",
    "#42d4f4", "#f032e6", "#bfef45", "#fabed4", "#469990",
    "#dcbeff", "#9A6324", "#800000", "#aaffc3", "#808000",
    "#000075", "#a9a9a9",
];

/// Colour of a community id
pub fn community_color(id: u32) -> &'static str {
    COMMUNITY_COLORS[id as usize % COMMUNITY_COLORS.len()]
}

/// Edge width scaled to the strongest co-authorship, in `[1, 5]`
pub fn edge_width(weight: u32, max_weight: u32) -> f64 {
    if max_weight == 0 {
        return 1.0;
    }
    1.0 + 4.0 * weight as f64 / max_weight as f64
}

/// Node size from paper count, in `[10, 40]` with a square-root falloff
pub fn node_size(paper_count: u32, max_papers: u32) -> f64 {
    if max_papers == 0 {
        return 10.0;
    }
    10.0 + 30.0 * (paper_count as f64 / max_papers as f64).sqrt()
}

/// Longest affiliation shown in a tooltip, in characters
const AFFILIATION_TOOLTIP_CHARS: usize = 100;

/// Node tooltip text, escaped for a quoted DOT attribute
fn node_tooltip(paper_count: u32, community: u32, affiliation: Option<&str>) -> String {
    let mut tooltip = format!("Papers: {} | Community: {}", paper_count, community);
    if let Some(affiliation) = affiliation {
        let shown: String = affiliation.chars().take(AFFILIATION_TOOLTIP_CHARS).collect();
        tooltip.push_str(" | Affiliation: ");
        tooltip.push_str(&shown);
    }
    tooltip.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Generate visualization files from analysis results
pub fn generate_visualizations(analysis: &Analysis, output_dir: impl AsRef<Path>) -> Result<()> {
    let viz_dir = output_dir.as_ref().join("visualizations");
    log::info!("Generating visualizations in {}", viz_dir.display());

    fs::create_dir_all(&viz_dir)?;

    generate_dot(analysis, &viz_dir)?;
    generate_tables(analysis, &viz_dir)?;

    log::info!("Visualizations generated successfully");

    Ok(())
}

/// Render the co-authorship graph as Graphviz DOT
pub fn render_dot(analysis: &Analysis) -> String {
    let graph = analysis.graph.to_petgraph();
    let max_weight = analysis.graph.max_weight();
    let max_papers = analysis.graph.max_paper_count();
    let communities = &analysis.communities;

    format!(
        "{:?}",
        Dot::with_attr_getters(
            &graph,
            &[DotConfig::NodeNoLabel, DotConfig::EdgeNoLabel],
            &|_, edge| {
                let weight = *edge.weight();
                format!(
                    "penwidth={:.2} tooltip=\"Co-authored: {}\"",
                    edge_width(weight, max_weight),
                    weight
                )
            },
            &|_, (idx, name)| {
                let node = idx.index();
                let community = communities.community_of(node);
                let papers = analysis.graph.paper_count(node);
                format!(
                    "label={:?} style=filled fillcolor=\"{}\" fontsize={:.1} tooltip=\"{}\"",
                    name,
                    community_color(community),
                    node_size(papers, max_papers),
                    node_tooltip(papers, community, analysis.graph.affiliation(node))
                )
            },
        )
    )
}

fn generate_dot(analysis: &Analysis, viz_dir: &Path) -> Result<()> {
    log::debug!("Writing DOT diagram");

    let mut file = File::create(viz_dir.join("coauthor_network.dot"))?;
    file.write_all(render_dot(analysis).as_bytes())?;

    Ok(())
}

/// Quote a CSV field when needed
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Generate node and edge tables for external tools
fn generate_tables(analysis: &Analysis, viz_dir: &Path) -> Result<()> {
    log::debug!("Writing node and edge tables");

    let graph = &analysis.graph;
    let max_papers = graph.max_paper_count();

    let mut nodes_file = File::create(viz_dir.join("nodes.csv"))?;
    writeln!(nodes_file, "id,label,affiliation,community_id,paper_count,size,degree_centrality,betweenness_centrality,closeness_centrality,clustering_coefficient")?;
    for (node, row) in analysis.metrics.rows().iter().enumerate() {
        writeln!(
            nodes_file,
            "{},{},{},{},{},{:.2},{:.6},{:.6},{:.6},{:.6}",
            node,
            csv_field(&row.author),
            csv_field(row.affiliation.as_deref().unwrap_or("")),
            analysis.communities.community_of(node),
            row.paper_count,
            node_size(row.paper_count, max_papers),
            row.degree_centrality,
            row.betweenness_centrality,
            row.closeness_centrality,
            row.clustering_coefficient
        )?;
    }

    let mut edges_file = File::create(viz_dir.join("edges.csv"))?;
    writeln!(edges_file, "source,target,weight")?;
    for (u, v, weight) in graph.edges() {
        writeln!(
            edges_file,
            "{},{},{}",
            csv_field(graph.author(u)),
            csv_field(graph.author(v)),
            weight
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_cycle() {
        assert_eq!(community_color(0), "#e6194b");
        assert_eq!(community_color(17), "#e6194b");
    }

    #[test]
    fn widths_scale_to_max() {
        assert_eq!(edge_width(2, 2), 5.0);
        assert_eq!(edge_width(1, 4), 2.0);
        assert_eq!(edge_width(0, 0), 1.0);
    }

    #[test]
    fn sizes_follow_square_root_of_paper_share() {
        assert_eq!(node_size(4, 4), 40.0);
        assert_eq!(node_size(1, 4), 25.0);
        assert_eq!(node_size(0, 4), 10.0);
        assert_eq!(node_size(0, 0), 10.0);
    }

    #[test]
    fn tooltips_truncate_and_escape_affiliations() {
        assert_eq!(node_tooltip(3, 1, None), "Papers: 3 | Community: 1");
        assert_eq!(
            node_tooltip(1, 0, Some("The \"Lab\"")),
            "Papers: 1 | Community: 0 | Affiliation: The \\\"Lab\\\""
        );

        let long = "x".repeat(150);
        let tooltip = node_tooltip(1, 0, Some(&long));
        assert!(tooltip.ends_with(&"x".repeat(100)));
        assert!(!tooltip.contains(&"x".repeat(101)));
    }

    #[test]
    fn csv_fields_are_quoted() {
        assert_eq!(csv_field("Smith J"), "Smith J");
        assert_eq!(csv_field("O\"Neil, P"), "\"O\"\"Neil, P\"");
    }
}
