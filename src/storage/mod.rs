//! Results persistence module

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, to_string_pretty};

use crate::analysis::Analysis;

/// Save analysis results to the specified directory
pub fn save_results(analysis: &Analysis, output_dir: impl AsRef<Path>) -> Result<()> {
    let output_dir = output_dir.as_ref();
    log::info!("Saving analysis results to {}", output_dir.display());

    fs::create_dir_all(output_dir)?;

    save_summary(analysis, output_dir)?;
    save_metrics(analysis, output_dir)?;
    save_communities(analysis, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(value)?.as_bytes())?;
    Ok(())
}

/// Save configuration, network statistics and modularity
fn save_summary(analysis: &Analysis, output_dir: &Path) -> Result<()> {
    log::debug!("Saving summary information");

    let summary = json!({
        "config": analysis.config,
        "network_stats": analysis.stats,
        "community_stats": {
            "community_count": analysis.communities.community_count(),
            "modularity": analysis.communities.modularity(),
        },
    });

    write_json(&output_dir.join("summary.json"), &summary)
}

/// Save the per-author table, highest degree centrality first
fn save_metrics(analysis: &Analysis, output_dir: &Path) -> Result<()> {
    log::debug!("Saving metrics for {} authors", analysis.metrics.len());

    let rows: Vec<_> = analysis
        .metrics
        .ranked_by_degree()
        .into_iter()
        .map(|row| {
            json!({
                "author": row.author,
                "affiliation": row.affiliation,
                "community": analysis.communities.get(&analysis.graph, &row.author),
                "paper_count": row.paper_count,
                "degree_centrality": row.degree_centrality,
                "betweenness_centrality": row.betweenness_centrality,
                "closeness_centrality": row.closeness_centrality,
                "clustering_coefficient": row.clustering_coefficient,
            })
        })
        .collect();

    write_json(&output_dir.join("metrics.json"), &json!({ "authors": rows }))
}

/// Save community membership
fn save_communities(analysis: &Analysis, output_dir: &Path) -> Result<()> {
    let communities = analysis.community_summaries();
    log::debug!("Saving {} communities", communities.len());

    write_json(
        &output_dir.join("communities.json"),
        &json!({ "communities": communities }),
    )
}
