use anyhow::Result;
use clap::{Parser, ValueEnum};

use coauthor_network_analyzer::{analyze, data, storage, viz, Config, PathMetric};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PathMetricArg {
    /// Unweighted hop count
    Hops,
    /// Inverse co-authorship count
    InverseWeight,
}

impl From<PathMetricArg> for PathMetric {
    fn from(arg: PathMetricArg) -> Self {
        match arg {
            PathMetricArg::Hops => PathMetric::Hops,
            PathMetricArg::InverseWeight => PathMetric::InverseWeight,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "coauthor-network-analyzer",
    about = "Co-authorship network analysis of bibliographic records"
)]
struct Cli {
    /// Path to a JSON array of paper records
    #[arg(long)]
    input: String,

    /// Author the records were queried for; always kept as a node
    #[arg(long)]
    seed_author: Option<String>,

    /// Output directory for results
    #[arg(long, default_value = "coauthor_results")]
    output_dir: String,

    /// Maximum number of records to use
    #[arg(long, default_value = "30")]
    max_records: usize,

    /// Minimum number of shared papers for an edge
    #[arg(long, default_value = "1")]
    min_coauthor: usize,

    /// Path length used by closeness and betweenness
    #[arg(long, value_enum, default_value = "hops")]
    path_metric: PathMetricArg,

    /// Skip visualizations
    #[arg(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config::new(
        args.seed_author,
        args.max_records,
        args.min_coauthor,
        args.path_metric.into(),
    );

    log::info!("Starting co-authorship analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    // 1. Load records
    let records = data::load_records(&args.input, config.max_records)?;

    // 2. Build graph, metrics and communities
    let analysis = analyze(&records, &config)?;

    // 3. Save results
    storage::save_results(&analysis, &args.output_dir)?;

    // 4. Generate visualizations if requested
    if !args.skip_viz {
        viz::generate_visualizations(&analysis, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
