use anyhow::Result;
use clap::Parser;

use gravity_segmenter::{cluster, data, graph, storage, Config};

#[derive(Parser, Debug)]
#[clap(
    name = "gravity-segmenter",
    about = "Build a gravity-model flow graph over population centers and split it into bounded groups"
)]
struct Cli {
    /// Path to input CSV of places (population, intensity, longitude, latitude)
    #[clap(long)]
    points: String,

    /// Output directory for results
    #[clap(long, default_value = "segmented_results")]
    output_dir: String,

    /// Maximum geodesic distance in meters at which two places interact
    #[clap(long, default_value = "200000")]
    cutoff: f64,

    /// Gravity decay exponent
    #[clap(long, default_value = "1.0")]
    exponent: f64,

    /// No group may hold more places than this
    #[clap(long, default_value = "250")]
    max_group_size: usize,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config {
        cutoff_meters: args.cutoff,
        exponent: args.exponent,
        max_group_size: args.max_group_size,
        ..Config::default()
    };

    log::info!("Starting flow-graph segmentation");
    log::info!("Input: {}", args.points);
    log::info!("Output: {}", args.output_dir);

    // Create output directory
    std::fs::create_dir_all(&args.output_dir)?;

    // 1. Load places
    let places = data::table::load_places(&args.points)?;

    log::info!("Loaded {} places", places.len());

    // 2. Build the gravity-model flow graph
    let (flow_graph, flow_stats) =
        graph::build_flow_graph(&places, config.cutoff_meters, config.exponent)?;

    log::info!(
        "Built flow graph with {} nodes and {} edges",
        flow_graph.node_count(),
        flow_graph.edge_count()
    );

    // 3. Partition it into bounded groups
    let (labeled, hierarchy, partition_stats) =
        cluster::partition(flow_graph, config.max_group_size)?;

    log::info!("Partitioned into {} groups", partition_stats.groups);

    // 4. Save results
    storage::save_results(
        &labeled,
        &hierarchy,
        &flow_stats,
        &partition_stats,
        &args.output_dir,
    )?;

    log::info!("Segmentation complete. Results saved to {}", args.output_dir);

    Ok(())
}
