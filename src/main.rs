//! Times DBSCAN over a grid of (eps, min_samples) pairs on one LD dissimilarity matrix.
//!
//! Usage:
//!     ld-cluster-bench --data-dir data --matrix chr3-1.ld.csv --snplist chr3-1.snplist
//!     ld-cluster-bench --instrumented --output benchmark_results/chr3-1.json
//!     RUST_LOG=debug ld-cluster-bench --no-snplist --threads 4

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ld_cluster_bench::{
    load_dissimilarity, write_report, DbscanRunner, Parallelism, RusageGauge, StatsScope, Sweep,
    SweepConfig, SweepGrid,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI arguments for the benchmark.
#[derive(Parser, Debug)]
#[command(name = "ld-cluster-bench")]
#[command(about = "Time DBSCAN clustering of an LD matrix over a hyperparameter grid")]
struct Args {
    /// Directory holding the input files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Correlation matrix file, relative to the data directory.
    #[arg(long, default_value = "chr3-1.ld.csv")]
    matrix: PathBuf,

    /// SNP list file, relative to the data directory.
    #[arg(long, default_value = "chr3-1.snplist")]
    snplist: PathBuf,

    /// Build the matrix without a SNP list; the matrix file must then be square.
    #[arg(long)]
    no_snplist: bool,

    /// First neighbourhood radius (eps).
    #[arg(long, default_value_t = 0.05)]
    eps_start: f64,

    /// Last neighbourhood radius (eps), inclusive.
    #[arg(long, default_value_t = 1.0)]
    eps_stop: f64,

    /// Number of evenly spaced radii.
    #[arg(long, default_value_t = 20)]
    eps_steps: usize,

    /// Smallest min_samples value.
    #[arg(long, default_value_t = 2)]
    min_samples_start: usize,

    /// Largest min_samples value, exclusive.
    #[arg(long, default_value_t = 20)]
    min_samples_end: usize,

    /// Sample peak resident memory after every clustering run.
    #[arg(long)]
    instrumented: bool,

    /// Summarise only the runs of the current radius instead of every run so far.
    #[arg(long)]
    per_row_stats: bool,

    /// Threads per DBSCAN run; 0 uses every core.
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Write the full report as JSON to this path.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let matrix_path = args.data_dir.join(&args.matrix);
    let snplist_path = args.data_dir.join(&args.snplist);
    let entity_path = (!args.no_snplist).then_some(snplist_path.as_path());
    let matrix = load_dissimilarity::<f64>(&matrix_path, entity_path)
        .context("Could not prepare the dissimilarity matrix")?;

    let grid = SweepGrid::builder()
        .radii_linspace(args.eps_start, args.eps_stop, args.eps_steps)
        .min_samples_range(args.min_samples_start, args.min_samples_end)
        .build();
    let config = SweepConfig {
        instrumented: args.instrumented,
        stats_scope: if args.per_row_stats {
            StatsScope::PerRow
        } else {
            StatsScope::Cumulative
        },
    };
    let runner = DbscanRunner::new(Parallelism::from_thread_count(args.threads))
        .context("Could not start the clustering threads")?;
    info!(parallelism = ?runner.parallelism(), "Clustering threads ready");
    let sweep = Sweep::new(runner, RusageGauge, config);

    let report = sweep.run(&matrix, &grid).context("Sweep aborted")?;
    info!(total_secs = report.total.as_secs_f64(), "Total time");

    if let Some(output) = &args.output {
        write_report(output, &report)
            .with_context(|| format!("Could not write report to {}", output.display()))?;
    }
    Ok(())
}
