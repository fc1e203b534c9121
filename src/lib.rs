//! Benchmarks density-based clustering of SNP linkage-disequilibrium ("LD") matrices.
//!
//! LD between two SNPs is a correlation, so a square LD matrix can be turned into a
//! dissimilarity matrix and clustered with DBSCAN using precomputed distances. How long that
//! takes depends heavily on the two DBSCAN hyper parameters, so this crate:
//!  1. builds a `DissimilarityMatrix` from a correlation matrix, mapping NaN correlations to 0
//!     and each correlation `r` to `1 - |r|`, with an exact 0 diagonal;
//!  2. sweeps a `SweepGrid` of neighbourhood radii (outer) and minimum neighbourhood sizes
//!     (inner), timing one clustering run per cell and optionally sampling peak memory; and
//!  3. summarises the timings (mean, median and sample standard deviation) after each radius.
//!
//! The clustering step is any `ClusteringRunner`. `DbscanRunner` is the built-in one; tests
//! and other benchmarks can plug in their own.
//!
//! # Examples
//! ```
//!use ld_cluster_bench::{
//!    DbscanRunner, DissimilarityMatrix, RusageGauge, Sweep, SweepConfig, SweepGrid,
//!};
//!
//!let correlations = vec![
//!    vec![1.0, 0.95, 0.9, 0.0],
//!    vec![0.95, 1.0, 0.92, f64::NAN],
//!    vec![0.9, 0.92, 1.0, 0.1],
//!    vec![0.0, f64::NAN, 0.1, 1.0],
//!];
//!let matrix = DissimilarityMatrix::from_correlation(correlations).unwrap();
//!
//!let grid = SweepGrid::new(vec![0.05, 0.15], vec![2, 3]);
//!let sweep = Sweep::new(DbscanRunner::default(), RusageGauge, SweepConfig::default());
//!let report = sweep.run(&matrix, &grid).unwrap();
//!
//!assert_eq!(report.records.len(), 4);
//!// Statistics after each radius cover every run so far
//!assert_eq!(report.row_summaries[0].summary.n_samples, 2);
//!assert_eq!(report.row_summaries[1].summary.n_samples, 4);
//! ```

pub use crate::dbscan::Dbscan;
pub use crate::dissimilarity::DissimilarityMatrix;
pub use crate::error::BenchError;
pub use crate::grid::{arange, linspace, GridCell, SweepGrid, SweepGridBuilder};
pub use crate::hyper_parameters::{DbscanParamBuilder, DbscanParams, Parallelism};
pub use crate::io::{load_dissimilarity, read_correlation_matrix, read_entity_list, write_report};
pub use crate::memory::{FixedGauge, MemoryGauge, RusageGauge};
pub use crate::runner::{ClusteringRunner, DbscanRunner};
pub use crate::stats::Summary;
pub use crate::sweep::{
    RowSummary, StatsScope, Sweep, SweepConfig, SweepReport, TimingLog, TimingRecord,
};

mod dbscan;
mod dissimilarity;
mod error;
mod grid;
mod hyper_parameters;
mod io;
mod memory;
mod runner;
mod stats;
mod sweep;
mod validation;
