use crate::{
    BenchError, ClusteringRunner, DissimilarityMatrix, GridCell, MemoryGauge, Summary, SweepGrid,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

/// Which timing records the statistics after each outer radius are computed over.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsScope {
    /// Every record since the start of the sweep, so the statistics after the k-th radius
    /// cover the first k rows.
    #[default]
    Cumulative,
    /// Only the records of the radius that has just finished.
    PerRow,
}

/// Options for one sweep; the default times every cell without sampling memory.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SweepConfig {
    /// Sample the peak resident set size after every clustering run.
    pub instrumented: bool,
    pub stats_scope: StatsScope,
}

/// The measurement of one grid cell.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    pub cell: GridCell,
    pub elapsed: Duration,
    /// Peak resident set size in KB right after the run; only sampled when instrumented.
    pub peak_rss_kb: Option<u64>,
}

/// Append-only collection of the timing records of a sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingLog {
    records: Vec<TimingRecord>,
}

impl TimingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TimingRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TimingRecord] {
        &self.records
    }

    /// The summed clustering time of every record so far.
    pub fn total(&self) -> Duration {
        self.records.iter().map(|r| r.elapsed).sum()
    }

    /// Statistics over the records from index `start` onwards.
    pub fn summary_from(&self, start: usize) -> Option<Summary> {
        let durations: Vec<Duration> =
            self.records.iter().skip(start).map(|r| r.elapsed).collect();
        Summary::from_durations(&durations)
    }

    pub fn into_records(self) -> Vec<TimingRecord> {
        self.records
    }
}

/// Statistics reported once every cell of a radius has run.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSummary {
    pub radius: f64,
    pub scope: StatsScope,
    pub summary: Summary,
}

/// Everything a sweep measured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub grid: SweepGrid,
    pub records: Vec<TimingRecord>,
    pub row_summaries: Vec<RowSummary>,
    pub total: Duration,
}

/// Times a clustering runner over every cell of a grid, one cell at a time.
///
/// # Examples
/// ```
///use ld_cluster_bench::{
///    DbscanRunner, DissimilarityMatrix, FixedGauge, Sweep, SweepConfig, SweepGrid,
///};
///
///let correlations = vec![vec![1.0, 0.8], vec![0.8, 1.0]];
///let matrix = DissimilarityMatrix::from_correlation(correlations).unwrap();
///let grid = SweepGrid::new(vec![0.1, 0.5], vec![1, 2, 3]);
///let config = SweepConfig { instrumented: true, ..SweepConfig::default() };
///let sweep = Sweep::new(DbscanRunner::default(), FixedGauge(1024), config);
///
///let report = sweep.run(&matrix, &grid).unwrap();
///assert_eq!(report.records.len(), 6);
///assert_eq!(report.row_summaries[1].summary.n_samples, 6);
///assert_eq!(report.records[0].peak_rss_kb, Some(1024));
/// ```
pub struct Sweep<R, G> {
    runner: R,
    gauge: G,
    config: SweepConfig,
}

impl<R, G: MemoryGauge> Sweep<R, G> {
    pub fn new(runner: R, gauge: G, config: SweepConfig) -> Self {
        Self {
            runner,
            gauge,
            config,
        }
    }

    pub fn config(&self) -> SweepConfig {
        self.config
    }

    /// Runs every cell of the grid, outer radius first, and summarises the timings after each
    /// radius.
    ///
    /// # Returns
    /// * The report of all timings and row summaries. The first clustering error ends the
    ///   sweep and is returned, and the timings collected up to that point are discarded.
    pub fn run<T>(
        &self,
        matrix: &DissimilarityMatrix<T>,
        grid: &SweepGrid,
    ) -> Result<SweepReport, BenchError>
    where
        R: ClusteringRunner<T>,
    {
        info!(
            n_entities = matrix.n_entities(),
            n_cells = grid.len(),
            instrumented = self.config.instrumented,
            "Starting sweep"
        );
        let mut log = TimingLog::new();
        let mut row_summaries = Vec::with_capacity(grid.radii().len());
        for &radius in grid.radii() {
            if let Some(row) = self.run_row(matrix, radius, grid.min_samples(), &mut log)? {
                row_summaries.push(row);
            }
        }
        let total = log.total();
        info!(n_runs = log.len(), total_secs = total.as_secs_f64(), "Sweep finished");
        Ok(SweepReport {
            grid: grid.clone(),
            records: log.into_records(),
            row_summaries,
            total,
        })
    }

    /// Runs every minimum size for one radius, appending to `log`.
    ///
    /// # Returns
    /// * The statistics for this radius, or `None` if `min_samples` is empty.
    pub fn run_row<T>(
        &self,
        matrix: &DissimilarityMatrix<T>,
        radius: f64,
        min_samples: &[usize],
        log: &mut TimingLog,
    ) -> Result<Option<RowSummary>, BenchError>
    where
        R: ClusteringRunner<T>,
    {
        let row_start = log.len();
        for &min_samples in min_samples {
            let record = self.run_cell(matrix, GridCell { radius, min_samples })?;
            log.push(record);
            info!(
                elapsed_secs = record.elapsed.as_secs_f64(),
                total_secs = log.total().as_secs_f64(),
                "Time of clustering"
            );
            if let Some(kb) = record.peak_rss_kb {
                info!(peak_rss_kb = kb, "Memory usage");
            }
        }

        let stats_start = match self.config.stats_scope {
            StatsScope::Cumulative => 0,
            StatsScope::PerRow => row_start,
        };
        if log.len() == row_start {
            return Ok(None);
        }
        let row = log.summary_from(stats_start).map(|summary| RowSummary {
            radius,
            scope: self.config.stats_scope,
            summary,
        });
        if let Some(row) = &row {
            info!(
                eps = radius,
                n_samples = row.summary.n_samples,
                mean_secs = row.summary.mean,
                median_secs = row.summary.median,
                std_dev_secs = ?row.summary.std_dev,
                "Clustering time statistics"
            );
        }
        Ok(row)
    }

    fn run_cell<T>(
        &self,
        matrix: &DissimilarityMatrix<T>,
        cell: GridCell,
    ) -> Result<TimingRecord, BenchError>
    where
        R: ClusteringRunner<T>,
    {
        info!(eps = cell.radius, min_samples = cell.min_samples, "Parameters pair");
        let start = Instant::now();
        let _labels = self.runner.cluster(matrix, cell)?;
        let elapsed = start.elapsed();
        let peak_rss_kb = if self.config.instrumented {
            self.gauge.peak_rss_kb()
        } else {
            None
        };
        Ok(TimingRecord {
            cell,
            elapsed,
            peak_rss_kb,
        })
    }
}
