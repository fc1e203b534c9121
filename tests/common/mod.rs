use ld_cluster_bench::{
    BenchError, Dbscan, DbscanParams, DbscanRunner, DissimilarityMatrix, FixedGauge, Parallelism,
    Sweep, SweepConfig, SweepGrid,
};
use std::collections::HashSet;

/// Two LD blocks of four SNPs each plus one unlinked SNP at the end.
pub fn ld_block_correlations() -> Vec<Vec<f64>> {
    let n = 9;
    let mut correlations = vec![vec![0.02; n]; n];
    for block in [0..4, 4..8] {
        for i in block.clone() {
            for j in block.clone() {
                correlations[i][j] = if i == j { 1.0 } else { -0.9 };
            }
        }
    }
    correlations[8][8] = 1.0;
    correlations
}

fn cluster(
    matrix: &DissimilarityMatrix<f64>,
    eps: f64,
    min_samples: usize,
    par: Parallelism,
) -> Result<Vec<i32>, BenchError> {
    let params = DbscanParams::builder()
        .eps(eps)
        .min_samples(min_samples)
        .parallelism(par)
        .build();
    Dbscan::new(matrix, params).cluster()
}

pub fn test_ld_blocks(par: Parallelism) {
    let matrix = DissimilarityMatrix::from_correlation(ld_block_correlations()).unwrap();
    let result = cluster(&matrix, 0.15, 3, par).unwrap();
    // First four SNPs form one cluster
    assert_eq!(1, result[..4].iter().collect::<HashSet<_>>().len());
    // Next four SNPs are a second cluster
    assert_eq!(1, result[4..8].iter().collect::<HashSet<_>>().len());
    assert_ne!(result[0], result[4]);
    // The unlinked SNP is noise
    assert_eq!(-1, result[8]);
}

pub fn test_everything_within_radius(par: Parallelism) {
    let matrix = DissimilarityMatrix::from_correlation(ld_block_correlations()).unwrap();
    let result = cluster(&matrix, 1.0, 2, par).unwrap();
    assert_eq!(result, vec![0; 9]);
}

pub fn test_nan_correlations_are_unlinked(par: Parallelism) {
    let mut correlations = ld_block_correlations();
    // Break the link between SNP 0 and the rest of its block
    for j in 1..4 {
        correlations[0][j] = f64::NAN;
        correlations[j][0] = f64::NAN;
    }
    let matrix = DissimilarityMatrix::from_correlation(correlations).unwrap();
    let result = cluster(&matrix, 0.15, 3, par).unwrap();
    assert_eq!(-1, result[0]);
    assert_eq!(1, result[1..4].iter().collect::<HashSet<_>>().len());
    assert_ne!(-1, result[1]);
}

pub fn test_invalid_min_samples(par: Parallelism) {
    let matrix = DissimilarityMatrix::from_correlation(ld_block_correlations()).unwrap();
    let result = cluster(&matrix, 0.15, 0, par);
    assert!(matches!(result, Err(BenchError::InvalidParameter(..))));
}

pub fn test_sweep_with_dbscan(par: Parallelism) {
    let matrix = DissimilarityMatrix::from_correlation(ld_block_correlations()).unwrap();
    let grid = SweepGrid::new(vec![0.05, 0.15, 0.5], vec![2, 4, 6]);
    let config = SweepConfig {
        instrumented: true,
        ..SweepConfig::default()
    };
    let sweep = Sweep::new(DbscanRunner::new(par).unwrap(), FixedGauge(4096), config);
    let report = sweep.run(&matrix, &grid).unwrap();

    assert_eq!(report.records.len(), 9);
    assert!(report.records.iter().all(|r| r.peak_rss_kb == Some(4096)));
    let sizes: Vec<_> = report.row_summaries.iter().map(|r| r.summary.n_samples).collect();
    assert_eq!(sizes, vec![3, 6, 9]);
}

pub fn test_sweep_stops_on_bad_cell(par: Parallelism) {
    let matrix = DissimilarityMatrix::from_correlation(ld_block_correlations()).unwrap();
    let grid = SweepGrid::new(vec![0.15], vec![2, 0]);
    let sweep = Sweep::new(
        DbscanRunner::new(par).unwrap(),
        FixedGauge(0),
        SweepConfig::default(),
    );
    assert!(matches!(
        sweep.run(&matrix, &grid),
        Err(BenchError::InvalidParameter(..))
    ));
}
