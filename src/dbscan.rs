use crate::hyper_parameters::Parallelism;
use crate::{BenchError, DbscanParams, DissimilarityMatrix};
use num_traits::Float;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::collections::VecDeque;

const NOISE: i32 = -1;

/// Density-Based Spatial Clustering of Applications with Noise ("DBSCAN") over a
/// precomputed dissimilarity matrix. Generic over floating point numeric types.
///
/// The eps-neighbourhood of an entity is every entity, itself included, whose dissimilarity
/// to it is at most eps. Entities with at least min_samples neighbours are core points;
/// clusters are the connected components of core points plus the non-core points they reach.
#[derive(Debug, Clone)]
pub struct Dbscan<'a, T> {
    matrix: &'a DissimilarityMatrix<T>,
    n_samples: usize,
    hp: DbscanParams,
    pool: Option<&'a ThreadPool>,
}

impl<'a, T: Float + Send + Sync> Dbscan<'a, T> {
    /// Creates an instance of the DBSCAN clustering model.
    ///
    /// # Parameters
    /// * `matrix` - the dissimilarity matrix to cluster.
    /// * `hyper_params` - the hyper parameter configuration.
    ///
    /// # Returns
    /// * The DBSCAN model instance.
    pub fn new(matrix: &'a DissimilarityMatrix<T>, hyper_params: DbscanParams) -> Self {
        Dbscan {
            matrix,
            n_samples: matrix.n_entities(),
            hp: hyper_params,
            pool: None,
        }
    }

    /// Runs the parallel neighbourhood pass of `Parallelism::Threads` inside an existing
    /// thread pool instead of starting a new one for this call.
    ///
    /// # Parameters
    /// * `pool` - the pool to run in. Its size takes precedence over the thread count in the
    ///   hyper parameters.
    pub fn with_pool(mut self, pool: &'a ThreadPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Performs clustering on the matrix passed to the constructor.
    ///
    /// # Returns
    /// * A result that, if successful, contains a list of cluster labels, one per entity.
    ///   Non-negative integers are cluster labels, numbered in order of each cluster's
    ///   lowest-index core point. -1 labels mean that an entity is noise. An error is
    ///   returned if eps is not a positive finite number or min_samples is 0.
    ///
    /// # Examples
    /// ```
    ///use ld_cluster_bench::{Dbscan, DbscanParams, DissimilarityMatrix};
    ///
    ///let correlations = vec![
    ///    vec![1.0, 0.9, 0.0],
    ///    vec![0.9, 1.0, 0.0],
    ///    vec![0.0, 0.0, 1.0],
    ///];
    ///let matrix = DissimilarityMatrix::from_correlation(correlations).unwrap();
    ///let params = DbscanParams::builder().eps(0.2).min_samples(2).build();
    ///let labels = Dbscan::new(&matrix, params).cluster().unwrap();
    ///assert_eq!(labels, vec![0, 0, -1]);
    /// ```
    pub fn cluster(&self) -> Result<Vec<i32>, BenchError> {
        self.hp.validate()?;
        if self.n_samples == 0 {
            return Err(BenchError::EmptyDataset);
        }
        let eps = T::from(self.hp.eps).ok_or_else(|| {
            BenchError::InvalidParameter(format!(
                "eps ({}) cannot be represented in the matrix value type",
                self.hp.eps
            ))
        })?;
        let neighbourhoods = self.find_neighbourhoods(eps)?;
        Ok(self.label_data(&neighbourhoods))
    }

    fn find_neighbourhoods(&self, eps: T) -> Result<Vec<Vec<usize>>, BenchError> {
        let rows = self.matrix.rows();
        let neighbourhoods: Vec<Vec<usize>> = match self.hp.parallelism {
            Parallelism::Serial => rows.iter().map(|row| region_query(row, eps)).collect(),
            Parallelism::Max => rows.par_iter().map(|row| region_query(row, eps)).collect(),
            Parallelism::Threads(n_threads) => match self.pool {
                Some(pool) => {
                    pool.install(|| rows.par_iter().map(|row| region_query(row, eps)).collect())
                }
                None => build_pool(n_threads)?
                    .install(|| rows.par_iter().map(|row| region_query(row, eps)).collect()),
            },
        };
        Ok(neighbourhoods)
    }

    fn label_data(&self, neighbourhoods: &[Vec<usize>]) -> Vec<i32> {
        let is_core: Vec<bool> = neighbourhoods
            .iter()
            .map(|neighbours| neighbours.len() >= self.hp.min_samples)
            .collect();

        let mut labels = vec![NOISE; self.n_samples];
        let mut next_label = 0;
        let mut queue = VecDeque::new();

        for seed in 0..self.n_samples {
            if labels[seed] != NOISE || !is_core[seed] {
                continue;
            }
            labels[seed] = next_label;
            queue.push_back(seed);
            while let Some(point) = queue.pop_front() {
                if !is_core[point] {
                    continue;
                }
                for &neighbour in &neighbourhoods[point] {
                    if labels[neighbour] == NOISE {
                        labels[neighbour] = next_label;
                        queue.push_back(neighbour);
                    }
                }
            }
            next_label += 1;
        }
        labels
    }
}

/// Starts a rayon pool with a fixed number of worker threads.
pub(crate) fn build_pool(n_threads: usize) -> Result<ThreadPool, BenchError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build()
        .map_err(|e| {
            BenchError::InvalidParameter(format!(
                "could not start a pool of {n_threads} threads: {e}"
            ))
        })
}

fn region_query<T: Float>(distances: &[T], eps: T) -> Vec<usize> {
    distances
        .iter()
        .enumerate()
        .filter(|&(_, &dist)| dist <= eps)
        .map(|(idx, _)| idx)
        .collect()
}
