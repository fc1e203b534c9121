use crate::dbscan::build_pool;
use crate::hyper_parameters::Parallelism;
use crate::{BenchError, Dbscan, DbscanParams, DissimilarityMatrix, GridCell};
use num_traits::Float;
use rayon::ThreadPool;
use std::sync::Arc;

/// A clustering capability the sweep can time. Implementations must treat the matrix as
/// read-only; it is shared by every grid cell of a sweep.
pub trait ClusteringRunner<T> {
    /// Clusters the matrix with the cell's radius and minimum neighbourhood size and returns
    /// one label per entity. Errors are not retried by the sweep.
    fn cluster(
        &self,
        matrix: &DissimilarityMatrix<T>,
        cell: GridCell,
    ) -> Result<Vec<i32>, BenchError>;
}

/// Runs `Dbscan` on each grid cell with a fixed amount of internal parallelism.
///
/// Worker threads are started when the runner is built, so a timed `cluster` call never
/// includes thread start-up. `Parallelism::Threads` gets a dedicated pool shared by every
/// cell and every clone of the runner; `Parallelism::Max` uses rayon's global pool.
#[derive(Debug, Clone)]
pub struct DbscanRunner {
    parallelism: Parallelism,
    pool: Option<Arc<ThreadPool>>,
}

impl DbscanRunner {
    /// Creates a runner and starts the threads it will cluster with.
    ///
    /// # Returns
    /// * The runner, or an error if `parallelism` is `Threads(0)` or the pool cannot start.
    pub fn new(parallelism: Parallelism) -> Result<Self, BenchError> {
        let pool = match parallelism {
            Parallelism::Serial => None,
            Parallelism::Max => {
                rayon::broadcast(|_| ());
                None
            }
            Parallelism::Threads(0) => {
                return Err(BenchError::InvalidParameter(String::from(
                    "thread count must be at least 1",
                )))
            }
            Parallelism::Threads(n_threads) => {
                let pool = build_pool(n_threads)?;
                pool.broadcast(|_| ());
                Some(Arc::new(pool))
            }
        };
        Ok(Self { parallelism, pool })
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }
}

impl Default for DbscanRunner {
    fn default() -> Self {
        rayon::broadcast(|_| ());
        Self {
            parallelism: Parallelism::Max,
            pool: None,
        }
    }
}

impl<T: Float + Send + Sync> ClusteringRunner<T> for DbscanRunner {
    fn cluster(
        &self,
        matrix: &DissimilarityMatrix<T>,
        cell: GridCell,
    ) -> Result<Vec<i32>, BenchError> {
        let params = DbscanParams::builder()
            .eps(cell.radius)
            .min_samples(cell.min_samples)
            .parallelism(self.parallelism)
            .build();
        let dbscan = Dbscan::new(matrix, params);
        match &self.pool {
            Some(pool) => dbscan.with_pool(pool).cluster(),
            None => dbscan.cluster(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_dbscan_with_cell_parameters() {
        let correlations = vec![
            vec![1.0, 0.9, 0.0],
            vec![0.9, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let matrix = DissimilarityMatrix::from_correlation(correlations).unwrap();
        let runner = DbscanRunner::new(Parallelism::Serial).unwrap();

        let cell = GridCell { radius: 0.2, min_samples: 2 };
        assert_eq!(runner.cluster(&matrix, cell).unwrap(), vec![0, 0, -1]);

        let cell = GridCell { radius: 0.2, min_samples: 3 };
        assert_eq!(runner.cluster(&matrix, cell).unwrap(), vec![-1, -1, -1]);
    }

    #[test]
    fn invalid_cell_is_an_error() {
        let matrix = DissimilarityMatrix::from_correlation(vec![vec![1.0f32]]).unwrap();
        let cell = GridCell { radius: 0.2, min_samples: 0 };
        let result = DbscanRunner::default().cluster(&matrix, cell);
        assert!(matches!(result, Err(BenchError::InvalidParameter(..))));
    }

    #[test]
    fn zero_threads_is_rejected() {
        let result = DbscanRunner::new(Parallelism::Threads(0));
        assert!(matches!(result, Err(BenchError::InvalidParameter(..))));
    }

    #[test]
    fn fixed_thread_runner_reuses_one_pool() {
        let matrix = DissimilarityMatrix::from_correlation(vec![
            vec![1.0, 0.9, 0.0],
            vec![0.9, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap();
        let runner = DbscanRunner::new(Parallelism::Threads(2)).unwrap();
        let pool = Arc::clone(runner.pool.as_ref().unwrap());
        assert_eq!(pool.current_num_threads(), 2);
        let workers_before = pool.broadcast(|_| std::thread::current().id());

        let clone = runner.clone();
        for min_samples in 1..5 {
            let cell = GridCell { radius: 0.2, min_samples };
            runner.cluster(&matrix, cell).unwrap();
            clone.cluster(&matrix, cell).unwrap();
        }

        // Same worker threads before and after, shared with the clone
        assert_eq!(pool.broadcast(|_| std::thread::current().id()), workers_before);
        assert!(Arc::ptr_eq(&pool, clone.pool.as_ref().unwrap()));
    }

    #[test]
    fn serial_and_max_runners_have_no_private_pool() {
        assert!(DbscanRunner::new(Parallelism::Serial).unwrap().pool.is_none());
        assert!(DbscanRunner::new(Parallelism::Max).unwrap().pool.is_none());
        assert!(DbscanRunner::default().pool.is_none());
    }
}
