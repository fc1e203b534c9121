use crate::BenchError;

// Defaults for parameters
const EPS_DEFAULT: f64 = 0.5;
const MIN_SAMPLES_DEFAULT: usize = 5;
const PARALLELISM_DEFAULT: Parallelism = Parallelism::Max;

// Valid minimums/left bounds of parameters
const MIN_SAMPLES_MINIMUM: usize = 1;

/// How many threads a single DBSCAN run may use for its neighbourhood queries.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Parallelism {
    /// Run on the calling thread only.
    Serial,
    /// Run on a dedicated pool with this many threads.
    Threads(usize),
    /// Run on the global rayon pool, which uses every available core.
    Max,
}

impl Parallelism {
    /// Maps a thread count to a parallelism mode, where 0 means "use every core".
    pub fn from_thread_count(threads: usize) -> Self {
        match threads {
            0 => Parallelism::Max,
            1 => Parallelism::Serial,
            n => Parallelism::Threads(n),
        }
    }
}

/// The hyper parameters of a DBSCAN run over a precomputed dissimilarity matrix.
/// Use `DbscanParams::builder()` to set custom values.
#[derive(Debug, Clone, PartialEq)]
pub struct DbscanParams {
    pub(crate) eps: f64,
    pub(crate) min_samples: usize,
    pub(crate) parallelism: Parallelism,
}

/// Builder object to set custom DBSCAN hyper parameters.
pub struct DbscanParamBuilder {
    eps: Option<f64>,
    min_samples: Option<usize>,
    parallelism: Option<Parallelism>,
}

impl DbscanParams {
    /// Enters the builder pattern, allowing custom hyper parameters to be set using
    /// various setter methods.
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn builder() -> DbscanParamBuilder {
        DbscanParamBuilder {
            eps: None,
            min_samples: None,
            parallelism: None,
        }
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Rejects parameters DBSCAN cannot run with.
    pub(crate) fn validate(&self) -> Result<(), BenchError> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(BenchError::InvalidParameter(format!(
                "eps ({}) must be a finite value greater than 0",
                self.eps
            )));
        }
        if self.min_samples < MIN_SAMPLES_MINIMUM {
            return Err(BenchError::InvalidParameter(format!(
                "min_samples ({}) cannot be lower than {MIN_SAMPLES_MINIMUM}",
                self.min_samples
            )));
        }
        if self.parallelism == Parallelism::Threads(0) {
            return Err(BenchError::InvalidParameter(String::from(
                "a dedicated thread pool needs at least one thread",
            )));
        }
        Ok(())
    }
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl DbscanParamBuilder {
    /// Sets the neighbourhood radius. Two entities are neighbours if their dissimilarity is
    /// at most eps. Defaults to 0.5.
    ///
    /// # Parameters
    /// * eps - the neighbourhood radius
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn eps(mut self, eps: f64) -> DbscanParamBuilder {
        self.eps = Some(eps);
        self
    }

    /// Sets min samples, the number of entities (including the entity itself) that must lie
    /// within eps for an entity to be a core point. Defaults to 5.
    ///
    /// # Parameters
    /// * min_samples - the minimum neighbourhood size
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn min_samples(mut self, min_samples: usize) -> DbscanParamBuilder {
        self.min_samples = Some(min_samples);
        self
    }

    /// Sets how much parallelism a single run may use. Defaults to `Parallelism::Max`.
    ///
    /// # Returns
    /// * the hyper parameter configuration builder
    pub fn parallelism(mut self, parallelism: Parallelism) -> DbscanParamBuilder {
        self.parallelism = Some(parallelism);
        self
    }

    /// Finishes the building of the hyper parameter configuration.
    ///
    /// # Returns
    /// * The completed DBSCAN hyper parameter configuration.
    pub fn build(self) -> DbscanParams {
        DbscanParams {
            eps: self.eps.unwrap_or(EPS_DEFAULT),
            min_samples: self.min_samples.unwrap_or(MIN_SAMPLES_DEFAULT),
            parallelism: self.parallelism.unwrap_or(PARALLELISM_DEFAULT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = DbscanParams::default();
        assert_eq!(params.eps(), 0.5);
        assert_eq!(params.min_samples(), 5);
        assert_eq!(params.parallelism(), Parallelism::Max);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn zero_min_samples_is_rejected() {
        let params = DbscanParams::builder().min_samples(0).build();
        assert!(matches!(params.validate(), Err(BenchError::InvalidParameter(..))));
    }

    #[test]
    fn bad_eps_is_rejected() {
        for eps in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let params = DbscanParams::builder().eps(eps).build();
            assert!(matches!(params.validate(), Err(BenchError::InvalidParameter(..))));
        }
    }

    #[test]
    fn thread_count_mapping() {
        assert_eq!(Parallelism::from_thread_count(0), Parallelism::Max);
        assert_eq!(Parallelism::from_thread_count(1), Parallelism::Serial);
        assert_eq!(Parallelism::from_thread_count(8), Parallelism::Threads(8));
    }
}
