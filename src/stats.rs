use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary statistics of a set of clustering times, in seconds.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub n_samples: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (denominator n - 1). `None` for a single sample.
    pub std_dev: Option<f64>,
}

impl Summary {
    /// Summarises a set of durations, or returns `None` if there are none.
    ///
    /// # Examples
    /// ```
    ///use std::time::Duration;
    ///use ld_cluster_bench::Summary;
    ///
    ///let times = [1.0, 2.0, 4.0].map(Duration::from_secs_f64);
    ///let summary = Summary::from_durations(&times).unwrap();
    ///assert_eq!(summary.median, 2.0);
    ///assert!((summary.std_dev.unwrap() - 1.527525).abs() < 1e-6);
    /// ```
    pub fn from_durations(durations: &[Duration]) -> Option<Self> {
        let secs: Vec<f64> = durations.iter().map(Duration::as_secs_f64).collect();
        Self::from_secs(&secs)
    }

    pub fn from_secs(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mean = mean(samples);
        Some(Summary {
            n_samples: samples.len(),
            mean,
            median: median(samples),
            std_dev: sample_std_dev(samples, mean),
        })
    }
}

fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn sample_std_dev(samples: &[f64], mean: f64) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let sum_sq: f64 = samples.iter().map(|x| (x - mean).powi(2)).sum();
    Some((sum_sq / (samples.len() - 1) as f64).sqrt())
}
