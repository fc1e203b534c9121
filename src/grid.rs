use serde::{Deserialize, Serialize};

// Default grid: 20 radii from 0.05 to 1.0, min_samples 2..20
const RADIUS_START_DEFAULT: f64 = 0.05;
const RADIUS_STOP_DEFAULT: f64 = 1.0;
const RADIUS_STEPS_DEFAULT: usize = 20;
const MIN_SAMPLES_START_DEFAULT: usize = 2;
const MIN_SAMPLES_END_DEFAULT: usize = 20;

/// One (radius, minimum neighbourhood size) pair of the sweep.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub radius: f64,
    pub min_samples: usize,
}

/// The Cartesian product of an outer sequence of radii and an inner sequence of minimum
/// neighbourhood sizes. Both sequences keep the order they were given in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    radii: Vec<f64>,
    min_samples: Vec<usize>,
}

/// Builder object for a `SweepGrid`. Unset sequences fall back to the default grid of 20
/// evenly spaced radii from 0.05 to 1.0 and minimum sizes 2 to 19.
pub struct SweepGridBuilder {
    radii: Option<Vec<f64>>,
    min_samples: Option<Vec<usize>>,
}

impl SweepGrid {
    pub fn new(radii: Vec<f64>, min_samples: Vec<usize>) -> Self {
        Self { radii, min_samples }
    }

    pub fn builder() -> SweepGridBuilder {
        SweepGridBuilder {
            radii: None,
            min_samples: None,
        }
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn min_samples(&self) -> &[usize] {
        &self.min_samples
    }

    /// The number of grid cells, i.e. the number of clustering runs in a full sweep.
    pub fn len(&self) -> usize {
        self.radii.len() * self.min_samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the cells, outer radius first, then inner minimum size.
    ///
    /// # Examples
    /// ```
    ///use ld_cluster_bench::SweepGrid;
    ///
    ///let grid = SweepGrid::new(vec![0.1, 0.2], vec![2, 3]);
    ///let cells: Vec<_> = grid.cells().map(|c| (c.radius, c.min_samples)).collect();
    ///assert_eq!(cells, vec![(0.1, 2), (0.1, 3), (0.2, 2), (0.2, 3)]);
    /// ```
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        self.radii.iter().flat_map(move |&radius| {
            self.min_samples
                .iter()
                .map(move |&min_samples| GridCell { radius, min_samples })
        })
    }
}

impl Default for SweepGrid {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SweepGridBuilder {
    /// Sets the outer sequence of neighbourhood radii.
    pub fn radii(mut self, radii: Vec<f64>) -> SweepGridBuilder {
        self.radii = Some(radii);
        self
    }

    /// Sets the outer sequence to `steps` evenly spaced radii from `start` to `stop`
    /// inclusive.
    pub fn radii_linspace(self, start: f64, stop: f64, steps: usize) -> SweepGridBuilder {
        self.radii(linspace(start, stop, steps))
    }

    /// Sets the inner sequence of minimum neighbourhood sizes.
    pub fn min_samples(mut self, min_samples: Vec<usize>) -> SweepGridBuilder {
        self.min_samples = Some(min_samples);
        self
    }

    /// Sets the inner sequence to every size from `start` up to, but excluding, `end`.
    pub fn min_samples_range(self, start: usize, end: usize) -> SweepGridBuilder {
        self.min_samples(arange(start, end))
    }

    pub fn build(self) -> SweepGrid {
        SweepGrid {
            radii: self.radii.unwrap_or_else(|| {
                linspace(RADIUS_START_DEFAULT, RADIUS_STOP_DEFAULT, RADIUS_STEPS_DEFAULT)
            }),
            min_samples: self
                .min_samples
                .unwrap_or_else(|| arange(MIN_SAMPLES_START_DEFAULT, MIN_SAMPLES_END_DEFAULT)),
        }
    }
}

/// `steps` evenly spaced values from `start` to `stop`, both ends included. A single step
/// yields just `start`, and zero steps yield nothing.
pub fn linspace(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (steps - 1) as f64;
            (0..steps)
                .map(|i| if i == steps - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Every integer from `start` up to, but excluding, `end`.
pub fn arange(start: usize, end: usize) -> Vec<usize> {
    (start..end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid() {
        let grid = SweepGrid::default();
        assert_eq!(grid.radii().len(), 20);
        assert_eq!(grid.radii()[0], 0.05);
        assert_eq!(grid.radii()[19], 1.0);
        assert!((grid.radii()[1] - 0.1).abs() < 1e-12);
        assert_eq!(grid.min_samples(), arange(2, 20).as_slice());
        assert_eq!(grid.len(), 20 * 18);
    }

    #[test]
    fn lexicographic_order() {
        let grid = SweepGrid::new(vec![0.3, 0.1], vec![4, 2, 3]);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], GridCell { radius: 0.3, min_samples: 4 });
        assert_eq!(cells[2], GridCell { radius: 0.3, min_samples: 3 });
        assert_eq!(cells[3], GridCell { radius: 0.1, min_samples: 4 });
        assert_eq!(cells[5], GridCell { radius: 0.1, min_samples: 3 });
    }

    #[test]
    fn empty_sequences() {
        let grid = SweepGrid::builder().radii(vec![0.1]).min_samples(Vec::new()).build();
        assert!(grid.is_empty());
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.2, 1.0, 1), vec![0.2]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn arange_is_half_open() {
        assert_eq!(arange(2, 5), vec![2, 3, 4]);
        assert!(arange(5, 5).is_empty());
    }
}
