use crate::validation::MatrixValidator;
use crate::BenchError;
use num_traits::Float;
use tracing::{debug, info, warn};

const PREVIEW_SIZE: usize = 5;

/// A square dissimilarity matrix derived from a pairwise correlation matrix.
///
/// The matrix can only be created through the `from_correlation*` constructors and exposes
/// no mutable access, so every clustering run in a sweep reads the same values. The
/// constructors guarantee that:
///  1. no value is NaN;
///  2. every value lies in the range 0 to 1;
///  3. every diagonal value is exactly 0; and
///  4. the matrix is symmetric whenever the correlation matrix was.
#[derive(Debug, Clone, PartialEq)]
pub struct DissimilarityMatrix<T> {
    rows: Vec<Vec<T>>,
}

impl<T> DissimilarityMatrix<T> {
    /// The number of entities, i.e. the side length of the matrix.
    pub fn n_entities(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.rows[i]
    }

    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }
}

impl<T: Float> DissimilarityMatrix<T> {
    /// Builds a dissimilarity matrix from a square correlation matrix.
    ///
    /// NaN correlations are treated as 0 (no linkage), and each correlation `r` becomes
    /// `1 - |r|`, so perfectly linked SNPs are at distance 0 and unlinked ones at distance 1.
    ///
    /// # Parameters
    /// * `correlations` - the square correlation matrix, values nominally in the range -1 to 1.
    ///
    /// # Returns
    /// * The dissimilarity matrix, or an error if the input is empty or not square.
    ///
    /// # Examples
    /// ```
    ///use ld_cluster_bench::DissimilarityMatrix;
    ///
    ///let correlations = vec![
    ///    vec![1.0, f64::NAN],
    ///    vec![f64::NAN, 1.0],
    ///];
    ///let dissimilarity = DissimilarityMatrix::from_correlation(correlations).unwrap();
    ///assert_eq!(dissimilarity.rows(), &[vec![0.0, 1.0], vec![1.0, 0.0]]);
    /// ```
    pub fn from_correlation(correlations: Vec<Vec<T>>) -> Result<Self, BenchError> {
        let n = MatrixValidator::new(&correlations).validate_square()?;
        let values = correlations.into_iter().flatten();
        Ok(Self::assemble(values, n))
    }

    /// Builds a dissimilarity matrix whose side length is given by an entity (SNP) list.
    ///
    /// The correlation values are read in row-major order and laid out as a square with one
    /// row and column per entity, so both an n x n matrix and a flat list of n² values are
    /// accepted.
    ///
    /// # Parameters
    /// * `correlations` - the correlation values, in row-major order.
    /// * `entities` - the entity identifiers, one per matrix row.
    ///
    /// # Returns
    /// * The dissimilarity matrix, or an error if the entity list is empty or the number of
    ///   correlation values is not the square of the entity count.
    ///
    /// # Examples
    /// ```
    ///use ld_cluster_bench::DissimilarityMatrix;
    ///
    ///let correlations = vec![vec![1.0, 0.5, 0.5, 1.0]];
    ///let snps = vec![String::from("rs1"), String::from("rs2")];
    ///let dissimilarity =
    ///    DissimilarityMatrix::from_correlation_with_entities(correlations, &snps).unwrap();
    ///assert_eq!(dissimilarity.rows(), &[vec![0.0, 0.5], vec![0.5, 0.0]]);
    /// ```
    pub fn from_correlation_with_entities(
        correlations: Vec<Vec<T>>,
        entities: &[String],
    ) -> Result<Self, BenchError> {
        let n = entities.len();
        MatrixValidator::new(&correlations).validate_entity_count(n)?;
        let values = correlations.into_iter().flatten();
        Ok(Self::assemble(values, n))
    }

    fn assemble<I>(values: I, n: usize) -> Self
    where
        I: Iterator<Item = T>,
    {
        let mut n_clamped = 0usize;
        let flat: Vec<T> = values
            .map(|value| {
                let (dissimilarity, clamped) = correlation_to_dissimilarity(value);
                if clamped {
                    n_clamped += 1;
                }
                dissimilarity
            })
            .collect();
        if n_clamped > 0 {
            warn!(n_clamped = n_clamped, "Correlations with magnitude above 1 were clamped to 1");
        }

        let mut rows: Vec<Vec<T>> = flat.chunks(n).map(<[T]>::to_vec).collect();
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = T::zero();
        }

        let matrix = Self { rows };
        if !matrix.is_symmetric() {
            warn!("Dissimilarity matrix is not symmetric; check the correlation input");
        }
        info!(n_entities = n, "Built dissimilarity matrix");
        debug!("Dissimilarity preview:\n{}", matrix.preview(PREVIEW_SIZE));
        matrix
    }

    /// The dissimilarity between entities `i` and `j`.
    ///
    /// # Panics
    /// If either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.rows[i][j]
    }

    pub fn is_symmetric(&self) -> bool {
        MatrixValidator::new(&self.rows).is_symmetrical()
    }

    fn preview(&self, size: usize) -> String {
        let n = self.rows.len().min(size);
        self.rows
            .iter()
            .take(n)
            .map(|row| {
                let mut line = row
                    .iter()
                    .take(n)
                    .map(|v| format!("{:.4}", v.to_f64().unwrap_or(f64::NAN)))
                    .collect::<Vec<_>>()
                    .join(" ");
                if row.len() > n {
                    line.push_str(" ...");
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Maps one correlation value to a dissimilarity, reporting whether its magnitude had to be
/// clamped to 1.
fn correlation_to_dissimilarity<T: Float>(value: T) -> (T, bool) {
    let value = if value.is_nan() { T::zero() } else { value };
    let magnitude = value.abs();
    if magnitude > T::one() {
        (T::zero(), true)
    } else {
        (T::one() - magnitude, false)
    }
}
