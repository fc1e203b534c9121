use crate::BenchError;
use num_traits::Float;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatrixValidator<'a, T> {
    rows: &'a [Vec<T>],
}

impl<'a, T: Float> MatrixValidator<'a, T> {
    pub(crate) fn new(rows: &'a [Vec<T>]) -> Self {
        Self { rows }
    }

    /// Checks that the matrix is a non-empty n x n array and returns n.
    pub(crate) fn validate_square(&self) -> Result<usize, BenchError> {
        if self.rows.is_empty() {
            return Err(BenchError::EmptyDataset);
        }
        let n = self.rows.len();
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != n {
                return Err(BenchError::NotSquare(format!(
                    "matrix has {n} rows, but row {i} has {} columns",
                    row.len()
                )));
            }
        }
        Ok(n)
    }

    /// Checks that the values can be laid out as a square whose side is the entity count.
    pub(crate) fn validate_entity_count(&self, n_entities: usize) -> Result<(), BenchError> {
        if n_entities == 0 {
            return Err(BenchError::EmptyDataset);
        }
        let n_values = self.value_count();
        let expected = n_entities
            .checked_mul(n_entities)
            .ok_or_else(|| BenchError::InvalidParameter(format!(
                "{n_entities} entities overflow the matrix size"
            )))?;
        if n_values != expected {
            return Err(BenchError::DimensionMismatch {
                expected: n_entities,
                actual: n_values,
            });
        }
        Ok(())
    }

    pub(crate) fn value_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Symmetry within float epsilon. Assumes the matrix is already known to be square.
    pub(crate) fn is_symmetrical(&self) -> bool {
        let n = self.rows.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if (self.rows[i][j] - self.rows[j][i]).abs() > T::epsilon() {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_matrix() {
        let rows = vec![vec![1.0, 0.2], vec![0.2, 1.0]];
        assert_eq!(MatrixValidator::new(&rows).validate_square().unwrap(), 2);
    }

    #[test]
    fn empty_matrix() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let result = MatrixValidator::new(&rows).validate_square();
        assert!(matches!(result, Err(BenchError::EmptyDataset)));
    }

    #[test]
    fn ragged_matrix() {
        let rows = vec![vec![1.0, 0.2], vec![0.2]];
        let result = MatrixValidator::new(&rows).validate_square();
        assert!(matches!(result, Err(BenchError::NotSquare(..))));
    }

    #[test]
    fn entity_count_mismatch() {
        let rows = vec![vec![1.0, 0.2, 0.3, 1.0, 0.5]];
        let result = MatrixValidator::new(&rows).validate_entity_count(2);
        assert!(matches!(
            result,
            Err(BenchError::DimensionMismatch { expected: 2, actual: 5 })
        ));
    }

    #[test]
    fn asymmetric_matrix() {
        let rows = vec![vec![0.0, 0.2], vec![0.3, 0.0]];
        assert!(!MatrixValidator::new(&rows).is_symmetrical());
    }
}
