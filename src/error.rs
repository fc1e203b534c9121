use std::path::PathBuf;
use thiserror::Error;

/// Possible errors that arise while loading LD data, building the dissimilarity matrix,
/// or clustering a single grid cell.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("The dataset provided is empty")]
    EmptyDataset,

    #[error("Matrix is not square: {0}")]
    NotSquare(String),

    #[error("Entity list has {expected} entries, so the matrix needs {expected}x{expected} values, \
             but {actual} were provided")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to serialise the sweep report: {0}")]
    Report(#[from] serde_json::Error),
}

impl BenchError {
    /// Maps an I/O failure on `path` to `MissingFile` when the file does not exist, and to
    /// `Io` otherwise.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            BenchError::MissingFile { path }
        } else {
            BenchError::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_missing_file() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = BenchError::from_io("data/chr3-1.snplist", source);
        assert!(matches!(err, BenchError::MissingFile { .. }));
        assert_eq!(err.to_string(), "Input file not found: data/chr3-1.snplist");
    }

    #[test]
    fn other_io_errors_keep_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = BenchError::from_io("data/chr3-1.ld.csv", source);
        assert!(matches!(err, BenchError::Io { .. }));
    }

    #[test]
    fn dimension_mismatch_message() {
        let err = BenchError::DimensionMismatch { expected: 3, actual: 4 };
        assert_eq!(
            err.to_string(),
            "Entity list has 3 entries, so the matrix needs 3x3 values, but 4 were provided"
        );
    }
}
