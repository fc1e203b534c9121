use crate::{BenchError, DissimilarityMatrix, SweepReport};
use num_traits::Float;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Reads an entity (SNP) list with one identifier per line. Blank lines and lines starting
/// with `#` are skipped, and surrounding whitespace is trimmed.
pub fn read_entity_list(path: &Path) -> Result<Vec<String>, BenchError> {
    let file = File::open(path).map_err(|e| BenchError::from_io(path, e))?;
    let mut entities = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| BenchError::from_io(path, e))?;
        let id = line.trim();
        if !id.is_empty() && !id.starts_with('#') {
            entities.push(id.to_string());
        }
    }
    Ok(entities)
}

/// Reads a correlation matrix stored as delimited text, one matrix row per line.
///
/// Values are separated by commas, tabs or spaces. `nan` (any case) and empty comma-separated
/// fields are read as NaN. Blank lines and lines starting with `#` are skipped. Rows are not
/// required to have equal lengths here; the dissimilarity builder checks the shape.
pub fn read_correlation_matrix<T: Float>(path: &Path) -> Result<Vec<Vec<T>>, BenchError> {
    let file = File::open(path).map_err(|e| BenchError::from_io(path, e))?;
    let mut rows = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| BenchError::from_io(path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let row = parse_row(trimmed).map_err(|message| BenchError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            message,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn parse_row<T: Float>(line: &str) -> Result<Vec<T>, String> {
    if line.contains(',') {
        line.split(',').map(|token| parse_value(token.trim())).collect()
    } else {
        line.split_whitespace().map(parse_value).collect()
    }
}

fn parse_value<T: Float>(token: &str) -> Result<T, String> {
    if token.is_empty() {
        return Ok(T::nan());
    }
    let value: f64 = token
        .parse()
        .map_err(|_| format!("'{token}' is not a number"))?;
    T::from(value).ok_or_else(|| format!("'{token}' does not fit the matrix value type"))
}

/// Loads the correlation matrix and, if given, the entity list, then builds the dissimilarity
/// matrix from them.
pub fn load_dissimilarity<T: Float>(
    matrix_path: &Path,
    entity_path: Option<&Path>,
) -> Result<DissimilarityMatrix<T>, BenchError> {
    let entities = match entity_path {
        Some(path) => {
            info!(path = %path.display(), "Opening snplist file");
            Some(read_entity_list(path)?)
        }
        None => None,
    };
    info!(path = %matrix_path.display(), "Opening matrix file");
    let correlations = read_correlation_matrix(matrix_path)?;
    match entities {
        Some(entities) => {
            DissimilarityMatrix::from_correlation_with_entities(correlations, &entities)
        }
        None => DissimilarityMatrix::from_correlation(correlations),
    }
}

/// Writes a sweep report as pretty-printed JSON.
pub fn write_report(path: &Path, report: &SweepReport) -> Result<(), BenchError> {
    let file = File::create(path).map_err(|e| BenchError::from_io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush().map_err(|e| BenchError::from_io(path, e))?;
    info!(path = %path.display(), "Wrote sweep report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_comma_separated() {
        let row: Vec<f64> = parse_row("1.0, -0.5,,nan").unwrap();
        assert_eq!(row[0], 1.0);
        assert_eq!(row[1], -0.5);
        assert!(row[2].is_nan());
        assert!(row[3].is_nan());
    }

    #[test]
    fn parse_whitespace_separated() {
        let row: Vec<f32> = parse_row("1\t0.25   NaN").unwrap();
        assert_eq!(row.len(), 3);
        assert_eq!(row[1], 0.25);
        assert!(row[2].is_nan());
    }

    #[test]
    fn parse_error_names_token() {
        let result: Result<Vec<f64>, _> = parse_row("1.0 abc");
        assert_eq!(result.unwrap_err(), "'abc' is not a number");
    }
}
