// Error type for utterance composition and matrix construction.

use genepool_genetics::GeneticsError;

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error(transparent)]
    Genetics(#[from] GeneticsError),

    #[error("transition matrix row {row} sums to {sum}, expected 1")]
    MatrixInvariant { row: usize, sum: f64 },

    #[error("transition matrix row {row} has a negative or non-finite entry")]
    InvalidProbability { row: usize },

    #[error("transition matrix must be {expected}x{expected}, found {rows} rows with a {cols}-column row")]
    MatrixShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("composer config field `{field}` is out of range: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("composer config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("composer config JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
