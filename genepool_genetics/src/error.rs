// Error type for genome construction, gene access, and gene-name lookup.
//
// Gene values live in `u8` storage, so out-of-range values can only arrive
// through the boundary constructors (`GeneSequence::set`, `from_values`, JSON
// loading). Those report through `GeneticsError`; the rest of the crate is
// infallible once a genome exists.

use crate::gene_sequence::NUM_GENES;

#[derive(Debug, thiserror::Error)]
pub enum GeneticsError {
    #[error("gene {index} value {value} is outside [0, 255]")]
    GeneRange { index: usize, value: i64 },

    #[error("gene {index} value {value} is not an integer")]
    NonIntegralGene { index: usize, value: f64 },

    #[error("gene index {index} is out of bounds (a genome has {count} genes)", count = NUM_GENES)]
    GeneIndexOutOfBounds { index: usize },

    #[error("expected {expected} genes, found {found}")]
    WrongGeneCount { expected: usize, found: usize },

    #[error("no gene is mapped to trait \"{0}\"")]
    MissingGeneMapping(String),

    #[error("genome file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("genome JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
