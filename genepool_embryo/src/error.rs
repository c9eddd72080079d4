// Error type for trait decoding, body building, and births.

use genepool_genetics::GeneticsError;
use genepool_music::ComposeError;

#[derive(Debug, thiserror::Error)]
pub enum BirthError {
    #[error(transparent)]
    Genetics(#[from] GeneticsError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error("phenotype part {index} is malformed: {reason}")]
    InvalidPhenotype { index: usize, reason: String },

    #[error("embryo config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("embryo config JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
