// Gene Pool genetics: gene sequences and the gene name table.
//
// Module overview:
// - `gene_sequence.rs`: `GeneSequence`, the 256-gene byte array with checked
//   construction, randomization, crossover, mutation, and JSON I/O.
// - `gene_map.rs`: `GeneMap`, the computed layout of which gene index encodes
//   which trait, plus the utterance gene range used for seeding.
// - `presets.rs`: eight curated genomes and the Froggy template.
// - `nickname.rs`: display names hashed from gene values.
// - `error.rs`: `GeneticsError`.
//
// Downstream crates decode traits (`genepool_embryo`) and compose utterances
// (`genepool_music`) from a `GeneSequence`; neither mutates one.

pub mod error;
pub mod gene_map;
pub mod gene_sequence;
mod nickname;
pub mod presets;

pub use error::GeneticsError;
pub use gene_map::{GeneMap, NUM_CATEGORIES, NUM_GENES_USED, UTTERANCE_GENES};
pub use gene_sequence::{GeneSequence, NUM_GENES};
pub use presets::Preset;
