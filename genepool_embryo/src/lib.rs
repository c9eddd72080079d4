// Gene Pool embryology: from genome to born organism.
//
// Module overview:
// - `traits.rs`: `DecodedGenome` and `TraitCategory`, every body trait read
//   by name from the gene map and scaled into its range.
// - `embryology.rs`: `Embryology`, the part-budgeted branching growth that
//   turns decoded traits into a body plan.
// - `phenotype.rs`: `Phenotype` and `Part`, the immutable body plan and its
//   linkage checks.
// - `birth.rs`: `Birth`, pairing a body with its utterance; sexual, clonal,
//   and parallel batch births.
// - `config.rs`: `EmbryoConfig`, JSON-loadable reproduction settings.
// - `error.rs`: `BirthError`.
//
// Body and song are both pure functions of the genome. The utterance is
// composed by `genepool_music` from the timing this crate decodes. See
// `main.rs` for the `birth` CLI.

pub mod birth;
pub mod config;
pub mod embryology;
pub mod error;
pub mod phenotype;
pub mod traits;

pub use birth::{Birth, birth_many};
pub use config::EmbryoConfig;
pub use embryology::{Embryology, build_phenotype};
pub use error::BirthError;
pub use phenotype::{Part, Phenotype};
pub use traits::{DecodedGenome, MAX_PARTS, MIN_PARTS, ROOT_PART, Rgb, TraitCategory};
