// Gene Pool utterance composer.
//
// Every organism is born with one short call, its "utterance", composed from
// six dedicated genes and replayed unchanged for its whole life. This crate
// owns that composition.
//
// Module overview:
// - `composer.rs`: `Composer` and `compose_utterance`, the birth-time
//   pipeline from genome to event list.
// - `markov.rs`: 3x3 duration and 9x9 interval transition matrices, the
//   sum-preserving mutation operator, inverse-CDF sampling.
// - `scale.rs`: interval sets, duration bands, gene-indexed lookup tables,
//   note-length styles.
// - `synth.rs`: synthesizer controller homes and modulation sweeps.
// - `timing.rs`: utterance period and duration decoded from their genes.
// - `utterance.rs`: `Utterance`, `UtteranceEvent`, `UtteranceStats`,
//   `UtteranceVoice`.
// - `midi.rs`: Standard MIDI File export via `midly`.
// - `config.rs`: `ComposerConfig`, JSON-loadable tuning.
// - `error.rs`: `ComposeError`.
//
// All randomness comes from a `PoolRng` seeded from the utterance genes, so
// the same genome always sings the same song. See `main.rs` for the
// `compose` CLI.

pub mod composer;
pub mod config;
pub mod error;
pub mod markov;
pub mod midi;
pub mod scale;
pub mod synth;
pub mod timing;
pub mod utterance;

pub use composer::{Composer, compose_utterance, utterance_seed};
pub use config::ComposerConfig;
pub use error::ComposeError;
pub use timing::UtteranceTiming;
pub use utterance::{Utterance, UtteranceEvent, UtteranceStats, UtteranceVoice};
