// Utterance composer: turns a genome into its lifelong musical call.
//
// Composition is a pure function of the six utterance genes, the two timing
// values from trait decoding, and the composer config. The PRNG is seeded
// from the utterance gene bytes only, so body genes never change the song.
//
// Pipeline, in PRNG draw order:
// 1. strangeness: maybe jump the tonal centre a fifth, maybe swap the
//    interval set for an alternate;
// 2. flavor: maybe lengthen the duration bands;
// 3. spin and charm: table lookups for octave and matrix mutation count
//    (no draws);
// 4. rotate the interval set right by 0-2 places;
// 5. mutate the duration and interval matrices `charm` times, interleaved;
// 6. pick note-length style, modulation strength, modulation chance, and the
//    starting duration state;
// 7. pick synth control homes and emit them as setup events;
// 8. walk the two Markov chains until the cursor reaches the target length,
//    emitting a note per step plus an occasional modulation;
// 9. close with a single `Done` at the final cursor.

use crate::config::ComposerConfig;
use crate::error::ComposeError;
use crate::markov::{CENTRE_INTERVAL_STATE, DURATION_STATES};
use crate::scale::{
    CHARM_MUTATIONS, MODULATION_CHANCES, NOTE_LENGTH_STYLES, NoteLengthStyle, OCTAVE_SHIFTS, Scale,
    gene_lookup, lengthened_bands,
};
use crate::synth::initial_controls;
use crate::utterance::{StatsRecorder, Utterance, UtteranceEvent, UtteranceVoice};
use genepool_genetics::{GeneMap, GeneSequence};
use genepool_prng::{PoolRng, seed_from_bytes};

/// Semitone jumps for a strange voice: up a fifth, or down a fourth.
const FIFTH_UP: i32 = 7;
const FIFTH_DOWN: i32 = -5;

/// Largest interval-set rotation, exclusive.
const MAX_ROTATION: usize = 3;

/// Step between modulation strengths; strength is `floor(rand * 16) * 4`.
const MODULATION_STRENGTH_STEPS: usize = 16;
const MODULATION_STRENGTH_UNIT: usize = 4;

const BASE_VELOCITY: f64 = 80.0;
const VELOCITY_SPREAD: f64 = 40.0;

/// Seed for a genome's utterance: SHA-256 over the utterance gene bytes.
pub fn utterance_seed(genome: &GeneSequence, map: &GeneMap) -> Result<u64, ComposeError> {
    let range = map.utterance_range()?;
    Ok(seed_from_bytes(&genome.genes()[range]))
}

/// Compose with the default config and the canonical gene map.
pub fn compose_utterance(
    genome: &GeneSequence,
    utter_period_ticks: u32,
    utter_duration_ticks: u32,
) -> Result<Utterance, ComposeError> {
    let config = ComposerConfig::default();
    Composer::new(&config, GeneMap::canonical()).compose(genome, utter_period_ticks, utter_duration_ticks)
}

/// The utterance genes, read by name.
struct UtteranceGenes {
    duration: u8,
    strangeness: f64,
    flavor: f64,
    spin: u8,
    charm: u8,
}

impl UtteranceGenes {
    fn read(genome: &GeneSequence, map: &GeneMap) -> Result<Self, ComposeError> {
        let gene = |name: &str| -> Result<u8, ComposeError> { Ok(genome.get(map.index_of(name)?)?) };
        Ok(UtteranceGenes {
            duration: gene("utter duration")?,
            strangeness: gene("utter strangeness")? as f64 / 255.0,
            flavor: gene("utter flavor")? as f64 / 255.0,
            spin: gene("utter spin")?,
            charm: gene("utter charm")?,
        })
    }
}

pub struct Composer<'a> {
    config: &'a ComposerConfig,
    gene_map: &'a GeneMap,
}

impl<'a> Composer<'a> {
    pub fn new(config: &'a ComposerConfig, gene_map: &'a GeneMap) -> Self {
        Composer { config, gene_map }
    }

    /// Compose the utterance for `genome`.
    ///
    /// The target length is `utter_duration_ticks` in milliseconds, capped at
    /// the period so an organism never utters continuously.
    pub fn compose(
        &self,
        genome: &GeneSequence,
        utter_period_ticks: u32,
        utter_duration_ticks: u32,
    ) -> Result<Utterance, ComposeError> {
        let config = self.config;
        config.validate()?;
        let genes = UtteranceGenes::read(genome, self.gene_map)?;
        let mut duration_matrix = config.duration_matrix()?;
        let mut interval_matrix = config.interval_matrix()?;
        let mut rng = PoolRng::new(utterance_seed(genome, self.gene_map)?);

        let target_ms = utter_duration_ticks
            .min(utter_period_ticks)
            .saturating_mul(config.ms_per_clock);

        let mut tonal_centre = config.base_note;
        if rng.chance(genes.strangeness.powi(5)) {
            tonal_centre += if rng.next_f64() > 0.5 { FIFTH_UP } else { FIFTH_DOWN };
        }
        let mut scale = Scale::DEFAULT;
        if rng.chance(genes.strangeness.powi(8)) {
            scale = Scale::ALTERNATES[rng.index(Scale::ALTERNATES.len())];
        }

        let lengthened = rng.chance(genes.flavor);
        let bands = if lengthened {
            lengthened_bands(&config.duration_bands)
        } else {
            config.duration_bands
        };

        let octave_shift = gene_lookup(&OCTAVE_SHIFTS, genes.spin);
        let matrix_mutations = gene_lookup(&CHARM_MUTATIONS, genes.charm);

        let rotation = rng.index(MAX_ROTATION);
        let mut intervals = scale.intervals();
        intervals.rotate_right(rotation);

        for _ in 0..matrix_mutations {
            duration_matrix = duration_matrix.mutated(&mut rng, config.matrix_max_delta);
            interval_matrix = interval_matrix.mutated(&mut rng, config.matrix_max_delta);
        }

        let note_length_style = NOTE_LENGTH_STYLES[rng.index(NOTE_LENGTH_STYLES.len())];
        let modulation_strength =
            (rng.index(MODULATION_STRENGTH_STEPS) * MODULATION_STRENGTH_UNIT) as u8;
        let modulation_chance = MODULATION_CHANCES[rng.index(MODULATION_CHANCES.len())];

        let mut last_interval = CENTRE_INTERVAL_STATE;
        let mut last_duration = rng.index(DURATION_STATES);

        let mut controls = initial_controls(&mut rng);
        let variable: Vec<usize> = controls
            .iter()
            .enumerate()
            .filter(|(_, s)| s.control.is_variable())
            .map(|(i, _)| i)
            .collect();

        let mut events = Vec::new();
        let mut stats = StatsRecorder::default();
        let mut cursor = 0u32;
        for state in &controls {
            cursor = cursor.saturating_add(config.setup_spacing_ms);
            events.push(UtteranceEvent::Modulation {
                offset_ms: cursor,
                controller: state.control.cc,
                value: state.home,
            });
        }
        cursor = cursor.saturating_add(config.setup_spacing_ms);

        let pitch_base = tonal_centre + octave_shift;
        while cursor < target_ms {
            let next_duration = duration_matrix.sample(last_duration, rng.next_f64());
            let ioi_ms = bands[next_duration].ioi_ms(rng.next_f64()).max(1);
            let duration_ms = match note_length_style {
                NoteLengthStyle::Complex => note_length_style.note_ms(ioi_ms, rng.next_f64()),
                style => style.note_ms(ioi_ms, 0.0),
            };

            let next_interval = interval_matrix.sample(last_interval, rng.next_f64());
            let pitch = (pitch_base + intervals[next_interval]).clamp(0, 127) as u8;
            let velocity = (BASE_VELOCITY + (rng.next_f64() * VELOCITY_SPREAD).round()) as u8;

            events.push(UtteranceEvent::Note {
                offset_ms: cursor,
                pitch,
                velocity,
                duration_ms,
            });
            stats.note(pitch);

            if !variable.is_empty() && rng.chance(modulation_chance) {
                let state = &mut controls[variable[rng.index(variable.len())]];
                let value = state.modulate(modulation_strength);
                events.push(UtteranceEvent::Modulation {
                    // Never later than the next onset.
                    offset_ms: cursor.saturating_add(config.modulation_offset_ms.min(ioi_ms)),
                    controller: state.control.cc,
                    value,
                });
                stats.modulation();
            }

            cursor = cursor.saturating_add(ioi_ms);
            last_duration = next_duration;
            last_interval = next_interval;
        }
        events.push(UtteranceEvent::Done { offset_ms: cursor });

        let voice = UtteranceVoice {
            tonal_centre,
            scale,
            intervals: intervals.to_vec(),
            rotation,
            octave_shift,
            lengthened,
            note_length_style,
            modulation_chance,
            modulation_strength,
            matrix_mutations,
            target_ms,
        };
        let stats = stats.finish();
        log::debug!(
            "composed utterance: {} notes over {cursor} ms in {} (duration gene {}, {} matrix mutations)",
            stats.note_count,
            scale.name(),
            genes.duration,
            matrix_mutations,
        );
        Ok(Utterance::new(voice, events, stats))
    }
}
