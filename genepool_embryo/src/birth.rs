// Births: one genome in, one fixed organism out.
//
// A `Birth` bundles everything derived from a genome at the moment it is
// born: the body plan, the utterance, and a nickname for logs. Nothing here
// is recomputed later; a failed birth returns an error and leaves nothing
// behind.
//
// Sexual births cross two parents; clonal births cross a parent with itself
// at zero crossover rate, so only mutation differs. Both draw from a
// caller-owned `PoolRng`. `birth_many` builds a batch in parallel with rayon;
// each genome is independent, so results match a sequential loop.

use crate::config::EmbryoConfig;
use crate::embryology::Embryology;
use crate::error::BirthError;
use crate::phenotype::Phenotype;
use genepool_genetics::{GeneMap, GeneSequence};
use genepool_music::{Composer, Utterance};
use genepool_prng::PoolRng;
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Birth {
    pub nickname: String,
    pub genome: GeneSequence,
    pub phenotype: Phenotype,
    pub utterance: Utterance,
}

impl Birth {
    /// Grow the body and compose the utterance for a genome.
    pub fn from_genome(
        genome: GeneSequence,
        config: &EmbryoConfig,
        map: &GeneMap,
    ) -> Result<Birth, BirthError> {
        let phenotype = Embryology::new(config, map).build_phenotype(&genome)?;
        let timing = phenotype.timing();
        let utterance = Composer::new(&config.composer, map).compose(
            &genome,
            timing.period_ticks,
            timing.duration_ticks,
        )?;
        let nickname = genome.nickname();
        debug!(
            "{nickname} is born: {} parts, {} notes over {} ms",
            phenotype.num_parts(),
            utterance.stats().note_count,
            utterance.length_ms()
        );
        Ok(Birth {
            nickname,
            genome,
            phenotype,
            utterance,
        })
    }

    /// Child of two parents by crossover and mutation.
    pub fn sexual(
        mother: &GeneSequence,
        father: &GeneSequence,
        config: &EmbryoConfig,
        map: &GeneMap,
        rng: &mut PoolRng,
    ) -> Result<Birth, BirthError> {
        let genome = GeneSequence::crossover(
            mother,
            father,
            config.crossover_rate,
            config.mutation_rate,
            rng,
        );
        Birth::from_genome(genome, config, map)
    }

    /// Mutated copy of a single parent.
    pub fn clonal(
        parent: &GeneSequence,
        config: &EmbryoConfig,
        map: &GeneMap,
        rng: &mut PoolRng,
    ) -> Result<Birth, BirthError> {
        let genome = GeneSequence::crossover(parent, parent, 0.0, config.mutation_rate, rng);
        Birth::from_genome(genome, config, map)
    }
}

/// Births for a batch of genomes, computed in parallel, in input order.
pub fn birth_many(
    genomes: Vec<GeneSequence>,
    config: &EmbryoConfig,
    map: &GeneMap,
) -> Result<Vec<Birth>, BirthError> {
    genomes
        .into_par_iter()
        .map(|genome| Birth::from_genome(genome, config, map))
        .collect()
}
