// End-to-end births: genome through trait decoding, body growth, and
// utterance composition, using only the public API of the workspace crates.

use genepool_embryo::{Birth, EmbryoConfig, MAX_PARTS, MIN_PARTS, birth_many, build_phenotype};
use genepool_genetics::presets::froggy;
use genepool_genetics::{GeneMap, GeneSequence, Preset, UTTERANCE_GENES};
use genepool_music::{UtteranceEvent, compose_utterance, utterance_seed};
use genepool_prng::PoolRng;

fn born(genome: &GeneSequence) -> Birth {
    Birth::from_genome(genome.clone(), &EmbryoConfig::default(), GeneMap::canonical()).unwrap()
}

#[test]
fn every_preset_is_born_whole() {
    for preset in Preset::ALL {
        let birth = born(&preset.genome());
        birth.phenotype.validate().unwrap();
        let events = birth.utterance.events();
        assert!(
            matches!(events.last(), Some(UtteranceEvent::Done { .. })),
            "{} has no terminal done",
            preset.name()
        );
        let dones = events
            .iter()
            .filter(|e| matches!(e, UtteranceEvent::Done { .. }))
            .count();
        assert_eq!(dones, 1, "{}", preset.name());
    }
}

#[test]
fn births_are_deterministic() {
    let genome = Preset::Dennett.genome();
    assert_eq!(born(&genome), born(&genome));
}

#[test]
fn froggy_genomes_grow_and_sing() {
    let mut rng = PoolRng::new(99);
    for _ in 0..10 {
        let genome = froggy(GeneMap::canonical(), &mut rng).unwrap();
        let birth = born(&genome);
        assert!(birth.phenotype.num_parts() >= MIN_PARTS);
        assert!(birth.utterance.stats().note_count > 0);
    }
}

#[test]
fn random_populations_stay_in_bounds() {
    let mut rng = PoolRng::new(2024);
    let genomes: Vec<GeneSequence> = (0..200).map(|_| GeneSequence::random(&mut rng)).collect();
    let births = birth_many(genomes, &EmbryoConfig::default(), GeneMap::canonical()).unwrap();
    assert_eq!(births.len(), 200);
    for birth in &births {
        let parts = birth.phenotype.num_parts();
        assert!((MIN_PARTS..=MAX_PARTS).contains(&parts), "{parts} parts");
        let timing = birth.phenotype.timing();
        assert!((100..=500).contains(&timing.period_ticks));
        assert!((60..=90).contains(&timing.duration_ticks));
    }
}

#[test]
fn cutoff_of_three_caps_the_body_at_four_parts() {
    let map = GeneMap::canonical();
    let mut rng = PoolRng::new(5);
    for _ in 0..50 {
        let mut genome = GeneSequence::random(&mut rng);
        genome.set(map.index_of("cutoff").unwrap(), 10).unwrap();
        assert!(build_phenotype(&genome).unwrap().num_parts() <= 4);
    }
}

#[test]
fn body_genes_do_not_reach_the_song() {
    let map = GeneMap::canonical();
    let genome = Preset::Wallace.genome();
    let mut reshaped = genome.clone();
    let index = map.category_index_of(1, "branch angle").unwrap();
    reshaped
        .set(index, (genome.get(index).unwrap() as i64 + 128) % 256)
        .unwrap();

    let (a, b) = (born(&genome), born(&reshaped));
    assert_eq!(a.utterance, b.utterance);
    assert_eq!(
        utterance_seed(&genome, map).unwrap(),
        utterance_seed(&reshaped, map).unwrap()
    );
}

#[test]
fn utterance_genes_change_the_seed() {
    let map = GeneMap::canonical();
    let genome = Preset::Wallace.genome();
    for index in UTTERANCE_GENES {
        let mut changed = genome.clone();
        changed
            .set(index, (genome.get(index).unwrap() as i64 + 1) % 256)
            .unwrap();
        assert_ne!(
            utterance_seed(&genome, map).unwrap(),
            utterance_seed(&changed, map).unwrap(),
            "gene {index}"
        );
    }
}

#[test]
fn birth_utterance_matches_direct_composition() {
    let genome = Preset::Margulis.genome();
    let birth = born(&genome);
    let timing = birth.phenotype.timing();
    let direct = compose_utterance(&genome, timing.period_ticks, timing.duration_ticks).unwrap();
    assert_eq!(birth.utterance, direct);
}

#[test]
fn generations_of_offspring_stay_viable() {
    let config = EmbryoConfig::default();
    let map = GeneMap::canonical();
    let mut rng = PoolRng::new(31);
    let mut population: Vec<GeneSequence> = Preset::ALL.iter().map(|p| p.genome()).collect();
    for _ in 0..5 {
        let mut next = Vec::with_capacity(population.len());
        for i in 0..population.len() {
            let mate = &population[(i + 1) % population.len()];
            let child = Birth::sexual(&population[i], mate, &config, map, &mut rng).unwrap();
            child.phenotype.validate().unwrap();
            next.push(child.genome);
        }
        population = next;
    }
}
