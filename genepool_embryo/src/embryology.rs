// Body plan builder: decoded traits to a branching array of parts.
//
// Growth starts from a lone root part and a root sequence grown from
// category 0. A sequence appends up to `sequence_count` parts: the first is a
// branch point attached to the sequence's parent, the rest chain onto it one
// by one. Width, length, and colour are interpolated along the sequence.
// Every part whose position matches the category's branch period is flagged
// as pending.
//
// Expansion is a fixed-point scan over the part array. Each pending part is
// cleared and sprouts sequences of its category's branch category: a single
// sequence at the branch angle, or a fan of `branch_number` siblings spread
// evenly across `-angle..=angle` with every `branch_reflect`-th sibling
// mirrored. Scanning repeats until a full pass finds nothing pending.
//
// The part budget is `cut_off + 1` parts. Growth past it is dropped without
// error, which also bounds the scan: pending flags are only ever set on new
// parts.
//
// See also: `traits.rs` for how genes become `DecodedGenome`, `phenotype.rs`
// for the output and its linkage invariants, `birth.rs` which calls
// `build_phenotype` alongside the utterance composer.

use crate::config::EmbryoConfig;
use crate::error::BirthError;
use crate::phenotype::{Part, Phenotype};
use crate::traits::{DecodedGenome, ROOT_PART, TraitCategory};
use genepool_genetics::{GeneMap, GeneSequence, NUM_CATEGORIES};
use log::debug;

/// Category of the root part and the root sequence.
const ROOT_CATEGORY: usize = 0;

/// Build a phenotype with the default config and the canonical gene map.
pub fn build_phenotype(genome: &GeneSequence) -> Result<Phenotype, BirthError> {
    let config = EmbryoConfig::default();
    Embryology::new(&config, GeneMap::canonical()).build_phenotype(genome)
}

pub struct Embryology<'a> {
    config: &'a EmbryoConfig,
    gene_map: &'a GeneMap,
}

impl<'a> Embryology<'a> {
    pub fn new(config: &'a EmbryoConfig, gene_map: &'a GeneMap) -> Self {
        Embryology { config, gene_map }
    }

    pub fn decode(&self, genome: &GeneSequence) -> Result<DecodedGenome, BirthError> {
        DecodedGenome::decode(genome, self.gene_map, self.config)
    }

    /// Decode, grow, and check the body plan for one genome.
    pub fn build_phenotype(&self, genome: &GeneSequence) -> Result<Phenotype, BirthError> {
        let decoded = self.decode(genome)?;
        let phenotype = grow(&decoded);
        phenotype.validate()?;
        debug!(
            "grew {} parts ({} branch points) under cutoff {}",
            phenotype.num_parts(),
            phenotype.branch_count(),
            decoded.cut_off
        );
        Ok(phenotype)
    }
}

/// Grow the body plan for already-decoded traits.
pub fn grow(decoded: &DecodedGenome) -> Phenotype {
    let mut growth = Growth::new(decoded);
    growth.grow_sequence(ROOT_PART, 0.0, ROOT_CATEGORY, 1.0, true);
    growth.expand();
    Phenotype::new(
        growth.parts,
        decoded.frequency,
        decoded.preferred_food_type,
        decoded.digestible_food_type,
        decoded.timing,
    )
}

/// Mutable state while a body is being grown.
struct Growth<'a> {
    decoded: &'a DecodedGenome,
    parts: Vec<Part>,
    /// Parallel to `parts`: branch origins not yet expanded.
    pending: Vec<bool>,
}

impl<'a> Growth<'a> {
    fn new(decoded: &'a DecodedGenome) -> Self {
        let root = decoded.categories[ROOT_CATEGORY];
        let (width, length, color) = root.interpolate(0.0);
        let root_part = Part {
            category: ROOT_CATEGORY,
            parent: None,
            child: None,
            is_branch: false,
            angle: 0.0,
            width,
            length,
            color,
            amp: 0.0,
            phase: 0.0,
            turn_amp: 0.0,
            turn_phase: 0.0,
            splined: root.splined,
            end_cap_spline: root.end_cap_spline,
        };
        Growth {
            decoded,
            parts: vec![root_part],
            pending: vec![false],
        }
    }

    fn category(&self, c: usize) -> &'a TraitCategory {
        &self.decoded.categories[c.min(NUM_CATEGORIES - 1)]
    }

    fn has_room(&self) -> bool {
        self.parts.len() <= self.decoded.cut_off
    }

    /// Append one sequence of category `c` hanging off `parent`.
    fn grow_sequence(&mut self, parent: usize, angle: f64, c: usize, reflect: f64, root_sequence: bool) {
        let traits = self.category(c);
        let period = traits.branch_period.max(1);
        for i in 0..traits.sequence_count {
            if !self.has_room() {
                break;
            }
            let index = self.parts.len();
            let fraction = if traits.sequence_count > 1 {
                i as f64 / (traits.sequence_count - 1) as f64
            } else {
                0.0
            };
            let (width, length, color) = traits.interpolate(fraction);

            let mut part = if i == 0 {
                Part {
                    category: c,
                    parent: Some(parent),
                    child: None,
                    is_branch: true,
                    angle,
                    width,
                    length,
                    color,
                    amp: traits.branch_amp,
                    phase: traits.branch_phase * index as f64,
                    turn_amp: traits.branch_turn_amp,
                    turn_phase: traits.branch_turn_phase * index as f64,
                    splined: traits.splined,
                    end_cap_spline: traits.end_cap_spline,
                }
            } else {
                let predecessor = index - 1;
                self.parts[predecessor].child = Some(index);
                Part {
                    category: c,
                    parent: Some(predecessor),
                    child: None,
                    is_branch: false,
                    angle: 0.0,
                    width,
                    length,
                    color,
                    amp: traits.amp,
                    phase: traits.phase * index as f64,
                    turn_amp: traits.turn_amp,
                    turn_phase: traits.turn_phase,
                    splined: traits.splined,
                    end_cap_spline: traits.end_cap_spline,
                }
            };
            // The main body does not coil.
            if root_sequence {
                part.turn_amp = 0.0;
                part.turn_phase = 0.0;
            }
            part.amp *= reflect;

            self.parts.push(part);
            self.pending.push((i + traits.branch_shift) % period == 0);
        }
    }

    /// Expand pending branch origins until a full pass finds none.
    fn expand(&mut self) {
        let mut passes = 0;
        loop {
            let mut expanded = false;
            let mut p = 0;
            while p < self.parts.len() {
                if self.pending[p] {
                    self.pending[p] = false;
                    expanded = true;
                    self.sprout(p);
                }
                p += 1;
            }
            passes += 1;
            if !expanded {
                break;
            }
        }
        debug!("branch expansion settled after {passes} passes");
    }

    /// Grow the child sequences of branch origin `p`.
    fn sprout(&mut self, p: usize) {
        let c = self.category(self.parts[p].category).branch_category;
        let child = self.category(c);
        if child.branch_number == 1 {
            self.grow_sequence(p, child.branch_angle, c, 1.0, false);
            return;
        }
        let reflect_every = child.branch_reflect.max(1);
        let spread = (child.branch_number - 1) as f64;
        for b in 0..child.branch_number {
            let reflect = if b % reflect_every == 0 { -1.0 } else { 1.0 };
            let fan = -1.0 + (b as f64 / spread) * 2.0;
            self.grow_sequence(p, child.branch_angle * fan, c, reflect, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MAX_PARTS, MIN_PARTS};
    use genepool_genetics::Preset;
    use genepool_prng::PoolRng;

    fn constant(value: i64) -> GeneSequence {
        let mut genome = GeneSequence::new();
        genome.fill_constant(value).unwrap();
        genome
    }

    #[test]
    fn zero_genome_is_root_plus_one_short_sequence() {
        let body = build_phenotype(&GeneSequence::new()).unwrap();
        assert_eq!(body.num_parts(), 3);
        let parts = body.parts();
        assert_eq!(parts[0].parent, None);
        assert!(parts[1].is_branch);
        assert_eq!(parts[1].parent, Some(ROOT_PART));
        assert_eq!(parts[1].child, Some(2));
        assert!(!parts[2].is_branch);
        assert_eq!(parts[2].parent, Some(1));
        // Branch motion on the first part, primary motion after.
        assert_eq!(parts[1].amp, -60.0);
        assert_eq!(parts[1].phase, -1.0);
        assert_eq!(parts[2].phase, -2.0);
        // Root sequence never turns.
        assert_eq!(parts[1].turn_amp, 0.0);
        assert_eq!(parts[2].turn_phase, 0.0);
    }

    #[test]
    fn root_part_takes_category_zero_start_geometry() {
        let map = GeneMap::canonical();
        let mut genome = GeneSequence::new();
        genome.set(map.category_index_of(0, "start width").unwrap(), 255).unwrap();
        genome.set(map.category_index_of(0, "start red").unwrap(), 255).unwrap();
        let body = build_phenotype(&genome).unwrap();
        let root = &body.parts()[ROOT_PART];
        assert_eq!(root.width, 7.0);
        assert_eq!(root.color.red, 1.0);
        assert_eq!(root.amp, 0.0);
        assert_eq!(root.child, None);
    }

    #[test]
    fn sequence_geometry_interpolates_start_to_end() {
        let map = GeneMap::canonical();
        let mut genome = GeneSequence::new();
        genome.set(map.category_index_of(0, "end length").unwrap(), 255).unwrap();
        let body = build_phenotype(&genome).unwrap();
        // Two-part root sequence: fraction 0 then 1.
        assert_eq!(body.parts()[1].length, 3.0);
        assert_eq!(body.parts()[2].length, 27.0);
    }

    #[test]
    fn full_genome_fills_the_part_budget() {
        let body = build_phenotype(&constant(255)).unwrap();
        assert_eq!(body.num_parts(), MAX_PARTS);

        // Root sequence 1..=5 flags part 3; category 3 fans four siblings.
        let parts = body.parts();
        let fan: Vec<usize> = (1..parts.len())
            .filter(|&i| parts[i].is_branch && parts[i].parent == Some(3))
            .collect();
        assert_eq!(fan, vec![6, 11, 16, 21]);
        let angles = [-90.0, -30.0, 30.0, 90.0];
        for (&i, &expected) in fan.iter().zip(angles.iter()) {
            assert!((parts[i].angle - expected).abs() < 1e-9, "part {i}: {}", parts[i].angle);
            assert_eq!(parts[i].category, 3);
        }
        // Sibling 0 is mirrored; with reflect modulus 4 the others are not.
        assert_eq!(parts[6].amp, -60.0);
        assert_eq!(parts[11].amp, 60.0);
        assert_eq!(parts[21].amp, 60.0);
    }

    #[test]
    fn cutoff_three_allows_at_most_four_parts() {
        let map = GeneMap::canonical();
        let mut genome = GeneSequence::new();
        genome.set(map.index_of("cutoff").unwrap(), 10).unwrap();
        let body = build_phenotype(&genome).unwrap();
        assert_eq!(body.num_parts(), 4);
        // Part 1's single child sequence hangs at the branch angle.
        let sprout = &body.parts()[3];
        assert!(sprout.is_branch);
        assert_eq!(sprout.parent, Some(1));
        assert_eq!(sprout.angle, -90.0);
    }

    #[test]
    fn every_preset_grows_a_valid_body() {
        for preset in Preset::ALL {
            let body = build_phenotype(&preset.genome()).unwrap();
            assert!(body.validate().is_ok(), "{}", preset.name());
        }
    }

    #[test]
    fn random_genomes_stay_within_part_bounds() {
        let mut rng = PoolRng::new(7);
        for _ in 0..300 {
            let genome = GeneSequence::random(&mut rng);
            let body = build_phenotype(&genome).unwrap();
            assert!((MIN_PARTS..=MAX_PARTS).contains(&body.num_parts()));
        }
    }

    #[test]
    fn building_is_deterministic() {
        let genome = Preset::Dawkins.genome();
        assert_eq!(build_phenotype(&genome).unwrap(), build_phenotype(&genome).unwrap());
    }

    #[test]
    fn junk_genes_do_not_change_the_body() {
        let genome = Preset::Wilson.genome();
        let mut junked = genome.clone();
        junked.set(200, (genome.get(200).unwrap() as i64 + 1) % 256).unwrap();
        assert_eq!(build_phenotype(&genome).unwrap(), build_phenotype(&junked).unwrap());
    }
}
