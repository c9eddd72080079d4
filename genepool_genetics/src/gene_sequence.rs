// The gene sequence: a fixed array of 256 byte-valued genes.
//
// A `GeneSequence` is the heritable part of an organism. Every trait that
// embryology and the utterance composer derive is a pure function of these
// bytes, so two organisms with equal sequences are indistinguishable.
//
// Storage is `[u8; NUM_GENES]`, which makes the "each gene is an integer in
// [0, 255]" invariant structural. Callers that hand us wider integers or JSON
// numbers go through the checked constructors (`set`, `fill_constant`,
// `from_values`, serde `try_from`), which reject values that would not fit.
//
// Reproduction lives here too: `crossover` builds a child by walking both
// parents gene by gene and switching source parent with a fixed probability,
// and `mutate_one` shifts a gene by a random amplitude with wraparound.

use crate::error::GeneticsError;
use crate::nickname;
use genepool_prng::PoolRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of genes in every sequence.
pub const NUM_GENES: usize = 256;

/// Number of distinct gene values.
pub const GENE_VALUES: i64 = 256;

/// Probability of switching source parent at each gene during crossover.
pub const DEFAULT_CROSSOVER_RATE: f64 = 0.2;

/// Probability of mutating each inherited gene during crossover.
pub const DEFAULT_MUTATION_RATE: f64 = 0.01;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<u8>")]
pub struct GeneSequence {
    genes: [u8; NUM_GENES],
}

impl Default for GeneSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneSequence {
    /// An all-zero sequence.
    pub fn new() -> Self {
        Self {
            genes: [0; NUM_GENES],
        }
    }

    /// A sequence of uniformly random genes.
    pub fn random(rng: &mut PoolRng) -> Self {
        let mut seq = Self::new();
        seq.randomize(rng);
        seq
    }

    /// Build from explicit values, checking count, range, and integrality.
    pub fn from_values(values: &[i64]) -> Result<Self, GeneticsError> {
        if values.len() != NUM_GENES {
            return Err(GeneticsError::WrongGeneCount {
                expected: NUM_GENES,
                found: values.len(),
            });
        }
        let mut seq = Self::new();
        for (index, &value) in values.iter().enumerate() {
            seq.set(index, value)?;
        }
        Ok(seq)
    }

    /// Wrap an already-valid byte array. Infallible: every `u8` is a gene.
    pub fn from_bytes(genes: [u8; NUM_GENES]) -> Self {
        Self { genes }
    }

    pub fn randomize(&mut self, rng: &mut PoolRng) {
        for gene in &mut self.genes {
            *gene = rng.next_u8();
        }
    }

    /// Set every gene to `value`. Fails without modifying anything if the
    /// value is out of range.
    pub fn fill_constant(&mut self, value: i64) -> Result<(), GeneticsError> {
        let byte = check_value(0, value)?;
        self.genes = [byte; NUM_GENES];
        Ok(())
    }

    pub fn clear(&mut self) {
        self.genes = [0; NUM_GENES];
    }

    pub fn get(&self, index: usize) -> Result<u8, GeneticsError> {
        self.genes
            .get(index)
            .copied()
            .ok_or(GeneticsError::GeneIndexOutOfBounds { index })
    }

    pub fn set(&mut self, index: usize, value: i64) -> Result<(), GeneticsError> {
        if index >= NUM_GENES {
            return Err(GeneticsError::GeneIndexOutOfBounds { index });
        }
        self.genes[index] = check_value(index, value)?;
        Ok(())
    }

    /// Gene value scaled into [0, 1] as `value / 255`.
    pub fn normalized(&self, index: usize) -> Result<f64, GeneticsError> {
        Ok(self.get(index)? as f64 / 255.0)
    }

    pub fn genes(&self) -> &[u8; NUM_GENES] {
        &self.genes
    }

    pub fn copy_from(&mut self, other: &GeneSequence) {
        self.genes = other.genes;
    }

    /// Build a child from two parents.
    ///
    /// The starting parent is picked by a fair coin. At each gene the source
    /// parent switches with probability `crossover_rate`; the copied gene is
    /// then mutated with probability `mutation_rate`. Either parent may be the
    /// same sequence as the other.
    pub fn crossover(
        a: &GeneSequence,
        b: &GeneSequence,
        crossover_rate: f64,
        mutation_rate: f64,
        rng: &mut PoolRng,
    ) -> GeneSequence {
        let mut from_b = rng.next_f64() < 0.5;
        let mut child = GeneSequence::new();
        for index in 0..NUM_GENES {
            if rng.chance(crossover_rate) {
                from_b = !from_b;
            }
            child.genes[index] = if from_b { b.genes[index] } else { a.genes[index] };
            if rng.chance(mutation_rate) {
                child.mutate_at(index, rng);
            }
        }
        child
    }

    /// Mutate a single gene by a random amplitude, wrapping within [0, 255].
    pub fn mutate_one(&mut self, index: usize, rng: &mut PoolRng) -> Result<(), GeneticsError> {
        if index >= NUM_GENES {
            return Err(GeneticsError::GeneIndexOutOfBounds { index });
        }
        self.mutate_at(index, rng);
        Ok(())
    }

    /// Mutate each gene independently with probability `probability`.
    /// Returns how many genes were mutated.
    pub fn zap(&mut self, probability: f64, rng: &mut PoolRng) -> usize {
        let mut mutated = 0;
        for index in 0..NUM_GENES {
            if rng.chance(probability) {
                self.mutate_at(index, rng);
                mutated += 1;
            }
        }
        mutated
    }

    /// Number of positions at which two sequences differ.
    pub fn hamming_distance(&self, other: &GeneSequence) -> usize {
        self.genes
            .iter()
            .zip(other.genes.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Short pronounceable name derived from the gene values.
    pub fn nickname(&self) -> String {
        nickname::nickname(&self.genes)
    }

    pub fn from_json_str(json: &str) -> Result<Self, GeneticsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, GeneticsError> {
        Ok(serde_json::to_string(&self.genes.to_vec())?)
    }

    /// Load a genome stored as a JSON array of 256 integers.
    pub fn load(path: &Path) -> Result<Self, GeneticsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    fn mutate_at(&mut self, index: usize, rng: &mut PoolRng) {
        let scale = rng.next_f64() * rng.next_f64();
        let raise = rng.next_f64() > 0.5;
        self.genes[index] = mutated_value(self.genes[index], scale, raise);
    }
}

/// Shift `value` by `floor(scale * 256)`, wrapping modulo 256.
///
/// `scale` is the product of two unit draws, so small shifts dominate.
pub(crate) fn mutated_value(value: u8, scale: f64, raise: bool) -> u8 {
    let amplitude = ((scale * GENE_VALUES as f64) as i64).clamp(0, GENE_VALUES - 1);
    let shifted = if raise {
        value as i64 + amplitude
    } else {
        value as i64 - amplitude
    };
    shifted.rem_euclid(GENE_VALUES) as u8
}

fn check_value(index: usize, value: i64) -> Result<u8, GeneticsError> {
    u8::try_from(value).map_err(|_| GeneticsError::GeneRange { index, value })
}

impl From<GeneSequence> for Vec<u8> {
    fn from(seq: GeneSequence) -> Self {
        seq.genes.to_vec()
    }
}

impl TryFrom<Vec<f64>> for GeneSequence {
    type Error = GeneticsError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        if values.len() != NUM_GENES {
            return Err(GeneticsError::WrongGeneCount {
                expected: NUM_GENES,
                found: values.len(),
            });
        }
        let mut seq = GeneSequence::new();
        for (index, &value) in values.iter().enumerate() {
            if value.fract() != 0.0 || !value.is_finite() {
                return Err(GeneticsError::NonIntegralGene { index, value });
            }
            seq.set(index, value as i64)?;
        }
        Ok(seq)
    }
}
