// Named preset genomes and the Froggy template.
//
// The eight presets are curated gene sequences that grow well-formed,
// recognizable organisms. Froggy is a partially specified template: body
// geometry and colour are fixed, motion genes are randomized, so every call
// yields a sibling of the same frog-like plan.

use crate::gene_map::{GeneMap, NUM_CATEGORIES};
use crate::gene_sequence::{GeneSequence, NUM_GENES};
use crate::error::GeneticsError;
use genepool_prng::PoolRng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Darwin,
    Wallace,
    Mendel,
    Turing,
    Margulis,
    Wilson,
    Dawkins,
    Dennett,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::Darwin,
        Preset::Wallace,
        Preset::Mendel,
        Preset::Turing,
        Preset::Margulis,
        Preset::Wilson,
        Preset::Dawkins,
        Preset::Dennett,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Darwin => "darwin",
            Preset::Wallace => "wallace",
            Preset::Mendel => "mendel",
            Preset::Turing => "turing",
            Preset::Margulis => "margulis",
            Preset::Wilson => "wilson",
            Preset::Dawkins => "dawkins",
            Preset::Dennett => "dennett",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Preset> {
        let lower = name.to_ascii_lowercase();
        Preset::ALL.into_iter().find(|p| p.name() == lower)
    }

    pub fn genome(self) -> GeneSequence {
        let genes = match self {
            Preset::Darwin => DARWIN,
            Preset::Wallace => WALLACE,
            Preset::Mendel => MENDEL,
            Preset::Turing => TURING,
            Preset::Margulis => MARGULIS,
            Preset::Wilson => WILSON,
            Preset::Dawkins => DAWKINS,
            Preset::Dennett => DENNETT,
        };
        GeneSequence::from_bytes(genes)
    }
}

/// Fixed (name, value) pairs for every Froggy category block. The first
/// block differs in the entries listed in `froggy_torso_overrides`.
const FROGGY_CATEGORY: [(&str, u8); 15] = [
    ("start red", 80),
    ("start green", 150),
    ("start blue", 20),
    ("end red", 80),
    ("end green", 150),
    ("end blue", 20),
    ("end width", 80),
    ("start length", 100),
    ("sequence count", 0),
    ("branch period", 0),
    ("branch angle", 180),
    ("branch number", 100),
    ("branch shift", 0),
    ("splined", 255),
    ("end cap spline", 100),
];

/// Motion genes Froggy leaves to chance.
const FROGGY_RANDOM: [&str; 8] = [
    "amplitude",
    "phase",
    "turn amplitude",
    "turn phase",
    "branch amplitude",
    "branch phase",
    "branch turn amplitude",
    "branch turn phase",
];

const FROGGY_CATEGORIES: usize = 3;

fn froggy_torso_overrides(category: usize) -> [(&'static str, u8); 4] {
    if category == 0 {
        [("branch category", 200), ("branch reflect", 0), ("start width", 255), ("end length", 0)]
    } else {
        [("branch category", 0), ("branch reflect", 0), ("start width", 160), ("end length", 200)]
    }
}

/// Build a Froggy genome. The first three category blocks are filled; the
/// fourth block and all junk genes are zero.
pub fn froggy(map: &GeneMap, rng: &mut PoolRng) -> Result<GeneSequence, GeneticsError> {
    let mut genome = GeneSequence::new();
    genome.set(map.index_of("frequency")?, 255)?;
    genome.set(map.index_of("cutoff")?, 70)?;

    for category in 0..FROGGY_CATEGORIES.min(NUM_CATEGORIES) {
        for (name, value) in FROGGY_CATEGORY {
            genome.set(map.category_index_of(category, name)?, value as i64)?;
        }
        for name in FROGGY_RANDOM {
            genome.set(map.category_index_of(category, name)?, rng.next_u8() as i64)?;
        }
        for (name, value) in froggy_torso_overrides(category) {
            genome.set(map.category_index_of(category, name)?, value as i64)?;
        }
    }
    log::debug!("built froggy genome {}", genome.nickname());
    Ok(genome)
}

const DARWIN: [u8; NUM_GENES] = [
    221, 119, 52, 33, 67, 152, 215, 148, 178, 16, 90, 96, 24, 228, 117, 196,
    63, 226, 175, 42, 189, 188, 177, 128, 231, 92, 193, 72, 96, 174, 59, 125,
    130, 71, 45, 246, 137, 237, 225, 87, 179, 130, 178, 25, 221, 61, 90, 200,
    57, 185, 107, 126, 58, 79, 161, 175, 125, 36, 88, 100, 72, 123, 43, 34,
    22, 251, 26, 194, 105, 75, 99, 131, 154, 33, 0, 163, 244, 93, 132, 10,
    126, 240, 253, 18, 122, 82, 226, 208, 139, 163, 228, 191, 184, 202, 109, 231,
    66, 133, 24, 208, 3, 222, 132, 72, 228, 212, 147, 195, 115, 7, 103, 103,
    128, 128, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 218, 0, 152, 0, 229, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 61, 0, 0, 0, 0, 0, 0, 0, 0, 0, 226,
    0, 0, 0, 0, 0, 0, 0, 75, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 66, 0, 0, 0, 0, 0, 0, 0, 0, 0, 230,
    0, 0, 0, 0, 141, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 77, 0,
];

const WALLACE: [u8; NUM_GENES] = [
    225, 255, 16, 20, 193, 39, 82, 165, 61, 249, 85, 179, 186, 20, 221, 200,
    134, 112, 90, 134, 71, 187, 231, 246, 94, 189, 30, 187, 191, 67, 113, 239,
    116, 137, 212, 7, 38, 123, 17, 40, 157, 140, 131, 135, 159, 180, 31, 123,
    171, 77, 150, 192, 87, 39, 103, 245, 56, 23, 4, 64, 105, 192, 4, 49,
    252, 99, 192, 7, 137, 242, 2, 92, 23, 129, 175, 192, 78, 68, 130, 139,
    4, 81, 214, 152, 50, 209, 72, 212, 54, 187, 223, 1, 64, 217, 239, 20,
    203, 159, 202, 223, 41, 131, 61, 10, 35, 186, 93, 222, 235, 99, 248, 146,
    128, 76, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 215, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 155, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 144, 0, 0, 0, 0, 0, 0, 0, 0, 0, 55, 0, 27, 220,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 112, 216, 0, 0, 228, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 13, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 0,
];

const MENDEL: [u8; NUM_GENES] = [
    198, 173, 57, 44, 87, 12, 12, 141, 51, 179, 80, 108, 25, 19, 59, 58,
    227, 71, 123, 55, 230, 169, 17, 157, 175, 28, 127, 1, 175, 228, 228, 88,
    150, 151, 205, 44, 54, 154, 58, 95, 175, 67, 121, 47, 109, 241, 174, 223,
    190, 67, 76, 167, 166, 136, 128, 125, 209, 92, 154, 206, 157, 125, 97, 156,
    228, 20, 248, 207, 218, 120, 146, 154, 117, 5, 217, 158, 85, 129, 128, 193,
    179, 28, 28, 63, 158, 179, 178, 153, 138, 21, 115, 85, 176, 210, 181, 20,
    129, 62, 199, 246, 69, 58, 206, 88, 70, 86, 28, 129, 14, 250, 128, 128,
    128, 200, 130, 131, 255, 128, 128, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

const TURING: [u8; NUM_GENES] = [
    218, 98, 60, 220, 217, 72, 92, 173, 200, 32, 10, 46, 73, 122, 88, 238,
    191, 209, 216, 144, 167, 14, 159, 231, 46, 102, 30, 75, 46, 149, 205, 255,
    253, 189, 130, 76, 4, 247, 141, 78, 19, 83, 252, 30, 21, 4, 144, 21,
    21, 18, 214, 146, 179, 239, 96, 255, 217, 49, 72, 6, 173, 146, 20, 46,
    205, 190, 173, 143, 226, 126, 101, 14, 109, 99, 38, 57, 51, 97, 113, 68,
    151, 151, 50, 129, 210, 193, 140, 5, 200, 21, 176, 20, 134, 13, 134, 241,
    56, 148, 154, 198, 6, 140, 39, 50, 76, 92, 37, 40, 28, 12, 155, 155,
    255, 200, 16, 250, 130, 250, 250, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

const MARGULIS: [u8; NUM_GENES] = [
    179, 142, 165, 61, 72, 193, 176, 10, 42, 236, 27, 231, 248, 14, 217, 241,
    130, 170, 157, 216, 239, 7, 76, 234, 191, 81, 221, 243, 127, 96, 107, 97,
    191, 101, 18, 205, 63, 215, 116, 108, 229, 64, 105, 89, 121, 14, 54, 225,
    132, 74, 120, 152, 133, 110, 16, 51, 74, 255, 206, 80, 47, 174, 72, 187,
    209, 126, 12, 41, 249, 246, 221, 86, 62, 22, 2, 36, 160, 157, 138, 255,
    60, 101, 189, 212, 208, 227, 213, 144, 210, 51, 64, 157, 238, 66, 17, 99,
    57, 171, 135, 161, 136, 156, 202, 121, 111, 56, 212, 6, 243, 89, 236, 239,
    125, 125, 0, 0, 0, 0, 195, 80, 0, 0, 0, 0, 0, 0, 118, 0,
    188, 0, 0, 0, 0, 0, 0, 215, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 104, 0, 0, 0, 19, 0,
    0, 0, 0, 35, 0, 0, 0, 0, 0, 0, 0, 0, 0, 240, 0, 231,
    0, 0, 146, 213, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    183, 0, 194, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 99, 0,
    251, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 17, 0, 234, 0,
    0, 0, 0, 0, 0, 0, 0, 147, 0, 0, 0, 0, 0, 0, 0, 0,
];

const WILSON: [u8; NUM_GENES] = [
    155, 181, 0, 238, 176, 1, 41, 250, 8, 149, 9, 250, 143, 79, 77, 91,
    51, 39, 250, 63, 30, 157, 250, 162, 170, 162, 255, 148, 46, 0, 193, 248,
    132, 25, 44, 114, 29, 187, 174, 254, 92, 45, 197, 212, 115, 204, 100, 239,
    41, 64, 32, 225, 164, 196, 99, 203, 0, 205, 29, 105, 17, 4, 215, 9,
    243, 5, 80, 87, 203, 114, 227, 212, 99, 253, 135, 233, 134, 188, 145, 45,
    250, 196, 113, 154, 162, 45, 11, 154, 121, 46, 240, 102, 101, 126, 80, 88,
    55, 219, 40, 240, 7, 107, 151, 89, 170, 172, 175, 152, 101, 156, 250, 50,
    250, 250, 0, 0, 0, 0, 0, 0, 0, 0, 6, 0, 0, 0, 0, 0,
    0, 228, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 148, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 240, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 107, 0, 0, 0, 0, 0, 0, 0, 0, 0, 24, 63, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 228, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 88, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 250,
    0, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 242, 0,
];

const DAWKINS: [u8; NUM_GENES] = [
    225, 172, 222, 194, 35, 75, 132, 158, 25, 62, 15, 108, 50, 126, 137, 106,
    112, 230, 90, 58, 67, 180, 141, 167, 24, 244, 77, 222, 209, 84, 107, 204,
    142, 164, 197, 47, 16, 13, 241, 199, 241, 30, 224, 216, 7, 26, 0, 167,
    130, 101, 30, 55, 219, 1, 165, 188, 177, 100, 67, 206, 216, 161, 28, 88,
    150, 224, 237, 255, 192, 239, 230, 127, 30, 159, 58, 149, 140, 35, 76, 79,
    108, 221, 233, 9, 61, 14, 200, 101, 124, 199, 127, 47, 82, 242, 176, 123,
    31, 19, 180, 245, 247, 73, 127, 243, 18, 25, 128, 7, 213, 69, 33, 28,
    64, 64, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

const DENNETT: [u8; NUM_GENES] = [
    218, 98, 225, 220, 217, 72, 92, 173, 200, 32, 10, 46, 73, 122, 88, 238,
    191, 209, 216, 144, 167, 14, 159, 231, 46, 102, 30, 255, 46, 223, 244, 107,
    253, 189, 130, 76, 4, 247, 141, 78, 19, 83, 252, 30, 21, 4, 144, 21,
    21, 18, 214, 146, 179, 239, 255, 255, 217, 49, 0, 6, 173, 146, 20, 46,
    205, 190, 173, 143, 226, 126, 101, 14, 109, 99, 38, 57, 51, 97, 113, 68,
    151, 151, 50, 129, 210, 193, 140, 5, 200, 21, 176, 20, 134, 13, 134, 241,
    56, 148, 154, 198, 6, 140, 39, 50, 76, 92, 37, 40, 28, 12, 255, 255,
    92, 128, 192, 1, 100, 64, 64, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene_map::NUM_GENES_USED;

    #[test]
    fn presets_have_distinct_genomes() {
        for (i, a) in Preset::ALL.iter().enumerate() {
            for b in &Preset::ALL[i + 1..] {
                assert_ne!(a.genome(), b.genome(), "{a:?} == {b:?}");
            }
        }
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()), Some(preset));
        }
        assert_eq!(Preset::from_name("DARWIN"), Some(Preset::Darwin));
        assert_eq!(Preset::from_name("lamarck"), None);
    }

    #[test]
    fn darwin_starts_with_known_genes() {
        let genome = Preset::Darwin.genome();
        assert_eq!(genome.get(0).unwrap(), 221);
        assert_eq!(genome.get(1).unwrap(), 119);
    }

    #[test]
    fn froggy_fixed_genes_are_set() {
        let map = GeneMap::canonical();
        let genome = froggy(map, &mut PoolRng::new(1)).unwrap();
        assert_eq!(genome.get(0).unwrap(), 255);
        assert_eq!(genome.get(1).unwrap(), 70);
        let torso_width = map.category_index_of(0, "start width").unwrap();
        let limb_width = map.category_index_of(1, "start width").unwrap();
        assert_eq!(genome.get(torso_width).unwrap(), 255);
        assert_eq!(genome.get(limb_width).unwrap(), 160);
        let torso_branch = map.category_index_of(0, "branch category").unwrap();
        assert_eq!(genome.get(torso_branch).unwrap(), 200);
    }

    #[test]
    fn froggy_leaves_fourth_block_and_junk_zero() {
        let map = GeneMap::canonical();
        let genome = froggy(map, &mut PoolRng::new(2)).unwrap();
        let fourth = map.category_index_of(3, "start red").unwrap();
        for i in fourth..NUM_GENES {
            assert_eq!(genome.get(i).unwrap(), 0, "gene {i} ({})", map.name_of(i));
        }
        assert!(fourth < NUM_GENES_USED);
    }

    #[test]
    fn froggy_siblings_differ_only_in_motion_genes() {
        let map = GeneMap::canonical();
        let a = froggy(map, &mut PoolRng::new(3)).unwrap();
        let b = froggy(map, &mut PoolRng::new(4)).unwrap();
        for i in 0..NUM_GENES {
            if a.get(i).unwrap() != b.get(i).unwrap() {
                assert!(FROGGY_RANDOM.contains(&map.name_of(i)), "gene {i} differs");
            }
        }
    }
}
