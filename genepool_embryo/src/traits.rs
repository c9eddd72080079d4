// Trait decoding: genome to per-category body parameters.
//
// Every trait is read by name through the `GeneMap`, normalized to [0, 1]
// (gene / 255), and scaled linearly into its range. Count-like traits are
// floored afterwards and the spline flag is rounded. The body builder in
// `embryology.rs` only ever sees the decoded values, never raw genes.
//
// Ranges:
//
//   frequency         0.02 .. 0.2
//   cutoff            MIN_PARTS .. MAX_PARTS - 1 (floored)
//   colour channels   0 .. 1
//   width             0.5 .. 7
//   length            3 .. 27
//   amplitudes        -60 .. 60
//   phases            -1 .. 1
//   sequence count    MIN_PARTS .. 5 (floored)
//   branch period     1 .. 4 (floored)
//   branch angle      -90 .. 90 degrees
//   branch number     1 + (0 .. 3), floored
//   branch shift      0 .. 6 (floored)
//   branch category   0 .. NUM_CATEGORIES - 1 (floored)
//   branch reflect    1 + (0 .. 3), floored
//   splined           0 .. 1 (rounded)
//   end cap spline    0.5 .. 4

use crate::config::EmbryoConfig;
use crate::error::BirthError;
use genepool_genetics::{GeneMap, GeneSequence, NUM_CATEGORIES};
use genepool_music::UtteranceTiming;
use serde::{Deserialize, Serialize};

pub const MIN_PARTS: usize = 2;
pub const MAX_PARTS: usize = 30;
pub const ROOT_PART: usize = 0;

/// A linear trait range; `at(n)` maps a normalized gene onto it.
#[derive(Debug, Clone, Copy)]
struct TraitRange {
    min: f64,
    max: f64,
}

impl TraitRange {
    const fn new(min: f64, max: f64) -> Self {
        TraitRange { min, max }
    }

    fn at(self, n: f64) -> f64 {
        self.min + (self.max - self.min) * n
    }
}

const FREQUENCY: TraitRange = TraitRange::new(0.02, 0.2);
const CUT_OFF: TraitRange = TraitRange::new(MIN_PARTS as f64, (MAX_PARTS - 1) as f64);
const COLOR: TraitRange = TraitRange::new(0.0, 1.0);
const WIDTH: TraitRange = TraitRange::new(0.5, 7.0);
const LENGTH: TraitRange = TraitRange::new(3.0, 27.0);
const AMP: TraitRange = TraitRange::new(-60.0, 60.0);
const PHASE: TraitRange = TraitRange::new(-1.0, 1.0);
const SEQUENCE_COUNT: TraitRange = TraitRange::new(MIN_PARTS as f64, 5.0);
const BRANCH_PERIOD: TraitRange = TraitRange::new(1.0, 4.0);
const BRANCH_ANGLE: TraitRange = TraitRange::new(-90.0, 90.0);
const BRANCH_NUMBER: TraitRange = TraitRange::new(0.0, 3.0);
const BRANCH_SHIFT: TraitRange = TraitRange::new(0.0, 6.0);
const BRANCH_CATEGORY: TraitRange = TraitRange::new(0.0, (NUM_CATEGORIES - 1) as f64);
const BRANCH_REFLECT: TraitRange = TraitRange::new(0.0, 3.0);
const SPLINED: TraitRange = TraitRange::new(0.0, 1.0);
const END_CAP_SPLINE: TraitRange = TraitRange::new(0.5, 4.0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Rgb {
    /// Linear blend from `self` (fraction 0) to `other` (fraction 1).
    pub fn lerp(self, other: Rgb, fraction: f64) -> Rgb {
        Rgb {
            red: lerp(self.red, other.red, fraction),
            green: lerp(self.green, other.green, fraction),
            blue: lerp(self.blue, other.blue, fraction),
        }
    }
}

pub(crate) fn lerp(start: f64, end: f64, fraction: f64) -> f64 {
    start + fraction * (end - start)
}

/// One decoded gene block: shape, colour, motion, and branching for every
/// part grown from this category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitCategory {
    /// Parts per sequence, 2..=5.
    pub sequence_count: usize,
    pub start_width: f64,
    pub end_width: f64,
    pub start_length: f64,
    pub end_length: f64,
    pub start_color: Rgb,
    pub end_color: Rgb,
    pub amp: f64,
    pub phase: f64,
    pub turn_amp: f64,
    pub turn_phase: f64,
    pub branch_amp: f64,
    pub branch_phase: f64,
    pub branch_turn_amp: f64,
    pub branch_turn_phase: f64,
    /// A part is a branch origin when `(i + shift) % period == 0`.
    pub branch_period: usize,
    /// Degrees; siblings fan across `-angle..=angle`.
    pub branch_angle: f64,
    /// Sibling sequences per branch origin, 1..=4.
    pub branch_number: usize,
    pub branch_shift: usize,
    /// Category the child sequences are grown from.
    pub branch_category: usize,
    /// Every sibling `b` with `b % reflect == 0` gets mirrored motion.
    pub branch_reflect: usize,
    pub splined: bool,
    pub end_cap_spline: f64,
}

impl TraitCategory {
    fn decode(genome: &GeneSequence, map: &GeneMap, category: usize) -> Result<Self, BirthError> {
        let gene = |name: &str| -> Result<f64, BirthError> {
            Ok(genome.normalized(map.category_index_of(category, name)?)?)
        };
        let floored = |range: TraitRange, name: &str| -> Result<usize, BirthError> {
            Ok(range.at(gene(name)?).floor() as usize)
        };

        Ok(TraitCategory {
            sequence_count: floored(SEQUENCE_COUNT, "sequence count")?,
            start_width: WIDTH.at(gene("start width")?),
            end_width: WIDTH.at(gene("end width")?),
            start_length: LENGTH.at(gene("start length")?),
            end_length: LENGTH.at(gene("end length")?),
            start_color: Rgb {
                red: COLOR.at(gene("start red")?),
                green: COLOR.at(gene("start green")?),
                blue: COLOR.at(gene("start blue")?),
            },
            end_color: Rgb {
                red: COLOR.at(gene("end red")?),
                green: COLOR.at(gene("end green")?),
                blue: COLOR.at(gene("end blue")?),
            },
            amp: AMP.at(gene("amplitude")?),
            phase: PHASE.at(gene("phase")?),
            turn_amp: AMP.at(gene("turn amplitude")?),
            turn_phase: PHASE.at(gene("turn phase")?),
            branch_amp: AMP.at(gene("branch amplitude")?),
            branch_phase: PHASE.at(gene("branch phase")?),
            branch_turn_amp: AMP.at(gene("branch turn amplitude")?),
            branch_turn_phase: PHASE.at(gene("branch turn phase")?),
            branch_period: floored(BRANCH_PERIOD, "branch period")?,
            branch_angle: BRANCH_ANGLE.at(gene("branch angle")?),
            branch_number: (1.0 + BRANCH_NUMBER.at(gene("branch number")?)).floor() as usize,
            branch_shift: floored(BRANCH_SHIFT, "branch shift")?,
            branch_category: floored(BRANCH_CATEGORY, "branch category")?,
            branch_reflect: (1.0 + BRANCH_REFLECT.at(gene("branch reflect")?)).floor() as usize,
            splined: SPLINED.at(gene("splined")?).round() >= 1.0,
            end_cap_spline: END_CAP_SPLINE.at(gene("end cap spline")?),
        })
    }

    /// Width, length, and colour of the part `fraction` of the way along a
    /// sequence of this category.
    pub fn interpolate(&self, fraction: f64) -> (f64, f64, Rgb) {
        (
            lerp(self.start_width, self.end_width, fraction),
            lerp(self.start_length, self.end_length, fraction),
            self.start_color.lerp(self.end_color, fraction),
        )
    }
}

/// Everything trait decoding reads out of a genome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedGenome {
    /// Base swimming frequency shared by all parts.
    pub frequency: f64,
    /// Highest part index growth may assign; the body has at most
    /// `cut_off + 1` parts.
    pub cut_off: usize,
    pub categories: [TraitCategory; NUM_CATEGORIES],
    pub preferred_food_type: u8,
    pub digestible_food_type: u8,
    pub timing: UtteranceTiming,
}

impl DecodedGenome {
    pub fn decode(
        genome: &GeneSequence,
        map: &GeneMap,
        config: &EmbryoConfig,
    ) -> Result<Self, BirthError> {
        let gene = |name: &str| -> Result<f64, BirthError> {
            Ok(genome.normalized(map.index_of(name)?)?)
        };

        let frequency = FREQUENCY.at(gene("frequency")?);
        let cut_off = (CUT_OFF.at(gene("cutoff")?).floor() as usize).clamp(MIN_PARTS, MAX_PARTS - 1);

        let mut categories = [TraitCategory::default(); NUM_CATEGORIES];
        for (c, slot) in categories.iter_mut().enumerate() {
            *slot = TraitCategory::decode(genome, map, c)?;
        }

        let preferred = gene("preferred food type")?;
        let digestible = gene("digestible food type")?;
        let (preferred_food_type, digestible_food_type) = if config.num_food_types == 2 {
            (food_type(preferred), food_type(digestible))
        } else {
            (0, 0)
        };

        let timing = UtteranceTiming::decode(genome, map)?;

        Ok(DecodedGenome {
            frequency,
            cut_off,
            categories,
            preferred_food_type,
            digestible_food_type,
            timing,
        })
    }
}

/// Two food types: the lower half of the gene range is 0, the upper half 1.
fn food_type(n: f64) -> u8 {
    ((n * 2.0).floor() as u8).min(1)
}
