// Phenotype: the grown body plan plus the scalar traits read at birth.
//
// Parts live in a flat array indexed from the root (part 0). Each non-root
// part names its parent. A part that starts a sequence is a branch point
// hanging off its parent at an angle; every later part in the sequence
// continues the chain and is its predecessor's `child`. Built once by
// `Embryology` and never modified afterwards.

use crate::error::BirthError;
use crate::traits::{MAX_PARTS, MIN_PARTS, ROOT_PART, Rgb};
use genepool_music::UtteranceTiming;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub category: usize,
    /// `None` only for the root.
    pub parent: Option<usize>,
    /// Next part along a chained sequence.
    pub child: Option<usize>,
    /// First part of a sequence, attached to `parent` at `angle`.
    pub is_branch: bool,
    /// Attachment angle in degrees; zero for chained parts.
    pub angle: f64,
    pub width: f64,
    pub length: f64,
    pub color: Rgb,
    pub amp: f64,
    pub phase: f64,
    pub turn_amp: f64,
    pub turn_phase: f64,
    pub splined: bool,
    pub end_cap_spline: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phenotype {
    parts: Vec<Part>,
    frequency: f64,
    preferred_food_type: u8,
    digestible_food_type: u8,
    timing: UtteranceTiming,
}

impl Phenotype {
    pub(crate) fn new(
        parts: Vec<Part>,
        frequency: f64,
        preferred_food_type: u8,
        digestible_food_type: u8,
        timing: UtteranceTiming,
    ) -> Self {
        Phenotype {
            parts,
            frequency,
            preferred_food_type,
            digestible_food_type,
            timing,
        }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn preferred_food_type(&self) -> u8 {
        self.preferred_food_type
    }

    pub fn digestible_food_type(&self) -> u8 {
        self.digestible_food_type
    }

    pub fn timing(&self) -> UtteranceTiming {
        self.timing
    }

    /// Sum of width times length over all parts.
    pub fn mass(&self) -> f64 {
        self.parts.iter().map(|p| p.width * p.length).sum()
    }

    /// Sum of part lengths.
    pub fn body_length(&self) -> f64 {
        self.parts.iter().map(|p| p.length).sum()
    }

    pub fn branch_count(&self) -> usize {
        self.parts.iter().filter(|p| p.is_branch).count()
    }

    /// Check part count and linkage: the root has no parent, every other
    /// part's parent precedes it, and a chained part is exactly its
    /// predecessor's child.
    pub fn validate(&self) -> Result<(), BirthError> {
        let count = self.parts.len();
        if !(MIN_PARTS..=MAX_PARTS).contains(&count) {
            return Err(BirthError::InvalidPhenotype {
                index: count,
                reason: format!("part count {count} outside {MIN_PARTS}..={MAX_PARTS}"),
            });
        }

        for (index, part) in self.parts.iter().enumerate() {
            let invalid = |reason: String| BirthError::InvalidPhenotype { index, reason };
            if index == ROOT_PART {
                if part.parent.is_some() || part.is_branch {
                    return Err(invalid("root must be unattached".into()));
                }
                continue;
            }

            let parent = part
                .parent
                .ok_or_else(|| invalid("non-root part has no parent".into()))?;
            if parent >= index {
                return Err(invalid(format!("parent {parent} does not precede it")));
            }
            if !part.is_branch {
                if parent != index - 1 {
                    return Err(invalid(format!("chained to {parent}, not its predecessor")));
                }
                if self.parts[parent].child != Some(index) {
                    return Err(invalid("predecessor's child does not point here".into()));
                }
            }
            if let Some(child) = part.child {
                let linked = self
                    .parts
                    .get(child)
                    .is_some_and(|c| !c.is_branch && c.parent == Some(index));
                if !linked {
                    return Err(invalid(format!("child {child} is not chained to it")));
                }
            }
            if part.width <= 0.0 || part.length <= 0.0 {
                return Err(invalid("non-positive geometry".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(parent: Option<usize>, child: Option<usize>, is_branch: bool) -> Part {
        Part {
            category: 0,
            parent,
            child,
            is_branch,
            angle: 0.0,
            width: 2.0,
            length: 5.0,
            color: Rgb::default(),
            amp: 0.0,
            phase: 0.0,
            turn_amp: 0.0,
            turn_phase: 0.0,
            splined: false,
            end_cap_spline: 1.0,
        }
    }

    fn phenotype(parts: Vec<Part>) -> Phenotype {
        let timing = UtteranceTiming {
            period_ticks: 100,
            duration_ticks: 60,
        };
        Phenotype::new(parts, 0.1, 0, 0, timing)
    }

    fn chain() -> Vec<Part> {
        vec![
            part(None, None, false),
            part(Some(0), Some(2), true),
            part(Some(1), None, false),
        ]
    }

    #[test]
    fn well_linked_chain_is_valid() {
        let body = phenotype(chain());
        assert!(body.validate().is_ok());
        assert_eq!(body.num_parts(), 3);
        assert_eq!(body.branch_count(), 1);
        assert_eq!(body.mass(), 30.0);
        assert_eq!(body.body_length(), 15.0);
    }

    #[test]
    fn lone_root_is_too_small() {
        let body = phenotype(vec![part(None, None, false)]);
        assert!(matches!(
            body.validate(),
            Err(BirthError::InvalidPhenotype { index: 1, .. })
        ));
    }

    #[test]
    fn broken_child_pointer_is_rejected() {
        let mut parts = chain();
        parts[1].child = None;
        assert!(matches!(
            phenotype(parts).validate(),
            Err(BirthError::InvalidPhenotype { index: 2, .. })
        ));
    }

    #[test]
    fn orphan_is_rejected() {
        let mut parts = chain();
        parts[2].parent = None;
        parts[1].child = None;
        assert!(phenotype(parts).validate().is_err());
    }

    #[test]
    fn forward_parent_is_rejected() {
        let mut parts = chain();
        parts.push(part(Some(3), None, true));
        assert!(matches!(
            phenotype(parts).validate(),
            Err(BirthError::InvalidPhenotype { index: 3, .. })
        ));
    }
}
