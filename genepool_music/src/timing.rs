// Utterance timing decoded from the "utter period" and "utter duration" genes.
//
// Both are in simulation ticks: how often an organism calls, and how long
// each call lasts. Durations top out below the shortest period, so an
// organism is never calling continuously.

use crate::error::ComposeError;
use genepool_genetics::{GeneMap, GeneSequence};
use serde::{Deserialize, Serialize};

pub const MIN_UTTER_PERIOD: u32 = 100;
pub const MAX_UTTER_PERIOD: u32 = 500;
pub const MIN_UTTER_DURATION: u32 = 60;
pub const MAX_UTTER_DURATION: u32 = 90;

const _: () = assert!(MAX_UTTER_DURATION <= MIN_UTTER_PERIOD);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceTiming {
    pub period_ticks: u32,
    pub duration_ticks: u32,
}

impl UtteranceTiming {
    pub fn decode(genome: &GeneSequence, map: &GeneMap) -> Result<Self, ComposeError> {
        let period = genome.normalized(map.index_of("utter period")?)?;
        let duration = genome.normalized(map.index_of("utter duration")?)?;
        Ok(UtteranceTiming {
            period_ticks: scaled(MIN_UTTER_PERIOD, MAX_UTTER_PERIOD, period),
            duration_ticks: scaled(MIN_UTTER_DURATION, MAX_UTTER_DURATION, duration),
        })
    }
}

/// `min + floor(n * (max - min))`.
fn scaled(min: u32, max: u32, n: f64) -> u32 {
    min + (n * (max - min) as f64).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_genes_give_minimum_timing() {
        let timing = UtteranceTiming::decode(&GeneSequence::new(), GeneMap::canonical()).unwrap();
        assert_eq!(timing.period_ticks, MIN_UTTER_PERIOD);
        assert_eq!(timing.duration_ticks, MIN_UTTER_DURATION);
    }

    #[test]
    fn full_genes_give_maximum_timing() {
        let mut genome = GeneSequence::new();
        genome.fill_constant(255).unwrap();
        let timing = UtteranceTiming::decode(&genome, GeneMap::canonical()).unwrap();
        assert_eq!(timing.period_ticks, MAX_UTTER_PERIOD);
        assert_eq!(timing.duration_ticks, MAX_UTTER_DURATION);
    }

    #[test]
    fn duration_never_reaches_period() {
        for g in 0..=255 {
            let mut genome = GeneSequence::new();
            genome.fill_constant(g).unwrap();
            let timing = UtteranceTiming::decode(&genome, GeneMap::canonical()).unwrap();
            assert!(timing.duration_ticks <= timing.period_ticks);
        }
    }
}
