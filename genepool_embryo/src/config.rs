// Embryo configuration.
//
// Reproduction rates and the food-type count, plus the nested composer
// config. Every field has a default (`#[serde(default)]`), so a JSON file
// only lists what it changes.

use crate::error::BirthError;
use genepool_genetics::gene_sequence::{DEFAULT_CROSSOVER_RATE, DEFAULT_MUTATION_RATE};
use genepool_music::ComposerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbryoConfig {
    /// Food types in the pool. Only 2 makes the food genes matter.
    pub num_food_types: u32,
    /// Per-gene chance of switching parent during sexual crossover.
    pub crossover_rate: f64,
    /// Per-gene chance of mutating a copied gene.
    pub mutation_rate: f64,
    pub composer: ComposerConfig,
}

impl Default for EmbryoConfig {
    fn default() -> Self {
        EmbryoConfig {
            num_food_types: 2,
            crossover_rate: DEFAULT_CROSSOVER_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            composer: ComposerConfig::default(),
        }
    }
}

impl EmbryoConfig {
    pub fn from_json_str(json: &str) -> Result<Self, BirthError> {
        let config: Self = serde_json::from_str(json)?;
        config.composer.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, BirthError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genepool_music::ComposeError;

    #[test]
    fn nested_composer_fields_are_optional() {
        let config =
            EmbryoConfig::from_json_str(r#"{"mutation_rate": 0.05, "composer": {"base_note": 48}}"#)
                .unwrap();
        assert_eq!(config.mutation_rate, 0.05);
        assert_eq!(config.crossover_rate, DEFAULT_CROSSOVER_RATE);
        assert_eq!(config.composer.base_note, 48);
        assert_eq!(config.composer.ms_per_clock, 20);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(EmbryoConfig::from_json_str("{}").unwrap(), EmbryoConfig::default());
    }

    #[test]
    fn out_of_range_composer_fields_are_rejected() {
        let result = EmbryoConfig::from_json_str(r#"{"composer": {"matrix_max_delta": -0.5}}"#);
        assert!(matches!(
            result,
            Err(BirthError::Compose(ComposeError::InvalidConfig {
                field: "matrix_max_delta",
                ..
            }))
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            EmbryoConfig::from_json_str("{\"num_food_types\": \"two\"}"),
            Err(BirthError::Json(_))
        ));
    }
}
