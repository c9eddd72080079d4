// Composer configuration.
//
// All tunable constants of the utterance composer, with defaults matching
// the canonical gene pool. Loadable from JSON with every field optional
// (`#[serde(default)]`), so a config file only needs the values it changes.
// Scalar fields are range-checked by `validate`, which runs on load and again
// at the top of every composition. Matrix overrides are validated when the
// composer asks for them, so a bad override surfaces as a `ComposeError` from
// `compose`.

use crate::error::ComposeError;
use crate::markov::{DURATION_STATES, INTERVAL_STATES, TransitionMatrix};
use crate::scale::{BASE_DURATION_BANDS, DurationBand};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound for the millisecond spacing fields and for duration bands.
pub const MAX_CONFIG_MS: u32 = 10_000;

/// Upper bound for `ms_per_clock`.
pub const MAX_MS_PER_CLOCK: u32 = 1_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Tonal centre before any strangeness jump (MIDI note 41 = F2).
    pub base_note: i32,
    /// Simulation ticks to milliseconds.
    pub ms_per_clock: u32,
    /// Largest probability moved per row in one matrix mutation pass.
    pub matrix_max_delta: f64,
    /// Gap between synth setup events, and after the last of them.
    pub setup_spacing_ms: u32,
    /// Modulation events trail their note by this much.
    pub modulation_offset_ms: u32,
    pub duration_bands: [DurationBand; DURATION_STATES],
    /// Replaces the base 3x3 duration matrix when set.
    pub duration_matrix: Option<Vec<Vec<f64>>>,
    /// Replaces the base 9x9 interval matrix when set.
    pub interval_matrix: Option<Vec<Vec<f64>>>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        ComposerConfig {
            base_note: 41,
            ms_per_clock: 20,
            matrix_max_delta: 0.2,
            setup_spacing_ms: 10,
            modulation_offset_ms: 10,
            duration_bands: BASE_DURATION_BANDS,
            duration_matrix: None,
            interval_matrix: None,
        }
    }
}

impl ComposerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ComposeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ComposeError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check every scalar field against the range the composer can handle.
    pub fn validate(&self) -> Result<(), ComposeError> {
        let invalid =
            |field: &'static str, reason: String| Err(ComposeError::InvalidConfig { field, reason });
        if !(0..=127).contains(&self.base_note) {
            return invalid("base_note", format!("{} is not a MIDI note", self.base_note));
        }
        if !(1..=MAX_MS_PER_CLOCK).contains(&self.ms_per_clock) {
            return invalid(
                "ms_per_clock",
                format!("{} is outside 1..={MAX_MS_PER_CLOCK}", self.ms_per_clock),
            );
        }
        if !(0.0..=1.0).contains(&self.matrix_max_delta) {
            return invalid(
                "matrix_max_delta",
                format!("{} is outside [0, 1]", self.matrix_max_delta),
            );
        }
        for (field, value) in [
            ("setup_spacing_ms", self.setup_spacing_ms),
            ("modulation_offset_ms", self.modulation_offset_ms),
        ] {
            if value > MAX_CONFIG_MS {
                return invalid(field, format!("{value} exceeds {MAX_CONFIG_MS}"));
            }
        }
        let max_band = f64::from(MAX_CONFIG_MS);
        for (i, band) in self.duration_bands.iter().enumerate() {
            if !(band.min_ms > 0.0 && band.min_ms <= band.max_ms && band.max_ms <= max_band) {
                return invalid(
                    "duration_bands",
                    format!(
                        "band {i} is {}..{} ms, need 0 < min <= max <= {MAX_CONFIG_MS}",
                        band.min_ms, band.max_ms
                    ),
                );
            }
        }
        Ok(())
    }

    /// The duration matrix to mutate: the override if present, else the base.
    pub fn duration_matrix(&self) -> Result<TransitionMatrix, ComposeError> {
        resolve(self.duration_matrix.as_deref(), DURATION_STATES, TransitionMatrix::base_duration)
    }

    /// The interval matrix to mutate: the override if present, else the base.
    pub fn interval_matrix(&self) -> Result<TransitionMatrix, ComposeError> {
        resolve(self.interval_matrix.as_deref(), INTERVAL_STATES, TransitionMatrix::base_interval)
    }
}

fn resolve(
    rows: Option<&[Vec<f64>]>,
    states: usize,
    base: fn() -> TransitionMatrix,
) -> Result<TransitionMatrix, ComposeError> {
    match rows {
        Some(rows) => {
            let matrix = TransitionMatrix::from_rows(rows.to_vec())?;
            matrix.validate_size(states)?;
            Ok(matrix)
        }
        None => Ok(base()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roundtrips_through_json() {
        let config = ComposerConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored = ComposerConfig::from_json_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = ComposerConfig::from_json_str(r#"{"base_note": 53}"#).unwrap();
        assert_eq!(config.base_note, 53);
        assert_eq!(config.ms_per_clock, 20);
        assert_eq!(config.duration_bands, BASE_DURATION_BANDS);
    }

    #[test]
    fn matrix_overrides_are_validated() {
        let mut config = ComposerConfig {
            duration_matrix: Some(vec![vec![1.0, 0.0, 0.0]; 3]),
            ..ComposerConfig::default()
        };
        assert!(config.duration_matrix().is_ok());

        config.duration_matrix = Some(vec![vec![0.5, 0.0, 0.0]; 3]);
        assert!(matches!(
            config.duration_matrix(),
            Err(ComposeError::MatrixInvariant { row: 0, .. })
        ));

        // A valid 2x2 matrix is the wrong size for durations.
        config.duration_matrix = Some(vec![vec![0.5, 0.5]; 2]);
        assert!(matches!(
            config.duration_matrix(),
            Err(ComposeError::MatrixShape { expected: 3, .. })
        ));
    }

    fn field_of(result: Result<(), ComposeError>) -> &'static str {
        match result {
            Err(ComposeError::InvalidConfig { field, .. }) => field,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn default_config_is_valid() {
        ComposerConfig::default().validate().unwrap();
    }

    #[test]
    fn negative_matrix_delta_is_rejected() {
        let config = ComposerConfig {
            matrix_max_delta: -0.5,
            ..ComposerConfig::default()
        };
        assert_eq!(field_of(config.validate()), "matrix_max_delta");

        let config = ComposerConfig {
            matrix_max_delta: f64::NAN,
            ..ComposerConfig::default()
        };
        assert_eq!(field_of(config.validate()), "matrix_max_delta");
    }

    #[test]
    fn huge_spacing_is_rejected_on_load() {
        let result = ComposerConfig::from_json_str(r#"{"setup_spacing_ms": 4294967295}"#);
        assert!(matches!(
            result,
            Err(ComposeError::InvalidConfig { field: "setup_spacing_ms", .. })
        ));
        let result = ComposerConfig::from_json_str(r#"{"modulation_offset_ms": 10001}"#);
        assert!(matches!(
            result,
            Err(ComposeError::InvalidConfig { field: "modulation_offset_ms", .. })
        ));
    }

    #[test]
    fn ms_per_clock_must_be_positive_and_bounded() {
        for ms_per_clock in [0, MAX_MS_PER_CLOCK + 1, u32::MAX] {
            let config = ComposerConfig {
                ms_per_clock,
                ..ComposerConfig::default()
            };
            assert_eq!(field_of(config.validate()), "ms_per_clock");
        }
    }

    #[test]
    fn base_note_must_be_a_midi_note() {
        for base_note in [-1, 128, i32::MAX] {
            let config = ComposerConfig {
                base_note,
                ..ComposerConfig::default()
            };
            assert_eq!(field_of(config.validate()), "base_note");
        }
        let config = ComposerConfig {
            base_note: 127,
            ..ComposerConfig::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn bad_duration_bands_are_rejected() {
        let bands = [
            DurationBand::new(0.0, 80.0),
            DurationBand::new(90.0, 80.0),
            DurationBand::new(60.0, f64::INFINITY),
            DurationBand::new(f64::NAN, 80.0),
        ];
        for band in bands {
            let mut config = ComposerConfig::default();
            config.duration_bands[1] = band;
            assert_eq!(field_of(config.validate()), "duration_bands", "{band:?}");
        }
    }

    #[test]
    fn missing_override_uses_base_matrix() {
        let config = ComposerConfig::default();
        assert_eq!(
            config.interval_matrix().unwrap(),
            TransitionMatrix::base_interval()
        );
    }
}
