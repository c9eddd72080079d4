// Pitch and rhythm vocabulary for utterances.
//
// A voice's notes are drawn from a nine-degree interval set (semitone offsets
// from its tonal centre), rotated per organism. Rhythm is drawn from three
// inter-onset bands. Gene-indexed lookup tables map a utterance gene onto
// octave register and matrix mutation count, weighted so most organisms sit in
// the middle and a few are outliers.

use crate::markov::{DURATION_STATES, INTERVAL_STATES};
use serde::{Deserialize, Serialize};

/// Minimum sounding length of any note, in ms.
pub const SHORTEST_NOTE_MS: u32 = 35;

/// Octave shift in semitones, indexed by the "utter spin" gene.
pub const OCTAVE_SHIFTS: [i32; 16] = [0, 12, 12, 12, 24, 24, 24, 24, 24, 24, 36, 36, 36, 36, 48, 48];

/// Matrix mutation passes, indexed by the "utter charm" gene.
pub const CHARM_MUTATIONS: [u32; 16] = [0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 2, 2, 5, 8, 10, 20];

/// Per-note modulation probability; one entry is chosen uniformly per voice.
pub const MODULATION_CHANCES: [f64; 10] = [0.0, 0.0, 0.1, 0.1, 0.2, 0.2, 0.5, 0.5, 0.5, 0.5];

/// Note-length styles; one entry is chosen uniformly per voice.
pub const NOTE_LENGTH_STYLES: [NoteLengthStyle; 6] = [
    NoteLengthStyle::Legato,
    NoteLengthStyle::Staccato,
    NoteLengthStyle::Staccato,
    NoteLengthStyle::Complex,
    NoteLengthStyle::Complex,
    NoteLengthStyle::Complex,
];

/// Map a gene onto a table as `table[floor(gene / 255 * (len - 1))]`.
pub fn gene_lookup<T: Copy>(table: &[T], gene: u8) -> T {
    let idx = (gene as f64 / 255.0 * (table.len() - 1) as f64) as usize;
    table[idx.min(table.len() - 1)]
}

/// The interval sets a voice can sing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    MinorPentatonic,
    Fifths,
    Octaves,
}

impl Scale {
    pub const DEFAULT: Scale = Scale::MinorPentatonic;

    /// Sets a strange voice may switch to.
    pub const ALTERNATES: [Scale; 2] = [Scale::Fifths, Scale::Octaves];

    /// Semitone offsets from the tonal centre, one per interval state.
    pub fn intervals(self) -> [i32; INTERVAL_STATES] {
        match self {
            Scale::MinorPentatonic => [-9, -7, -5, -2, 0, 3, 5, 7, 10],
            Scale::Fifths => [-24, -17, -12, -5, 0, 7, 12, 19, 24],
            Scale::Octaves => [-24, -12, -24, -12, 0, 12, 24, 12, 24],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scale::MinorPentatonic => "minor pentatonic",
            Scale::Fifths => "5ths",
            Scale::Octaves => "octaves",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteLengthStyle {
    /// Every note is `SHORTEST_NOTE_MS`.
    Staccato,
    /// Notes fill the gap to the next onset, leaving 1.5 shortest notes.
    Legato,
    /// Uniform between the staccato and legato lengths.
    Complex,
}

impl NoteLengthStyle {
    /// Longest length a note can have under this policy for a given IOI.
    pub fn legato_ms(ioi_ms: u32) -> u32 {
        let gap = ioi_ms as f64 - SHORTEST_NOTE_MS as f64 * 1.5;
        (gap.round() as u32).max(SHORTEST_NOTE_MS)
    }

    /// Note length for one onset. `draw` is only used by `Complex`.
    pub fn note_ms(self, ioi_ms: u32, draw: f64) -> u32 {
        match self {
            NoteLengthStyle::Staccato => SHORTEST_NOTE_MS,
            NoteLengthStyle::Legato => Self::legato_ms(ioi_ms),
            NoteLengthStyle::Complex => {
                let span = (Self::legato_ms(ioi_ms) - SHORTEST_NOTE_MS) as f64;
                SHORTEST_NOTE_MS + (draw * span).round() as u32
            }
        }
    }
}

/// An inter-onset interval band in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationBand {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl DurationBand {
    pub const fn new(min_ms: f64, max_ms: f64) -> Self {
        DurationBand { min_ms, max_ms }
    }

    /// `min + round(draw * (max - min))`, as whole milliseconds.
    pub fn ioi_ms(&self, draw: f64) -> u32 {
        (self.min_ms + (draw * (self.max_ms - self.min_ms)).round()).round() as u32
    }
}

/// Short, medium, and long bands.
pub const BASE_DURATION_BANDS: [DurationBand; DURATION_STATES] = [
    DurationBand::new(60.0, 80.0),
    DurationBand::new(140.0, 210.0),
    DurationBand::new(280.0, 420.0),
];

/// The "flavored" bands: short x1.5, medium x2, long spans one to two
/// times the new medium maximum.
pub fn lengthened_bands(bands: &[DurationBand; DURATION_STATES]) -> [DurationBand; DURATION_STATES] {
    let short = DurationBand::new(bands[0].min_ms * 1.5, bands[0].max_ms * 1.5);
    let medium = DurationBand::new(bands[1].min_ms * 2.0, bands[1].max_ms * 2.0);
    let long = DurationBand::new(medium.max_ms, medium.max_ms * 2.0);
    [short, medium, long]
}
