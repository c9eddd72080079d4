// Utterance output types.
//
// An `Utterance` is the finished, immutable product of composition: a
// chronological event list ending in exactly one `Done`, summary statistics
// for external collaborators, and the `UtteranceVoice` recording the choices
// made at birth. Fields are private; readers get slices and copies.

use crate::scale::{NoteLengthStyle, Scale};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UtteranceEvent {
    Note {
        offset_ms: u32,
        pitch: u8,
        velocity: u8,
        duration_ms: u32,
    },
    Modulation {
        offset_ms: u32,
        controller: u8,
        value: u8,
    },
    Done {
        offset_ms: u32,
    },
}

impl UtteranceEvent {
    pub fn offset_ms(&self) -> u32 {
        match *self {
            UtteranceEvent::Note { offset_ms, .. }
            | UtteranceEvent::Modulation { offset_ms, .. }
            | UtteranceEvent::Done { offset_ms } => offset_ms,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceStats {
    pub distinct_pitches: usize,
    pub highest_pitch: Option<u8>,
    pub lowest_pitch: Option<u8>,
    pub note_count: usize,
    /// In-melody modulation events; setup events are not counted.
    pub modulation_count: usize,
}

/// Accumulates stats while the composer emits events.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    pitches: BTreeSet<u8>,
    note_count: usize,
    modulation_count: usize,
}

impl StatsRecorder {
    pub(crate) fn note(&mut self, pitch: u8) {
        self.pitches.insert(pitch);
        self.note_count += 1;
    }

    pub(crate) fn modulation(&mut self) {
        self.modulation_count += 1;
    }

    pub(crate) fn finish(self) -> UtteranceStats {
        UtteranceStats {
            distinct_pitches: self.pitches.len(),
            highest_pitch: self.pitches.last().copied(),
            lowest_pitch: self.pitches.first().copied(),
            note_count: self.note_count,
            modulation_count: self.modulation_count,
        }
    }
}

/// The per-organism composition choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceVoice {
    /// MIDI note the interval set is centred on, before octave shift.
    pub tonal_centre: i32,
    pub scale: Scale,
    /// Interval set after the birth rotation.
    pub intervals: Vec<i32>,
    pub rotation: usize,
    pub octave_shift: i32,
    pub lengthened: bool,
    pub note_length_style: NoteLengthStyle,
    pub modulation_chance: f64,
    pub modulation_strength: u8,
    pub matrix_mutations: u32,
    pub target_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    voice: UtteranceVoice,
    events: Vec<UtteranceEvent>,
    stats: UtteranceStats,
}

impl Utterance {
    pub(crate) fn new(voice: UtteranceVoice, events: Vec<UtteranceEvent>, stats: UtteranceStats) -> Self {
        Utterance {
            voice,
            events,
            stats,
        }
    }

    pub fn voice(&self) -> &UtteranceVoice {
        &self.voice
    }

    pub fn events(&self) -> &[UtteranceEvent] {
        &self.events
    }

    pub fn stats(&self) -> &UtteranceStats {
        &self.stats
    }

    /// Offset of the terminal `Done` event, i.e. the utterance length.
    pub fn length_ms(&self) -> u32 {
        self.events.last().map_or(0, UtteranceEvent::offset_ms)
    }

    pub fn notes(&self) -> impl Iterator<Item = &UtteranceEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, UtteranceEvent::Note { .. }))
    }
}
