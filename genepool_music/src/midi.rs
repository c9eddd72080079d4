// MIDI output for utterances.
//
// Converts an Utterance into a single-track Standard MIDI File so a voice can
// be auditioned in any sequencer. Tempo is set so one tick is one
// millisecond, which lets event offsets map to ticks unchanged. Note-offs are
// generated from note durations and merged with the other events; at equal
// times note-offs go first so repeated pitches retrigger cleanly.
//
// Uses the `midly` crate for MIDI writing. Output is SMF Format 0.

use crate::utterance::{Utterance, UtteranceEvent};
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Microseconds per quarter note: 480 ticks of 1 ms each.
const TEMPO_MICROS: u32 = 480_000;

const CHANNEL: u8 = 0;

/// Convert an Utterance to MIDI and write it to a file.
pub fn write_midi(utterance: &Utterance, path: &Path) -> std::io::Result<()> {
    let smf = utterance_to_smf(utterance);
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    std::fs::write(path, &buf)
}

/// Sort key for events sharing a tick: note-offs, then controllers, then
/// note-ons, then end of track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    NoteOff,
    Controller,
    NoteOn,
    End,
}

/// Convert an Utterance to an in-memory SMF.
pub fn utterance_to_smf(utterance: &Utterance) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    let channel = u4::new(CHANNEL);
    let mut timed: Vec<(u32, Slot, TrackEventKind<'static>)> = Vec::new();
    for event in utterance.events() {
        match *event {
            UtteranceEvent::Note {
                offset_ms,
                pitch,
                velocity,
                duration_ms,
            } => {
                timed.push((
                    offset_ms,
                    Slot::NoteOn,
                    TrackEventKind::Midi {
                        channel,
                        message: MidiMessage::NoteOn {
                            key: u7::new(pitch),
                            vel: u7::new(velocity.min(127)),
                        },
                    },
                ));
                timed.push((
                    offset_ms + duration_ms,
                    Slot::NoteOff,
                    TrackEventKind::Midi {
                        channel,
                        message: MidiMessage::NoteOff {
                            key: u7::new(pitch),
                            vel: u7::new(0),
                        },
                    },
                ));
            }
            UtteranceEvent::Modulation {
                offset_ms,
                controller,
                value,
            } => timed.push((
                offset_ms,
                Slot::Controller,
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::Controller {
                        controller: u7::new(controller),
                        value: u7::new(value),
                    },
                },
            )),
            UtteranceEvent::Done { offset_ms } => timed.push((
                offset_ms,
                Slot::End,
                TrackEventKind::Meta(MetaMessage::EndOfTrack),
            )),
        }
    }
    // Stable, so same-slot events keep utterance order.
    timed.sort_by_key(|&(tick, slot, _)| (tick, slot));
    // Notes ringing past `Done` still need their note-offs before the end.
    if let Some(end) = timed.iter().position(|(_, slot, _)| *slot == Slot::End) {
        let end_event = timed.remove(end);
        let last_tick = timed.last().map_or(end_event.0, |(tick, _, _)| *tick);
        timed.push((end_event.0.max(last_tick), Slot::End, end_event.2));
    }

    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(TEMPO_MICROS))),
    });
    let mut last_tick = 0u32;
    for (tick, _, kind) in timed {
        track.push(TrackEvent {
            delta: u28::new(tick - last_tick),
            kind,
        });
        last_tick = tick;
    }
    smf.tracks.push(track);
    smf
}
