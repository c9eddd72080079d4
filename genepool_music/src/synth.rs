// Synthesizer controller state for one voice.
//
// Six MIDI continuous controllers shape the vocal synth. Each gets a home
// value at birth, sent as setup events before the first note. The two
// variable controls (cc15 "mouth", cc16 "size") can then be swept during the
// utterance: each modulation steps the last value by the voice's modulation
// strength in its current direction, and bounces off the edges of a window of
// `variable_width` centred on the home value.

use genepool_prng::PoolRng;
use serde::{Deserialize, Serialize};

/// Static description of one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthControl {
    pub cc: u8,
    pub min: u8,
    pub max: u8,
    /// Width of the sweep window; 0 for controls that never move.
    pub variable_width: u8,
}

impl SynthControl {
    const fn new(cc: u8, min: u8, max: u8, variable_width: u8) -> Self {
        SynthControl {
            cc,
            min,
            max,
            variable_width,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.variable_width > 0
    }
}

pub const SYNTH_CONTROLS: [SynthControl; 6] = [
    SynthControl::new(14, 94, 97, 0),    // wave
    SynthControl::new(15, 0, 127, 127),  // mouth
    SynthControl::new(16, 32, 127, 96),  // size
    SynthControl::new(17, 70, 95, 0),    // tone
    SynthControl::new(19, 0, 70, 0),     // resonance
    SynthControl::new(20, 0, 127, 0),    // level
];

/// The two controllers whose sum sets loudness.
const MOUTH: usize = 1;
const SIZE: usize = 2;

/// Mouth plus size below this is too quiet to hear.
pub const MIN_LOUDNESS: u32 = 100;

/// Rerolls before the loudness floor is forced.
const MAX_LOUDNESS_REROLLS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    pub control: SynthControl,
    pub home: u8,
    pub last: u8,
    pub direction: SweepDirection,
}

impl ControlState {
    /// Sweep window: `variable_width / 2` either side of home, inside
    /// the control's range.
    pub fn window(&self) -> (u8, u8) {
        let half = self.control.variable_width as f64 / 2.0;
        let low = (self.home as f64 - half).max(self.control.min as f64);
        let high = (self.home as f64 + half).min(self.control.max as f64);
        (low.ceil() as u8, high.floor() as u8)
    }

    /// Step by `strength` in the current direction, reversing on the edge.
    /// Returns the new value.
    pub fn modulate(&mut self, strength: u8) -> u8 {
        let (low, high) = self.window();
        let last = self.last as i32;
        let step = strength as i32;
        let value = match self.direction {
            SweepDirection::Up => {
                let v = last + step;
                if v > high as i32 {
                    self.direction = SweepDirection::Down;
                    high as i32
                } else {
                    v
                }
            }
            SweepDirection::Down => {
                let v = last - step;
                if v < low as i32 {
                    self.direction = SweepDirection::Up;
                    low as i32
                } else {
                    v
                }
            }
        };
        self.last = value.clamp(0, 127) as u8;
        self.last
    }
}

fn uniform_in(rng: &mut PoolRng, min: u8, max: u8) -> u8 {
    let range = (max - min) as usize + 1;
    min + rng.index(range) as u8
}

/// Pick home values and sweep directions for every control, then reroll
/// mouth and size until they are loud enough.
pub fn initial_controls(rng: &mut PoolRng) -> Vec<ControlState> {
    let mut states: Vec<ControlState> = SYNTH_CONTROLS
        .iter()
        .map(|&control| {
            let home = uniform_in(rng, control.min, control.max);
            let direction = if rng.next_f64() > 0.5 {
                SweepDirection::Down
            } else {
                SweepDirection::Up
            };
            ControlState {
                control,
                home,
                last: home,
                direction,
            }
        })
        .collect();

    let mouth = states[MOUTH].control;
    let size = states[SIZE].control;
    let mut pair = (states[MOUTH].home, states[SIZE].home);
    let mut rerolls = 0;
    while (pair.0 as u32 + pair.1 as u32) < MIN_LOUDNESS {
        if rerolls == MAX_LOUDNESS_REROLLS {
            // Raise size just enough; its max alone clears the floor.
            let needed = MIN_LOUDNESS - pair.0 as u32;
            pair.1 = (needed.min(size.max as u32) as u8).max(size.min);
            break;
        }
        pair = (
            uniform_in(rng, mouth.min, mouth.max),
            uniform_in(rng, size.min, size.max),
        );
        rerolls += 1;
    }
    for (idx, value) in [(MOUTH, pair.0), (SIZE, pair.1)] {
        states[idx].home = value;
        states[idx].last = value;
    }
    states
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn homes_are_inside_control_ranges() {
        for seed in 0..200 {
            let states = initial_controls(&mut PoolRng::new(seed));
            assert_eq!(states.len(), SYNTH_CONTROLS.len());
            for s in &states {
                assert!(s.home >= s.control.min && s.home <= s.control.max);
                assert_eq!(s.home, s.last);
            }
        }
    }

    #[test]
    fn voices_are_always_loud_enough() {
        for seed in 0..500 {
            let states = initial_controls(&mut PoolRng::new(seed));
            let loudness = states[MOUTH].home as u32 + states[SIZE].home as u32;
            assert!(loudness >= MIN_LOUDNESS, "seed {seed}: {loudness}");
        }
    }

    #[test]
    fn only_mouth_and_size_are_variable() {
        let variable: Vec<u8> = SYNTH_CONTROLS
            .iter()
            .filter(|c| c.is_variable())
            .map(|c| c.cc)
            .collect();
        assert_eq!(variable, vec![15, 16]);
    }

    #[test]
    fn modulation_bounces_inside_the_window() {
        let mut state = ControlState {
            control: SYNTH_CONTROLS[SIZE],
            home: 80,
            last: 80,
            direction: SweepDirection::Up,
        };
        let (low, high) = state.window();
        assert_eq!((low, high), (32, 127));
        let mut saw_down = false;
        for _ in 0..100 {
            let v = state.modulate(12);
            assert!(v >= low && v <= high);
            saw_down |= state.direction == SweepDirection::Down;
        }
        assert!(saw_down);
    }

    #[test]
    fn zero_strength_modulation_holds_still() {
        let mut state = ControlState {
            control: SYNTH_CONTROLS[MOUTH],
            home: 64,
            last: 64,
            direction: SweepDirection::Down,
        };
        assert_eq!(state.modulate(0), 64);
        assert_eq!(state.direction, SweepDirection::Down);
    }
}
