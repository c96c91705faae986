#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{io::midi::RawMidi, synth::params::ParameterId};

/// A host event scheduled at a sample offset within the current block.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderEvent {
    /// Samples from the start of the block.
    pub offset: u32,
    pub kind: EventKind,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// Ramp a parameter to `target` over `duration` samples (0 = jump).
    ParameterRamp {
        id: ParameterId,
        target: f32,
        duration: u32,
    },
    Midi(RawMidi),
}

impl RenderEvent {
    pub fn ramp(offset: u32, id: ParameterId, target: f32, duration: u32) -> Self {
        Self {
            offset,
            kind: EventKind::ParameterRamp {
                id,
                target,
                duration,
            },
        }
    }

    pub fn midi(offset: u32, status: u8, data1: u8, data2: u8) -> Self {
        Self {
            offset,
            kind: EventKind::Midi(RawMidi::new(status, data1, data2)),
        }
    }

    /// MIDI event from a host byte slice of any length.
    pub fn midi_bytes(offset: u32, bytes: &[u8]) -> Self {
        Self {
            offset,
            kind: EventKind::Midi(RawMidi::from_slice(bytes)),
        }
    }

    pub fn note_on(offset: u32, note: u8, velocity: u8) -> Self {
        Self::midi(offset, 0x90, note, velocity)
    }

    pub fn note_off(offset: u32, note: u8, velocity: u8) -> Self {
        Self::midi(offset, 0x80, note, velocity)
    }
}
