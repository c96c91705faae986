#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Decoded channel-voice message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
}

impl MidiEvent {
    /// Decode a raw message.
    ///
    /// Only 3-byte note-off, note-on and control-change messages are
    /// recognised. Anything else, including data bytes above 127, yields
    /// `None`.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let &[status, data1, data2] = bytes else {
            return None;
        };
        if data1 > 0x7F || data2 > 0x7F {
            return None;
        }

        let channel = status & 0x0F;
        match status & 0xF0 {
            0x80 => Some(MidiEvent::NoteOff {
                channel,
                key: data1,
                velocity: data2,
            }),
            0x90 => Some(MidiEvent::NoteOn {
                channel,
                key: data1,
                velocity: data2,
            }),
            0xB0 => Some(MidiEvent::ControlChange {
                channel,
                controller: data1,
                value: data2,
            }),
            _ => None,
        }
    }

    pub fn to_bytes(self) -> [u8; 3] {
        match self {
            MidiEvent::NoteOff {
                channel,
                key,
                velocity,
            } => [0x80 | (channel & 0x0F), key, velocity],
            MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            } => [0x90 | (channel & 0x0F), key, velocity],
            MidiEvent::ControlChange {
                channel,
                controller,
                value,
            } => [0xB0 | (channel & 0x0F), controller, value],
        }
    }
}

/// Raw MIDI bytes as delivered by the host, length included.
///
/// Hosts hand over a length plus up to three data bytes; the length is kept
/// so that short or long messages can be rejected at decode time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMidi {
    len: u16,
    data: [u8; 3],
}

impl RawMidi {
    pub const fn new(status: u8, data1: u8, data2: u8) -> Self {
        Self {
            len: 3,
            data: [status, data1, data2],
        }
    }

    /// Copy up to three bytes, remembering the original length.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut data = [0u8; 3];
        let n = bytes.len().min(3);
        data[..n].copy_from_slice(&bytes[..n]);
        Self {
            len: u16::try_from(bytes.len()).unwrap_or(u16::MAX),
            data,
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn decode(&self) -> Option<MidiEvent> {
        if self.len != 3 {
            return None;
        }
        MidiEvent::decode(&self.data)
    }
}

impl From<MidiEvent> for RawMidi {
    fn from(event: MidiEvent) -> Self {
        let [status, data1, data2] = event.to_bytes();
        Self::new(status, data1, data2)
    }
}
