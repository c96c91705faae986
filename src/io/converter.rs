/// Convert a MIDI note number to frequency in Hz.
/// A4 = 440 Hz = MIDI note 69
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// Velocity-squared amplitude curve: 127 → 1.0, 64 → ≈0.25.
#[inline]
pub fn velocity_to_amplitude(velocity: u8) -> f32 {
    let v = velocity.min(127) as f32 / 127.0;
    v * v
}
