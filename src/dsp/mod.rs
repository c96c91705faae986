//! Low-level DSP primitives used by the voice.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! embed directly inside the voice. They stay focused on the signal-processing
//! math; note handling and parameter dispatch live in `synth`.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Modulatable low-pass state-variable filter.
pub mod filter;
/// Band-limited pulse oscillator.
pub mod oscillator;
/// Sample-accurate linear parameter smoothing.
pub mod ramper;

pub use envelope::{Envelope, EnvelopeStage};
pub use filter::SVFilter;
pub use oscillator::PulseOscillator;
pub use ramper::ParameterRamper;
