pub mod dsp;
pub mod engine; // Block rendering and sample-accurate scheduling
pub mod io;
pub mod synth; // Voice, parameters, message front end

pub use engine::{
    config::EngineConfig,
    error::EngineError,
    event::{EventKind, RenderEvent},
    SynthEngine,
};
pub use synth::params::ParameterId;

/// Fixed gain applied to the voice before it reaches the output buffers.
pub const OUTPUT_GAIN: f32 = 0.5;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
