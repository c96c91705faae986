use thiserror::Error;

/// Configuration and render-entry failures.
///
/// All of these are detected before a single sample is written; once a block
/// has been accepted, rendering cannot fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("sample rate must be finite and positive, got {0}")]
    InvalidSampleRate(f32),

    #[error("channel count must be at least 1")]
    NoChannels,

    #[error("maximum frames per render must be at least 1")]
    ZeroMaxFrames,

    #[error("render resources are allocated; deallocate before reconfiguring")]
    RenderResourcesAllocated,

    #[error("render resources are not allocated")]
    NotAllocated,

    #[error("asked to render {requested} frames, maximum is {max}")]
    TooManyFrames { requested: usize, max: usize },

    #[error("output has {provided} channels, engine renders {expected}")]
    ChannelMismatch { provided: usize, expected: usize },

    #[error("output holds {available} frames, block needs {requested}")]
    BufferTooSmall { requested: usize, available: usize },
}
