//! Host-facing render engine.
//!
//! [`SynthEngine`] owns the voice and exposes the render entry point. The
//! host hands it a block size, the block's ordered events and planar output
//! buffers; the scheduler cuts the block at event offsets and the voice fills
//! each segment.

pub mod config;
pub mod error;
pub mod event;
pub mod renderer;
pub mod scheduler;

use log::{debug, info};

use crate::{
    io::AudioOutput,
    synth::{params::ParameterId, voice::Voice},
    OUTPUT_GAIN,
};

use self::{
    config::EngineConfig,
    error::EngineError,
    event::{EventKind, RenderEvent},
    renderer::SegmentRenderer,
};

pub struct SynthEngine {
    config: EngineConfig,
    voice: Voice,
    allocated: bool,
    sample_time: u64,
}

impl SynthEngine {
    /// Build an engine with render resources allocated.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        info!(
            "monosynth engine: {} Hz, {} channels, {} max frames",
            config.sample_rate, config.channels, config.max_frames
        );

        Ok(Self {
            config,
            voice: Voice::new(config.sample_rate),
            allocated: true,
            sample_time: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply a new sample rate / channel count.
    ///
    /// The voice is rebuilt from scratch; logical parameter values carry
    /// over, note and envelope state do not.
    pub fn reconfigure(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        if self.allocated {
            return Err(EngineError::RenderResourcesAllocated);
        }
        config.validate()?;

        let mut voice = Voice::new(config.sample_rate);
        for id in ParameterId::ALL {
            voice.set_parameter(id, self.voice.get_parameter(id));
        }

        info!(
            "monosynth engine reconfigured: {} Hz -> {} Hz, {} channels",
            self.config.sample_rate, config.sample_rate, config.channels
        );
        self.config = config;
        self.voice = voice;
        self.sample_time = 0;
        Ok(())
    }

    pub fn allocate_render_resources(&mut self) {
        debug!("allocating render resources");
        self.allocated = true;
    }

    pub fn deallocate_render_resources(&mut self) {
        debug!("deallocating render resources");
        self.allocated = false;
    }

    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    pub fn maximum_frames_to_render(&self) -> usize {
        self.config.max_frames
    }

    pub fn set_maximum_frames_to_render(&mut self, max_frames: usize) -> Result<(), EngineError> {
        if self.allocated {
            return Err(EngineError::RenderResourcesAllocated);
        }
        if max_frames == 0 {
            return Err(EngineError::ZeroMaxFrames);
        }
        self.config.max_frames = max_frames;
        Ok(())
    }

    /// Immediate, non-ramped change, clamped to the parameter's direct range.
    pub fn set_parameter(&mut self, id: ParameterId, value: f32) {
        self.voice.set_parameter(id, value);
    }

    /// The parameter's logical (target) value.
    pub fn get_parameter(&self, id: ParameterId) -> f32 {
        self.voice.get_parameter(id)
    }

    /// Apply an event right now, outside any block.
    pub fn handle_event(&mut self, event: &RenderEvent) {
        apply_event(&mut self.voice, event);
    }

    /// Release the voice regardless of which note is sounding.
    pub fn all_notes_off(&mut self) {
        self.voice.note_off(0, 0);
    }

    /// Render `frame_count` frames into `output`, applying `events` at their
    /// sample offsets.
    ///
    /// `output` must hold at least `config.channels` channels of at least
    /// `frame_count` frames. Every configured channel receives the same
    /// signal. Validation happens up front; once it passes the block is
    /// always rendered in full.
    pub fn process_block(
        &mut self,
        block_start: u64,
        frame_count: usize,
        events: &[RenderEvent],
        output: &mut AudioOutput,
    ) -> Result<(), EngineError> {
        if !self.allocated {
            return Err(EngineError::NotAllocated);
        }
        if frame_count > self.config.max_frames {
            return Err(EngineError::TooManyFrames {
                requested: frame_count,
                max: self.config.max_frames,
            });
        }
        if output.channels() < self.config.channels {
            return Err(EngineError::ChannelMismatch {
                provided: output.channels(),
                expected: self.config.channels,
            });
        }
        let channels = &mut output.buffers[..self.config.channels];
        if let Some(available) = channels.iter().map(Vec::len).min() {
            if available < frame_count {
                return Err(EngineError::BufferTooSmall {
                    requested: frame_count,
                    available,
                });
            }
        }

        let mut block = BlockRenderer {
            voice: &mut self.voice,
            channels,
        };
        scheduler::process_with_events(&mut block, frame_count, events);

        self.sample_time = block_start.wrapping_add(frame_count as u64);
        Ok(())
    }

    /// Snap parameters to their targets and silence the voice.
    pub fn reset(&mut self) {
        debug!("resetting voice");
        self.voice.reset();
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    /// Sample time just past the last rendered block.
    pub fn sample_time(&self) -> u64 {
        self.sample_time
    }
}

fn apply_event(voice: &mut Voice, event: &RenderEvent) {
    match event.kind {
        EventKind::ParameterRamp {
            id,
            target,
            duration,
        } => voice.start_ramp(id, target, duration),
        EventKind::Midi(raw) => {
            if let Some(midi) = raw.decode() {
                voice.handle_midi(midi);
            }
        }
    }
}

/// Borrowed view of the voice and output for one render call.
struct BlockRenderer<'a> {
    voice: &'a mut Voice,
    channels: &'a mut [Vec<f32>],
}

impl SegmentRenderer for BlockRenderer<'_> {
    fn handle_event(&mut self, event: &RenderEvent) {
        apply_event(self.voice, event);
    }

    fn render(&mut self, buffer_offset: usize, frames: usize) {
        let range = buffer_offset..buffer_offset + frames;
        let Some((first, rest)) = self.channels.split_first_mut() else {
            return;
        };

        let segment = &mut first[range.clone()];
        self.voice.process(segment);
        for sample in segment.iter_mut() {
            *sample *= OUTPUT_GAIN;
        }

        for channel in rest.iter_mut() {
            channel[range.clone()].copy_from_slice(segment);
        }
    }
}
