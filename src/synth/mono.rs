use crate::{
    engine::{config::EngineConfig, error::EngineError, event::RenderEvent, SynthEngine},
    io::AudioOutput,
    synth::message::{MessageReceiver, SynthMessage},
};

/// Threaded front end: drains a control queue at the top of every callback
/// and renders interleaved audio for a device.
///
/// Messages carry no sample offset, so everything queued since the previous
/// callback lands on the first sample of the next one.
pub struct MonoSynth<R: MessageReceiver> {
    engine: SynthEngine,
    rx: R,
    scratch: AudioOutput,
}

impl<R: MessageReceiver> MonoSynth<R> {
    pub fn new(config: EngineConfig, rx: R) -> Result<Self, EngineError> {
        let engine = SynthEngine::new(config)?;
        let scratch = AudioOutput::new(config.channels, config.max_frames);

        Ok(Self {
            engine,
            rx,
            scratch,
        })
    }

    /// Fill `data` (frames interleaved across `channels`) with the voice.
    ///
    /// Device channels beyond the engine's channel count repeat its last
    /// channel. Long callbacks are rendered in chunks of at most
    /// `max_frames`.
    pub fn render_interleaved(
        &mut self,
        data: &mut [f32],
        channels: usize,
    ) -> Result<(), EngineError> {
        if channels == 0 {
            return Err(EngineError::NoChannels);
        }

        self.drain_messages();

        let engine_channels = self.engine.config().channels;
        let max_frames = self.engine.maximum_frames_to_render();
        let total_frames = data.len() / channels;
        let mut rendered = 0;

        while rendered < total_frames {
            let frames = (total_frames - rendered).min(max_frames);
            let block_start = self.engine.sample_time();
            self.engine
                .process_block(block_start, frames, &[], &mut self.scratch)?;

            let chunk = &mut data[rendered * channels..(rendered + frames) * channels];
            for (i, frame) in chunk.chunks_exact_mut(channels).enumerate() {
                for (ch, sample) in frame.iter_mut().enumerate() {
                    *sample = self.scratch.buffers[ch.min(engine_channels - 1)][i];
                }
            }

            rendered += frames;
        }

        Ok(())
    }

    fn drain_messages(&mut self) {
        while let Some(msg) = self.rx.pop() {
            match msg {
                SynthMessage::NoteOn { note, velocity } => {
                    self.engine.handle_event(&RenderEvent::note_on(0, note, velocity));
                }
                SynthMessage::NoteOff { note, velocity } => {
                    self.engine
                        .handle_event(&RenderEvent::note_off(0, note, velocity));
                }
                SynthMessage::AllNotesOff => self.engine.all_notes_off(),
                SynthMessage::SetParameter { id, value } => self.engine.set_parameter(id, value),
                SynthMessage::RampParameter {
                    id,
                    target,
                    duration,
                } => {
                    self.engine
                        .handle_event(&RenderEvent::ramp(0, id, target, duration));
                }
                SynthMessage::Midi {
                    status,
                    data1,
                    data2,
                } => {
                    self.engine
                        .handle_event(&RenderEvent::midi(0, status, data1, data2));
                }
            }
        }
    }

    pub fn engine(&self) -> &SynthEngine {
        &self.engine
    }

    /// Apply a new engine configuration and resize the scratch buffers to
    /// match. Allocates; call from the control side, not the audio callback.
    ///
    /// Render resources are released for the change and reacquired
    /// afterwards, also when the new configuration is rejected.
    pub fn reconfigure(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        self.engine.deallocate_render_resources();
        let result = self.engine.reconfigure(config);
        self.resize_scratch();
        self.engine.allocate_render_resources();
        result
    }

    /// Change the largest chunk rendered per engine call. Same rules as
    /// [`MonoSynth::reconfigure`].
    pub fn set_maximum_frames_to_render(&mut self, max_frames: usize) -> Result<(), EngineError> {
        self.engine.deallocate_render_resources();
        let result = self.engine.set_maximum_frames_to_render(max_frames);
        self.resize_scratch();
        self.engine.allocate_render_resources();
        result
    }

    fn resize_scratch(&mut self) {
        let EngineConfig {
            channels,
            max_frames,
            ..
        } = *self.engine.config();
        if self.scratch.channels() != channels || self.scratch.frames() != max_frames {
            self.scratch = AudioOutput::new(channels, max_frames);
        }
    }
}
