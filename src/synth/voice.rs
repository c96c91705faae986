use crate::{
    dsp::{
        envelope::Envelope,
        filter::{modulated_cutoff, SVFilter},
        oscillator::{bend_frequency, PulseOscillator},
    },
    io::{
        converter::{midi_note_to_freq, velocity_to_amplitude},
        midi::MidiEvent,
    },
    synth::params::{ParamFrame, ParameterId, ParameterSet},
};

/*
Signal path, once per sample:

    rampers ──→ ADSR times, pitch bend, pulse width, cutoff, strength
                 │
    gate ──┬──→ amp envelope ─────────────────────────────┐
           └──→ filter envelope ─→ cutoff                  │
                                     │                     ↓
    note ─→ pulse osc × velocity² ─→ low-pass ───────────→ × ─→ out
*/

/// Note lifecycle as seen by MIDI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteStage {
    /// Nothing sounding.
    Off,
    /// Key held.
    On,
    /// Key released, amplitude envelope still decaying.
    Release,
}

/// The single monophonic voice: one oscillator, one filter, two envelopes
/// and twelve parameter rampers.
#[derive(Debug, Clone)]
pub struct Voice {
    sample_rate: f32,

    note: u8,
    stage: NoteStage,
    velocity_amplitude: f32,
    base_frequency: f32,

    oscillator: PulseOscillator,
    filter: SVFilter,
    amp_env: Envelope,
    filter_env: Envelope,
    params: ParameterSet,
}

impl Voice {
    pub fn new(sample_rate: f32) -> Self {
        let params = ParameterSet::new();
        let nyquist = sample_rate * 0.5;
        let cutoff = params.get(ParameterId::FilterCutoffFrequency).min(nyquist);

        let mut voice = Self {
            sample_rate,
            note: 0,
            stage: NoteStage::Off,
            velocity_amplitude: 0.0,
            base_frequency: 0.0,
            oscillator: PulseOscillator::new(sample_rate),
            filter: SVFilter::lowpass(sample_rate, cutoff),
            amp_env: Envelope::new(sample_rate),
            filter_env: Envelope::new(sample_rate),
            params,
        };
        voice.oscillator.set_pulse_width(voice.params.get(ParameterId::PulseWidth));
        voice
    }

    /// Start (or replace) the sounding note.
    ///
    /// Velocity 0 is a running-status note-off: it only releases when `note`
    /// is the note currently held.
    pub fn note_on(&mut self, note: u8, velocity: u8) {
        if velocity == 0 {
            if self.stage == NoteStage::On && self.note == note {
                self.release();
            }
            return;
        }

        self.stage = NoteStage::On;
        self.note = note;
        self.base_frequency = midi_note_to_freq(note);
        self.velocity_amplitude = velocity_to_amplitude(velocity);
        self.amp_env.gate_on();
        self.filter_env.gate_on();
    }

    /// Release whatever is sounding, regardless of note number.
    pub fn note_off(&mut self, _note: u8, _velocity: u8) {
        self.release();
    }

    /// Route a decoded MIDI message.
    ///
    /// Note-off messages take the running-status path of [`Voice::note_on`],
    /// so releasing a key that is not the sounding one changes nothing.
    pub fn handle_midi(&mut self, event: MidiEvent) {
        match event {
            MidiEvent::NoteOn { key, velocity, .. } => self.note_on(key, velocity),
            MidiEvent::NoteOff { key, .. } => self.note_on(key, 0),
            // Decoded but not mapped to anything yet.
            MidiEvent::ControlChange { .. } => {}
        }
    }

    fn release(&mut self) {
        self.stage = NoteStage::Release;
        self.amp_env.gate_off();
        self.filter_env.gate_off();
    }

    pub fn set_parameter(&mut self, id: ParameterId, value: f32) {
        self.params.set(id, value);
    }

    pub fn get_parameter(&self, id: ParameterId) -> f32 {
        self.params.get(id)
    }

    pub fn start_ramp(&mut self, id: ParameterId, target: f32, duration: u32) {
        self.params.start_ramp(id, target, duration);
    }

    /// Render mono samples into `out`, overwriting it.
    pub fn process(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            let params = self.params.step();
            *sample = self.next_sample(&params);
        }

        if self.stage == NoteStage::Release && !self.amp_env.is_active() {
            self.stage = NoteStage::Off;
        }
    }

    #[inline]
    fn next_sample(&mut self, p: &ParamFrame) -> f32 {
        let nyquist = self.sample_rate * 0.5;

        self.amp_env.set_adsr(
            p.get(ParameterId::AttackDuration),
            p.get(ParameterId::DecayDuration),
            p.get(ParameterId::SustainLevel),
            p.get(ParameterId::ReleaseDuration),
        );
        self.filter_env.set_adsr(
            p.get(ParameterId::FilterAttackDuration),
            p.get(ParameterId::FilterDecayDuration),
            p.get(ParameterId::FilterSustainLevel),
            p.get(ParameterId::FilterReleaseDuration),
        );

        let amp = self.amp_env.next_sample();
        let filter_amount = self.filter_env.next_sample();

        self.oscillator.set_frequency(bend_frequency(
            self.base_frequency,
            p.get(ParameterId::PitchBend),
            self.sample_rate,
        ));
        self.oscillator.set_pulse_width(p.get(ParameterId::PulseWidth));
        let raw = self.oscillator.next_sample() * self.velocity_amplitude;

        self.filter.set_cutoff(modulated_cutoff(
            p.get(ParameterId::FilterCutoffFrequency),
            filter_amount,
            p.get(ParameterId::FilterEnvelopeStrength),
            nyquist,
        ));

        amp * self.filter.next_sample(raw)
    }

    /// Silence the voice and snap all parameters to their targets.
    pub fn reset(&mut self) {
        self.params.finish_ramps();
        self.stage = NoteStage::Off;
        self.velocity_amplitude = 0.0;
        self.amp_env.reset();
        self.filter_env.reset();
        self.oscillator.reset();
        self.filter.reset();
    }

    pub fn is_active(&self) -> bool {
        self.stage != NoteStage::Off
    }

    pub fn current_note(&self) -> u8 {
        self.note
    }

    pub fn stage(&self) -> NoteStage {
        self.stage
    }

    pub fn gate(&self) -> bool {
        self.amp_env.gate()
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Frequency the oscillator rendered the last sample at.
    pub fn oscillator_frequency(&self) -> f32 {
        self.oscillator.frequency()
    }

    /// Pulse width the oscillator rendered the last sample with.
    pub fn pulse_width(&self) -> f32 {
        self.oscillator.pulse_width()
    }

    /// Cutoff the filter rendered the last sample with.
    pub fn filter_cutoff(&self) -> f32 {
        self.filter.cutoff()
    }

    pub fn amp_envelope_level(&self) -> f32 {
        self.amp_env.level()
    }

    pub fn filter_envelope_level(&self) -> f32 {
        self.filter_env.level()
    }
}
