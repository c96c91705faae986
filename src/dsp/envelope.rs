use crate::MIN_TIME;

/*
ADSR Envelope
=============

Turns the binary gate (key held / key released) into a smooth 0..1 control
signal. The voice runs two of these: one scales the amplitude, the other
opens the filter.

Vocabulary
----------

  level       Current output, always within [0, 1].

  stage       Idle, Attack, Decay, Sustain or Release.

  gate        True while a note is held. Rising gate starts Attack, falling
              gate starts Release.

  increment   How far `level` moves per sample in the current stage:

                  attack:  1.0 / attack_samples
                  decay:   (1.0 - sustain) / decay_samples
                  release: release_start_level / release_samples


The Shape
---------

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
          A   D       S        R

All segments are linear. Times are in seconds and converted to samples with
the sample rate the envelope was built for; a time of zero still takes one
sample so every stage has a finite increment.


Retriggering
------------

Gate on never resets the level. Attack always climbs from wherever the level
is right now, so retriggering during Release (or mid-Decay when a new note
replaces the old one) continues smoothly instead of snapping to 0. The
largest jump the envelope can produce between two samples is therefore one
attack increment.

    ┌──────┐ gate on ┌────────┐ level=1 ┌───────┐ level=S ┌─────────┐
    │ Idle │ ──────→ │ Attack │ ──────→ │ Decay │ ──────→ │ Sustain │
    └──────┘         └────────┘         └───────┘         └─────────┘
       ↑                 ↑  │ gate off      │ gate off        │ gate off
       │                 │  ↓               ↓                 ↓
       │   level < eps ┌─────────┐ ←──────────────────────────┘
       └────────────── │ Release │
                       └─────────┘ ── gate on → Attack (from current level)


Release
-------

At gate off we snapshot the current level and the release length in samples,
then interpolate linearly to zero. Once the level drops below
`RELEASE_EPSILON` the envelope goes Idle. If the level is already below the
threshold when the gate falls (sustain of 0 after a full decay) the envelope
goes Idle immediately.
*/

/// Level below which a releasing envelope is considered silent.
pub const RELEASE_EPSILON: f32 = 1e-5;

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

#[derive(Debug, Clone)]
pub struct Envelope {
    sample_rate: f32,

    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,

    stage: EnvelopeStage,
    level: f32,
    gate: bool,

    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        Self::adsr(sample_rate, 0.1, 0.1, 1.0, 0.1)
    }

    pub fn adsr(sample_rate: f32, attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        let mut env = Self {
            sample_rate,
            attack_time: 0.0,
            decay_time: 0.0,
            sustain_level: 0.0,
            release_time: 0.0,
            stage: EnvelopeStage::Idle,
            level: 0.0,
            gate: false,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        };
        env.set_adsr(attack, decay, sustain, release);
        env
    }

    /// Update the stage times (seconds) and sustain level.
    ///
    /// Safe to call every sample; a release already in progress keeps the
    /// length it was started with.
    #[inline]
    pub fn set_adsr(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.attack_time = attack.max(MIN_TIME);
        self.decay_time = decay.max(MIN_TIME);
        self.sustain_level = sustain.clamp(0.0, 1.0);
        self.release_time = release.max(MIN_TIME);
    }

    /// Gate high: climb from the current level toward 1.0.
    pub fn gate_on(&mut self) {
        self.gate = true;
        self.stage = EnvelopeStage::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: fall from the current level toward 0.0.
    pub fn gate_off(&mut self) {
        self.gate = false;
        if self.stage == EnvelopeStage::Idle {
            return;
        }

        if self.level < RELEASE_EPSILON {
            self.level = 0.0;
            self.stage = EnvelopeStage::Idle;
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = self.samples(self.release_time).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeStage::Release;
    }

    /// Advance one sample and return the new level.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                self.level += self.attack_increment();

                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                let target = self.sustain_level;

                if target >= self.level {
                    // Sustain was raised above the decaying level.
                    self.stage = EnvelopeStage::Sustain;
                    self.level = self.slew_toward(target);
                } else {
                    self.level -= self.decay_increment();

                    if self.level <= target {
                        self.level = target;
                        self.stage = EnvelopeStage::Sustain;
                    }
                }
            }

            EnvelopeStage::Sustain => {
                self.level = self.slew_toward(self.sustain_level);
            }

            EnvelopeStage::Release => {
                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                if self.level < RELEASE_EPSILON
                    || self.release_elapsed_samples >= self.release_total_samples
                {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        self.level = self.level.clamp(0.0, 1.0);
        self.level
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Per-sample rise during Attack.
    #[inline]
    pub fn attack_increment(&self) -> f32 {
        1.0 / self.samples(self.attack_time).max(1.0)
    }

    #[inline]
    fn decay_increment(&self) -> f32 {
        (1.0 - self.sustain_level) / self.samples(self.decay_time).max(1.0)
    }

    /// Move toward `target` by at most one full-scale decay step.
    #[inline]
    fn slew_toward(&self, target: f32) -> f32 {
        let max_step = 1.0 / self.samples(self.decay_time).max(1.0);
        self.level + (target - self.level).clamp(-max_step, max_step)
    }

    #[inline]
    fn samples(&self, seconds: f32) -> f32 {
        seconds * self.sample_rate
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
        self.gate = false;
        self.release_start_level = 0.0;
        self.release_elapsed_samples = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn gate(&self) -> bool {
        self.gate
    }

    pub fn sustain_level(&self) -> f32 {
        self.sustain_level
    }
}
