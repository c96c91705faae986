/*
Band-Limited Pulse Oscillator
=============================

A pulse wave sits at +1 for the first `pulse_width` fraction of each cycle and
at -1 for the rest. At 0.5 it is a square wave (odd harmonics only); narrower
widths add even harmonics and sound thinner and more nasal.

Vocabulary
----------

  phase         Position within the current cycle, in [0, 1).

  dt            Phase advance per sample: frequency / sample_rate.

  pulse width   Fraction of the cycle spent high (duty cycle).


Why Naive Pulses Alias
----------------------

The ideal pulse has two instantaneous jumps per cycle. Its harmonics extend
forever, and everything above Nyquist folds back down as inharmonic noise.
At high notes this is clearly audible.

PolyBLEP ("polynomial band-limited step") replaces each jump with a short
two-sample polynomial that approximates a band-limited step:

    naive step         corrected step

        ┌────              ╭────
        │                 ╱
    ────┘             ───╯

The correction is applied at both discontinuities:

  rising edge   at phase = 0 (the wrap)         → +blep(phase)
  falling edge  at phase = pulse_width          → -blep(phase - pulse_width)

`blep(t)` is non-zero only within one `dt` of an edge, so the cost is two
comparisons per sample when nothing is near a transition.


Pitch
-----

The oscillator itself only knows Hz. Pitch bend is applied by the voice via
`bend_frequency`, which also limits the result to [0, Nyquist].
*/

/// Narrowest duty cycle the oscillator will render.
const MIN_PULSE_WIDTH: f32 = 0.001;

/// Band-limited pulse generator with variable duty cycle.
#[derive(Debug, Clone)]
pub struct PulseOscillator {
    sample_rate: f32,
    phase: f32,
    frequency: f32,
    pulse_width: f32,
}

impl PulseOscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            frequency: 0.0,
            pulse_width: 0.5,
        }
    }

    /// Set the frequency in Hz, limited to [0, Nyquist].
    #[inline]
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency.clamp(0.0, self.sample_rate * 0.5);
    }

    /// Set the duty cycle; kept strictly inside (0, 1).
    #[inline]
    pub fn set_pulse_width(&mut self, pulse_width: f32) {
        self.pulse_width = pulse_width.clamp(MIN_PULSE_WIDTH, 1.0 - MIN_PULSE_WIDTH);
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let dt = self.frequency / self.sample_rate;
        let phase = self.phase;

        let mut value = if phase < self.pulse_width { 1.0 } else { -1.0 };
        value += poly_blep(phase, dt);
        value -= poly_blep(wrap_phase(phase - self.pulse_width), dt);

        self.phase = wrap_phase(phase + dt);
        value
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn pulse_width(&self) -> f32 {
        self.pulse_width
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

/// Apply a pitch bend in semitones and limit the result to [0, Nyquist].
#[inline]
pub fn bend_frequency(base_frequency: f32, semitones: f32, sample_rate: f32) -> f32 {
    (base_frequency * 2.0_f32.powf(semitones / 12.0)).clamp(0.0, sample_rate * 0.5)
}

#[inline]
fn wrap_phase(phase: f32) -> f32 {
    phase - phase.floor()
}

/// PolyBLEP residual for a unit step located at phase 0.
///
/// `t` is the normalised phase in [0, 1), `dt` the phase increment per sample.
#[inline]
fn poly_blep(t: f32, dt: f32) -> f32 {
    if t < dt {
        let t = t / dt;
        2.0 * t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}
