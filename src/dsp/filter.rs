use std::f32::consts::{PI, SQRT_2};

/*
Modulated Low-Pass Filter
=========================

The pulse oscillator is harmonically rich; the filter removes the upper
harmonics to shape the timbre. The filter envelope sweeps the cutoff from its
base value toward Nyquist and back, giving the classic "pluck" or "wow" of a
subtractive synth.

Topology
--------

Topology-preserving (trapezoidal) state-variable filter. Two integrators, two
state taps:

    ic1eq   first integrator memory (band-pass state)
    ic2eq   second integrator memory (low-pass state)

Coefficients:

    g = tan(π · cutoff / sample_rate)     prewarped integrator gain
    k = √2                                damping (Butterworth, no resonance)
    h = 1 / (1 + g·(g + k))

The TPT structure stays stable when g changes every sample, which is exactly
what envelope modulation does. Recomputing g is one `tan` and no branches.

Near Nyquist, tan() diverges, so the coefficient path limits the cutoff to
`MAX_CUTOFF_RATIO · sample_rate`. The reported cutoff is still the full
[0, Nyquist] value.

Envelope Modulation
-------------------

    cutoff = clamp(base + (nyquist - base) · env · strength, 0, nyquist)

With strength 0 the cutoff stays at base; with env = strength = 1 the filter
is fully open.
*/

/// Highest cutoff, as a fraction of the sample rate, used for coefficients.
const MAX_CUTOFF_RATIO: f32 = 0.49;

#[derive(Debug, Clone)]
pub struct SVFilter {
    ic1eq: f32,
    ic2eq: f32,

    sample_rate: f32,
    cutoff_hz: f32,
    g: f32,
}

impl SVFilter {
    pub fn lowpass(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            sample_rate,
            cutoff_hz: 0.0,
            g: 0.0,
        };
        filter.set_cutoff(cutoff_hz);
        filter
    }

    /// Set the cutoff in Hz (limited to [0, Nyquist]) and recompute `g`.
    #[inline]
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz.clamp(0.0, self.nyquist());
        let warped = self.cutoff_hz.min(self.sample_rate * MAX_CUTOFF_RATIO);
        self.g = (PI * warped / self.sample_rate).tan();
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> f32 {
        let g = self.g;
        let h = 1.0 / (1.0 + g * (g + SQRT_2));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        v2
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    #[inline]
    fn nyquist(&self) -> f32 {
        self.sample_rate * 0.5
    }
}

/// Cutoff after filter-envelope modulation, always within [0, nyquist].
#[inline]
pub fn modulated_cutoff(base_cutoff: f32, envelope: f32, strength: f32, nyquist: f32) -> f32 {
    let base = base_cutoff.clamp(0.0, nyquist);
    (base + (nyquist - base) * envelope * strength).clamp(0.0, nyquist)
}
