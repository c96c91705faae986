//! Per-sample parameter smoothing.

/*
Parameter Ramping
=================

Host automation arrives as "move this parameter to X over N samples". If the
voice jumped straight to X, any parameter that feeds the signal path (pulse
width, cutoff, pitch) would produce a step in the waveform and an audible
click. The ramper spreads the change over N samples instead.

Vocabulary
----------

  current     The value the render path sees right now.

  target      Where the ramp ends. This is also the parameter's "logical"
              value: what a UI or host reads back.

  increment   How much `current` moves per sample:

                  increment = (target - current) / duration

  remaining   Samples left before the ramp lands.


Landing Exactly
---------------

Adding a float increment N times rarely sums to the exact target. The last
step therefore assigns `target` instead of adding, so after N steps the value
is bit-identical to the target and stays there.

    start_ramp(0.3, 4) from 0.5, increment = -0.05

    call    returns   current after
    1       0.50      0.45
    2       0.45      0.40
    3       0.40      0.35
    4       0.35      0.30  (assigned, not accumulated)
    5       0.30      0.30


Preemption
----------

A new ramp always starts from the *current* value, never from the old
target. Reversing direction mid-ramp is therefore continuous.
*/

/// Linear ramp from the current value to a target over a sample count.
#[derive(Debug, Clone, Copy)]
pub struct ParameterRamper {
    current: f32,
    target: f32,
    increment: f32,
    remaining: u32,
}

impl ParameterRamper {
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
            increment: 0.0,
            remaining: 0,
        }
    }

    /// Jump to `value` with no transition.
    pub fn set_immediate(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.increment = 0.0;
        self.remaining = 0;
    }

    /// Ramp from wherever the value is now to `target` over `duration` samples.
    pub fn start_ramp(&mut self, target: f32, duration: u32) {
        if duration == 0 {
            self.set_immediate(target);
            return;
        }

        self.target = target;
        self.increment = (target - self.current) / duration as f32;
        self.remaining = duration;
    }

    /// Return the value for this sample, then advance one sample.
    #[inline]
    pub fn get_and_step(&mut self) -> f32 {
        if self.remaining == 0 {
            return self.target;
        }

        let value = self.current;
        self.remaining -= 1;
        if self.remaining == 0 {
            self.current = self.target;
        } else {
            self.current += self.increment;
        }
        value
    }

    /// Snap to the target, abandoning any ramp in flight.
    pub fn finish(&mut self) {
        self.set_immediate(self.target);
    }

    /// Logical value: where the parameter is headed.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Instantaneous interpolated value.
    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn is_ramping(&self) -> bool {
        self.remaining > 0
    }
}

impl Default for ParameterRamper {
    fn default() -> Self {
        Self::new(0.0)
    }
}
