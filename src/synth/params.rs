//! Parameter identifiers and the per-voice dispatch table.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::ramper::ParameterRamper;

/// Longest stage time, in seconds, accepted for any envelope parameter.
pub const MAX_STAGE_SECONDS: f32 = 99.0;

/// Highest filter cutoff accepted from the host. The voice further limits
/// the cutoff to its own Nyquist frequency.
pub const MAX_CUTOFF_HZ: f32 = 22_050.0;

/// Stable parameter addresses, in host order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParameterId {
    AttackDuration = 0,
    DecayDuration,
    SustainLevel,
    ReleaseDuration,
    PitchBend,
    PulseWidth,
    FilterCutoffFrequency,
    FilterAttackDuration,
    FilterDecayDuration,
    FilterSustainLevel,
    FilterReleaseDuration,
    FilterEnvelopeStrength,
}

impl ParameterId {
    pub const COUNT: usize = 12;

    pub const ALL: [ParameterId; Self::COUNT] = [
        ParameterId::AttackDuration,
        ParameterId::DecayDuration,
        ParameterId::SustainLevel,
        ParameterId::ReleaseDuration,
        ParameterId::PitchBend,
        ParameterId::PulseWidth,
        ParameterId::FilterCutoffFrequency,
        ParameterId::FilterAttackDuration,
        ParameterId::FilterDecayDuration,
        ParameterId::FilterSustainLevel,
        ParameterId::FilterReleaseDuration,
        ParameterId::FilterEnvelopeStrength,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a parameter by its numeric host address.
    pub fn from_address(address: u64) -> Option<Self> {
        Self::ALL.get(usize::try_from(address).ok()?).copied()
    }

    /// Range applied to ramp targets arriving as render events.
    pub fn ramp_range(self) -> ParamRange {
        match self {
            ParameterId::PitchBend => ParamRange::new(-24.0, 24.0),
            ParameterId::PulseWidth => ParamRange::new(0.01, 0.5),
            _ => self.shared_range(),
        }
    }

    /// Range applied by `set_parameter`.
    ///
    /// PulseWidth and PitchBend accept a wider range here than on the ramp
    /// path.
    pub fn direct_range(self) -> ParamRange {
        match self {
            ParameterId::PitchBend => ParamRange::new(-48.0, 48.0),
            ParameterId::PulseWidth => ParamRange::new(0.0, 1.0),
            _ => self.shared_range(),
        }
    }

    fn shared_range(self) -> ParamRange {
        match self {
            ParameterId::AttackDuration
            | ParameterId::DecayDuration
            | ParameterId::ReleaseDuration
            | ParameterId::FilterAttackDuration
            | ParameterId::FilterDecayDuration
            | ParameterId::FilterReleaseDuration => ParamRange::new(0.0, MAX_STAGE_SECONDS),
            ParameterId::SustainLevel
            | ParameterId::FilterSustainLevel
            | ParameterId::FilterEnvelopeStrength => ParamRange::new(0.0, 1.0),
            ParameterId::FilterCutoffFrequency => ParamRange::new(0.0, MAX_CUTOFF_HZ),
            ParameterId::PitchBend => ParamRange::new(-24.0, 24.0),
            ParameterId::PulseWidth => ParamRange::new(0.01, 0.5),
        }
    }

    /// Power-on value.
    pub fn default_value(self) -> f32 {
        match self {
            ParameterId::AttackDuration
            | ParameterId::DecayDuration
            | ParameterId::ReleaseDuration
            | ParameterId::FilterAttackDuration
            | ParameterId::FilterDecayDuration
            | ParameterId::FilterReleaseDuration => 0.1,
            ParameterId::SustainLevel | ParameterId::FilterSustainLevel => 1.0,
            ParameterId::PitchBend => 0.0,
            ParameterId::PulseWidth => 0.5,
            ParameterId::FilterCutoffFrequency => MAX_CUTOFF_HZ,
            ParameterId::FilterEnvelopeStrength => 1.0,
        }
    }
}

/// Inclusive clamp range for a parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, Copy)]
struct ParamSlot {
    ramper: ParameterRamper,
    ramp_range: ParamRange,
    direct_range: ParamRange,
}

impl ParamSlot {
    fn new(id: ParameterId) -> Self {
        Self {
            ramper: ParameterRamper::new(id.default_value()),
            ramp_range: id.ramp_range(),
            direct_range: id.direct_range(),
        }
    }
}

/// One sample's worth of smoothed parameter values.
#[derive(Debug, Clone, Copy)]
pub struct ParamFrame([f32; ParameterId::COUNT]);

impl ParamFrame {
    #[inline]
    pub fn get(&self, id: ParameterId) -> f32 {
        self.0[id.index()]
    }
}

/// Fixed-size table of rampers indexed by [`ParameterId`].
#[derive(Debug, Clone)]
pub struct ParameterSet {
    slots: [ParamSlot; ParameterId::COUNT],
}

impl ParameterSet {
    pub fn new() -> Self {
        Self {
            slots: ParameterId::ALL.map(ParamSlot::new),
        }
    }

    /// Immediate, non-ramped change through the direct range.
    pub fn set(&mut self, id: ParameterId, value: f32) {
        let slot = &mut self.slots[id.index()];
        slot.ramper.set_immediate(slot.direct_range.clamp(value));
    }

    /// Logical (target) value, not the instantaneous interpolated one.
    pub fn get(&self, id: ParameterId) -> f32 {
        self.slots[id.index()].ramper.target()
    }

    /// Start a ramp through the ramp range.
    pub fn start_ramp(&mut self, id: ParameterId, target: f32, duration: u32) {
        let slot = &mut self.slots[id.index()];
        slot.ramper.start_ramp(slot.ramp_range.clamp(target), duration);
    }

    /// Advance every ramper by one sample.
    #[inline]
    pub fn step(&mut self) -> ParamFrame {
        let mut values = [0.0; ParameterId::COUNT];
        for (value, slot) in values.iter_mut().zip(self.slots.iter_mut()) {
            *value = slot.ramper.get_and_step();
        }
        ParamFrame(values)
    }

    /// Instantaneous value of one parameter.
    pub fn current(&self, id: ParameterId) -> f32 {
        self.slots[id.index()].ramper.value()
    }

    /// Snap every ramp in flight to its target.
    pub fn finish_ramps(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.ramper.finish();
        }
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new()
    }
}
