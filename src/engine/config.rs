#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;

pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
pub const DEFAULT_CHANNELS: usize = 2;
pub const DEFAULT_MAX_FRAMES: usize = 512;

/// Host-supplied render configuration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Every channel receives the same mono signal.
    pub channels: usize,
    /// Largest `frame_count` accepted by a single render call.
    pub max_frames: usize,
}

impl EngineConfig {
    pub fn new(sample_rate: f32, channels: usize) -> Self {
        Self {
            sample_rate,
            channels,
            ..Self::default()
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn nyquist(&self) -> f32 {
        self.sample_rate * 0.5
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(EngineError::InvalidSampleRate(self.sample_rate));
        }
        if self.channels == 0 {
            return Err(EngineError::NoChannels);
        }
        if self.max_frames == 0 {
            return Err(EngineError::ZeroMaxFrames);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_sample_rates() {
        for rate in [0.0, -44_100.0, f32::NAN, f32::INFINITY] {
            let config = EngineConfig::default().with_sample_rate(rate);
            assert!(matches!(
                config.validate(),
                Err(EngineError::InvalidSampleRate(_))
            ));
        }
    }

    #[test]
    fn rejects_zero_channels_and_frames() {
        assert_eq!(
            EngineConfig::default().with_channels(0).validate(),
            Err(EngineError::NoChannels)
        );
        assert_eq!(
            EngineConfig::default().with_max_frames(0).validate(),
            Err(EngineError::ZeroMaxFrames)
        );
    }
}
