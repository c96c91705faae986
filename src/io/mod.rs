// Purpose - external interfaces, format conversions

pub mod converter;
pub mod midi;

/// Planar output buffers, one `Vec` per channel.
///
/// Allocated by the caller ahead of time; the engine only writes into the
/// existing storage and never resizes it.
#[derive(Debug, Default, Clone)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioOutput {
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    /// Frames every channel can hold.
    pub fn frames(&self) -> usize {
        self.buffers.iter().map(Vec::len).min().unwrap_or(0)
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.buffers[index]
    }

    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.fill(0.0);
        }
    }
}
