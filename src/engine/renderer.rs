use crate::engine::event::RenderEvent;

/// What the scheduler drives: something that applies events and renders
/// contiguous spans of the current block.
pub trait SegmentRenderer {
    /// Apply one event. Called between segments, never mid-segment.
    fn handle_event(&mut self, event: &RenderEvent);

    /// Render `frames` frames starting `buffer_offset` frames into the block.
    fn render(&mut self, buffer_offset: usize, frames: usize);
}
