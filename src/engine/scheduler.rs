use crate::engine::{event::RenderEvent, renderer::SegmentRenderer};

/*
Sample-Accurate Event Scheduling
================================

A render call covers a whole block, but events land anywhere inside it. The
block is cut at every event offset so each event takes effect on exactly the
sample it was scheduled for:

    offset   0         100            150                 200
             │ note on  │ ramp start                         │
             ▼          ▼                                    │
    block    [ segment 0..100 ][ segment 100..200           ]

Events sharing an offset are applied together, with no audio rendered between
them. Events at offset 0 are therefore applied before the first sample.

Events are expected in non-decreasing offset order. An event whose offset is
already behind the cursor joins the current batch; an event at or past the
end of the block is applied after the last segment, so its effect starts with
the next block.
*/

/// Render `frame_count` frames, applying `events` at their offsets.
pub fn process_with_events<R>(renderer: &mut R, frame_count: usize, events: &[RenderEvent])
where
    R: SegmentRenderer + ?Sized,
{
    let mut now = 0usize;
    let mut frames_remaining = frame_count;
    let mut cursor = 0usize;

    while frames_remaining > 0 {
        let Some(next) = events.get(cursor) else {
            renderer.render(now, frames_remaining);
            return;
        };

        let frames_this_segment = (next.offset as usize)
            .saturating_sub(now)
            .min(frames_remaining);

        if frames_this_segment > 0 {
            renderer.render(now, frames_this_segment);
            frames_remaining -= frames_this_segment;
            now += frames_this_segment;
        }

        if frames_remaining == 0 {
            break;
        }

        cursor = perform_simultaneous_events(renderer, events, cursor, now);
    }

    for event in &events[cursor..] {
        renderer.handle_event(event);
    }
}

/// Apply the event at `cursor` and every following event due at or before
/// `now`. Returns the new cursor.
fn perform_simultaneous_events<R>(
    renderer: &mut R,
    events: &[RenderEvent],
    mut cursor: usize,
    now: usize,
) -> usize
where
    R: SegmentRenderer + ?Sized,
{
    while let Some(event) = events.get(cursor) {
        if event.offset as usize > now {
            break;
        }
        renderer.handle_event(event);
        cursor += 1;
    }
    cursor
}
