//! Benchmarks for full render calls through the engine: scheduling, voice
//! and fan-out to the output channels.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::{io::AudioOutput, EngineConfig, ParameterId, RenderEvent, SynthEngine};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");
    let config = EngineConfig::new(SAMPLE_RATE, 2);

    for &size in BLOCK_SIZES {
        let mut output = AudioOutput::new(2, size);

        // One held note, no events
        let mut engine = SynthEngine::new(config).expect("valid config");
        engine.handle_event(&RenderEvent::note_on(0, 48, 100));
        group.bench_with_input(BenchmarkId::new("no_events", size), &size, |b, _| {
            b.iter(|| {
                engine
                    .process_block(0, size, black_box(&[] as &[RenderEvent]), &mut output)
                    .expect("render");
            })
        });

        // Sixteen events spread across the block: sixteen segments
        let events: Vec<RenderEvent> = (0..16u32)
            .map(|i| {
                let offset = i * size as u32 / 16;
                if i % 2 == 0 {
                    RenderEvent::note_on(offset, 48 + i as u8, 100)
                } else {
                    RenderEvent::ramp(offset, ParameterId::PulseWidth, 0.1 + 0.02 * i as f32, 32)
                }
            })
            .collect();
        let mut engine = SynthEngine::new(config).expect("valid config");
        group.bench_with_input(BenchmarkId::new("split_16", size), &size, |b, _| {
            b.iter(|| {
                engine
                    .process_block(0, size, black_box(&events), &mut output)
                    .expect("render");
            })
        });
    }

    group.finish();
}
