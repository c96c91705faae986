//! Benchmarks for the state-variable low-pass filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::filter::SVFilter;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| if (i / 32) % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let mut buffer = input.clone();

        // Fixed cutoff
        let mut filter = SVFilter::lowpass(SAMPLE_RATE, 1_000.0);
        group.bench_with_input(BenchmarkId::new("static", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer));
            })
        });

        // Cutoff recomputed every sample (the voice's envelope path)
        let mut filter = SVFilter::lowpass(SAMPLE_RATE, 1_000.0);
        group.bench_with_input(BenchmarkId::new("swept", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    filter.set_cutoff(200.0 + 8_000.0 * (i as f32 / size as f32));
                    *sample = filter.next_sample(input[i]);
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
