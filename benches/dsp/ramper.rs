//! Benchmarks for the linear parameter ramper.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::ramper::ParameterRamper;

use crate::BLOCK_SIZES;

pub fn bench_ramper(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/ramper");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Settled: returns the same value every step
        let mut ramper = ParameterRamper::new(0.5);
        group.bench_with_input(BenchmarkId::new("settled", size), &size, |b, _| {
            b.iter(|| {
                for sample in buffer.iter_mut() {
                    *sample = ramper.get_and_step();
                }
                black_box(&buffer);
            })
        });

        // Restarted each iteration so every step is a live ramp
        let mut ramper = ParameterRamper::new(0.0);
        group.bench_with_input(BenchmarkId::new("ramping", size), &size, |b, _| {
            b.iter(|| {
                ramper.start_ramp(black_box(1.0), size as u32);
                for sample in buffer.iter_mut() {
                    *sample = ramper.get_and_step();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
