//! Benchmarks for the band-limited pulse oscillator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::dsp::oscillator::PulseOscillator;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Square wave, both edges corrected
        let mut osc = PulseOscillator::new(SAMPLE_RATE);
        osc.set_frequency(440.0);
        group.bench_with_input(BenchmarkId::new("square", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });

        // Narrow pulse at a high pitch: edges land in most blocks
        let mut osc = PulseOscillator::new(SAMPLE_RATE);
        osc.set_frequency(3_520.0);
        osc.set_pulse_width(0.05);
        group.bench_with_input(BenchmarkId::new("narrow_pulse", size), &size, |b, _| {
            b.iter(|| {
                osc.render(black_box(&mut buffer));
            })
        });

        // Pulse width changed every sample, as a ramp would
        let mut osc = PulseOscillator::new(SAMPLE_RATE);
        osc.set_frequency(220.0);
        group.bench_with_input(BenchmarkId::new("pwm_per_sample", size), &size, |b, _| {
            b.iter(|| {
                for (i, sample) in buffer.iter_mut().enumerate() {
                    osc.set_pulse_width(0.1 + 0.4 * (i as f32 / size as f32));
                    *sample = osc.next_sample();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
