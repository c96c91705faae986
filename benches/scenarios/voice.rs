//! Benchmarks for the complete voice: oscillator, filter, two envelopes and
//! twelve rampers, all evaluated per sample.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use monosynth::{synth::voice::Voice, ParameterId};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_voice(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voice");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Idle: no note, parameters settled
        let mut idle = Voice::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                idle.process(black_box(&mut buffer));
            })
        });

        // Held note with the filter envelope driving the cutoff
        let mut held = Voice::new(SAMPLE_RATE);
        held.set_parameter(ParameterId::FilterCutoffFrequency, 300.0);
        held.set_parameter(ParameterId::FilterEnvelopeStrength, 0.5);
        held.set_parameter(ParameterId::FilterSustainLevel, 0.3);
        held.note_on(45, 100);
        group.bench_with_input(BenchmarkId::new("held_note", size), &size, |b, _| {
            b.iter(|| {
                held.process(black_box(&mut buffer));
            })
        });

        // Held note with pitch and pulse width ramping throughout
        let mut swept = Voice::new(SAMPLE_RATE);
        swept.note_on(57, 100);
        group.bench_with_input(BenchmarkId::new("ramping", size), &size, |b, _| {
            b.iter(|| {
                swept.start_ramp(ParameterId::PitchBend, 2.0, size as u32);
                swept.start_ramp(ParameterId::PulseWidth, 0.1, size as u32);
                swept.process(black_box(&mut buffer));
                swept.start_ramp(ParameterId::PitchBend, 0.0, size as u32);
                swept.start_ramp(ParameterId::PulseWidth, 0.5, size as u32);
                swept.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
