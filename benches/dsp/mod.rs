//! Benchmarks for low-level DSP primitives.

mod envelope;
mod filter;
mod oscillator;
mod ramper;

pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
pub use ramper::bench_ramper;
