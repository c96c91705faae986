//! Real-world scenario benchmarks.
//!
//! Whole-voice rendering and engine blocks split by scheduled events.

mod engine;
mod voice;

pub use engine::bench_engine;
pub use voice::bench_voice;
