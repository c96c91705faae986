//! monosynth - plays a short arpeggio through the default output device.
//!
//! Run with: cargo run --features playback
//! Set RUST_LOG=debug for engine lifecycle logging.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info, warn};
use monosynth::{
    synth::{message::SynthMessage, mono::MonoSynth},
    EngineConfig, ParameterId,
};
use rtrb::{Producer, RingBuffer};

const QUEUE_CAPACITY: usize = 256;
const NOTE_MS: u64 = 220;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::init();

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    info!("output: {} Hz, {} channels", sample_rate, channels);

    let engine_config = EngineConfig::new(sample_rate, 1).with_max_frames(1_024);
    let (mut tx, rx) = RingBuffer::<SynthMessage>::new(QUEUE_CAPACITY);
    let mut synth = MonoSynth::new(engine_config, rx)?;

    // The callbacks only count failures; the main thread does the logging.
    let faults = Arc::new(AudioFaults::default());
    let render_faults = Arc::clone(&faults);
    let stream_faults = Arc::clone(&faults);

    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            if synth.render_interleaved(data, channels).is_err() {
                data.fill(0.0);
                render_faults.render.fetch_add(1, Ordering::Relaxed);
            }
        },
        move |_| {
            stream_faults.stream.fetch_add(1, Ordering::Relaxed);
        },
        None,
    )?;
    stream.play()?;

    send(&mut tx, SynthMessage::SetParameter {
        id: ParameterId::AttackDuration,
        value: 0.005,
    });
    send(&mut tx, SynthMessage::SetParameter {
        id: ParameterId::ReleaseDuration,
        value: 0.3,
    });
    send(&mut tx, SynthMessage::SetParameter {
        id: ParameterId::FilterCutoffFrequency,
        value: 400.0,
    });
    send(&mut tx, SynthMessage::SetParameter {
        id: ParameterId::FilterEnvelopeStrength,
        value: 0.2,
    });
    send(&mut tx, SynthMessage::SetParameter {
        id: ParameterId::FilterDecayDuration,
        value: 0.15,
    });
    send(&mut tx, SynthMessage::SetParameter {
        id: ParameterId::FilterSustainLevel,
        value: 0.1,
    });

    let arpeggio = [45u8, 52, 57, 60, 64, 60, 57, 52];
    let sweep_samples = (sample_rate * 2.0) as u32;

    for bar in 0..4 {
        let width = if bar % 2 == 0 { 0.1 } else { 0.5 };
        send(&mut tx, SynthMessage::RampParameter {
            id: ParameterId::PulseWidth,
            target: width,
            duration: sweep_samples,
        });

        for &note in &arpeggio {
            send(&mut tx, SynthMessage::NoteOn { note, velocity: 100 });
            thread::sleep(Duration::from_millis(NOTE_MS));
            send(&mut tx, SynthMessage::NoteOff { note, velocity: 0 });
            faults.report();
        }
    }

    send(&mut tx, SynthMessage::AllNotesOff);
    thread::sleep(Duration::from_millis(500));
    faults.report();
    Ok(())
}

/// Failure counters shared with the audio callbacks.
#[derive(Default)]
struct AudioFaults {
    render: AtomicUsize,
    stream: AtomicUsize,
}

impl AudioFaults {
    /// Log and clear whatever the callbacks recorded since the last call.
    fn report(&self) {
        let render = self.render.swap(0, Ordering::Relaxed);
        if render > 0 {
            error!("{render} audio callbacks failed to render and were silenced");
        }
        let stream = self.stream.swap(0, Ordering::Relaxed);
        if stream > 0 {
            error!("audio stream reported {stream} errors");
        }
    }
}

fn send(tx: &mut Producer<SynthMessage>, msg: SynthMessage) {
    if tx.push(msg).is_err() {
        warn!("control queue full, dropped {msg:?}");
    }
}
