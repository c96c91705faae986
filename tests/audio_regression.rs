use monosynth::{
    io::AudioOutput, synth::voice::Voice, EngineConfig, EngineError, ParameterId, RenderEvent,
    SynthEngine, OUTPUT_GAIN,
};

const SR: f32 = 48_000.0;

fn engine() -> SynthEngine {
    SynthEngine::new(EngineConfig::new(SR, 2)).expect("valid config")
}

fn render(engine: &mut SynthEngine, frames: usize, events: &[RenderEvent]) -> Vec<f32> {
    let mut output = AudioOutput::new(2, frames);
    let start = engine.sample_time();
    engine
        .process_block(start, frames, events, &mut output)
        .expect("render");
    assert_eq!(output.buffers[0], output.buffers[1]);
    output.buffers.swap_remove(0)
}

#[test]
fn silent_until_a_note_arrives() {
    let mut engine = engine();
    let out = render(&mut engine, 256, &[RenderEvent::note_on(128, 60, 100)]);

    assert!(out[..128].iter().all(|&s| s == 0.0));
    assert!(out[128..].iter().any(|&s| s != 0.0));
}

#[test]
fn ramp_event_splits_the_block_at_its_offset() {
    let mut engine = engine();
    let events = [
        RenderEvent::note_on(0, 60, 100),
        RenderEvent::ramp(100, ParameterId::PulseWidth, 0.3, 50),
    ];
    let out = render(&mut engine, 200, &events);

    // Same timeline driven by hand.
    let mut voice = Voice::new(SR);
    voice.note_on(60, 100);
    let mut expected = vec![0.0f32; 200];

    voice.process(&mut expected[..100]);
    assert!(voice.gate());
    assert_eq!(voice.pulse_width(), 0.5);

    voice.start_ramp(ParameterId::PulseWidth, 0.3, 50);
    voice.process(&mut expected[100..150]);
    assert!(voice.pulse_width() < 0.5 && voice.pulse_width() > 0.3);

    // Frame 150 is the first one rendered at the target.
    voice.process(&mut expected[150..151]);
    assert_eq!(voice.pulse_width(), 0.3);

    voice.process(&mut expected[151..]);

    for (got, want) in out.iter().zip(&expected) {
        assert_eq!(*got, want * OUTPUT_GAIN);
    }
    assert_eq!(engine.voice().pulse_width(), 0.3);
    assert_eq!(engine.get_parameter(ParameterId::PulseWidth), 0.3);
}

#[test]
fn simultaneous_independent_events_commute() {
    let a = RenderEvent::ramp(64, ParameterId::PulseWidth, 0.2, 32);
    let b = RenderEvent::ramp(64, ParameterId::FilterCutoffFrequency, 900.0, 32);
    let note = RenderEvent::note_on(0, 57, 90);

    let mut first = engine();
    let mut second = engine();
    let out_ab = render(&mut first, 256, &[note, a, b]);
    let out_ba = render(&mut second, 256, &[note, b, a]);

    assert_eq!(out_ab, out_ba);
}

#[test]
fn note_frequencies_follow_equal_temperament() {
    let mut engine = engine();
    render(&mut engine, 16, &[RenderEvent::note_on(0, 69, 100)]);
    assert!((engine.voice().oscillator_frequency() - 440.0).abs() < 1e-3);

    render(&mut engine, 16, &[RenderEvent::note_on(0, 60, 100)]);
    assert!((engine.voice().oscillator_frequency() - 261.63).abs() < 0.01);
}

#[test]
fn pitch_bend_moves_the_oscillator() {
    let mut engine = engine();
    engine.set_parameter(ParameterId::PitchBend, 12.0);
    render(&mut engine, 16, &[RenderEvent::note_on(0, 69, 100)]);

    assert!((engine.voice().oscillator_frequency() - 880.0).abs() < 1e-2);
}

#[test]
fn cutoff_never_exceeds_nyquist() {
    let mut engine = SynthEngine::new(EngineConfig::new(22_050.0, 1)).expect("valid config");
    engine.set_parameter(ParameterId::FilterCutoffFrequency, 1.0e9);
    engine.set_parameter(ParameterId::FilterEnvelopeStrength, 1.0);
    engine.set_parameter(ParameterId::AttackDuration, 0.0);

    let mut output = AudioOutput::new(1, 512);
    engine
        .process_block(0, 512, &[RenderEvent::note_on(0, 100, 127)], &mut output)
        .expect("render");

    let cutoff = engine.voice().filter_cutoff();
    assert!((0.0..=11_025.0).contains(&cutoff));
    assert!(output.buffers[0].iter().all(|s| s.is_finite()));
}

#[test]
fn note_off_for_other_note_keeps_gate_open() {
    let mut engine = engine();
    render(
        &mut engine,
        128,
        &[
            RenderEvent::note_on(0, 60, 100),
            RenderEvent::note_off(64, 62, 0),
        ],
    );
    assert!(engine.voice().gate());

    render(&mut engine, 128, &[RenderEvent::note_off(0, 60, 0)]);
    assert!(!engine.voice().gate());
}

#[test]
fn release_decays_to_silence() {
    let mut engine = engine();
    engine.set_parameter(ParameterId::ReleaseDuration, 0.05);
    render(&mut engine, 512, &[RenderEvent::note_on(0, 48, 100)]);
    render(&mut engine, 512, &[RenderEvent::note_off(0, 48, 0)]);

    // 0.05 s at 48 kHz is 2400 samples.
    for _ in 0..6 {
        render(&mut engine, 512, &[]);
    }
    assert!(!engine.voice().is_active());
    assert!(render(&mut engine, 512, &[]).iter().all(|&s| s == 0.0));
}

#[test]
fn output_stays_bounded() {
    let mut engine = engine();
    engine.set_parameter(ParameterId::AttackDuration, 0.0);
    let events = [
        RenderEvent::note_on(0, 36, 127),
        RenderEvent::ramp(0, ParameterId::PulseWidth, 0.1, 400),
        RenderEvent::ramp(100, ParameterId::PitchBend, 12.0, 300),
        RenderEvent::note_on(250, 84, 127),
        RenderEvent::ramp(300, ParameterId::FilterCutoffFrequency, 50.0, 100),
    ];

    let mut out = render(&mut engine, 512, &events);
    for _ in 0..4 {
        out.extend(render(&mut engine, 512, &[]));
    }

    assert!(out.iter().all(|s| s.is_finite() && s.abs() <= 1.0));
}

#[test]
fn render_errors_leave_state_untouched() {
    let mut engine = engine();
    engine.handle_event(&RenderEvent::note_on(0, 60, 100));

    let mut output = AudioOutput::new(2, 1_024);
    assert!(matches!(
        engine.process_block(0, 1_024, &[], &mut output),
        Err(EngineError::TooManyFrames { .. })
    ));
    assert!(output.buffers.iter().flatten().all(|&s| s == 0.0));
    assert_eq!(engine.voice().amp_envelope_level(), 0.0);
    assert_eq!(engine.sample_time(), 0);
}

#[test]
fn deallocated_engine_refuses_to_render_until_reallocated() {
    let mut engine = engine();
    let mut output = AudioOutput::new(2, 64);

    engine.deallocate_render_resources();
    assert_eq!(
        engine.process_block(0, 64, &[], &mut output),
        Err(EngineError::NotAllocated)
    );

    engine.allocate_render_resources();
    assert_eq!(engine.process_block(0, 64, &[], &mut output), Ok(()));
}

#[test]
fn parameter_addresses_are_stable() {
    assert_eq!(ParameterId::from_address(0), Some(ParameterId::AttackDuration));
    assert_eq!(ParameterId::from_address(5), Some(ParameterId::PulseWidth));
    assert_eq!(
        ParameterId::from_address(11),
        Some(ParameterId::FilterEnvelopeStrength)
    );
    assert_eq!(ParameterId::from_address(12), None);
}
