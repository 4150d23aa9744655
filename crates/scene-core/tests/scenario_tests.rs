// Frame orchestration: transport gating, control retuning, render commands.

use scene_core::constants::{GROWTH_IDLE, TRACK_COUNT};
use scene_core::{
    summarize, FrameInput, PixelFrame, SceneConfig, Scenario, TransportAction, TransportState,
    VisualControlState,
};
use std::time::Duration;

fn dt() -> Duration {
    Duration::from_secs_f32(1.0 / 60.0)
}

#[test]
fn transport_starts_stopped_and_gates_pause() {
    let mut sc = Scenario::new(SceneConfig::default());
    assert_eq!(sc.transport().state(), TransportState::Stopped);

    // Pause from stopped is a no-op.
    sc.on_transport(TransportAction::Pause);
    assert_eq!(sc.transport().state(), TransportState::Stopped);

    sc.on_transport(TransportAction::Play);
    assert_eq!(sc.transport().state(), TransportState::Playing);
    sc.on_transport(TransportAction::Pause);
    assert_eq!(sc.transport().state(), TransportState::Paused);
    sc.on_transport(TransportAction::Play);
    assert_eq!(sc.transport().state(), TransportState::Playing);
    sc.on_transport(TransportAction::Stop);
    assert_eq!(sc.transport().state(), TransportState::Stopped);
}

#[test]
fn mute_toggle_returns_gain_and_rejects_bad_track() {
    let mut sc = Scenario::new(SceneConfig::default());
    assert_eq!(sc.on_toggle_mute(0), Some(0.0));
    assert_eq!(sc.on_toggle_mute(0), Some(1.0));
    assert_eq!(sc.on_toggle_mute(TRACK_COUNT), None);
}

#[test]
fn quiet_spectra_settle_on_the_idle_mappings() {
    let quiet = [0u8; 256];
    let s = summarize(&quiet).unwrap();
    let mut control = VisualControlState::from_config(&SceneConfig::default());
    control.retune(Some(&s), Some(&s));
    // Bass gate holds the idle growth, silence maps the rest linearly.
    assert_eq!(control.growth_factor, GROWTH_IDLE);
    assert!((control.afterimage_damp - 0.375).abs() < 1e-6);
    assert!((control.light_intensity - 0.5).abs() < 1e-6);
    assert!((control.bloom_strength - 1.67).abs() < 1e-6);
}

#[test]
fn loud_bass_drives_growth_through_the_gate() {
    // Lower band saturated: lower_max_fr = 255/127 for a 256-bin snapshot.
    let mut snapshot = [0u8; 256];
    for s in snapshot.iter_mut().take(127) {
        *s = 255;
    }
    let s = summarize(&snapshot).unwrap();
    let mut control = VisualControlState::default();
    control.retune(Some(&s), None);
    let reduced = (255.0f32 / 127.0).powf(0.8);
    let expected = 0.42 + reduced * (1.67 - 0.42);
    assert!((control.growth_factor - expected).abs() < 1e-4);
    // No lights summary: those channels are untouched.
    assert_eq!(control.light_intensity, 0.0);
}

#[test]
fn missing_summaries_hold_previous_values() {
    let mut control = VisualControlState::default();
    let before = control;
    control.retune(None, None);
    assert_eq!(control, before);
}

#[test]
fn default_control_is_seeded_from_the_default_config() {
    let config = SceneConfig::default();
    let control = VisualControlState::default();
    assert_eq!(control, VisualControlState::from_config(&config));
    assert_eq!(control.bloom_strength, config.bloom.strength);
    assert_eq!(control.afterimage_damp, config.afterimage.damp);
}

#[test]
fn tick_only_advances_while_playing() {
    let mut sc = Scenario::new(SceneConfig::default());
    let idle = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    let idle2 = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    assert_eq!(idle.eye, idle2.eye);

    sc.on_transport(TransportAction::Play);
    let a = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    let b = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    assert_ne!(a.eye, b.eye);

    sc.on_transport(TransportAction::Pause);
    let c = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    let d = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    assert_eq!(c.eye, d.eye);
}

#[test]
fn tick_retunes_control_from_spectra_while_playing() {
    let mut sc = Scenario::new(SceneConfig::default());
    sc.on_transport(TransportAction::Play);
    let quiet = [0u8; 256];
    let cmd = sc.tick(FrameInput {
        dt: dt(),
        effects_spectrum: Some(&quiet),
        lights_spectrum: Some(&quiet),
        ..Default::default()
    });
    assert!((cmd.afterimage_damp - 0.375).abs() < 1e-6);
    assert!((cmd.light_intensity - 0.5).abs() < 1e-6);
    assert!((cmd.bloom_strength - 1.67).abs() < 1e-6);
}

#[test]
fn malformed_spectrum_is_dropped_not_fatal() {
    let mut sc = Scenario::new(SceneConfig::default());
    sc.on_transport(TransportAction::Play);
    let baseline = *sc.control();
    let odd = [1u8, 2, 3];
    sc.tick(FrameInput {
        dt: dt(),
        effects_spectrum: Some(&odd),
        lights_spectrum: Some(&odd),
        ..Default::default()
    });
    assert_eq!(*sc.control(), baseline);
}

#[test]
fn webcam_attach_is_one_shot_and_drives_dirty_flag() {
    let mut sc = Scenario::new(SceneConfig::default());
    assert!(sc.particles().is_none());

    let buf = vec![0u8; 2 * 2 * 4];
    let frame = PixelFrame::new(2, 2, &buf).unwrap();

    // No field yet: pixel frames are ignored.
    let cmd = sc.tick(FrameInput {
        dt: dt(),
        pixels: Some(frame),
        ..Default::default()
    });
    assert!(!cmd.particles_dirty);

    sc.attach_webcam(2, 2);
    assert_eq!(sc.particles().map(|f| f.len()), Some(4));
    // Repeat grant is ignored.
    sc.attach_webcam(8, 8);
    assert_eq!(sc.particles().map(|f| f.len()), Some(4));

    let cmd = sc.tick(FrameInput {
        dt: dt(),
        pixels: Some(frame),
        ..Default::default()
    });
    assert!(cmd.particles_dirty);

    // A frame of the wrong size is skipped, not applied.
    let wrong = vec![0u8; 3 * 3 * 4];
    let wrong_frame = PixelFrame::new(3, 3, &wrong).unwrap();
    let cmd = sc.tick(FrameInput {
        dt: dt(),
        pixels: Some(wrong_frame),
        ..Default::default()
    });
    assert!(!cmd.particles_dirty);
}

#[test]
fn absent_mouse_input_keeps_the_target_at_the_origin() {
    let mut sc = Scenario::new(SceneConfig::default());
    sc.on_transport(TransportAction::Play);
    for _ in 0..3 {
        let cmd = sc.tick(FrameInput {
            dt: dt(),
            ..Default::default()
        });
        assert_eq!(cmd.target, glam::Vec3::ZERO);
    }
}

#[test]
fn particle_spin_accumulates_only_while_playing() {
    let mut sc = Scenario::new(SceneConfig::default());
    let idle = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    assert_eq!(idle.particle_rotation, 0.0);

    sc.on_transport(TransportAction::Play);
    let a = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    let b = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    assert!(a.particle_rotation > 0.0);
    assert!(b.particle_rotation > a.particle_rotation);
    // One reference frame advances by the configured per-frame step.
    let step = SceneConfig::default().particles.velocity;
    assert!((b.particle_rotation - a.particle_rotation - step).abs() < 1e-5);

    sc.on_transport(TransportAction::Pause);
    let c = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    assert_eq!(c.particle_rotation, b.particle_rotation);
}

#[test]
fn mouse_steers_the_look_at_target() {
    let mut sc = Scenario::new(SceneConfig::default());
    let centered = sc.tick(FrameInput {
        dt: dt(),
        mouse_uv: Some([0.5, 0.5]),
        ..Default::default()
    });
    assert_eq!(centered.target, glam::Vec3::ZERO);

    let right = sc.tick(FrameInput {
        dt: dt(),
        mouse_uv: Some([1.0, 0.5]),
        ..Default::default()
    });
    assert!(right.target.x > 0.0);
    assert_eq!(right.target.y, 0.0);

    let up = sc.tick(FrameInput {
        dt: dt(),
        mouse_uv: Some([0.5, 0.0]),
        ..Default::default()
    });
    assert!(up.target.y > 0.0);
}

#[test]
fn render_command_carries_film_config() {
    let mut sc = Scenario::new(SceneConfig::default());
    sc.config_mut().set_film_grayscale(true);
    sc.config_mut().set_film_noise_intensity(1.2).unwrap();
    let cmd = sc.tick(FrameInput {
        dt: dt(),
        ..Default::default()
    });
    assert!(cmd.film_grayscale);
    assert!((cmd.film_noise - 1.2).abs() < 1e-6);
    assert_eq!(cmd.film_scanline_count, 256.0);
    assert_eq!(cmd.bloom_threshold, 0.0);
    assert!((cmd.bloom_radius - 0.57).abs() < 1e-6);
    assert!((cmd.bloom_exposure - 0.7619).abs() < 1e-6);
}
