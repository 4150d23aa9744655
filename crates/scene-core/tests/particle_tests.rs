// Particle field layout and webcam-driven displacement.

use scene_core::constants::{PARTICLE_LIFT, PARTICLE_SPACING};
use scene_core::{Error, ParticleField, PixelFrame};

#[test]
fn grid_is_centered_row_major() {
    let field = ParticleField::new(4, 2);
    assert_eq!(field.len(), 8);
    let v = field.vertices();
    // First particle is pixel (0, 0): +x side, -z side.
    assert!((v[0].position[0] - PARTICLE_SPACING * 2.0).abs() < 1e-6);
    assert!((v[0].position[2] - PARTICLE_SPACING * -1.0).abs() < 1e-6);
    // Second particle steps one pixel in x.
    assert!((v[1].position[0] - PARTICLE_SPACING * 1.0).abs() < 1e-6);
    // Second row steps one pixel in z.
    assert!((v[4].position[2] - 0.0).abs() < 1e-6);
    // Everything starts on the ground plane, colored white.
    for p in v {
        assert_eq!(p.position[1], 0.0);
        assert_eq!(p.color, [1.0, 1.0, 1.0]);
    }
}

#[test]
fn pixel_frame_validates_buffer_length() {
    let buf = vec![0u8; 4 * 2 * 4];
    assert!(PixelFrame::new(4, 2, &buf).is_ok());
    assert_eq!(
        PixelFrame::new(4, 2, &buf[..30]).unwrap_err(),
        Error::PixelFrameTruncated {
            len: 30,
            expected: 32
        }
    );
}

#[test]
fn darker_pixels_rise_further() {
    let mut field = ParticleField::new(2, 1);
    // One black pixel, one white pixel.
    let buf = [0, 0, 0, 255, 255, 255, 255, 255];
    let frame = PixelFrame::new(2, 1, &buf).unwrap();
    field.update(&frame, 1.0).unwrap();
    let v = field.vertices();
    assert!((v[0].position[1] - PARTICLE_LIFT).abs() < 1e-6);
    assert_eq!(v[1].position[1], 0.0);
    assert_eq!(v[0].color, [0.0, 0.0, 0.0]);
    assert_eq!(v[1].color, [1.0, 1.0, 1.0]);
}

#[test]
fn growth_factor_scales_displacement() {
    let mut field = ParticleField::new(1, 1);
    // Mid-gray pixel: r=g=b=127.5 is not representable, use 51 -> gray 0.2.
    let buf = [51, 51, 51, 255];
    let frame = PixelFrame::new(1, 1, &buf).unwrap();
    field.update(&frame, 0.5).unwrap();
    let expected = (1.0 - 51.0 / 255.0) * 0.5 * PARTICLE_LIFT;
    assert!((field.vertices()[0].position[1] - expected).abs() < 1e-5);
}

#[test]
fn update_is_idempotent_for_frozen_inputs() {
    let mut field = ParticleField::new(2, 2);
    let buf: Vec<u8> = (0..2 * 2 * 4).map(|i| (i * 13 % 256) as u8).collect();
    let frame = PixelFrame::new(2, 2, &buf).unwrap();
    field.update(&frame, 0.9).unwrap();
    let first: Vec<_> = field.vertices().to_vec();
    field.update(&frame, 0.9).unwrap();
    assert_eq!(field.vertices(), first.as_slice());
}

#[test]
fn mismatched_frame_is_rejected_and_leaves_field_untouched() {
    let mut field = ParticleField::new(2, 2);
    let buf = vec![0u8; 3 * 2 * 4];
    let frame = PixelFrame::new(3, 2, &buf).unwrap();
    assert_eq!(
        field.update(&frame, 1.0).unwrap_err(),
        Error::PixelFrameMismatch {
            got_w: 3,
            got_h: 2,
            want_w: 2,
            want_h: 2
        }
    );
    for p in field.vertices() {
        assert_eq!(p.position[1], 0.0);
        assert_eq!(p.color, [1.0, 1.0, 1.0]);
    }
}

#[test]
fn vertex_layout_is_tightly_packed() {
    assert_eq!(std::mem::size_of::<scene_core::ParticleVertex>(), 24);
}
