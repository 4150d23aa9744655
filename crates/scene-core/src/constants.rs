//! Mapping ranges and scene tuning constants.
//!
//! The audio-to-visual ranges are the ones the scene was tuned with; they
//! keep magic numbers out of the per-frame code.

// Webcam capture resolution. One particle per pixel, fixed for the session,
// so this stays small on purpose.
pub const CAPTURE_WIDTH: u32 = 96;
pub const CAPTURE_HEIGHT: u32 = 54;

// Particle grid layout
pub const PARTICLE_SPACING: f32 = 0.03;
pub const PARTICLE_LIFT: f32 = 10.0;

// Growth-factor mapping (effects stem, lower-band max fraction)
pub const GROWTH_REDUCE_EXPONENT: f32 = 0.8;
pub const GROWTH_GATE: f32 = 0.3;
pub const GROWTH_IDLE: f32 = 0.75;
pub const GROWTH_OUT_MIN: f32 = 0.42;
pub const GROWTH_OUT_MAX: f32 = 1.67;

// Afterimage damp mapping (effects stem, overall average)
pub const AFTERIMAGE_IN_MIN: f32 = 10.0;
pub const AFTERIMAGE_IN_MAX: f32 = 50.0;
pub const AFTERIMAGE_OUT_MIN: f32 = 0.5;
pub const AFTERIMAGE_OUT_MAX: f32 = 1.0;

// Light and bloom mappings (lights stem, overall average). Both run on the
// same 0..20 input range with inverted outputs: louder means dimmer ambient
// light and weaker bloom.
pub const ENERGY_IN_MIN: f32 = 0.0;
pub const ENERGY_IN_MAX: f32 = 20.0;
pub const LIGHT_OUT_MIN: f32 = 0.5;
pub const LIGHT_OUT_MAX: f32 = 0.0;
pub const BLOOM_OUT_MIN: f32 = 1.67;
pub const BLOOM_OUT_MAX: f32 = 0.42;

// Analyser configuration shared with the front end
pub const ANALYSER_FFT_SIZE: u32 = 512;
pub const SPECTRUM_BINS: usize = (ANALYSER_FFT_SIZE / 2) as usize;
pub const TRACK_COUNT: usize = 4;

// Camera orbit advance is expressed per reference frame (60 fps); the rig
// scales it by the measured dt so slow hosts do not slow the drift.
pub const REFERENCE_FPS: f32 = 60.0;

// Mouse drift of the look-at target, world units across the full canvas
pub const MOUSE_DRIFT_X: f32 = 1.5;
pub const MOUSE_DRIFT_Y: f32 = 0.8;
