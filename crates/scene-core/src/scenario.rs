//! Per-frame orchestration: inputs in, render command out.

use crate::camera::CameraRig;
use crate::config::SceneConfig;
use crate::constants::{REFERENCE_FPS, TRACK_COUNT};
use crate::control::VisualControlState;
use crate::particles::{ParticleField, PixelFrame};
use crate::spectrum::{summarize, FrequencySummary};
use crate::transport::{Transport, TransportAction, TransportState};
use glam::Vec3;
use std::time::Duration;

/// Everything sampled from the outside world for one frame. All fields are
/// optional except the clock; a missing input simply leaves its part of the
/// scene where it was.
#[derive(Clone, Copy, Default)]
pub struct FrameInput<'a> {
    pub dt: Duration,
    pub effects_spectrum: Option<&'a [u8]>,
    pub lights_spectrum: Option<&'a [u8]>,
    pub pixels: Option<PixelFrame<'a>>,
    pub mouse_uv: Option<[f32; 2]>,
}

/// Plain-data instructions for the renderer. Computing one frame has no GPU
/// dependency, which is what keeps the whole scene testable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderCommand {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fovy_deg: f32,
    pub particle_scale: f32,
    /// Accumulated spin of the particle field around the y axis, radians.
    pub particle_rotation: f32,
    pub bloom_exposure: f32,
    pub bloom_strength: f32,
    pub bloom_threshold: f32,
    pub bloom_radius: f32,
    pub afterimage_damp: f32,
    pub light_intensity: f32,
    pub film_noise: f32,
    pub film_scanline_intensity: f32,
    pub film_scanline_count: f32,
    pub film_grayscale: bool,
    /// Whether the particle vertices changed this frame and need re-upload.
    pub particles_dirty: bool,
}

/// The scene brain. Owns the transport, camera rig, control state and the
/// particle field, and advances them all in [`Scenario::tick`].
pub struct Scenario {
    config: SceneConfig,
    transport: Transport,
    rig: CameraRig,
    control: VisualControlState,
    particles: Option<ParticleField>,
    particle_rotation: f32,
}

impl Scenario {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            transport: Transport::new(TRACK_COUNT),
            rig: CameraRig::new(config.camera.radius, config.camera.velocity),
            control: VisualControlState::from_config(&config),
            particles: None,
            particle_rotation: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn control(&self) -> &VisualControlState {
        &self.control
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    /// Allocate the particle field once the webcam stream is granted. The
    /// field size is fixed for the session; a second grant is ignored.
    pub fn attach_webcam(&mut self, width: u32, height: u32) {
        if self.particles.is_some() {
            log::warn!("webcam already attached; ignoring repeat grant");
            return;
        }
        log::info!("webcam attached, {width}x{height} particle field");
        self.particles = Some(ParticleField::new(width, height));
    }

    pub fn on_transport(&mut self, action: TransportAction) {
        self.transport.apply(action);
    }

    pub fn on_toggle_mute(&mut self, track: usize) -> Option<f32> {
        self.transport.toggle_mute(track)
    }

    /// Advance the scene one frame.
    ///
    /// Never fails: malformed spectra or pixel frames are logged and their
    /// channels hold the previous value, so a glitchy input source degrades
    /// the picture instead of stopping the loop.
    pub fn tick(&mut self, input: FrameInput) -> RenderCommand {
        if let Some(uv) = input.mouse_uv {
            self.rig.set_mouse_uv(uv);
        }
        self.rig.set_radius(self.config.camera.radius);
        self.rig.set_velocity(self.config.camera.velocity);

        let mut particles_dirty = false;
        if self.transport.state() == TransportState::Playing {
            self.rig.advance(input.dt);
            self.particle_rotation +=
                self.config.particles.velocity * input.dt.as_secs_f32() * REFERENCE_FPS;

            let effects = input.effects_spectrum.and_then(summarize_logged);
            let lights = input.lights_spectrum.and_then(summarize_logged);
            self.control.retune(effects.as_ref(), lights.as_ref());
        }

        if let (Some(field), Some(frame)) = (self.particles.as_mut(), input.pixels.as_ref()) {
            match field.update(frame, self.control.growth_factor) {
                Ok(()) => particles_dirty = true,
                Err(e) => log::warn!("particle update skipped: {e}"),
            }
        }

        RenderCommand {
            eye: self.rig.eye(),
            target: self.rig.target(),
            fovy_deg: self.config.camera.focal_length,
            particle_scale: self.config.particles.scale,
            particle_rotation: self.particle_rotation,
            bloom_exposure: self.config.bloom.exposure,
            bloom_strength: self.control.bloom_strength,
            bloom_threshold: self.config.bloom.threshold,
            bloom_radius: self.config.bloom.radius,
            afterimage_damp: self.control.afterimage_damp,
            light_intensity: self.control.light_intensity,
            film_noise: self.config.film.noise_intensity,
            film_scanline_intensity: self.config.film.scanline_intensity,
            film_scanline_count: self.config.film.scanline_count,
            film_grayscale: self.config.film.grayscale,
            particles_dirty,
        }
    }
}

fn summarize_logged(snapshot: &[u8]) -> Option<FrequencySummary> {
    match summarize(snapshot) {
        Ok(s) => Some(s),
        Err(e) => {
            log::warn!("spectrum rejected: {e}");
            None
        }
    }
}
