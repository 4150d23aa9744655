//! Orbiting camera rig.

use crate::constants::{MOUSE_DRIFT_X, MOUSE_DRIFT_Y, REFERENCE_FPS};
use glam::{Mat4, Vec3};
use std::time::Duration;

/// Perspective camera, consumed by the renderer as a view-projection matrix.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_deg: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_deg: 20.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_deg.to_radians(), self.aspect, self.znear, self.zfar)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Drives the camera around the origin on a diagonal orbit, with the look-at
/// target nudged by the pointer position.
#[derive(Clone, Copy, Debug)]
pub struct CameraRig {
    theta_deg: f32,
    radius: f32,
    velocity: f32,
    target_offset: Vec3,
}

impl CameraRig {
    pub fn new(radius: f32, velocity: f32) -> Self {
        Self {
            theta_deg: 0.0,
            radius,
            velocity,
            target_offset: Vec3::ZERO,
        }
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }

    pub fn theta_deg(&self) -> f32 {
        self.theta_deg
    }

    /// Advance the orbit. The configured velocity is degrees per reference
    /// frame, so it is scaled by the measured dt to stay rate-independent.
    pub fn advance(&mut self, dt: Duration) {
        self.theta_deg += self.velocity * dt.as_secs_f32() * REFERENCE_FPS;
    }

    /// Steer the look-at target from a pointer position in canvas UV space
    /// (0,0 top-left to 1,1 bottom-right).
    pub fn set_mouse_uv(&mut self, uv: [f32; 2]) {
        self.target_offset = Vec3::new(
            (uv[0] - 0.5) * MOUSE_DRIFT_X,
            (0.5 - uv[1]) * MOUSE_DRIFT_Y,
            0.0,
        );
    }

    pub fn eye(&self) -> Vec3 {
        let t = self.theta_deg.to_radians();
        Vec3::new(
            self.radius * t.sin(),
            self.radius * t.sin(),
            self.radius * t.cos(),
        )
    }

    pub fn target(&self) -> Vec3 {
        self.target_offset
    }
}
