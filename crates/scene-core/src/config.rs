//! Scene configuration with validated setters.

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    /// Orbit advance in degrees per reference frame.
    pub velocity: f32,
    pub radius: f32,
    /// Vertical field of view in degrees.
    pub focal_length: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlesConfig {
    pub scale: f32,
    /// Field spin in radians per reference frame.
    pub velocity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomConfig {
    /// Tone mapping exposure applied in the composite pass.
    pub exposure: f32,
    pub strength: f32,
    pub threshold: f32,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AfterimageConfig {
    pub damp: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilmConfig {
    pub noise_intensity: f32,
    pub scanline_intensity: f32,
    pub scanline_count: f32,
    pub grayscale: bool,
}

/// Tuning knobs for the whole scene.
///
/// Defaults are the values the scene was dialed in with. Fields are public
/// for reading; writes go through the checked setters so a bad slider value
/// cannot reach the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub particles: ParticlesConfig,
    pub bloom: BloomConfig,
    pub afterimage: AfterimageConfig,
    pub film: FilmConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                velocity: 0.1,
                radius: 10.0,
                focal_length: 20.0,
            },
            particles: ParticlesConfig {
                scale: 1.0,
                velocity: std::f32::consts::PI / 180.0,
            },
            bloom: BloomConfig {
                exposure: 0.7619,
                strength: 1.8,
                threshold: 0.0,
                radius: 0.57,
            },
            afterimage: AfterimageConfig { damp: 0.75 },
            film: FilmConfig {
                noise_intensity: 0.8,
                scanline_intensity: 0.3,
                scanline_count: 256.0,
                grayscale: false,
            },
        }
    }
}

impl SceneConfig {
    pub fn set_camera_velocity(&mut self, value: f32) -> Result<()> {
        self.camera.velocity = checked("camera velocity", value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_camera_radius(&mut self, value: f32) -> Result<()> {
        self.camera.radius = checked("camera radius", value, 5.0, 100.0)?;
        Ok(())
    }

    pub fn set_camera_focal_length(&mut self, value: f32) -> Result<()> {
        self.camera.focal_length = checked("camera focal length", value, 1.0, 25.0)?;
        Ok(())
    }

    pub fn set_bloom_threshold(&mut self, value: f32) -> Result<()> {
        self.bloom.threshold = checked("bloom threshold", value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_bloom_radius(&mut self, value: f32) -> Result<()> {
        self.bloom.radius = checked("bloom radius", value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_film_noise_intensity(&mut self, value: f32) -> Result<()> {
        self.film.noise_intensity = checked("film noise intensity", value, 0.0, 3.0)?;
        Ok(())
    }

    pub fn set_film_scanline_intensity(&mut self, value: f32) -> Result<()> {
        self.film.scanline_intensity = checked("film scanline intensity", value, 0.0, 1.0)?;
        Ok(())
    }

    pub fn set_film_scanline_count(&mut self, value: f32) -> Result<()> {
        self.film.scanline_count = checked("film scanline count", value, 0.0, 2048.0)?;
        Ok(())
    }

    pub fn set_film_grayscale(&mut self, value: bool) {
        self.film.grayscale = value;
    }
}

fn checked(name: &'static str, value: f32, min: f32, max: f32) -> Result<f32> {
    if value.is_finite() && value >= min && value <= max {
        Ok(value)
    } else {
        Err(Error::ConfigOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}
