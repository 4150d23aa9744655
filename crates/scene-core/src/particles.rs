//! Webcam-driven particle field.

use crate::constants::{PARTICLE_LIFT, PARTICLE_SPACING};
use crate::error::{Error, Result};
use bytemuck::{Pod, Zeroable};

/// One RGBA frame sampled from the capture canvas, row-major scan order.
/// Borrowed for the duration of an update; the field copies what it needs.
#[derive(Clone, Copy, Debug)]
pub struct PixelFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba: &'a [u8],
}

impl<'a> PixelFrame<'a> {
    pub fn new(width: u32, height: u32, rgba: &'a [u8]) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(Error::PixelFrameTruncated {
                len: rgba.len(),
                expected,
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }
}

/// Instance data for one particle, uploaded verbatim as a GPU buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// One particle per capture pixel on a flat centered grid.
///
/// The field is allocated once when the webcam stream is granted and never
/// resizes afterwards; vertex order matches the row-major scan of the pixel
/// frames fed to [`ParticleField::update`].
pub struct ParticleField {
    width: u32,
    height: u32,
    vertices: Vec<ParticleVertex>,
}

impl ParticleField {
    pub fn new(width: u32, height: u32) -> Self {
        let mut vertices = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                let px = PARTICLE_SPACING * (width as f32 / 2.0 - x as f32);
                let pz = PARTICLE_SPACING * (y as f32 - height as f32 / 2.0);
                vertices.push(ParticleVertex {
                    position: [px, 0.0, pz],
                    color: [1.0, 1.0, 1.0],
                });
            }
        }
        Self {
            width,
            height,
            vertices,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[ParticleVertex] {
        &self.vertices
    }

    /// Rewrite heights and colors from the latest capture frame.
    ///
    /// Darker pixels rise further: displacement is
    /// `(1 - gray) * growth_factor * PARTICLE_LIFT` with `gray` the mean of
    /// the normalized RGB channels. Frames of a different size than the
    /// field are rejected; the field never adapts to them.
    pub fn update(&mut self, frame: &PixelFrame, growth_factor: f32) -> Result<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(Error::PixelFrameMismatch {
                got_w: frame.width,
                got_h: frame.height,
                want_w: self.width,
                want_h: self.height,
            });
        }
        for (i, v) in self.vertices.iter_mut().enumerate() {
            let o = i * 4;
            let r = frame.rgba[o] as f32 / 255.0;
            let g = frame.rgba[o + 1] as f32 / 255.0;
            let b = frame.rgba[o + 2] as f32 / 255.0;
            let gray = (r + g + b) / 3.0;
            v.position[1] = (1.0 - gray) * growth_factor * PARTICLE_LIFT;
            v.color = [r, g, b];
        }
        Ok(())
    }
}
