//! Affine range remapping without clamping.

use crate::error::{Error, Result};

/// Normalize `value` into the `[min, max]` domain.
///
/// No clamping: inputs outside the domain yield fractions outside `[0, 1]`,
/// and callers rely on that proportional overshoot.
#[inline]
pub fn fractionate(value: f32, min: f32, max: f32) -> Result<f32> {
    if min == max {
        return Err(Error::DegenerateRange { value: min });
    }
    Ok((value - min) / (max - min))
}

/// Remap `value` from `[min, max]` to `[out_min, out_max]`.
///
/// Extrapolates proportionally outside the input range; callers that want a
/// clamped result clamp it themselves.
#[inline]
pub fn modulate(value: f32, min: f32, max: f32, out_min: f32, out_max: f32) -> Result<f32> {
    Ok(out_min + fractionate(value, min, max)? * (out_max - out_min))
}
