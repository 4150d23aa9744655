//! Per-frame reduction of a byte-frequency snapshot to summary scalars.

use crate::error::{Error, Result};

/// Summary scalars derived from one spectrum snapshot.
///
/// All fields are recomputed wholesale every frame; nothing is carried over
/// between snapshots. The band fractions divide by the band length, so they
/// are small for typical analyser sizes and only loosely bounded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrequencySummary {
    pub overall_avg: f32,
    pub lower_max_fr: f32,
    pub lower_avg_fr: f32,
    pub upper_max_fr: f32,
    pub upper_avg_fr: f32,
}

/// Reduce a byte-frequency snapshot to its summary scalars.
///
/// The band split is inherited unchanged from the scene this was tuned
/// against: the bin at `n/2 - 1` opens the upper band and the final bin is
/// dropped entirely. The lower band therefore holds `n/2 - 1` bins and the
/// upper band `n/2`. Snapshots shorter than 4 samples or of odd length are
/// rejected so the divisions below cannot hit an empty band.
pub fn summarize(snapshot: &[u8]) -> Result<FrequencySummary> {
    let n = snapshot.len();
    if n < 4 {
        return Err(Error::SpectrumTooShort { len: n });
    }
    if n % 2 != 0 {
        return Err(Error::SpectrumOddLength { len: n });
    }

    let split = n / 2 - 1;
    let lower = &snapshot[..split];
    let upper = &snapshot[split..n - 1];

    Ok(FrequencySummary {
        overall_avg: avg(snapshot),
        lower_max_fr: max(lower) as f32 / lower.len() as f32,
        lower_avg_fr: avg(lower) / lower.len() as f32,
        upper_max_fr: max(upper) as f32 / upper.len() as f32,
        upper_avg_fr: avg(upper) / upper.len() as f32,
    })
}

#[inline]
fn avg(samples: &[u8]) -> f32 {
    let sum: u32 = samples.iter().map(|&s| s as u32).sum();
    sum as f32 / samples.len() as f32
}

#[inline]
fn max(samples: &[u8]) -> u8 {
    samples.iter().copied().fold(0, u8::max)
}
