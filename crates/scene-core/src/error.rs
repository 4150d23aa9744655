use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of the core. Per-frame paths never surface these to the
/// render loop; they log and hold the last good value instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("spectrum snapshot too short: {len} samples (need at least 4)")]
    SpectrumTooShort { len: usize },

    #[error("spectrum snapshot has odd length {len}")]
    SpectrumOddLength { len: usize },

    #[error("degenerate mapping range: min == max == {value}")]
    DegenerateRange { value: f32 },

    #[error("pixel frame holds {len} bytes, expected {expected}")]
    PixelFrameTruncated { len: usize, expected: usize },

    #[error("pixel frame is {got_w}x{got_h}, particle field is {want_w}x{want_h}")]
    PixelFrameMismatch {
        got_w: u32,
        got_h: u32,
        want_w: u32,
        want_h: u32,
    },

    #[error("{name} = {value} outside allowed range {min}..={max}")]
    ConfigOutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}
