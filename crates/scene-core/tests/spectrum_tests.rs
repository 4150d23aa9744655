// Frequency summarization over byte spectra.

use scene_core::{summarize, Error};

#[test]
fn summarize_rejects_short_and_odd_snapshots() {
    assert_eq!(summarize(&[]), Err(Error::SpectrumTooShort { len: 0 }));
    assert_eq!(summarize(&[1, 2]), Err(Error::SpectrumTooShort { len: 2 }));
    assert_eq!(
        summarize(&[1, 2, 3, 4, 5]),
        Err(Error::SpectrumOddLength { len: 5 })
    );
}

#[test]
fn zero_snapshot_summarizes_to_zero() {
    let s = summarize(&[0u8; 256]).unwrap();
    assert_eq!(s.overall_avg, 0.0);
    assert_eq!(s.lower_max_fr, 0.0);
    assert_eq!(s.lower_avg_fr, 0.0);
    assert_eq!(s.upper_max_fr, 0.0);
    assert_eq!(s.upper_avg_fr, 0.0);
}

#[test]
fn band_split_drops_final_bin_and_uses_uneven_halves() {
    // n = 8: lower band is bins 0..3 (3 bins), upper is bins 3..7 (4 bins),
    // bin 7 is dropped.
    let s = summarize(&[10, 20, 30, 40, 50, 60, 70, 80]).unwrap();
    assert_eq!(s.overall_avg, 45.0);
    assert!((s.lower_max_fr - 30.0 / 3.0).abs() < 1e-6);
    assert!((s.lower_avg_fr - 20.0 / 3.0).abs() < 1e-6);
    assert!((s.upper_max_fr - 70.0 / 4.0).abs() < 1e-6);
    assert!((s.upper_avg_fr - (40.0 + 50.0 + 60.0 + 70.0) / 4.0 / 4.0).abs() < 1e-6);
}

#[test]
fn final_bin_never_reaches_either_band() {
    let mut snapshot = [0u8; 8];
    snapshot[7] = 255;
    let s = summarize(&snapshot).unwrap();
    // The overall average still sees the hot bin, the bands do not.
    assert!((s.overall_avg - 255.0 / 8.0).abs() < 1e-6);
    assert_eq!(s.lower_max_fr, 0.0);
    assert_eq!(s.upper_max_fr, 0.0);
}

#[test]
fn saturated_snapshot_has_full_scale_average() {
    let s = summarize(&[255u8; 8]).unwrap();
    assert_eq!(s.overall_avg, 255.0);
    // Band fractions divide by band length, so they sit well above 1 here.
    assert!((s.lower_max_fr - 255.0 / 3.0).abs() < 1e-6);
    assert!((s.upper_max_fr - 255.0 / 4.0).abs() < 1e-6);
}

#[test]
fn minimum_accepted_length_is_four() {
    // n = 4 gives a one-bin lower band and a two-bin upper band.
    let s = summarize(&[100, 40, 60, 200]).unwrap();
    assert!((s.lower_max_fr - 100.0).abs() < 1e-6);
    assert!((s.lower_avg_fr - 100.0).abs() < 1e-6);
    assert!((s.upper_max_fr - 60.0 / 2.0).abs() < 1e-6);
    assert!((s.upper_avg_fr - 50.0 / 2.0).abs() < 1e-6);
}
