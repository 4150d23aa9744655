// Range remapping math.

use scene_core::error::Error;
use scene_core::modulate::{fractionate, modulate};

#[test]
fn fractionate_normalizes_within_range() {
    assert_eq!(fractionate(5.0, 0.0, 10.0), Ok(0.5));
    assert_eq!(fractionate(0.0, 0.0, 10.0), Ok(0.0));
    assert_eq!(fractionate(10.0, 0.0, 10.0), Ok(1.0));
}

#[test]
fn fractionate_extrapolates_outside_range() {
    assert_eq!(fractionate(15.0, 0.0, 10.0), Ok(1.5));
    assert_eq!(fractionate(-5.0, 0.0, 10.0), Ok(-0.5));
}

#[test]
fn degenerate_range_is_an_error() {
    assert_eq!(
        fractionate(3.0, 7.0, 7.0),
        Err(Error::DegenerateRange { value: 7.0 })
    );
    assert!(modulate(3.0, 7.0, 7.0, 0.0, 1.0).is_err());
}

#[test]
fn unit_to_unit_mapping_is_identity() {
    for x in [-1.0, 0.0, 0.25, 0.5, 1.0, 3.0] {
        assert_eq!(modulate(x, 0.0, 1.0, 0.0, 1.0), Ok(x));
    }
}

#[test]
fn modulate_maps_endpoints_and_midpoint() {
    assert_eq!(modulate(0.0, 0.0, 20.0, 0.5, 0.0), Ok(0.5));
    assert_eq!(modulate(20.0, 0.0, 20.0, 0.5, 0.0), Ok(0.0));
    assert_eq!(modulate(10.0, 0.0, 20.0, 0.5, 0.0), Ok(0.25));
}

#[test]
fn modulate_supports_inverted_output_ranges() {
    // The bloom mapping runs 1.67 down to 0.42.
    let v = modulate(10.0, 0.0, 20.0, 1.67, 0.42).unwrap();
    assert!((v - 1.045).abs() < 1e-6);
}

#[test]
fn modulate_extrapolates_without_clamping() {
    // A saturated average overshoots the output range on purpose.
    let v = modulate(255.0, 0.0, 20.0, 0.5, 0.0).unwrap();
    assert!((v - -5.875).abs() < 1e-6);
    // Below the input range, same thing the other way.
    let v = modulate(0.0, 10.0, 50.0, 0.5, 1.0).unwrap();
    assert!((v - 0.375).abs() < 1e-6);
}
