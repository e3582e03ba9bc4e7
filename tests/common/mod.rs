#![allow(dead_code)]

use approx::assert_relative_eq;
use camino::Utf8Path;
use mpeph::EphemerisSample;

pub const MPCORB_SAMPLE: &str = "tests/data/MPCORB_sample.DAT";
pub const EARTH_VECTORS: &str = "tests/data/earth_vectors.txt";

pub fn data_path(path: &str) -> &Utf8Path {
    Utf8Path::new(path)
}

/// Angular distance between two directions given in (α, δ), radians.
pub fn angular_separation(a: (f64, f64), b: (f64, f64)) -> f64 {
    let cos_sep = a.1.sin() * b.1.sin() + a.1.cos() * b.1.cos() * (a.0 - b.0).cos();
    cos_sep.clamp(-1.0, 1.0).acos()
}

pub fn assert_sample_close(actual: &EphemerisSample, expected: &EphemerisSample, epsilon: f64) {
    assert_relative_eq!(actual.jde, expected.jde, epsilon = epsilon);
    assert!(
        angular_separation(
            (actual.right_ascension, actual.declination),
            (expected.right_ascension, expected.declination)
        ) < epsilon
    );
    assert_relative_eq!(actual.elongation, expected.elongation, epsilon = epsilon);
    assert_relative_eq!(actual.phase_angle, expected.phase_angle, epsilon = epsilon);
    assert_relative_eq!(
        actual.heliocentric_distance,
        expected.heliocentric_distance,
        epsilon = epsilon
    );
    assert_relative_eq!(
        actual.geocentric_distance,
        expected.geocentric_distance,
        epsilon = epsilon
    );
    match (actual.magnitude, expected.magnitude) {
        (Some(a), Some(b)) => assert_relative_eq!(a, b, epsilon = epsilon),
        (a, b) => assert_eq!(a, b),
    }
}
