mod common;

use approx::assert_relative_eq;
use common::{assert_sample_close, data_path, EARTH_VECTORS, MPCORB_SAMPLE};
use mpeph::constants::{RADEG, VLIGHT_AU};
use mpeph::display::EphemerisTable;
use mpeph::job::JobConfig;
use mpeph::jpl_ephem::{EarthEphemeris, EphemSource, HorizonTable, MeanEarth};
use mpeph::mpcorb::find_record;
use mpeph::time::iso_to_jde;
use mpeph::{
    AbsoluteMagnitude, AstrometricReducer, Ephemeris, KeplerianElements, MpephError,
    OrbitPropagator, PositionProvider,
};

fn ceres_with<E: PositionProvider>(earth: E) -> Ephemeris<E> {
    let record = find_record(data_path(MPCORB_SAMPLE), "00001").unwrap();
    Ephemeris::new(
        &record.keplerian_elements(),
        record.magnitude(),
        AstrometricReducer::new(earth),
    )
}

#[test]
fn test_ceres_march_2024() {
    let ephem = ceres_with(MeanEarth);
    let jde = iso_to_jde("2024-03-01T00:00:00Z").unwrap();
    let sample = ephem.sample(jde).unwrap();

    // regression values from a separate implementation of the same mean-element chain
    assert_relative_eq!(sample.right_ascension, 4.852357538447402, epsilon = 1e-8);
    assert_relative_eq!(sample.declination, -0.40188398515465173, epsilon = 1e-8);
    assert_relative_eq!(sample.elongation, 1.1027989228364998, epsilon = 1e-8);
    assert_relative_eq!(sample.phase_angle, 0.3203632460987435, epsilon = 1e-8);
    assert_relative_eq!(sample.heliocentric_distance, 2.8081019661812494, epsilon = 1e-9);
    assert_relative_eq!(sample.geocentric_distance, 3.112199067082899, epsilon = 1e-9);
    assert_relative_eq!(sample.magnitude.unwrap(), 8.984033878165624, epsilon = 1e-7);
}

#[test]
fn test_sun_earth_object_triangle() {
    let ephem = ceres_with(MeanEarth);
    let reducer = AstrometricReducer::new(MeanEarth);
    for k in 0..12 {
        let jde = 2_460_000.5 + 30.0 * k as f64;
        let sample = ephem.sample(jde).unwrap();
        let sun_distance = reducer.sun_position(jde).unwrap().norm();
        // law of sines: r / sin ψ = R / sin β
        assert_relative_eq!(
            sample.heliocentric_distance / sample.elongation.sin(),
            sun_distance / sample.phase_angle.sin(),
            max_relative = 1e-9
        );
        // the orbit of Ceres lies between 2.54 and 2.99 AU
        assert!(sample.heliocentric_distance > 2.54 && sample.heliocentric_distance < 2.99);
        assert!(sample.geocentric_distance > 1.5 && sample.geocentric_distance < 4.0);
        assert!((0.0..std::f64::consts::TAU).contains(&sample.right_ascension));
    }
}

#[test]
fn test_horizon_table_matches_mean_earth() {
    // the fixture is tabulated from MeanEarth, so only reading and interpolation are checked
    let table = HorizonTable::from_file(data_path(EARTH_VECTORS)).unwrap();
    let with_table = ceres_with(table);
    let with_mean = ceres_with(MeanEarth);

    let start = iso_to_jde("2024-02-20T00:00:00Z").unwrap();
    let dates: Vec<f64> = (0..10).map(|k| start + 5.5 * k as f64).collect();
    let a = with_table.samples(dates.iter().copied()).unwrap();
    let b = with_mean.samples(dates).unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert_sample_close(x, y, 1e-7);
    }
}

#[test]
fn test_out_of_table_is_an_error() {
    let table = HorizonTable::from_file(data_path(EARTH_VECTORS)).unwrap();
    let ephem = ceres_with(table);
    let jde = iso_to_jde("2025-01-01T00:00:00Z").unwrap();
    assert!(matches!(
        ephem.sample(jde),
        Err(MpephError::EphemerisOutOfRange { .. })
    ));
}

#[test]
fn test_scenario_perihelion_distance() {
    let elements = KeplerianElements::from_mean_anomaly(
        2_450_000.5,
        2.5,
        0.1,
        10.0 * RADEG,
        80.0 * RADEG,
        70.0 * RADEG,
        0.0,
    );
    let pos = OrbitPropagator::new(&elements).position(2_450_000.5).unwrap();
    assert_relative_eq!(pos.distance, 2.25, epsilon = 1e-12);
    assert_relative_eq!(pos.position.norm(), 2.25, epsilon = 1e-9);
}

#[test]
fn test_scenario_unit_magnitude() {
    let mag = AbsoluteMagnitude::new(Some(10.0), None);
    assert_eq!(mag.apparent_magnitude(0.0, 1.0, 1.0), Some(10.0));
    assert_relative_eq!(1.0 / VLIGHT_AU, 0.005776, epsilon = 1e-6);
}

#[test]
fn test_magnitude_monotone_along_orbit() {
    // with the phase angle held fixed, V only depends on r·Δ
    let mag = AbsoluteMagnitude::new(Some(3.33), Some(0.15));
    let ephem = ceres_with(MeanEarth);
    let samples = ephem
        .samples((0..20).map(|k| 2_460_300.5 + 20.0 * k as f64))
        .unwrap();
    let beta = 10.0 * RADEG;
    let mut by_product: Vec<(f64, f64)> = samples
        .iter()
        .map(|s| {
            let rd = s.heliocentric_distance * s.geocentric_distance;
            (
                rd,
                mag.apparent_magnitude(beta, s.heliocentric_distance, s.geocentric_distance)
                    .unwrap(),
            )
        })
        .collect();
    by_product.sort_by(|a, b| a.0.total_cmp(&b.0));
    for pair in by_product.windows(2) {
        assert!(pair[1].1 >= pair[0].1);
    }
}

#[test]
fn test_job_to_table() {
    let config = JobConfig::from_json(&format!(
        r#"{{
            "designation": "00001",
            "start": "2024-03-01T00:00:00Z",
            "end": "2024-03-11T00:00:00Z",
            "step_days": 5.0,
            "mpcorb": "{MPCORB_SAMPLE}",
            "ephemeris": "horizon:{EARTH_VECTORS}"
        }}"#
    ))
    .unwrap();
    let job = config.resolve().unwrap();
    assert_eq!(
        job.ephemeris,
        EphemSource::HorizonFile(EARTH_VECTORS.into())
    );

    let record = find_record(&job.mpcorb, &job.designation).unwrap();
    let (first, last) = job.span();
    let earth = EarthEphemeris::load(&job.ephemeris, first, last).unwrap();
    let ephem = Ephemeris::new(
        &record.keplerian_elements(),
        record.magnitude(),
        AstrometricReducer::new(earth),
    );
    let samples = ephem.samples(job.sample_dates().unwrap()).unwrap();
    assert_eq!(samples.len(), 3);

    let text = EphemerisTable::new(&samples)
        .with_magnitude_limit(job.magnitude_limit)
        .to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("2024-03-01T00:00:00Z  18h32m"));
    assert!(lines[1].contains(" 9.0 "));
    assert!(lines[3].starts_with("2024-03-11T00:00:00Z"));

    // with a limit fainter than Ceres the magnitude column stays empty
    let hidden = EphemerisTable::new(&samples)
        .with_magnitude_limit(12.0)
        .to_string();
    assert!(!hidden.lines().nth(1).unwrap().contains(" 9.0 "));
}
