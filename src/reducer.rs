//! # Astrometric reduction
//!
//! [`AstrometricReducer`] combines the heliocentric position of an object with the heliocentric
//! position of the Earth and produces the apparent geocentric place of the object: right
//! ascension, declination, solar elongation, phase angle and both distances.
//!
//! ## Algorithm
//!
//! With `S = (X, Y, Z)` the geocentric position of the Sun (the opposite of the Earth's
//! heliocentric position) and `(x, y, z)` the heliocentric position of the object:
//!
//! 1. `(ξ, η, ζ) = S + (x, y, z)`, `Δ = |(ξ, η, ζ)|`.
//! 2. Light time `τ = Δ / c`; the object is evaluated again at `jde − τ` and `(ξ, η, ζ)`, `Δ`
//!    are recomputed with the **same** `S`. The correction is applied once, it is not
//!    iterated to a fixed point.
//! 3. `α = atan2(η, ξ)` in `[0, 2π)`, `δ = asin(ζ / Δ)`.
//! 4. `ψ = acos((ξX + ηY + ζZ) / (R·Δ))` with `R = |S|`.
//! 5. `β = acos((ξx + ηy + ζz) / (r·Δ))`.
//!
//! ## Preconditions
//!
//! `Δ = 0` or `r = 0` (coincident bodies) divide by zero and yield NaN angles; callers must
//! not ask for the place of the Earth or of the Sun.
use log::info;
use nalgebra::Vector3;

use crate::constants::{AstronomicalUnit, Radian, JDE, VLIGHT_AU};
use crate::kepler::principal_angle;
use crate::mpeph_errors::MpephError;
use crate::propagator::PositionProvider;

/// Apparent geocentric place of an object.
///
/// Fields
/// -----------------
/// * `right_ascension` – α in `[0, 2π)`, radians.
/// * `declination` – δ, radians.
/// * `elongation` – ψ, Sun–Earth–object angle, radians.
/// * `phase_angle` – β, Sun–object–Earth angle, radians.
/// * `heliocentric_distance` – `r` at the light-time corrected date, AU.
/// * `geocentric_distance` – `Δ` after the light-time correction, AU.
/// * `light_time` – `τ` used for the correction, days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPlace {
    pub right_ascension: Radian,
    pub declination: Radian,
    pub elongation: Radian,
    pub phase_angle: Radian,
    pub heliocentric_distance: AstronomicalUnit,
    pub geocentric_distance: AstronomicalUnit,
    pub light_time: f64,
}

/// Reduces heliocentric object positions to apparent geocentric places.
///
/// The reducer owns an already loaded Earth ephemeris; it is built once per session and reused
/// for every object and date.
#[derive(Debug, Clone)]
pub struct AstrometricReducer<E> {
    earth: E,
}

impl<E: PositionProvider> AstrometricReducer<E> {
    /// Arguments
    /// ---------
    /// * `earth` – Provider of the **Earth's** heliocentric J2000 equatorial position.
    pub fn new(earth: E) -> Self {
        info!("Astrometric reducer ready");
        AstrometricReducer { earth }
    }

    pub fn earth(&self) -> &E {
        &self.earth
    }

    /// Geocentric position of the Sun at `jde`.
    pub fn sun_position(&self, jde: JDE) -> Result<Vector3<f64>, MpephError> {
        Ok(-self.earth.heliocentric_position(jde)?.position)
    }

    /// Apparent place of `object` seen from the geocentre at `jde`.
    ///
    /// Arguments
    /// ---------
    /// * `object` – Provider of the object's heliocentric position.
    /// * `jde` – Julian Ephemeris Date of the observation.
    ///
    /// Return
    /// ------
    /// * The [`ApparentPlace`] of the object, or the first error raised by a provider.
    pub fn reduce<P: PositionProvider + ?Sized>(
        &self,
        object: &P,
        jde: JDE,
    ) -> Result<ApparentPlace, MpephError> {
        let sun = self.sun_position(jde)?;

        let geometric = object.heliocentric_position(jde)?;
        let light_time = (sun + geometric.position).norm() / VLIGHT_AU;

        let retarded = object.heliocentric_position(jde - light_time)?;
        let geocentric = sun + retarded.position;
        let delta = geocentric.norm();

        let right_ascension = principal_angle(geocentric.y.atan2(geocentric.x));
        let declination = (geocentric.z / delta).asin();

        let sun_distance = sun.norm();
        let elongation = (geocentric.dot(&sun) / sun_distance / delta).acos();
        let phase_angle =
            (geocentric.dot(&retarded.position) / retarded.distance / delta).acos();

        Ok(ApparentPlace {
            right_ascension,
            declination,
            elongation,
            phase_angle,
            heliocentric_distance: retarded.distance,
            geocentric_distance: delta,
            light_time,
        })
    }
}

#[cfg(test)]
mod reducer_test {
    use std::cell::RefCell;
    use std::f64::consts::{FRAC_PI_2, PI};

    use approx::assert_relative_eq;

    use super::*;
    use crate::propagator::HeliocentricPosition;

    /// Body that never moves.
    struct Fixed(Vector3<f64>);

    impl PositionProvider for Fixed {
        fn heliocentric_position(&self, _jde: JDE) -> Result<HeliocentricPosition, MpephError> {
            Ok(HeliocentricPosition::from_vector(self.0))
        }
    }

    /// Body in uniform straight-line motion that records every date it is queried at.
    struct Linear {
        origin: Vector3<f64>,
        velocity: Vector3<f64>,
        queries: RefCell<Vec<f64>>,
    }

    impl PositionProvider for Linear {
        fn heliocentric_position(&self, jde: JDE) -> Result<HeliocentricPosition, MpephError> {
            self.queries.borrow_mut().push(jde);
            Ok(HeliocentricPosition::from_vector(
                self.origin + self.velocity * jde,
            ))
        }
    }

    #[test]
    fn test_right_angle_geometry() {
        let reducer = AstrometricReducer::new(Fixed(Vector3::new(1.0, 0.0, 0.0)));
        let object = Fixed(Vector3::new(0.0, 2.0, 0.0));
        let place = reducer.reduce(&object, 2_460_000.5).unwrap();

        assert_relative_eq!(place.right_ascension, (2.0f64).atan2(-1.0), epsilon = 1e-14);
        assert_relative_eq!(place.declination, 0.0, epsilon = 1e-14);
        assert_relative_eq!(place.geocentric_distance, 5f64.sqrt(), epsilon = 1e-14);
        assert_relative_eq!(place.heliocentric_distance, 2.0, epsilon = 1e-14);
        assert_relative_eq!(
            place.elongation,
            (1.0 / 5f64.sqrt()).acos(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            place.phase_angle,
            (2.0 / 5f64.sqrt()).acos(),
            epsilon = 1e-12
        );
        // the triangle Sun–Earth–object has a right angle at the Sun
        assert_relative_eq!(
            place.elongation + place.phase_angle,
            FRAC_PI_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_right_ascension_is_normalized() {
        let reducer = AstrometricReducer::new(Fixed(Vector3::new(1.0, 0.0, 0.0)));
        // geocentric direction (0, -1, 0.5): α = 270°
        let object = Fixed(Vector3::new(1.0, -1.0, 0.5));
        let place = reducer.reduce(&object, 2_460_000.5).unwrap();
        assert_relative_eq!(place.right_ascension, 1.5 * PI, epsilon = 1e-14);
        assert!(place.declination > 0.0);
    }

    #[test]
    fn test_opposition_and_conjunction() {
        let reducer = AstrometricReducer::new(Fixed(Vector3::new(0.0, 0.0, 1.0)));

        let opposition = reducer.reduce(&Fixed(Vector3::new(0.0, 0.0, 3.0)), 0.0).unwrap();
        assert_relative_eq!(opposition.elongation, PI, epsilon = 1e-7);
        assert_relative_eq!(opposition.phase_angle, 0.0, epsilon = 1e-7);
        assert_relative_eq!(opposition.declination, FRAC_PI_2, epsilon = 1e-7);
        assert_relative_eq!(opposition.geocentric_distance, 2.0, epsilon = 1e-14);

        let conjunction = reducer.reduce(&Fixed(Vector3::new(0.0, 0.0, -2.0)), 0.0).unwrap();
        assert_relative_eq!(conjunction.elongation, 0.0, epsilon = 1e-7);
        assert_relative_eq!(conjunction.geocentric_distance, 3.0, epsilon = 1e-14);
    }

    #[test]
    fn test_light_time_for_one_au() {
        let reducer = AstrometricReducer::new(Fixed(Vector3::new(1.0, 0.0, 0.0)));
        let object = Linear {
            origin: Vector3::new(1.0, 1.0, 0.0),
            velocity: Vector3::zeros(),
            queries: RefCell::new(Vec::new()),
        };
        let jde = 2_460_000.5;
        let place = reducer.reduce(&object, jde).unwrap();

        assert_relative_eq!(place.light_time, 0.005_775_518_331_436_995, epsilon = 1e-12);
        let queries = object.queries.borrow();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], jde);
        assert_relative_eq!(queries[1], jde - 1.0 / VLIGHT_AU, epsilon = 1e-9);
    }

    #[test]
    fn test_light_time_uses_retarded_position() {
        let reducer = AstrometricReducer::new(Fixed(Vector3::new(1.0, 0.0, 0.0)));
        let velocity = Vector3::new(0.0, 0.01, 0.002);
        let object = Linear {
            origin: Vector3::new(2.0, -0.5, 0.3),
            velocity,
            queries: RefCell::new(Vec::new()),
        };
        let jde = 10.0;
        let place = reducer.reduce(&object, jde).unwrap();

        let earth = Vector3::new(1.0, 0.0, 0.0);
        let geometric = object.origin + velocity * jde - earth;
        let tau = geometric.norm() / VLIGHT_AU;
        let corrected = object.origin + velocity * (jde - tau) - earth;

        assert_relative_eq!(place.light_time, tau, epsilon = 1e-15);
        assert_relative_eq!(place.geocentric_distance, corrected.norm(), epsilon = 1e-14);
        assert_relative_eq!(
            place.declination,
            (corrected.z / corrected.norm()).asin(),
            epsilon = 1e-14
        );
        // a single correction step: exactly two queries
        assert_eq!(object.queries.borrow().len(), 2);
    }
}
