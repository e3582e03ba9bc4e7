//! # Ephemeris session
//!
//! [`Ephemeris`] ties one minor planet (its [`OrbitPropagator`] and [`AbsoluteMagnitude`]) to an
//! [`AstrometricReducer`] and produces one [`EphemerisSample`] per requested date.
//!
//! ```text
//! elements ──▶ OrbitPropagator ──▶ AstrometricReducer ──▶ AbsoluteMagnitude ──▶ EphemerisSample
//!                                        ▲
//!                               Earth PositionProvider
//! ```
use log::{debug, info};
use serde::Serialize;

use crate::constants::{AstronomicalUnit, Radian, JDE};
use crate::keplerian_element::KeplerianElements;
use crate::magnitude::AbsoluteMagnitude;
use crate::mpeph_errors::MpephError;
use crate::propagator::{OrbitPropagator, PositionProvider};
use crate::reducer::{AstrometricReducer, ApparentPlace};

/// Everything computed for one object at one date.
///
/// Fields
/// -----------------
/// * `jde` – Date of the sample.
/// * `right_ascension` – α in `[0, 2π)`, radians.
/// * `declination` – δ, radians.
/// * `elongation` – ψ, radians.
/// * `phase_angle` – β, radians.
/// * `heliocentric_distance` – `r`, AU.
/// * `geocentric_distance` – `Δ`, AU.
/// * `magnitude` – Apparent visual magnitude, `None` when `H` is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EphemerisSample {
    pub jde: JDE,
    pub right_ascension: Radian,
    pub declination: Radian,
    pub elongation: Radian,
    pub phase_angle: Radian,
    pub heliocentric_distance: AstronomicalUnit,
    pub geocentric_distance: AstronomicalUnit,
    pub magnitude: Option<f64>,
}

impl EphemerisSample {
    fn from_place(jde: JDE, place: &ApparentPlace, magnitude: Option<f64>) -> Self {
        EphemerisSample {
            jde,
            right_ascension: place.right_ascension,
            declination: place.declination,
            elongation: place.elongation,
            phase_angle: place.phase_angle,
            heliocentric_distance: place.heliocentric_distance,
            geocentric_distance: place.geocentric_distance,
            magnitude,
        }
    }
}

/// Ephemeris generator for a single object.
pub struct Ephemeris<E> {
    propagator: OrbitPropagator,
    magnitude: AbsoluteMagnitude,
    reducer: AstrometricReducer<E>,
}

impl<E: PositionProvider> Ephemeris<E> {
    /// Arguments
    /// ---------
    /// * `elements` – Orbit of the object.
    /// * `magnitude` – `H` and `G` of the object.
    /// * `reducer` – Reducer holding the Earth ephemeris.
    pub fn new(
        elements: &KeplerianElements,
        magnitude: AbsoluteMagnitude,
        reducer: AstrometricReducer<E>,
    ) -> Self {
        info!("Ephemeris session for orbit\n{elements}");
        Ephemeris {
            propagator: OrbitPropagator::new(elements),
            magnitude,
            reducer,
        }
    }

    pub fn propagator(&self) -> &OrbitPropagator {
        &self.propagator
    }

    pub fn magnitude(&self) -> &AbsoluteMagnitude {
        &self.magnitude
    }

    /// Sample the ephemeris at `jde`.
    pub fn sample(&self, jde: JDE) -> Result<EphemerisSample, MpephError> {
        let place = self.reducer.reduce(&self.propagator, jde)?;
        let magnitude = self.magnitude.apparent_magnitude(
            place.phase_angle,
            place.heliocentric_distance,
            place.geocentric_distance,
        );
        debug!(
            "JDE {jde}: r = {:.6} AU, Δ = {:.6} AU, τ = {:.6} d",
            place.heliocentric_distance, place.geocentric_distance, place.light_time
        );
        Ok(EphemerisSample::from_place(jde, &place, magnitude))
    }

    /// Sample the ephemeris at every date of `jdes`, in order.
    ///
    /// The first failing date aborts the whole run.
    pub fn samples<I>(&self, jdes: I) -> Result<Vec<EphemerisSample>, MpephError>
    where
        I: IntoIterator<Item = JDE>,
    {
        jdes.into_iter().map(|jde| self.sample(jde)).collect()
    }
}
