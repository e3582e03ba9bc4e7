//! # Keplerian orbital elements
//!
//! This module defines [`KeplerianElements`], the osculating two-body element set consumed by
//! the [`OrbitPropagator`](crate::propagator::OrbitPropagator).
//!
//! ## Elements
//!
//! 1. **a** – Semi-major axis (AU)
//! 2. **e** – Eccentricity (unitless, `0 ≤ e < 1`)
//! 3. **i** – Inclination (radians)
//! 4. **Ω** – Longitude of ascending node (radians)
//! 5. **ω** – Argument of perihelion (radians)
//! 6. **T_p** – Time of perihelion passage (JDE)
//!
//! The angles are referred to the **mean ecliptic and equinox of J2000**, which is the frame of
//! the MPCORB catalog. Catalogs usually give a mean anomaly at an epoch instead of `T_p`;
//! [`KeplerianElements::from_mean_anomaly`] performs that conversion.
use std::fmt;

use crate::constants::{AstronomicalUnit, Radian, GAUSS_GRAV, JDE};

/// Keplerian orbital elements of an elliptic heliocentric orbit.
///
/// Units
/// -----
/// * `semi_major_axis`: AU.
/// * `eccentricity`: unitless, precondition `0 ≤ e < 1` (not checked).
/// * `inclination`, `ascending_node_longitude`, `periapsis_argument`: radians, J2000 ecliptic.
/// * `perihelion_time`: Julian Ephemeris Date.
///
/// See also
/// --------
/// * [`OrbitPropagator`](crate::propagator::OrbitPropagator) – Turns these elements into positions.
#[derive(Debug, PartialEq, Clone)]
pub struct KeplerianElements {
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
    pub periapsis_argument: Radian,
    pub perihelion_time: JDE,
}

impl KeplerianElements {
    /// Build elements from a mean anomaly given at a reference epoch.
    ///
    /// The time of perihelion passage is `T_p = epoch − M / n` with the mean motion
    /// `n = k / (a·√a)`.
    ///
    /// Arguments
    /// ---------
    /// * `epoch` – Reference epoch of the mean anomaly (JDE).
    /// * `semi_major_axis` – `a` in AU.
    /// * `eccentricity` – `e`.
    /// * `inclination`, `ascending_node_longitude`, `periapsis_argument` – radians.
    /// * `mean_anomaly` – `M` at `epoch`, radians.
    pub fn from_mean_anomaly(
        epoch: JDE,
        semi_major_axis: AstronomicalUnit,
        eccentricity: f64,
        inclination: Radian,
        ascending_node_longitude: Radian,
        periapsis_argument: Radian,
        mean_anomaly: Radian,
    ) -> Self {
        let mean_motion = mean_motion(semi_major_axis);
        KeplerianElements {
            semi_major_axis,
            eccentricity,
            inclination,
            ascending_node_longitude,
            periapsis_argument,
            perihelion_time: epoch - mean_anomaly / mean_motion,
        }
    }

    /// Mean daily motion `n = k / (a·√a)` in radians per day.
    pub fn mean_motion(&self) -> f64 {
        mean_motion(self.semi_major_axis)
    }

    /// Mean anomaly at `jde`, not reduced to a principal value.
    pub fn mean_anomaly_at(&self, jde: JDE) -> Radian {
        self.mean_motion() * (jde - self.perihelion_time)
    }

    /// Perihelion distance `q = a·(1 − e)` in AU.
    pub fn perihelion_distance(&self) -> AstronomicalUnit {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }
}

fn mean_motion(semi_major_axis: AstronomicalUnit) -> f64 {
    GAUSS_GRAV / (semi_major_axis * semi_major_axis.sqrt())
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a   = {:.8} AU", self.semi_major_axis)?;
        writeln!(f, "  e   = {:.8}", self.eccentricity)?;
        writeln!(f, "  i   = {:.6}°", self.inclination.to_degrees())?;
        writeln!(f, "  Ω   = {:.6}°", self.ascending_node_longitude.to_degrees())?;
        writeln!(f, "  ω   = {:.6}°", self.periapsis_argument.to_degrees())?;
        write!(f, "  T_p = JDE {:.6}", self.perihelion_time)
    }
}
