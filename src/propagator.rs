//! # Two-body orbit propagation
//!
//! [`OrbitPropagator`] turns a [`KeplerianElements`] set into heliocentric rectangular
//! coordinates in the **J2000 equatorial** frame at any Julian Ephemeris Date.
//!
//! ## Orientation scalars
//!
//! The elements are referred to the J2000 ecliptic. Rotating the orbital plane into the
//! equatorial frame is folded into six scalars computed once per element set from `Ω`, `i`
//! and the J2000 obliquity `ε`:
//!
//! ```text
//! F = cos Ω            P = −sin Ω cos i
//! G = sin Ω cos ε      Q =  cos Ω cos i cos ε − sin i sin ε
//! H = sin Ω sin ε      R =  cos Ω cos i sin ε + sin i cos ε
//!
//! A = atan2(F, P)      a' = hypot(F, P)
//! B = atan2(G, Q)      b' = hypot(G, Q)
//! C = atan2(H, R)      c' = hypot(H, R)
//! ```
//!
//! so that for a true anomaly `ν` and distance `r`:
//!
//! ```text
//! x = r·a'·sin(A + ω + ν)
//! y = r·b'·sin(B + ω + ν)
//! z = r·c'·sin(C + ω + ν)
//! ```
//!
//! ## Position providers
//!
//! [`PositionProvider`] is the one capability the astrometric reduction needs from a body: a
//! heliocentric position at a given date. The propagator implements it for minor planets, and
//! the Earth ephemerides of [`crate::jpl_ephem`] implement it for the observer.
use nalgebra::Vector3;

use crate::constants::{AstronomicalUnit, COS_OBLIQUITY_J2000, JDE, SIN_OBLIQUITY_J2000};
use crate::kepler::{radius, true_anomaly, KeplerSolver};
use crate::keplerian_element::KeplerianElements;
use crate::mpeph_errors::MpephError;

/// Heliocentric rectangular position in the J2000 equatorial frame.
///
/// Fields
/// -----------------
/// * `position` – `[x, y, z]` in AU.
/// * `distance` – Heliocentric distance `r` in AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeliocentricPosition {
    pub position: Vector3<f64>,
    pub distance: AstronomicalUnit,
}

impl HeliocentricPosition {
    /// Build a position whose distance is the norm of the vector.
    pub fn from_vector(position: Vector3<f64>) -> Self {
        HeliocentricPosition {
            position,
            distance: position.norm(),
        }
    }
}

/// Anything that can report its heliocentric J2000 equatorial position at a date.
pub trait PositionProvider {
    /// Heliocentric position at `jde`.
    ///
    /// Errors
    /// ------
    /// Implementations backed by data (tables, files) fail outside their coverage; analytic
    /// ones only fail if Kepler's equation cannot be solved.
    fn heliocentric_position(&self, jde: JDE) -> Result<HeliocentricPosition, MpephError>;
}

impl<T: PositionProvider + ?Sized> PositionProvider for &T {
    fn heliocentric_position(&self, jde: JDE) -> Result<HeliocentricPosition, MpephError> {
        (**self).heliocentric_position(jde)
    }
}

/// Cached orientation of the orbital plane in the equatorial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlaneOrientation {
    angles: Vector3<f64>,
    magnitudes: Vector3<f64>,
}

impl PlaneOrientation {
    fn new(ascending_node_longitude: f64, inclination: f64) -> Self {
        let (sin_node, cos_node) = ascending_node_longitude.sin_cos();
        let (sin_inc, cos_inc) = inclination.sin_cos();

        let f = cos_node;
        let g = sin_node * COS_OBLIQUITY_J2000;
        let h = sin_node * SIN_OBLIQUITY_J2000;
        let p = -sin_node * cos_inc;
        let q = cos_node * cos_inc * COS_OBLIQUITY_J2000 - sin_inc * SIN_OBLIQUITY_J2000;
        let r = cos_node * cos_inc * SIN_OBLIQUITY_J2000 + sin_inc * COS_OBLIQUITY_J2000;

        PlaneOrientation {
            angles: Vector3::new(f.atan2(p), g.atan2(q), h.atan2(r)),
            magnitudes: Vector3::new(f.hypot(p), g.hypot(q), h.hypot(r)),
        }
    }
}

/// Elliptic two-body propagator for one element set.
///
/// The mean motion and the orientation scalars are computed once in [`OrbitPropagator::new`];
/// [`OrbitPropagator::position`] is then a pure function of the date.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitPropagator {
    elements: KeplerianElements,
    mean_motion: f64,
    orientation: PlaneOrientation,
    solver: KeplerSolver,
}

impl OrbitPropagator {
    /// Prepare a propagator with the default [`KeplerSolver`].
    pub fn new(elements: &KeplerianElements) -> Self {
        Self::with_solver(elements, KeplerSolver::default())
    }

    /// Prepare a propagator with a custom Kepler solver configuration.
    pub fn with_solver(elements: &KeplerianElements, solver: KeplerSolver) -> Self {
        OrbitPropagator {
            elements: elements.clone(),
            mean_motion: elements.mean_motion(),
            orientation: PlaneOrientation::new(
                elements.ascending_node_longitude,
                elements.inclination,
            ),
            solver,
        }
    }

    pub fn elements(&self) -> &KeplerianElements {
        &self.elements
    }

    /// Mean motion `n = k / (a·√a)` in radians per day.
    pub fn mean_motion(&self) -> f64 {
        self.mean_motion
    }

    /// Heliocentric J2000 equatorial position at `jde`.
    ///
    /// Arguments
    /// ---------
    /// * `jde` – Julian Ephemeris Date.
    ///
    /// Return
    /// ------
    /// * The position `[x, y, z]` (AU) and the heliocentric distance `r = a·(1 − e·cos E)`.
    pub fn position(&self, jde: JDE) -> Result<HeliocentricPosition, MpephError> {
        let ecc = self.elements.eccentricity;
        let mean_anomaly = self.mean_motion * (jde - self.elements.perihelion_time);
        let ecc_anom = self.solver.solve(ecc, mean_anomaly)?.eccentric_anomaly;

        let nu = true_anomaly(ecc_anom, ecc);
        let r = radius(ecc_anom, ecc, self.elements.semi_major_axis);

        let argument = self.elements.periapsis_argument + nu;
        let angles = &self.orientation.angles;
        let position = r * Vector3::new(
            (angles.x + argument).sin(),
            (angles.y + argument).sin(),
            (angles.z + argument).sin(),
        )
        .component_mul(&self.orientation.magnitudes);

        Ok(HeliocentricPosition {
            position,
            distance: r,
        })
    }
}

impl PositionProvider for OrbitPropagator {
    fn heliocentric_position(&self, jde: JDE) -> Result<HeliocentricPosition, MpephError> {
        self.position(jde)
    }
}
