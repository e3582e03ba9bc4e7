//! # Mean-element Earth
//!
//! Offline heliocentric position of the Earth–Moon barycentre computed from the JPL approximate
//! Keplerian elements of the planets (Standish, table 1, valid 1800–2050 AD). Each element is a
//! linear function of `T`, the number of Julian centuries since J2000:
//!
//! ```text
//! a = 1.00000261  + 0.00000562 T                 (AU)
//! e = 0.01671123  − 0.00004392 T
//! I = −0.00001531 − 0.01294668 T                 (deg)
//! L = 100.46457166 + 35999.37244981 T            (deg)
//! ϖ = 102.93768193 + 0.32327364 T                (deg)
//! Ω = 0
//! ```
//!
//! The elements are referred to the J2000 ecliptic, so they are propagated through the same
//! [`OrbitPropagator`] as the minor planets. The model gives the barycentre, not the Earth
//! itself, and the two differ by about 3e-5 AU. Against DE441 the position is off by about
//! 1e-4 AU, close to 20″ seen from 1 AU. Use a
//! [`HorizonTable`](super::horizon_table::HorizonTable) for sub-arcsecond work.
use crate::constants::{DAYS_PER_CENTURY, J2000, JDE, RADEG};
use crate::keplerian_element::KeplerianElements;
use crate::mpeph_errors::MpephError;
use crate::propagator::{HeliocentricPosition, OrbitPropagator, PositionProvider};

/// `(value at J2000, rate per Julian century)`
type LinearElement = (f64, f64);

const SEMI_MAJOR_AXIS: LinearElement = (1.000_002_61, 0.000_005_62);
const ECCENTRICITY: LinearElement = (0.016_711_23, -0.000_043_92);
const INCLINATION: LinearElement = (-0.000_015_31, -0.012_946_68);
const MEAN_LONGITUDE: LinearElement = (100.464_571_66, 35_999.372_449_81);
const PERIHELION_LONGITUDE: LinearElement = (102.937_681_93, 0.323_273_64);
const NODE_LONGITUDE: LinearElement = (0.0, 0.0);

fn at(element: LinearElement, centuries: f64) -> f64 {
    element.0 + element.1 * centuries
}

/// Earth position provider built on mean orbital elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeanEarth;

impl MeanEarth {
    /// Osculating-like elements of the Earth–Moon barycentre at `jde`.
    pub fn elements(&self, jde: JDE) -> KeplerianElements {
        let centuries = (jde - J2000) / DAYS_PER_CENTURY;

        let node = at(NODE_LONGITUDE, centuries);
        let perihelion = at(PERIHELION_LONGITUDE, centuries);
        let mean_anomaly = at(MEAN_LONGITUDE, centuries) - perihelion;

        KeplerianElements::from_mean_anomaly(
            jde,
            at(SEMI_MAJOR_AXIS, centuries),
            at(ECCENTRICITY, centuries),
            at(INCLINATION, centuries) * RADEG,
            node * RADEG,
            (perihelion - node) * RADEG,
            mean_anomaly * RADEG,
        )
    }
}

impl PositionProvider for MeanEarth {
    fn heliocentric_position(&self, jde: JDE) -> Result<HeliocentricPosition, MpephError> {
        OrbitPropagator::new(&self.elements(jde)).position(jde)
    }
}
