//! # mpeph
//!
//! Apparent geocentric place and visual magnitude of minor planets from their Keplerian
//! elements.
//!
//! * [`kepler`], [`keplerian_element`] and [`propagator`] turn an element set into heliocentric
//!   J2000 equatorial positions.
//! * [`reducer`] combines them with an Earth ephemeris from [`jpl_ephem`] into α, δ, elongation
//!   and phase angle, with a single light-time correction.
//! * [`magnitude`] estimates the visual magnitude in the H-G system.
//! * [`ephemeris`] runs the whole chain for a list of dates.
//! * [`mpcorb`], [`time`], [`job`], [`display`] and [`conversion`] read the catalog and the
//!   dates, and print the result.
pub mod constants;
pub mod conversion;
pub mod display;
pub mod ephemeris;
pub mod job;
pub mod jpl_ephem;
pub mod kepler;
pub mod keplerian_element;
pub mod magnitude;
pub mod mpcorb;
pub mod mpeph_errors;
pub mod propagator;
pub mod reducer;
pub mod time;

pub use ephemeris::{Ephemeris, EphemerisSample};
pub use keplerian_element::KeplerianElements;
pub use magnitude::AbsoluteMagnitude;
pub use mpeph_errors::MpephError;
pub use propagator::{HeliocentricPosition, OrbitPropagator, PositionProvider};
pub use reducer::{ApparentPlace, AstrometricReducer};
