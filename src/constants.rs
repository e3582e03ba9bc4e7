//! # Constants and type definitions for mpeph
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! aliases** used throughout the `mpeph` library.
//!
//! ## Overview
//!
//! - Astronomical constants (Gaussian gravitational constant, speed of light, AU)
//! - J2000 mean obliquity of the ecliptic, used to orient ecliptic elements in the equatorial frame
//! - Unit conversions (degrees ↔ radians, days ↔ seconds, JD ↔ MJD)
//! - Photometric defaults of the H-G system
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00:00 TT)
pub const J2000: f64 = 2_451_545.0;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Gaussian gravitational constant k (AU^(3/2) / day)
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

/// Sine of the J2000 mean obliquity of the ecliptic (ε = 23°26'21.448")
pub const SIN_OBLIQUITY_J2000: f64 = 0.397777156;

/// Cosine of the J2000 mean obliquity of the ecliptic (ε = 23°26'21.448")
pub const COS_OBLIQUITY_J2000: f64 = 0.917482062;

// -------------------------------------------------------------------------------------------------
// Photometry
// -------------------------------------------------------------------------------------------------

/// Slope parameter G substituted when the catalog does not provide one
pub const DEFAULT_SLOPE_PARAMETER: f64 = 0.15;

/// Default display threshold: magnitudes below this value are not shown
pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 6.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian Ephemeris Date (days, TT scale)
pub type JDE = f64;
