//! # Earth ephemerides
//!
//! Providers of the Earth's heliocentric J2000 equatorial position, the observer side of the
//! astrometric reduction.
//!
//! | Source string | Provider |
//! |---|---|
//! | `mean` | [`MeanEarth`]: analytic mean elements, no data needed |
//! | `horizon:<path>` | [`HorizonTable`] read from a saved JPL Horizons vector table |
//! | `horizon-api` | [`HorizonTable`] requested from JPL (feature `jpl-download`) |
//!
//! [`EarthEphemeris`] wraps whichever was selected and is what the binary hands to the
//! [`AstrometricReducer`](crate::reducer::AstrometricReducer).
use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use log::info;

use crate::constants::JDE;
use crate::mpeph_errors::MpephError;
use crate::propagator::{HeliocentricPosition, PositionProvider};

pub mod horizon_table;
pub mod mean_earth;

pub use horizon_table::HorizonTable;
pub use mean_earth::MeanEarth;

/// Where the Earth positions come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EphemSource {
    Mean,
    HorizonFile(Utf8PathBuf),
    HorizonApi,
}

impl FromStr for EphemSource {
    type Err = MpephError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            None if s == "mean" => Ok(EphemSource::Mean),
            None if s == "horizon-api" => Ok(EphemSource::HorizonApi),
            Some(("horizon", path)) if !path.is_empty() => {
                Ok(EphemSource::HorizonFile(Utf8PathBuf::from(path)))
            }
            _ => Err(MpephError::InvalidEphemSource(s.to_string())),
        }
    }
}

impl fmt::Display for EphemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EphemSource::Mean => write!(f, "mean"),
            EphemSource::HorizonFile(path) => write!(f, "horizon:{path}"),
            EphemSource::HorizonApi => write!(f, "horizon-api"),
        }
    }
}

/// Loaded Earth ephemeris.
#[derive(Debug, Clone)]
pub enum EarthEphemeris {
    Mean(MeanEarth),
    Horizon(HorizonTable),
}

impl EarthEphemeris {
    /// Load the Earth ephemeris described by `source`.
    ///
    /// Arguments
    /// ---------
    /// * `source` – Selected provider.
    /// * `start`, `end` – Dates the session will ask for; only used to size a table requested
    ///   from the Horizons API (one-day step).
    pub fn load(source: &EphemSource, start: JDE, end: JDE) -> Result<Self, MpephError> {
        info!("Loading Earth ephemeris '{source}'");
        match source {
            EphemSource::Mean => Ok(EarthEphemeris::Mean(MeanEarth)),
            EphemSource::HorizonFile(path) => {
                Ok(EarthEphemeris::Horizon(HorizonTable::from_file(path)?))
            }
            #[cfg(feature = "jpl-download")]
            EphemSource::HorizonApi => Ok(EarthEphemeris::Horizon(HorizonTable::fetch(
                start.min(end),
                start.max(end),
                1.0,
            )?)),
            #[cfg(not(feature = "jpl-download"))]
            EphemSource::HorizonApi => {
                let _ = (start, end);
                Err(MpephError::InvalidEphemSource(
                    "horizon-api requires the jpl-download feature".into(),
                ))
            }
        }
    }
}

impl PositionProvider for EarthEphemeris {
    fn heliocentric_position(&self, jde: JDE) -> Result<HeliocentricPosition, MpephError> {
        match self {
            EarthEphemeris::Mean(earth) => earth.heliocentric_position(jde),
            EarthEphemeris::Horizon(table) => table.heliocentric_position(jde),
        }
    }
}
