//! # MPCORB catalog reader
//!
//! Reads orbits from the Minor Planet Center's `MPCORB.DAT` export, one fixed-width record per
//! line. Only the fields needed for an ephemeris are decoded.
//!
//! ## Field layout (1-based columns)
//! -----------------
//! | Columns | Field |
//! |---|---|
//! | 1–7 | Packed designation |
//! | 9–13 | Absolute magnitude `H` (may be blank) |
//! | 15–19 | Slope parameter `G` (may be blank) |
//! | 21–25 | Packed epoch |
//! | 27–35 | Mean anomaly at the epoch (deg) |
//! | 38–46 | Argument of perihelion, J2000 (deg) |
//! | 49–57 | Longitude of the ascending node, J2000 (deg) |
//! | 60–68 | Inclination, J2000 (deg) |
//! | 71–79 | Eccentricity |
//! | 81–91 | Mean daily motion (deg/day) |
//! | 93–103 | Semi-major axis (AU) |
//! | 167–194 | Readable designation |
//!
//! ## Lookup
//! -----------------
//! [`find_record`] returns the first line of the file that **starts with** the requested
//! designation, header lines included, and parses it. The designation must therefore be given
//! in packed form (`00001`, `K24A01X`).
use std::fs;
use std::ops::Range;

use camino::Utf8Path;
use log::{info, warn};
use thiserror::Error;

use crate::constants::{Degree, JDE};
use crate::keplerian_element::KeplerianElements;
use crate::magnitude::AbsoluteMagnitude;
use crate::mpeph_errors::MpephError;

pub mod packed_epoch;

use packed_epoch::packed_epoch_to_jde;

/// Shortest line that still holds every orbital element
pub const MIN_RECORD_LENGTH: usize = 103;

const DESIGNATION: Range<usize> = 0..7;
const H_MAG: Range<usize> = 8..13;
const G_SLOPE: Range<usize> = 14..19;
const EPOCH: Range<usize> = 20..25;
const MEAN_ANOMALY: Range<usize> = 26..35;
const PERIHELION: Range<usize> = 37..46;
const NODE: Range<usize> = 48..57;
const INCLINATION: Range<usize> = 59..68;
const ECCENTRICITY: Range<usize> = 70..79;
const MEAN_MOTION: Range<usize> = 80..91;
const SEMI_MAJOR_AXIS: Range<usize> = 92..103;
const READABLE_DESIGNATION: Range<usize> = 166..194;

/// Line-level parsing errors for MPCORB records.
///
/// Variants
/// -----------------
/// * `TooShortLine` – The line ends before column 103; payload is its length.
/// * `InvalidField` – A numeric field could not be parsed; payload names the field and carries
///   the offending slice.
/// * `InvalidPackedEpoch` – The epoch field is not a valid packed date.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ParseOrbitError {
    #[error("The line is too short ({0} characters)")]
    TooShortLine(usize),
    #[error("Invalid {field} value: '{value}'")]
    InvalidField { field: &'static str, value: String },
    #[error("Invalid packed epoch: {0}")]
    InvalidPackedEpoch(String),
}

/// One MPCORB record, angles still in degrees as in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct MpcOrbRecord {
    pub designation: String,
    pub readable_designation: Option<String>,
    pub h: Option<f64>,
    pub g: Option<f64>,
    pub epoch: JDE,
    pub mean_anomaly: Degree,
    pub periapsis_argument: Degree,
    pub ascending_node_longitude: Degree,
    pub inclination: Degree,
    pub eccentricity: f64,
    pub mean_motion: Degree,
    pub semi_major_axis: f64,
}

fn slice<'a>(line: &'a str, range: Range<usize>, field: &'static str) -> Result<&'a str, ParseOrbitError> {
    line.get(range).ok_or_else(|| ParseOrbitError::InvalidField {
        field,
        value: line.to_string(),
    })
}

fn required(line: &str, range: Range<usize>, field: &'static str) -> Result<f64, ParseOrbitError> {
    let text = slice(line, range, field)?.trim();
    text.parse().map_err(|_| ParseOrbitError::InvalidField {
        field,
        value: text.to_string(),
    })
}

fn optional(line: &str, range: Range<usize>, field: &'static str) -> Result<Option<f64>, ParseOrbitError> {
    let text = slice(line, range, field)?.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse().map(Some).map_err(|_| ParseOrbitError::InvalidField {
        field,
        value: text.to_string(),
    })
}

impl MpcOrbRecord {
    /// Parse one MPCORB line.
    ///
    /// Return
    /// ------
    /// * The record, or [`MpephError::InvalidOrbitRecord`] describing the first bad field.
    pub fn from_line(line: &str) -> Result<Self, MpephError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.len() < MIN_RECORD_LENGTH {
            return Err(ParseOrbitError::TooShortLine(line.len()).into());
        }

        let epoch_text = slice(line, EPOCH, "epoch")?;
        let readable_designation = line
            .get(READABLE_DESIGNATION.start..line.len().min(READABLE_DESIGNATION.end))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(MpcOrbRecord {
            designation: slice(line, DESIGNATION, "designation")?.trim().to_string(),
            readable_designation,
            h: optional(line, H_MAG, "H")?,
            g: optional(line, G_SLOPE, "G")?,
            epoch: packed_epoch_to_jde(epoch_text)?,
            mean_anomaly: required(line, MEAN_ANOMALY, "mean anomaly")?,
            periapsis_argument: required(line, PERIHELION, "argument of perihelion")?,
            ascending_node_longitude: required(line, NODE, "ascending node")?,
            inclination: required(line, INCLINATION, "inclination")?,
            eccentricity: required(line, ECCENTRICITY, "eccentricity")?,
            mean_motion: required(line, MEAN_MOTION, "mean motion")?,
            semi_major_axis: required(line, SEMI_MAJOR_AXIS, "semi-major axis")?,
        })
    }

    /// Orbital elements in radians, perihelion time derived from the epoch and mean anomaly.
    pub fn keplerian_elements(&self) -> KeplerianElements {
        KeplerianElements::from_mean_anomaly(
            self.epoch,
            self.semi_major_axis,
            self.eccentricity,
            self.inclination.to_radians(),
            self.ascending_node_longitude.to_radians(),
            self.periapsis_argument.to_radians(),
            self.mean_anomaly.to_radians(),
        )
    }

    pub fn magnitude(&self) -> AbsoluteMagnitude {
        AbsoluteMagnitude::new(self.h, self.g)
    }

    /// Readable designation when present, packed designation otherwise.
    pub fn name(&self) -> &str {
        self.readable_designation
            .as_deref()
            .unwrap_or(&self.designation)
    }
}

/// Find and parse the record of `designation` in an MPCORB text.
pub fn find_in_text(text: &str, designation: &str) -> Result<MpcOrbRecord, MpephError> {
    let line = text
        .lines()
        .find(|line| line.starts_with(designation))
        .ok_or_else(|| MpephError::DesignationNotFound(designation.to_string()))?;
    MpcOrbRecord::from_line(line)
}

/// Find and parse the record of `designation` in the MPCORB file at `path`.
pub fn find_record(path: &Utf8Path, designation: &str) -> Result<MpcOrbRecord, MpephError> {
    info!("Looking up {designation} in {path}");
    let text = fs::read_to_string(path)?;
    let record = find_in_text(&text, designation)?;
    if record.h.is_none() {
        warn!("{designation} has no absolute magnitude, no magnitudes will be computed");
    }
    Ok(record)
}
