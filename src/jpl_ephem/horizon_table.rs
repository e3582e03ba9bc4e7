//! # JPL Horizons vector table
//!
//! Heliocentric Earth positions tabulated by the JPL Horizons system (`TABLE_TYPE='VECTORS'`,
//! `CENTER='500@10'`, `REF_PLANE=FRAME`, `OUT_UNITS=AU-D`, `CSV_FORMAT=YES`). The table is read
//! from a saved response or, with the `jpl-download` feature, requested from the Horizons API.
//!
//! Between two tabulated epochs the position is obtained by Lagrange interpolation over the
//! [`INTERPOLATION_POINTS`] nearest records. With a daily step this stays well below a
//! kilometre for the Earth.
use std::fs;

use camino::Utf8Path;
use itertools::Itertools;
use log::{debug, info};
use nalgebra::Vector3;
use regex::Regex;

use crate::constants::JDE;
use crate::mpeph_errors::MpephError;
use crate::propagator::{HeliocentricPosition, PositionProvider};

/// Number of records used by the Lagrange interpolation
pub const INTERPOLATION_POINTS: usize = 4;

#[cfg(feature = "jpl-download")]
const HORIZONS_API_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons_file.api";

/// One line of a Horizons vector table.
///
/// `x`, `y`, `z` are the components of the heliocentric position vector, in AU, at the
/// barycentric dynamical time `jd`.
#[derive(Debug, serde::Deserialize, PartialEq, Clone)]
pub struct PosRecord {
    #[serde(rename = "JDTDB")]
    pub jd: f64,
    #[serde(rename = "CalendarDate(TDB)")]
    pub date: String,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Z")]
    pub z: f64,
}

impl PosRecord {
    pub fn pos_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Tabulated heliocentric Earth positions, sorted by date.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonTable {
    records: Vec<PosRecord>,
}

impl HorizonTable {
    /// Parse a raw Horizons response.
    ///
    /// Only the CSV block between `$$SOE` and `$$EOE` and the column header line above it are
    /// used; extra columns (velocities, light time) are ignored.
    ///
    /// Return
    /// ------
    /// * The table, or [`MpephError::InvalidHorizonResponse`] if the markers or the header are
    ///   missing, or if fewer than two records are present.
    pub fn from_response(response: &str) -> Result<Self, MpephError> {
        let data_regex = Regex::new(r"(?s)\$\$SOE\s*\n(.*?)\$\$EOE")?;
        let header_regex = Regex::new(r"(?m)^\s*JDTDB\s*,.*$")?;

        let data = data_regex
            .captures(response)
            .and_then(|cap| cap.get(1))
            .ok_or_else(|| {
                MpephError::InvalidHorizonResponse("no $$SOE / $$EOE data block".into())
            })?
            .as_str();
        let header = header_regex
            .find(response)
            .ok_or_else(|| MpephError::InvalidHorizonResponse("no JDTDB column header".into()))?
            .as_str();

        // The trailing ',' of every Horizons line would read as an empty last column.
        let clean = |line: &str| line.trim().trim_end_matches(',').replace(' ', "");
        let csv_text = std::iter::once(clean(header))
            .chain(data.lines().filter(|l| !l.trim().is_empty()).map(clean))
            .join("\n");

        let mut csv_reader = csv::Reader::from_reader(csv_text.as_bytes());
        let mut records = csv_reader
            .deserialize::<PosRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        records.sort_by(|a, b| a.jd.total_cmp(&b.jd));
        // repeated nodes would make the interpolation singular
        records.dedup_by(|a, b| a.jd == b.jd);

        if records.len() < 2 {
            return Err(MpephError::InvalidHorizonResponse(format!(
                "{} record(s), at least 2 are needed",
                records.len()
            )));
        }

        debug!(
            "Horizons table: {} records from JD {} to JD {}",
            records.len(),
            records[0].jd,
            records[records.len() - 1].jd
        );
        Ok(HorizonTable { records })
    }

    /// Read a Horizons response saved to disk.
    pub fn from_file(path: &Utf8Path) -> Result<Self, MpephError> {
        info!("Reading Earth vectors from {path}");
        let response = fs::read_to_string(path)?;
        Self::from_response(&response)
    }

    /// Request the heliocentric Earth vectors from the Horizons API.
    ///
    /// Arguments
    /// ---------
    /// * `start`, `stop` – Coverage of the table (JDE); one extra step is added on both sides
    ///   so the light-time retarded dates stay covered.
    /// * `step_days` – Tabulation step in days.
    #[cfg(feature = "jpl-download")]
    pub fn fetch(start: JDE, stop: JDE, step_days: f64) -> Result<Self, MpephError> {
        let params = horizon_query(start - step_days, stop + step_days, step_days);
        info!("Requesting Earth vectors from {HORIZONS_API_URL}");

        let rt = tokio::runtime::Runtime::new()?;
        let response = rt.block_on(async {
            reqwest::Client::new()
                .post(HORIZONS_API_URL)
                .form(&[("format", "text"), ("input", params.as_str())])
                .send()
                .await?
                .text()
                .await
        })?;
        Self::from_response(&response)
    }

    pub fn records(&self) -> &[PosRecord] {
        &self.records
    }

    /// First and last tabulated dates.
    pub fn coverage(&self) -> (JDE, JDE) {
        (self.records[0].jd, self.records[self.records.len() - 1].jd)
    }

    /// Interpolated heliocentric Earth position at `jde`.
    ///
    /// Return
    /// ------
    /// * [`MpephError::EphemerisOutOfRange`] if `jde` is outside [`HorizonTable::coverage`].
    pub fn interpolate(&self, jde: JDE) -> Result<Vector3<f64>, MpephError> {
        let (start, end) = self.coverage();
        if !(start..=end).contains(&jde) {
            return Err(MpephError::EphemerisOutOfRange { jde, start, end });
        }

        let points = INTERPOLATION_POINTS.min(self.records.len());
        let next = self.records.partition_point(|r| r.jd < jde);
        let first = next
            .saturating_sub(points / 2)
            .min(self.records.len() - points);
        let window = &self.records[first..first + points];

        Ok(window
            .iter()
            .enumerate()
            .map(|(i, ri)| {
                let weight = window
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, rj)| (jde - rj.jd) / (ri.jd - rj.jd))
                    .product::<f64>();
                ri.pos_vector() * weight
            })
            .sum())
    }
}

impl PositionProvider for HorizonTable {
    fn heliocentric_position(&self, jde: JDE) -> Result<HeliocentricPosition, MpephError> {
        Ok(HeliocentricPosition::from_vector(self.interpolate(jde)?))
    }
}

/// Horizons batch input for the heliocentric Earth vectors on a regular grid.
#[cfg(feature = "jpl-download")]
fn horizon_query(start: JDE, stop: JDE, step_days: f64) -> String {
    let step_minutes = (step_days * 1440.0).round().max(1.0) as u64;
    format!(
        "
!$$SOF
COMMAND='399'
OBJ_DATA='NO'
MAKE_EPHEM='YES'
TABLE_TYPE='VECTORS'
CENTER='500@10'
START_TIME='JD {start}'
STOP_TIME='JD {stop}'
STEP_SIZE='{step_minutes} min'
CSV_FORMAT=YES
REF_SYSTEM=ICRF
OUT_UNITS=AU-D
REF_PLANE=FRAME
VEC_TABLE=1
"
    )
}
