//! # Job configuration
//!
//! An ephemeris job names the object, the dates and the data sources. It can be read from a
//! JSON file, given on the command line, or both; command-line values win.
//!
//! ```json
//! {
//!   "designation": "00001",
//!   "start": "2024-03-01T00:00:00Z",
//!   "end": "2024-03-31T00:00:00Z",
//!   "step_days": 5.0,
//!   "mpcorb": "MPCORB.DAT",
//!   "ephemeris": "horizon:earth_vectors.txt",
//!   "magnitude_limit": 6.0
//! }
//! ```
//!
//! Only `designation` and `start` are required.
use std::fs::File;
use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;

use crate::constants::{DEFAULT_MAGNITUDE_LIMIT, JDE};
use crate::jpl_ephem::EphemSource;
use crate::mpeph_errors::MpephError;
use crate::time::{iso_to_jde, sample_times};

/// Catalog file looked up when none is given
pub const DEFAULT_MPCORB: &str = "MPCORB.DAT";

/// Earth ephemeris used when none is given
pub const DEFAULT_EPHEMERIS: &str = "mean";

/// Job description as written by the user, every field optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub designation: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub step_days: Option<f64>,
    pub mpcorb: Option<String>,
    pub ephemeris: Option<String>,
    pub magnitude_limit: Option<f64>,
}

/// Validated job, dates converted to JDE.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub designation: String,
    pub start: JDE,
    pub end: Option<JDE>,
    pub step_days: Option<f64>,
    pub mpcorb: Utf8PathBuf,
    pub ephemeris: EphemSource,
    pub magnitude_limit: f64,
}

impl JobConfig {
    pub fn from_file(path: &Utf8Path) -> Result<Self, MpephError> {
        debug!("Reading job file {path}");
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(text: &str) -> Result<Self, MpephError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Fields set in `overrides` replace the ones of `self`.
    pub fn merge(self, overrides: JobConfig) -> JobConfig {
        JobConfig {
            designation: overrides.designation.or(self.designation),
            start: overrides.start.or(self.start),
            end: overrides.end.or(self.end),
            step_days: overrides.step_days.or(self.step_days),
            mpcorb: overrides.mpcorb.or(self.mpcorb),
            ephemeris: overrides.ephemeris.or(self.ephemeris),
            magnitude_limit: overrides.magnitude_limit.or(self.magnitude_limit),
        }
    }

    /// Check the required fields, parse dates and sources, fill in the defaults.
    pub fn resolve(self) -> Result<Job, MpephError> {
        let designation = self
            .designation
            .ok_or(MpephError::MissingJobField("designation"))?;
        let start = iso_to_jde(
            self.start
                .as_deref()
                .ok_or(MpephError::MissingJobField("start"))?,
        )?;
        let end = self.end.as_deref().map(iso_to_jde).transpose()?;

        Ok(Job {
            designation,
            start,
            end,
            step_days: self.step_days,
            mpcorb: Utf8PathBuf::from(self.mpcorb.as_deref().unwrap_or(DEFAULT_MPCORB)),
            ephemeris: self
                .ephemeris
                .as_deref()
                .unwrap_or(DEFAULT_EPHEMERIS)
                .parse()?,
            magnitude_limit: self.magnitude_limit.unwrap_or(DEFAULT_MAGNITUDE_LIMIT),
        })
    }
}

impl Job {
    /// Dates to sample.
    ///
    /// * no `end`: the start date only,
    /// * `end` without `step_days`: start and end,
    /// * `end` and `step_days`: the inclusive grid from start to end.
    pub fn sample_dates(&self) -> Result<Vec<JDE>, MpephError> {
        match (self.end, self.step_days) {
            (None, _) => Ok(vec![self.start]),
            (Some(end), None) => Ok(vec![self.start, end]),
            (Some(end), Some(step)) => sample_times(self.start, end, step),
        }
    }

    /// Earliest and latest requested dates.
    pub fn span(&self) -> (JDE, JDE) {
        let end = self.end.unwrap_or(self.start);
        (self.start.min(end), self.start.max(end))
    }
}

#[cfg(test)]
mod job_test {
    use super::*;

    const JOB: &str = r#"{
        "designation": "00001",
        "start": "2024-03-01T00:00:00Z",
        "end": "2024-03-03T00:00:00Z",
        "step_days": 1.0,
        "ephemeris": "horizon:vectors.txt"
    }"#;

    #[test]
    fn test_from_json_and_resolve() {
        let job = JobConfig::from_json(JOB).unwrap().resolve().unwrap();
        assert_eq!(job.designation, "00001");
        assert_eq!(job.mpcorb, Utf8PathBuf::from("MPCORB.DAT"));
        assert_eq!(job.ephemeris, EphemSource::HorizonFile("vectors.txt".into()));
        assert_eq!(job.magnitude_limit, 6.0);
        let dates = job.sample_dates().unwrap();
        assert_eq!(dates.len(), 3);
        assert!((dates[2] - dates[0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = JobConfig::from_json(JOB).unwrap();
        let cli = JobConfig {
            designation: Some("00004".into()),
            magnitude_limit: Some(9.5),
            ..JobConfig::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.designation.as_deref(), Some("00004"));
        assert_eq!(merged.magnitude_limit, Some(9.5));
        assert_eq!(merged.step_days, Some(1.0));
        assert_eq!(merged.start.as_deref(), Some("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            JobConfig::default().resolve(),
            Err(MpephError::MissingJobField("designation"))
        );
        let no_start = JobConfig {
            designation: Some("00001".into()),
            ..JobConfig::default()
        };
        assert_eq!(no_start.resolve(), Err(MpephError::MissingJobField("start")));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            JobConfig::from_json(r#"{"designation": "00001", "site": "500"}"#),
            Err(MpephError::JsonError(_))
        ));
    }

    #[test]
    fn test_sample_dates_without_step() {
        let single = JobConfig {
            designation: Some("00001".into()),
            start: Some("2024-03-01T00:00:00Z".into()),
            ..JobConfig::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(single.sample_dates().unwrap(), vec![single.start]);
        assert_eq!(single.span(), (single.start, single.start));

        let pair = JobConfig {
            end: Some("2024-02-01T00:00:00Z".into()),
            ..JobConfig {
                designation: Some("00001".into()),
                start: Some("2024-03-01T00:00:00Z".into()),
                ..JobConfig::default()
            }
        }
        .resolve()
        .unwrap();
        let dates = pair.sample_dates().unwrap();
        assert_eq!(dates, vec![pair.start, pair.end.unwrap()]);
        assert_eq!(pair.span(), (pair.end.unwrap(), pair.start));
    }

    #[test]
    fn test_tiny_step_is_an_error() {
        let job = JobConfig::from_json(JOB)
            .unwrap()
            .merge(JobConfig {
                step_days: Some(1e-300),
                ..JobConfig::default()
            })
            .resolve()
            .unwrap();
        assert!(matches!(job.sample_dates(), Err(MpephError::InvalidDate(_))));
    }
}
