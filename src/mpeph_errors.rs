use thiserror::Error;

use crate::mpcorb::ParseOrbitError;

#[derive(Error, Debug)]
pub enum MpephError {
    #[error("Designation not found in the orbit catalog: {0}")]
    DesignationNotFound(String),

    #[error("Error during the MPCORB record parsing: {0}")]
    InvalidOrbitRecord(ParseOrbitError),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Missing required job field: {0}")]
    MissingJobField(&'static str),

    #[error("Invalid ephemeris source: {0}")]
    InvalidEphemSource(String),

    #[error("Invalid JPL Horizons response: {0}")]
    InvalidHorizonResponse(String),

    #[error("Epoch {jde} is outside the Earth ephemeris table [{start}, {end}]")]
    EphemerisOutOfRange { jde: f64, start: f64, end: f64 },

    #[error("Invalid regular expression: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Job file error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[cfg(feature = "jpl-download")]
    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),
}

impl From<ParseOrbitError> for MpephError {
    fn from(err: ParseOrbitError) -> Self {
        MpephError::InvalidOrbitRecord(err)
    }
}

impl PartialEq for MpephError {
    fn eq(&self, other: &Self) -> bool {
        use MpephError::*;
        match (self, other) {
            (DesignationNotFound(a), DesignationNotFound(b)) => a == b,
            (InvalidOrbitRecord(a), InvalidOrbitRecord(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (MissingJobField(a), MissingJobField(b)) => a == b,
            (InvalidEphemSource(a), InvalidEphemSource(b)) => a == b,
            (InvalidHorizonResponse(a), InvalidHorizonResponse(b)) => a == b,
            (
                EphemerisOutOfRange {
                    jde: a,
                    start: s1,
                    end: e1,
                },
                EphemerisOutOfRange {
                    jde: b,
                    start: s2,
                    end: e2,
                },
            ) => a == b && s1 == s2 && e1 == e2,
            (RegexError(a), RegexError(b)) => a == b,
            (RootFindingError(a), RootFindingError(b)) => a == b,

            // wrapped foreign errors are not comparable: equal if same variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            #[cfg(feature = "jpl-download")]
            (ReqwestError(_), ReqwestError(_)) => true,

            _ => false,
        }
    }
}
