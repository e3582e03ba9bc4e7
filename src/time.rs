//! # Time conversions
//!
//! Every computation in the crate runs on the Julian Ephemeris Date (TT). Dates enter and leave
//! the crate as UTC civil timestamps (`YYYY-MM-DDTHH:MM:SSZ`); [`hifitime`] takes care of the leap
//! seconds and of the TT − TAI offset.
use std::str::FromStr;

use hifitime::{Duration, Epoch, TimeScale};

use crate::constants::{JDE, JDTOMJD};
use crate::mpeph_errors::MpephError;

/// Convert a UTC timestamp such as `2024-03-01T00:00:00Z` to a Julian Ephemeris Date.
///
/// The trailing `Z` is optional.
pub fn iso_to_jde(date: &str) -> Result<JDE, MpephError> {
    let trimmed = date.trim();
    let epoch = Epoch::from_str(trimmed.strip_suffix('Z').unwrap_or(trimmed))
        .map_err(|err| MpephError::InvalidDate(format!("{date}: {err}")))?;
    Ok(epoch.to_mjd_tt_days() + JDTOMJD)
}

/// Epoch of a Julian Ephemeris Date.
pub fn jde_to_epoch(jde: JDE) -> Epoch {
    Epoch::from_mjd_in_time_scale(jde - JDTOMJD, TimeScale::TT)
}

/// UTC timestamp `YYYY-MM-DDTHH:MM:SSZ` of a Julian Ephemeris Date, rounded to the second.
pub fn jde_to_iso(jde: JDE) -> String {
    let (y, m, d, hh, mm, ss, _) = jde_to_epoch(jde)
        .round(Duration::from_seconds(1.0))
        .to_gregorian_utc();
    format!("{y:04}-{m:02}-{d:02}T{hh:02}:{mm:02}:{ss:02}Z")
}

/// Julian Ephemeris Date of a calendar date at 0h TT.
pub fn calendar_to_jde(year: i32, month: u8, day: u8) -> Result<JDE, MpephError> {
    let epoch = Epoch::maybe_from_gregorian(year, month, day, 0, 0, 0, 0, TimeScale::TT)
        .map_err(|err| MpephError::InvalidDate(format!("{year:04}-{month:02}-{day:02}: {err}")))?;
    Ok(epoch.to_mjd_tt_days() + JDTOMJD)
}

/// Largest date grid [`sample_times`] will build
pub const MAX_SAMPLES: usize = 1_000_000;

/// Dates from `start` to `end` inclusive, every `step` days.
///
/// The last date is kept when it falls within a nanoday of `end`, so that a step dividing the
/// interval evenly always yields both ends.
///
/// Return
/// ------
/// * [`MpephError::InvalidDate`] if a bound or `step` is not finite, if `step` is not strictly
///   positive, if `end < start`, or if the grid would hold more than [`MAX_SAMPLES`] dates.
pub fn sample_times(start: JDE, end: JDE, step: f64) -> Result<Vec<JDE>, MpephError> {
    if !(start.is_finite() && end.is_finite() && step.is_finite()) {
        return Err(MpephError::InvalidDate(format!(
            "non-finite grid: start {start}, end {end}, step {step}"
        )));
    }
    if step <= 0.0 {
        return Err(MpephError::InvalidDate(format!("non-positive step {step}")));
    }
    if end < start {
        return Err(MpephError::InvalidDate(format!(
            "end JDE {end} is before start JDE {start}"
        )));
    }
    let steps = ((end - start) / step + 1e-9).floor();
    if steps >= MAX_SAMPLES as f64 {
        return Err(MpephError::InvalidDate(format!(
            "step {step} gives more than {MAX_SAMPLES} dates"
        )));
    }
    let count = steps as usize;
    Ok((0..=count).map(|k| start + k as f64 * step).collect())
}
