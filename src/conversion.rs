use crate::constants::Radian;
use crate::kepler::principal_angle;

/// Split a non-negative quantity, counted in `1 / scale` units of its last field, into
/// `(whole units, minutes, seconds)` after rounding to that last field.
fn sexagesimal(value: f64, scale: f64) -> (u64, u64, f64) {
    let ticks = (value * 3600.0 * scale).round() as u64;
    let per_unit = (3600.0 * scale) as u64;
    let per_minute = (60.0 * scale) as u64;

    let units = ticks / per_unit;
    let minutes = (ticks % per_unit) / per_minute;
    let seconds = (ticks % per_minute) as f64 / scale;
    (units, minutes, seconds)
}

/// Format a right ascension as `HHhMMmSS.Ss`.
///
/// Arguments
/// ---------
/// * `ra`: right ascension in radians, any value (reduced to `[0, 2π)`)
///
/// Return
/// ------
/// * the right ascension rounded to a tenth of a second of time, e.g. `03h50m37.7s`
pub fn format_ra(ra: Radian) -> String {
    let hours = principal_angle(ra).to_degrees() / 15.0;
    let (h, m, s) = sexagesimal(hours, 10.0);
    format!("{:02}h{:02}m{:04.1}s", h % 24, m, s)
}

/// Format an angle as `±DD°MM'SS"`.
///
/// Arguments
/// ---------
/// * `angle`: angle in radians
///
/// Return
/// ------
/// * the angle rounded to the arcsecond, always signed, e.g. `-05°12'07"`
pub fn format_angle(angle: Radian) -> String {
    let degrees = angle.to_degrees();
    let sign = if degrees < 0.0 { '-' } else { '+' };
    let (d, m, s) = sexagesimal(degrees.abs(), 1.0);
    format!("{sign}{d:02}°{m:02}'{s:02.0}\"")
}
