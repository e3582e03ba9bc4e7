//! # Tabular display of ephemerides
//!
//! [`EphemerisTable`] borrows a slice of [`EphemerisSample`]s and renders it either as a
//! fixed-width text table (through [`std::fmt::Display`]) or as CSV.
//!
//! ## Columns
//!
//! `Date (UTC) | RA [hms] | Dec [dms] | V | Elong. [dms]`
//!
//! The CSV output adds the JDE, the angles in degrees, the phase angle and both distances.
//!
//! ## Magnitude threshold
//!
//! A magnitude is printed only when it is known **and** not brighter than the threshold
//! (default [`DEFAULT_MAGNITUDE_LIMIT`]); otherwise the column is left blank. The
//! threshold is applied to each row on its own.
use std::fmt;
use std::io;

use serde::Serialize;

use crate::constants::{DEFAULT_MAGNITUDE_LIMIT, JDE};
use crate::conversion::{format_angle, format_ra};
use crate::ephemeris::EphemerisSample;
use crate::mpeph_errors::MpephError;
use crate::time::jde_to_iso;

/// Borrowing renderer for a list of ephemeris samples.
#[derive(Debug, Clone, Copy)]
pub struct EphemerisTable<'a> {
    samples: &'a [EphemerisSample],
    magnitude_limit: f64,
}

#[derive(Debug, Serialize)]
struct CsvRow {
    date: String,
    jde: JDE,
    ra: String,
    dec: String,
    ra_deg: f64,
    dec_deg: f64,
    magnitude: Option<f64>,
    elongation_deg: f64,
    phase_angle_deg: f64,
    r_au: f64,
    delta_au: f64,
}

impl<'a> EphemerisTable<'a> {
    pub fn new(samples: &'a [EphemerisSample]) -> Self {
        EphemerisTable {
            samples,
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
        }
    }

    pub fn with_magnitude_limit(mut self, limit: f64) -> Self {
        self.magnitude_limit = limit;
        self
    }

    /// Magnitude of `sample` as it should be displayed.
    pub fn shown_magnitude(&self, sample: &EphemerisSample) -> Option<f64> {
        sample.magnitude.filter(|v| *v >= self.magnitude_limit)
    }

    /// Write the samples as CSV, one header line then one row per sample.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), MpephError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for sample in self.samples {
            csv_writer.serialize(CsvRow {
                date: jde_to_iso(sample.jde),
                jde: sample.jde,
                ra: format_ra(sample.right_ascension),
                dec: format_angle(sample.declination),
                ra_deg: sample.right_ascension.to_degrees(),
                dec_deg: sample.declination.to_degrees(),
                magnitude: self.shown_magnitude(sample),
                elongation_deg: sample.elongation.to_degrees(),
                phase_angle_deg: sample.phase_angle.to_degrees(),
                r_au: sample.heliocentric_distance,
                delta_au: sample.geocentric_distance,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for EphemerisTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<20}  {:<11}  {:<10}  {:>4}  {:<11}",
            "Date (UTC)", "RA", "Dec", "V", "Elongation"
        )?;
        for sample in self.samples {
            let magnitude = self
                .shown_magnitude(sample)
                .map(|v| format!("{v:4.1}"))
                .unwrap_or_default();
            writeln!(
                f,
                "{:<20}  {:<11}  {:<10}  {:>4}  {}",
                jde_to_iso(sample.jde),
                format_ra(sample.right_ascension),
                format_angle(sample.declination),
                magnitude,
                format_angle(sample.elongation)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod display_test {
    use super::*;
    use crate::constants::RADEG;
    use crate::time::iso_to_jde;

    fn sample(magnitude: Option<f64>) -> EphemerisSample {
        EphemerisSample {
            jde: iso_to_jde("2024-03-01T00:00:00Z").unwrap(),
            right_ascension: 343.097375 * RADEG,
            declination: -14.784833333333333 * RADEG,
            elongation: 120.5 * RADEG,
            phase_angle: 15.0 * RADEG,
            heliocentric_distance: 2.5,
            geocentric_distance: 1.6,
            magnitude,
        }
    }

    #[test]
    fn test_magnitude_threshold() {
        let samples = [sample(Some(8.46)), sample(Some(5.2)), sample(None)];
        let table = EphemerisTable::new(&samples);
        assert_eq!(table.shown_magnitude(&samples[0]), Some(8.46));
        assert_eq!(table.shown_magnitude(&samples[1]), None);
        assert_eq!(table.shown_magnitude(&samples[2]), None);

        let table = table.with_magnitude_limit(5.0);
        assert_eq!(table.shown_magnitude(&samples[1]), Some(5.2));
        // exactly at the limit is shown
        let table = table.with_magnitude_limit(8.46);
        assert_eq!(table.shown_magnitude(&samples[0]), Some(8.46));
    }

    #[test]
    fn test_text_table() {
        let samples = [sample(Some(8.46)), sample(Some(3.0))];
        let text = EphemerisTable::new(&samples).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Date (UTC)"));
        assert_eq!(
            lines[1],
            "2024-03-01T00:00:00Z  22h52m23.4s  -14°47'05\"   8.5  +120°30'00\""
        );
        assert_eq!(
            lines[2],
            "2024-03-01T00:00:00Z  22h52m23.4s  -14°47'05\"        +120°30'00\""
        );
    }

    #[test]
    fn test_csv() {
        let samples = [sample(Some(8.46)), sample(None)];
        let mut buffer = Vec::new();
        EphemerisTable::new(&samples).write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "date,jde,ra,dec,ra_deg,dec_deg,magnitude,elongation_deg,phase_angle_deg,r_au,delta_au"
        );
        assert!(lines[1].starts_with("2024-03-01T00:00:00Z,"));
        // the declination holds a quote, so the field is quoted
        assert!(lines[1].contains(",22h52m23.4s,\"-14°47'05\"\"\","));
        assert!(lines[1].contains(",8.46,"));
        // unknown magnitude leaves an empty field
        assert!(lines[2].contains(",,"));
        assert_eq!(lines.len(), 3);
    }
}
