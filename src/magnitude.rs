//! # Apparent magnitude (IAU H-G system)
//!
//! ```text
//! t  = tan(β / 2)
//! Φ1 = exp(−3.33 · t^0.63)
//! Φ2 = exp(−1.87 · t^1.22)
//! V  = H + 5·log10(r·Δ) − 2.5·log10((1 − G)·Φ1 + G·Φ2)
//! ```
//!
//! `H` may be unknown for poorly observed objects; the magnitude is then unknown too.
//! A missing `G` is replaced by [`DEFAULT_SLOPE_PARAMETER`].
use crate::constants::{AstronomicalUnit, Radian, DEFAULT_SLOPE_PARAMETER};

/// Absolute magnitude `H` and slope parameter `G` of an object.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AbsoluteMagnitude {
    pub h: Option<f64>,
    pub g: Option<f64>,
}

impl AbsoluteMagnitude {
    pub fn new(h: Option<f64>, g: Option<f64>) -> Self {
        AbsoluteMagnitude { h, g }
    }

    /// Slope parameter, `0.15` when the catalog leaves it blank.
    pub fn slope(&self) -> f64 {
        self.g.unwrap_or(DEFAULT_SLOPE_PARAMETER)
    }

    /// Apparent visual magnitude.
    ///
    /// Arguments
    /// ---------
    /// * `phase_angle` – Sun–object–Earth angle β, radians.
    /// * `heliocentric_distance` – `r`, AU.
    /// * `geocentric_distance` – `Δ`, AU.
    ///
    /// Return
    /// ------
    /// * `None` if and only if `H` is unknown.
    pub fn apparent_magnitude(
        &self,
        phase_angle: Radian,
        heliocentric_distance: AstronomicalUnit,
        geocentric_distance: AstronomicalUnit,
    ) -> Option<f64> {
        let h = self.h?;
        let g = self.slope();

        let tan_half_phase = (phase_angle / 2.0).tan();
        let phi1 = (-3.33 * tan_half_phase.powf(0.63)).exp();
        let phi2 = (-1.87 * tan_half_phase.powf(1.22)).exp();

        Some(
            h + 5.0 * (heliocentric_distance * geocentric_distance).log10()
                - 2.5 * ((1.0 - g) * phi1 + g * phi2).log10(),
        )
    }
}
