//! # Kepler's equation
//!
//! Solves `E − e·sin(E) = M` for the eccentric anomaly `E` of an elliptic orbit and provides
//! the small anomaly helpers used by the propagator.
//!
//! ## Strategy
//!
//! 1. **Newton–Raphson** ([`roots::find_root_newton_raphson`]) from Danby's starting value
//!    `M + 0.85·e·sign(sin M)`, bounded to [`KeplerSolver::max_iterations`] iterations
//!    (15 by default).
//! 2. If Newton fails for any reason (iteration cap, vanishing derivative), the bracketed
//!    **Brent** search ([`roots::find_root_brent`]) runs on `[M − e, M + e]`. Since
//!    `|E − M| = |e·sin E| ≤ e`, that interval always brackets the root, so the fallback
//!    converges for every `e ∈ [0, 1)`. Its failure is reported as
//!    [`MpephError::RootFindingError`].
//!
//! The mean anomaly is reduced to `[−π, π)` before solving and the whole revolutions are
//! added back, so the returned `E` satisfies Kepler's equation for the input `M`.
//!
//! ## Preconditions
//!
//! `e` must lie in `[0, 1)`. Parabolic and hyperbolic orbits are not supported and are not
//! checked for.
use std::f64::consts::PI;

use log::debug;
use roots::{find_root_brent, find_root_newton_raphson, SimpleConvergency};

use crate::constants::{Radian, DPI};
use crate::mpeph_errors::MpephError;

/// Iteration cap of the Newton–Raphson stage
pub const NEWTON_MAX_ITER: usize = 15;

/// Iteration cap of the bracketed fallback stage
pub const FALLBACK_MAX_ITER: usize = 200;

/// Widening of the `[M − e, M + e]` bracket so both ends keep a strict sign change
const BRACKET_MARGIN: f64 = 1e-3;

/// Convergence threshold on both the residual and the step size (radians)
pub const KEPLER_TOLERANCE: f64 = 1e-12;

/// Principal value of an angle, in [0, 2π).
pub(crate) fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Root-finding method that produced an eccentric anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeplerMethod {
    NewtonRaphson,
    Brent,
}

/// Eccentric anomaly together with the method that found it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: Radian,
    pub method: KeplerMethod,
}

/// Two-stage solver for the elliptic Kepler equation.
///
/// Fields
/// -----------------
/// * `max_iterations` – Newton–Raphson iteration cap before switching to the fallback.
/// * `tolerance` – Convergence threshold, in radians, shared by both stages.
/// * `fallback_iterations` – Iteration cap of the Brent stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolver {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub fallback_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        KeplerSolver {
            max_iterations: NEWTON_MAX_ITER,
            tolerance: KEPLER_TOLERANCE,
            fallback_iterations: FALLBACK_MAX_ITER,
        }
    }
}

impl KeplerSolver {
    /// Solve Kepler's equation `E − e·sin(E) = M`.
    ///
    /// Arguments
    /// -----------------
    /// * `eccentricity` – Orbital eccentricity `e`, precondition `0 ≤ e < 1`.
    /// * `mean_anomaly` – Mean anomaly `M` in radians, any real value.
    ///
    /// Return
    /// ----------
    /// * A [`KeplerSolution`] whose eccentric anomaly lies in the same revolution as `M`.
    /// * [`MpephError::RootFindingError`] if the fallback stage fails as well.
    pub fn solve(&self, eccentricity: f64, mean_anomaly: Radian) -> Result<KeplerSolution, MpephError> {
        let revolutions = ((mean_anomaly + PI) / DPI).floor();
        let reduced = mean_anomaly - revolutions * DPI;

        let kepler = |ecc_anom: f64| ecc_anom - eccentricity * ecc_anom.sin() - reduced;
        let d_kepler = |ecc_anom: f64| 1.0 - eccentricity * ecc_anom.cos();

        let start = reduced + 0.85 * eccentricity * reduced.sin().signum();
        let mut newton_tol = SimpleConvergency {
            eps: self.tolerance,
            max_iter: self.max_iterations,
        };

        let (root, method) = match find_root_newton_raphson(start, &kepler, &d_kepler, &mut newton_tol) {
            Ok(root) => (root, KeplerMethod::NewtonRaphson),
            Err(err) => {
                debug!(
                    "Newton-Raphson failed on Kepler's equation (e = {eccentricity}, M = {mean_anomaly}): {err}, falling back to Brent"
                );
                let mut brent_tol = SimpleConvergency {
                    eps: self.tolerance,
                    max_iter: self.fallback_iterations,
                };
                let root = find_root_brent(
                    reduced - eccentricity - BRACKET_MARGIN,
                    reduced + eccentricity + BRACKET_MARGIN,
                    &kepler,
                    &mut brent_tol,
                )?;
                (root, KeplerMethod::Brent)
            }
        };

        Ok(KeplerSolution {
            eccentric_anomaly: root + revolutions * DPI,
            method,
        })
    }
}

/// True anomaly ν from the eccentric anomaly, `atan2(√(1−e²)·sin E, cos E − e)`.
pub fn true_anomaly(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    ((1.0 - eccentricity * eccentricity).sqrt() * sin_e).atan2(cos_e - eccentricity)
}

/// Heliocentric distance `a·(1 − e·cos E)`.
pub fn radius(eccentric_anomaly: Radian, eccentricity: f64, semi_major_axis: f64) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos())
}
