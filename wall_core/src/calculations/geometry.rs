//! # Geometry Estimation
//!
//! Empirical proportioning of a cantilever wall from its Rankine thrust.
//!
//! ```text
//!            b
//!          ┌───┐  ─┬─
//!          │   │   │ hm (coping)
//!          │   │  ─┼─
//!          │   │   │ h  (retained)
//!   ┌──────┘   └───┼──────────┐ ─┬─
//!   │  r (toe)  b  │ t (heel) │  │ hz
//!   └──────────────┴──────────┘ ─┴─
//!   ◄──────────── Bz ─────────►
//! ```
//!
//! ```text
//! hs = q/γ
//! Bz = (h+D)·(1 + hs/(h+D))·√Ka                       rounded to 0.01 m
//! hz = √[(h+D)²·(1 + hs/(h+D)) / (9·kc)]              ≥ 0.40 m
//! b  = √[(h+hm)²·(1 + hs/(h+hm)) / (10·kc)]           ≥ 0.35 m
//! r  = (2·Bz − 3·b)/6                                 ≥ 0.70 m
//! t  = Bz − r − b
//! ```
//!
//! The heel takes whatever remains after the floors, so `r + b + t = Bz`.
//!
//! A Coulomb run does not size a wall. It only estimates a comparable footing
//! width for cross-checking, see [`estimate_coulomb_section`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::earth_pressure::{CoulombPressure, RankinePressure};
use crate::constants::{
    round_cm, COULOMB_ESTIMATE_FOOTING_M, COULOMB_ESTIMATE_STEM_M, FOOTING_THICKNESS_DIVISOR,
    MIN_FOOTING_THICKNESS_M, MIN_STEM_THICKNESS_M, MIN_TOE_LENGTH_M, STEM_THICKNESS_DIVISOR,
};
use crate::errors::{CalcError, CalcResult};
use crate::wall::DesignParameters;

/// Cross-section dimensions consumed by the stability analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionDimensions {
    /// Footing width Bz (m)
    pub footing_width_m: f64,
    /// Footing thickness hz (m)
    pub footing_thickness_m: f64,
    /// Stem thickness b (m)
    pub stem_thickness_m: f64,
    /// Toe length r (m)
    pub toe_length_m: f64,
    /// Heel length t (m)
    pub heel_length_m: f64,
}

/// Proportioned wall from the Rankine path.
///
/// ## JSON Example
///
/// ```json
/// {
///   "equivalent_surcharge_height_m": 0.556,
///   "kc": 14.28,
///   "footing_width_m": 2.63,
///   "footing_thickness_m": 0.40,
///   "stem_thickness_m": 0.36,
///   "toe_length_m": 0.70,
///   "heel_length_m": 1.57
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryResult {
    /// Surcharge expressed as an equivalent soil height hs = q/γ (m)
    pub equivalent_surcharge_height_m: f64,

    /// Concrete sizing factor used
    pub kc: f64,

    /// Footing width Bz (m)
    pub footing_width_m: f64,

    /// Footing thickness hz (m), at least 0.40 m
    pub footing_thickness_m: f64,

    /// Stem thickness b (m), at least 0.35 m
    pub stem_thickness_m: f64,

    /// Toe length r (m), at least 0.70 m
    pub toe_length_m: f64,

    /// Heel length t = Bz − r − b (m)
    pub heel_length_m: f64,
}

impl GeometryResult {
    /// Dimensions for the stability analysis
    pub fn section(&self) -> SectionDimensions {
        SectionDimensions {
            footing_width_m: self.footing_width_m,
            footing_thickness_m: self.footing_thickness_m,
            stem_thickness_m: self.stem_thickness_m,
            toe_length_m: self.toe_length_m,
            heel_length_m: self.heel_length_m,
        }
    }
}

/// Rough Coulomb section used only to cross-check stability.
///
/// Stem sits at the front edge of the footing (no toe); the heel is the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoulombSectionEstimate {
    /// Estimated footing width (m)
    pub footing_width_m: f64,
    /// Assumed footing thickness (m)
    pub footing_thickness_m: f64,
    /// Assumed stem thickness (m)
    pub stem_thickness_m: f64,
    /// Footing width minus stem (m)
    pub heel_length_m: f64,
}

impl CoulombSectionEstimate {
    /// Dimensions for the stability analysis
    pub fn section(&self) -> SectionDimensions {
        SectionDimensions {
            footing_width_m: self.footing_width_m,
            footing_thickness_m: self.footing_thickness_m,
            stem_thickness_m: self.stem_thickness_m,
            toe_length_m: 0.0,
            heel_length_m: self.heel_length_m,
        }
    }
}

/// hs = q/γ
fn equivalent_surcharge_height(params: &DesignParameters) -> f64 {
    params.surcharge_t_m2 / params.backfill_unit_weight_t_m3
}

/// (height)²·(1 + hs/height), the common radicand numerator
fn amplified_square(height_m: f64, hs_m: f64) -> f64 {
    height_m.powi(2) * (1.0 + hs_m / height_m)
}

/// Footing width from Ka, rounded to centimetres.
fn footing_width(params: &DesignParameters, ka: f64, hs: f64) -> f64 {
    let h_total = params.stem_height_m + params.embedment_depth_m;
    round_cm(h_total * (1.0 + hs / h_total) * ka.sqrt())
}

/// Proportion the wall from Rankine pressures.
///
/// # Returns
///
/// * `Ok(GeometryResult)` - floored dimensions with exact closure
/// * `Err(CalcError)` - if the floors leave no room for a heel
pub fn calculate(params: &DesignParameters, pressure: &RankinePressure) -> CalcResult<GeometryResult> {
    let hs = equivalent_surcharge_height(params);
    let kc = params.kc;
    let h = params.stem_height_m;
    let h_total = h + params.embedment_depth_m;
    let h_stem = h + params.coping_height_m;

    let bz = footing_width(params, pressure.ka, hs);

    let hz = round_cm((amplified_square(h_total, hs) / (FOOTING_THICKNESS_DIVISOR * kc)).sqrt())
        .max(MIN_FOOTING_THICKNESS_M);
    let b = round_cm((amplified_square(h_stem, hs) / (STEM_THICKNESS_DIVISOR * kc)).sqrt())
        .max(MIN_STEM_THICKNESS_M);
    let r = round_cm((2.0 * bz - 3.0 * b) / 6.0).max(MIN_TOE_LENGTH_M);
    let t = bz - r - b;

    if t < 0.0 {
        return Err(CalcError::incompatible(
            &["stem_height_m", "embedment_depth_m", "backfill_friction_deg"],
            format!(
                "Footing width {:.2} m cannot hold the {:.2} m toe and {:.2} m stem minimums",
                bz, r, b
            ),
        ));
    }

    debug!(bz, hz, b, r, t, "rankine geometry");

    Ok(GeometryResult {
        equivalent_surcharge_height_m: hs,
        kc,
        footing_width_m: bz,
        footing_thickness_m: hz,
        stem_thickness_m: b,
        toe_length_m: r,
        heel_length_m: t,
    })
}

/// Estimate a comparable footing for a Coulomb run.
pub fn estimate_coulomb_section(
    params: &DesignParameters,
    pressure: &CoulombPressure,
) -> CalcResult<CoulombSectionEstimate> {
    let hs = equivalent_surcharge_height(params);
    let bz = footing_width(params, pressure.ka, hs);
    let heel = bz - COULOMB_ESTIMATE_STEM_M;

    if heel < 0.0 {
        return Err(CalcError::incompatible(
            &["stem_height_m", "embedment_depth_m", "backfill_friction_deg"],
            format!(
                "Estimated footing width {:.2} m is narrower than the {:.2} m stem",
                bz, COULOMB_ESTIMATE_STEM_M
            ),
        ));
    }

    debug!(bz, heel, "coulomb section estimate");

    Ok(CoulombSectionEstimate {
        footing_width_m: bz,
        footing_thickness_m: COULOMB_ESTIMATE_FOOTING_M,
        stem_thickness_m: COULOMB_ESTIMATE_STEM_M,
        heel_length_m: heel,
    })
}
