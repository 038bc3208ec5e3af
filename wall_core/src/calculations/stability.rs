//! # Global Stability
//!
//! Overturning, sliding, eccentricity and bearing checks for a cantilever wall
//! section, taking moments about the toe.
//!
//! ## Moments
//!
//! ```text
//! Mr = Σ(Wi·xi) + Ep·D/3
//! Mv = Ea_soil·h/3 + Ea_surcharge·h/2
//! FS_overturning = Mr / Mv
//! FS_sliding     = (tan φf·W + Ep) / (Ea_soil + Ea_surcharge)
//! ```
//!
//! ## Bearing
//!
//! ```text
//! x̄ = Σ(Wi·xi) / W        e = |x̄ − Bz/2|
//! q = W/Bz · (1 ± 6e/Bz)
//! ```
//!
//! A negative `q_min` is reported as soil tension. It is never clipped.
//! Tension and the middle-third check share one comparison of `e` against
//! `Bz/6`, so float noise at the boundary cannot split them.
//!
//! Failing a threshold is a design outcome, not an error. Every check is
//! returned as a flag; only degenerate geometry (zero denominators) errors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::earth_pressure::PressureResult;
use super::geometry::SectionDimensions;
use crate::constants::ZERO_TOLERANCE;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Degrees, KgPerCm2, TonnePerM2};
use crate::wall::DesignParameters;

/// Horizontal forces acting on the wall (t/m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LateralLoads {
    /// Thrust from the backfill self-weight, acting at h/3
    pub soil_thrust_t_m: f64,
    /// Thrust from the surcharge, acting at h/2
    pub surcharge_thrust_t_m: f64,
    /// Passive resistance in front of the footing, acting at D/3
    pub passive_resistance_t_m: f64,
}

impl LateralLoads {
    /// Pick the thrusts out of either theory.
    ///
    /// For Coulomb the horizontal component Ph stands in for the soil thrust.
    /// The vertical component is not counted as a stabilizing force.
    pub fn from_pressure(pressure: &PressureResult) -> Self {
        LateralLoads {
            soil_thrust_t_m: pressure.soil_thrust_t_m(),
            surcharge_thrust_t_m: pressure.surcharge_thrust_t_m(),
            passive_resistance_t_m: pressure.passive_resistance_t_m(),
        }
    }

    /// Total driving force Ea (t/m)
    pub fn total_active_t_m(&self) -> f64 {
        self.soil_thrust_t_m + self.surcharge_thrust_t_m
    }
}

/// Source of a self-weight component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Stem,
    Footing,
    Backfill,
}

/// One vertical load with its lever arm from the toe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelfWeightComponent {
    pub source: WeightSource,
    /// Weight per metre of wall (t/m)
    pub weight_t_m: f64,
    /// Horizontal distance from the toe (m)
    pub lever_arm_m: f64,
    /// weight × arm (t·m/m)
    pub moment_t_m: f64,
}

impl SelfWeightComponent {
    fn new(source: WeightSource, weight_t_m: f64, lever_arm_m: f64) -> Self {
        SelfWeightComponent {
            source,
            weight_t_m,
            lever_arm_m,
            moment_t_m: weight_t_m * lever_arm_m,
        }
    }
}

/// Stability check results for one wall section.
///
/// ## JSON Example (abridged)
///
/// ```json
/// {
///   "total_weight_t_m": 12.86,
///   "overturning_moment_t_m": 3.50,
///   "resisting_moment_t_m": 21.25,
///   "fs_overturning": 6.07,
///   "fs_sliding": 2.74,
///   "eccentricity_m": 0.24,
///   "q_max_kg_cm2": 0.76,
///   "q_min_kg_cm2": 0.22,
///   "soil_tension": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    /// Stem, footing and backfill weights with their arms
    pub weights: Vec<SelfWeightComponent>,

    /// Σ W (t/m)
    pub total_weight_t_m: f64,

    /// Σ W·x, without the passive moment (t·m/m)
    pub weight_moment_t_m: f64,

    /// Passive resistance Ep counted in both checks (t/m)
    pub passive_resistance_t_m: f64,

    /// Ep·D/3 (t·m/m)
    pub passive_moment_t_m: f64,

    /// Mr (t·m/m)
    pub resisting_moment_t_m: f64,

    /// Mv (t·m/m)
    pub overturning_moment_t_m: f64,

    /// Mr / Mv
    pub fs_overturning: f64,

    /// tan φf
    pub friction_coefficient: f64,

    /// tan φf·W + Ep (t/m)
    pub sliding_resistance_t_m: f64,

    /// Ea (t/m)
    pub sliding_force_t_m: f64,

    /// Resistance / force
    pub fs_sliding: f64,

    /// Resultant position from the toe (m)
    pub resultant_position_m: f64,

    /// |x̄ − Bz/2| (m)
    pub eccentricity_m: f64,

    /// Bz/6 (m)
    pub middle_third_limit_m: f64,

    /// Soil pressure under the toe side (t/m²)
    pub q_max_t_m2: f64,

    /// Soil pressure under the heel side (t/m²), may be negative
    pub q_min_t_m2: f64,

    /// q_max in kg/cm²
    pub q_max_kg_cm2: f64,

    /// q_min in kg/cm²
    pub q_min_kg_cm2: f64,

    /// Allowable bearing pressure (kg/cm²)
    pub allowable_bearing_kg_cm2: f64,

    /// q_min < 0, i.e. e beyond Bz/6
    pub soil_tension: bool,

    /// FS_overturning ≥ minimum
    pub overturning_ok: bool,

    /// FS_sliding ≥ minimum
    pub sliding_ok: bool,

    /// e ≤ Bz/6
    pub middle_third_ok: bool,

    /// q_max ≤ allowable
    pub bearing_ok: bool,
}

impl StabilityResult {
    /// All stability checks satisfied, including no soil tension
    pub fn passes(&self) -> bool {
        self.overturning_ok && self.sliding_ok && self.middle_third_ok && self.bearing_ok && !self.soil_tension
    }

    /// Name of the first failing check, or "None"
    pub fn governing_condition(&self) -> &'static str {
        if !self.overturning_ok {
            "Overturning"
        } else if !self.sliding_ok {
            "Sliding"
        } else if self.soil_tension {
            "Soil tension"
        } else if !self.middle_third_ok {
            "Eccentricity"
        } else if !self.bearing_ok {
            "Bearing"
        } else {
            "None"
        }
    }
}

/// e > Bz/6 beyond float noise
fn outside_middle_third(eccentricity: f64, middle_third_limit: f64) -> bool {
    eccentricity > middle_third_limit + ZERO_TOLERANCE
}

fn validate_section(section: &SectionDimensions) -> CalcResult<()> {
    let positive = [
        ("footing_width_m", section.footing_width_m),
        ("footing_thickness_m", section.footing_thickness_m),
        ("stem_thickness_m", section.stem_thickness_m),
    ];
    for (field, value) in positive {
        if !(value > 0.0) {
            return Err(CalcError::invalid_input(field, value.to_string(), "Section dimension must be positive"));
        }
    }
    for (field, value) in [("toe_length_m", section.toe_length_m), ("heel_length_m", section.heel_length_m)] {
        if !(value >= 0.0) {
            return Err(CalcError::invalid_input(field, value.to_string(), "Section dimension cannot be negative"));
        }
    }
    Ok(())
}

/// Run all stability checks on a section.
///
/// # Returns
///
/// * `Ok(StabilityResult)` - checks computed, pass or fail
/// * `Err(CalcError)` - degenerate section or zero overturning/sliding denominator
pub fn calculate(
    params: &DesignParameters,
    section: &SectionDimensions,
    loads: &LateralLoads,
) -> CalcResult<StabilityResult> {
    validate_section(section)?;

    let h = params.stem_height_m;
    let d = params.embedment_depth_m;
    let bz = section.footing_width_m;
    let gamma_c = params.concrete_unit_weight_t_m3;

    let weights = vec![
        SelfWeightComponent::new(
            WeightSource::Stem,
            section.stem_thickness_m * h * gamma_c,
            section.toe_length_m + section.stem_thickness_m / 2.0,
        ),
        SelfWeightComponent::new(WeightSource::Footing, bz * section.footing_thickness_m * gamma_c, bz / 2.0),
        SelfWeightComponent::new(
            WeightSource::Backfill,
            section.heel_length_m * h * params.backfill_unit_weight_t_m3,
            section.toe_length_m + section.stem_thickness_m + section.heel_length_m / 2.0,
        ),
    ];

    let total_weight: f64 = weights.iter().map(|w| w.weight_t_m).sum();
    let weight_moment: f64 = weights.iter().map(|w| w.moment_t_m).sum();

    let passive_moment = loads.passive_resistance_t_m * d / 3.0;
    let resisting_moment = weight_moment + passive_moment;
    let overturning_moment = loads.soil_thrust_t_m * h / 3.0 + loads.surcharge_thrust_t_m * h / 2.0;

    if overturning_moment.abs() < ZERO_TOLERANCE {
        return Err(CalcError::invalid_input(
            "overturning_moment_t_m",
            overturning_moment.to_string(),
            "Overturning moment is zero; factor of safety is undefined",
        ));
    }

    let sliding_force = loads.total_active_t_m();
    if sliding_force.abs() < ZERO_TOLERANCE {
        return Err(CalcError::invalid_input(
            "sliding_force_t_m",
            sliding_force.to_string(),
            "Horizontal thrust is zero; sliding factor of safety is undefined",
        ));
    }

    let fs_overturning = resisting_moment / overturning_moment;

    let friction_coefficient = Degrees(params.foundation_friction_deg).rad().tan();
    let sliding_resistance = friction_coefficient * total_weight + loads.passive_resistance_t_m;
    let fs_sliding = sliding_resistance / sliding_force;

    let resultant_position = weight_moment / total_weight;
    let eccentricity = (resultant_position - bz / 2.0).abs();
    let middle_third_limit = bz / 6.0;
    let outside_kern = outside_middle_third(eccentricity, middle_third_limit);

    let average = total_weight / bz;
    let q_max = average * (1.0 + 6.0 * eccentricity / bz);
    let q_min = average * (1.0 - 6.0 * eccentricity / bz);

    let q_max_kg_cm2 = KgPerCm2::from(TonnePerM2(q_max)).0;
    let q_min_kg_cm2 = KgPerCm2::from(TonnePerM2(q_min)).0;
    let allowable_kg_cm2 = KgPerCm2::from(TonnePerM2(params.allowable_bearing_t_m2)).0;

    let criteria = &params.criteria;

    debug!(
        total_weight,
        resisting_moment, overturning_moment, fs_overturning, fs_sliding, eccentricity, q_max, q_min,
        "stability"
    );

    Ok(StabilityResult {
        weights,
        total_weight_t_m: total_weight,
        weight_moment_t_m: weight_moment,
        passive_resistance_t_m: loads.passive_resistance_t_m,
        passive_moment_t_m: passive_moment,
        resisting_moment_t_m: resisting_moment,
        overturning_moment_t_m: overturning_moment,
        fs_overturning,
        friction_coefficient,
        sliding_resistance_t_m: sliding_resistance,
        sliding_force_t_m: sliding_force,
        fs_sliding,
        resultant_position_m: resultant_position,
        eccentricity_m: eccentricity,
        middle_third_limit_m: middle_third_limit,
        q_max_t_m2: q_max,
        q_min_t_m2: q_min,
        q_max_kg_cm2,
        q_min_kg_cm2,
        allowable_bearing_kg_cm2: allowable_kg_cm2,
        soil_tension: outside_kern,
        overturning_ok: fs_overturning >= criteria.min_fs_overturning,
        sliding_ok: fs_sliding >= criteria.min_fs_sliding,
        middle_third_ok: !outside_kern,
        bearing_ok: q_max <= params.allowable_bearing_t_m2,
    })
}
