//! # Stem Reinforcement
//!
//! Strength design of the flexural steel at the base of the stem plus
//! shrinkage and temperature steel. Quantities are per metre of wall.
//!
//! ## Formulas
//!
//! ```text
//! Mu    = 1.4·Mv                                  (kg·cm)
//! d_req = √(Mu / (φ·0.85·f'c·b·0.59))             (cm)
//! h_req = d_req + 9
//! d     = hz·100 − 9                              (cm)
//! As    = Mu / (φ·fy·d)
//! Asmin = ρmin·b·d
//! n     = ⌈max(As, Asmin) / A_bar⌉
//! s     = (b − 2·cover) / (n − 1)
//! s_cl  = s − d_bar
//! Ast   = 0.002·b·hz
//! ```
//!
//! The passive force and its arm `yt = D/3` are restated from the stability
//! result so both analyses use one value.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::GeometryResult;
use super::stability::StabilityResult;
use crate::errors::{CalcError, CalcResult};
use crate::materials::RebarSize;
use crate::units::{Centimeters, KgCm, KgPerM, Meters, TonneMeter, TonnePerM};
use crate::wall::DesignParameters;

/// Reinforcement design for the stem.
///
/// ## JSON Example (abridged)
///
/// ```json
/// {
///   "design_moment_kg_cm": 490266.0,
///   "required_depth_cm": 11.99,
///   "available_depth_cm": 31.0,
///   "required_steel_cm2": 4.18,
///   "minimum_steel_cm2": 3.68,
///   "bar_size": "#5",
///   "bar_count": 3,
///   "provided_steel_cm2": 5.94,
///   "spacing_cm": 15.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReinforcementResult {
    /// Passive resistance restated in kg/m
    pub passive_force_kg_m: f64,

    /// Lever arm of the passive force, D/3 (m)
    pub passive_lever_arm_m: f64,

    /// Factored moment Mu (t·m/m)
    pub design_moment_t_m: f64,

    /// Factored moment Mu (kg·cm)
    pub design_moment_kg_cm: f64,

    /// Stem width used in the design (cm)
    pub stem_width_cm: f64,

    /// Effective depth required for Mu (cm)
    pub required_depth_cm: f64,

    /// Total thickness required, d_req + deduction (cm)
    pub required_thickness_cm: f64,

    /// Effective depth available in the section (cm)
    pub available_depth_cm: f64,

    /// Strength-required steel As (cm²)
    pub required_steel_cm2: f64,

    /// Code minimum steel ρmin·b·d (cm²)
    pub minimum_steel_cm2: f64,

    /// Governing area, max(As, Asmin) (cm²)
    pub design_steel_cm2: f64,

    pub bar_size: RebarSize,

    pub bar_count: u32,

    /// bar_count × bar area (cm²)
    pub provided_steel_cm2: f64,

    /// Centre-to-centre spacing across the stem width (cm)
    pub spacing_cm: f64,

    /// Clear gap between adjacent bars (cm)
    pub clear_spacing_cm: f64,

    /// Provided ρ = As_prov / (b·d)
    pub steel_ratio: f64,

    pub max_steel_ratio: f64,

    /// Shrinkage and temperature steel required (cm²)
    pub shrinkage_steel_cm2: f64,

    pub shrinkage_bar_size: RebarSize,

    pub shrinkage_bar_count: u32,

    pub shrinkage_provided_cm2: f64,

    /// Provided ≥ max(As, Asmin)
    pub steel_ok: bool,

    /// ρ ≤ ρmax
    pub ratio_ok: bool,

    /// d_available ≥ d_req
    pub depth_ok: bool,

    /// Shrinkage provided ≥ required
    pub shrinkage_ok: bool,
}

impl ReinforcementResult {
    /// All reinforcement checks satisfied
    pub fn passes(&self) -> bool {
        self.steel_ok && self.ratio_ok && self.depth_ok && self.shrinkage_ok
    }

    /// Bars as drawn, e.g. "3 #5 @ 15 cm"
    pub fn bar_callout(&self) -> String {
        format!("{} {} @ {:.0} cm", self.bar_count, self.bar_size.code(), self.spacing_cm)
    }
}

/// Smallest bar count whose provided area `n × A_bar` covers `area_cm2`.
///
/// The quotient only seeds the search; the count is settled by comparing
/// areas, so a quotient that lands just off an integer cannot round either way.
pub fn bars_required(area_cm2: f64, bar: RebarSize) -> u32 {
    let a_bar = bar.area_cm2();
    let mut n = (area_cm2 / a_bar).ceil().max(0.0) as u32;
    while f64::from(n) * a_bar < area_cm2 {
        n += 1;
    }
    while n > 0 && f64::from(n - 1) * a_bar >= area_cm2 {
        n -= 1;
    }
    n
}

/// Required effective depth d = √(Mu / (φ·0.85·f'c·b·k)) in cm.
///
/// Rejects non-positive f'c, b or Mu.
pub fn required_effective_depth(
    moment_kg_cm: f64,
    fc_kg_cm2: f64,
    width_cm: f64,
    phi: f64,
    block_factor: f64,
) -> CalcResult<f64> {
    if !(fc_kg_cm2 > 0.0) {
        return Err(CalcError::invalid_input(
            "concrete_strength_kg_cm2",
            fc_kg_cm2.to_string(),
            "Concrete strength must be positive",
        ));
    }
    if !(width_cm > 0.0) {
        return Err(CalcError::invalid_input("stem_thickness_m", width_cm.to_string(), "Stem width must be positive"));
    }
    if !(moment_kg_cm > 0.0) {
        return Err(CalcError::invalid_input(
            "design_moment_kg_cm",
            moment_kg_cm.to_string(),
            "Design moment must be positive",
        ));
    }
    Ok((moment_kg_cm / (phi * 0.85 * fc_kg_cm2 * width_cm * block_factor)).sqrt())
}

/// Design the stem steel for an authoritative geometry.
///
/// # Returns
///
/// * `Ok(ReinforcementResult)` - with pass/fail flags
/// * `Err(CalcError)` - invalid strengths, no effective depth, or fewer than two bars
pub fn calculate(
    params: &DesignParameters,
    geometry: &GeometryResult,
    stability: &StabilityResult,
) -> CalcResult<ReinforcementResult> {
    let criteria = &params.criteria;

    if !(params.steel_yield_kg_cm2 > 0.0) {
        return Err(CalcError::invalid_input(
            "steel_yield_kg_cm2",
            params.steel_yield_kg_cm2.to_string(),
            "Steel yield strength must be positive",
        ));
    }

    let passive_force_kg_m = KgPerM::from(TonnePerM(stability.passive_resistance_t_m)).0;
    let passive_lever_arm_m = params.embedment_depth_m / 3.0;

    let design_moment_t_m = criteria.load_factor * stability.overturning_moment_t_m;
    let mu = KgCm::from(TonneMeter(design_moment_t_m)).0;

    let b_cm = Centimeters::from(Meters(geometry.stem_thickness_m)).0;
    let hz_cm = Centimeters::from(Meters(geometry.footing_thickness_m)).0;

    let d_req = required_effective_depth(
        mu,
        params.concrete_strength_kg_cm2,
        b_cm,
        criteria.flexure_phi,
        criteria.stress_block_factor,
    )?;
    let h_req = d_req + criteria.effective_depth_deduction_cm;

    let d = hz_cm - criteria.effective_depth_deduction_cm;
    if !(d > 0.0) {
        return Err(CalcError::invalid_input(
            "criteria.effective_depth_deduction_cm",
            criteria.effective_depth_deduction_cm.to_string(),
            "Deduction leaves no effective depth in the section",
        ));
    }

    let as_required = mu / (criteria.flexure_phi * params.steel_yield_kg_cm2 * d);
    let as_min = criteria.min_steel_ratio * b_cm * d;
    let as_design = as_required.max(as_min);

    let bar = criteria.flexural_bar;
    let bar_count = bars_required(as_design, bar);
    if bar_count < 2 {
        return Err(CalcError::invalid_input(
            "criteria.flexural_bar",
            bar.code(),
            format!(
                "{:.2} cm² needs {} bar(s); spacing needs at least two, choose a smaller bar",
                as_design, bar_count
            ),
        ));
    }
    let as_provided = f64::from(bar_count) * bar.area_cm2();
    let spacing = (b_cm - 2.0 * criteria.cover_cm) / f64::from(bar_count - 1);
    let clear_spacing = spacing - bar.diameter_cm();
    let rho = as_provided / (b_cm * d);

    let as_shrinkage = criteria.shrinkage_steel_ratio * b_cm * hz_cm;
    let shrinkage_bar = criteria.shrinkage_bar;
    let shrinkage_count = bars_required(as_shrinkage, shrinkage_bar);
    let shrinkage_provided = f64::from(shrinkage_count) * shrinkage_bar.area_cm2();

    debug!(mu, d_req, d, as_required, as_min, bar_count, spacing, rho, "stem reinforcement");

    Ok(ReinforcementResult {
        passive_force_kg_m,
        passive_lever_arm_m,
        design_moment_t_m,
        design_moment_kg_cm: mu,
        stem_width_cm: b_cm,
        required_depth_cm: d_req,
        required_thickness_cm: h_req,
        available_depth_cm: d,
        required_steel_cm2: as_required,
        minimum_steel_cm2: as_min,
        design_steel_cm2: as_design,
        bar_size: bar,
        bar_count,
        provided_steel_cm2: as_provided,
        spacing_cm: spacing,
        clear_spacing_cm: clear_spacing,
        steel_ratio: rho,
        max_steel_ratio: criteria.max_steel_ratio,
        shrinkage_steel_cm2: as_shrinkage,
        shrinkage_bar_size: shrinkage_bar,
        shrinkage_bar_count: shrinkage_count,
        shrinkage_provided_cm2: shrinkage_provided,
        steel_ok: as_provided >= as_design,
        ratio_ok: rho <= criteria.max_steel_ratio,
        depth_ok: d >= d_req,
        shrinkage_ok: shrinkage_provided >= as_shrinkage,
    })
}
