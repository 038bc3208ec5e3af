//! # Earth Pressure
//!
//! Lateral earth pressure coefficients and resultant thrusts per metre of wall.
//!
//! ## Rankine (vertical, smooth back face; level backfill)
//!
//! ```text
//! Ka = tan²(45° − φ/2)            Kp = tan²(45° + φf/2)
//! Ea_soil      = ½·Ka·γ·h²
//! Ea_surcharge = Ka·q·h
//! Ep           = ½·Kp·γf·D²      (+ 2·cf·D·√Kp when cohesion is enabled)
//! ```
//!
//! ## Coulomb (battered back, wall friction δ, sloped backfill α)
//!
//! ```text
//! β  = atan((H − h)/base)          (β = 90° when base = 0)
//!
//!                 sin²(β + φ)
//! Ka = ───────────────────────────────────────────────────────────
//!      sin²β · sin(β − δ) · [1 + √( sin(φ+δ)·sin(φ−α) / (sin(β−δ)·sin(β+α)) )]²
//!
//! H' = H + (base/2 + heel/2)·tan α
//! Pa = ½·Ka·γ·H'²      Ph = Pa·cos(90° − β + δ)      Pv = Pa·sin(90° − β + δ)
//! Psc = Ka·H·q·sin β / sin(β + α)
//! ```
//!
//! A negative radicand or a vanishing sine denominator is reported as
//! [`CalcError::ParameterIncompatibility`], never as NaN.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::calculations::earth_pressure::rankine_active_coefficient;
//!
//! let ka = rankine_active_coefficient(30.0).unwrap();
//! assert!((ka - 1.0 / 3.0).abs() < 1e-12);
//! assert!(rankine_active_coefficient(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Theory;
use crate::constants::ZERO_TOLERANCE;
use crate::errors::{CalcError, CalcResult};
use crate::soil::validate_friction_angle;
use crate::units::{Degrees, Radians};
use crate::wall::DesignParameters;

/// Rankine pressures for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankinePressure {
    /// Active coefficient Ka of the backfill
    pub ka: f64,

    /// Passive coefficient Kp of the foundation soil
    pub kp: f64,

    /// Active thrust from backfill self-weight, ½·Ka·γ·h² (t/m)
    pub backfill_thrust_t_m: f64,

    /// Active thrust from surcharge, Ka·q·h (t/m)
    pub surcharge_thrust_t_m: f64,

    /// Total active thrust (t/m)
    pub total_active_thrust_t_m: f64,

    /// Passive resistance over the embedment depth (t/m)
    pub passive_resistance_t_m: f64,
}

/// Coulomb pressures for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoulombPressure {
    /// Back-face inclination β measured from horizontal (degrees)
    pub beta_deg: f64,

    /// Active coefficient Ka
    pub ka: f64,

    /// Passive coefficient Kp of the foundation soil (Rankine, level toe)
    pub kp: f64,

    /// Effective height H' including the backfill slope (m)
    pub effective_height_m: f64,

    /// Resultant active thrust Pa (t/m)
    pub active_thrust_t_m: f64,

    /// Horizontal component Ph (t/m)
    pub horizontal_thrust_t_m: f64,

    /// Vertical component Pv (t/m)
    pub vertical_thrust_t_m: f64,

    /// Surcharge thrust Psc (t/m)
    pub surcharge_thrust_t_m: f64,

    /// Ph + Psc (t/m)
    pub total_horizontal_thrust_t_m: f64,

    /// Passive resistance over the embedment depth (t/m)
    pub passive_resistance_t_m: f64,
}

/// Pressure results tagged by theory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "theory", rename_all = "snake_case")]
pub enum PressureResult {
    Rankine(RankinePressure),
    Coulomb(CoulombPressure),
}

impl PressureResult {
    /// Theory that produced this result
    pub fn theory(&self) -> Theory {
        match self {
            PressureResult::Rankine(_) => Theory::Rankine,
            PressureResult::Coulomb(_) => Theory::Coulomb,
        }
    }

    /// Active coefficient Ka
    pub fn active_coefficient(&self) -> f64 {
        match self {
            PressureResult::Rankine(p) => p.ka,
            PressureResult::Coulomb(p) => p.ka,
        }
    }

    /// Passive coefficient Kp
    pub fn passive_coefficient(&self) -> f64 {
        match self {
            PressureResult::Rankine(p) => p.kp,
            PressureResult::Coulomb(p) => p.kp,
        }
    }

    /// Total horizontal driving thrust, soil plus surcharge (t/m)
    pub fn total_horizontal_thrust_t_m(&self) -> f64 {
        match self {
            PressureResult::Rankine(p) => p.total_active_thrust_t_m,
            PressureResult::Coulomb(p) => p.total_horizontal_thrust_t_m,
        }
    }

    /// Horizontal thrust from the soil wedge alone (t/m)
    pub fn soil_thrust_t_m(&self) -> f64 {
        match self {
            PressureResult::Rankine(p) => p.backfill_thrust_t_m,
            PressureResult::Coulomb(p) => p.horizontal_thrust_t_m,
        }
    }

    /// Horizontal thrust from the surcharge (t/m)
    pub fn surcharge_thrust_t_m(&self) -> f64 {
        match self {
            PressureResult::Rankine(p) => p.surcharge_thrust_t_m,
            PressureResult::Coulomb(p) => p.surcharge_thrust_t_m,
        }
    }

    /// Passive resistance in front of the toe (t/m)
    pub fn passive_resistance_t_m(&self) -> f64 {
        match self {
            PressureResult::Rankine(p) => p.passive_resistance_t_m,
            PressureResult::Coulomb(p) => p.passive_resistance_t_m,
        }
    }
}

// ============================================================================
// Coefficients
// ============================================================================

/// Rankine active coefficient, Ka = tan²(45° − φ/2).
pub fn rankine_active_coefficient(phi_deg: f64) -> CalcResult<f64> {
    validate_friction_angle("backfill_friction_deg", phi_deg)?;
    Ok(Degrees(45.0 - phi_deg / 2.0).rad().tan().powi(2))
}

/// Rankine passive coefficient, Kp = tan²(45° + φ/2).
pub fn rankine_passive_coefficient(phi_deg: f64) -> CalcResult<f64> {
    validate_friction_angle("foundation_friction_deg", phi_deg)?;
    Ok(Degrees(45.0 + phi_deg / 2.0).rad().tan().powi(2))
}

/// Passive resistance over embedment D (t/m).
///
/// The cohesive term `2·c·D·√Kp` is added only when `cohesion_t_m2` is non-zero.
pub fn passive_resistance(kp: f64, unit_weight_t_m3: f64, depth_m: f64, cohesion_t_m2: f64) -> f64 {
    0.5 * kp * unit_weight_t_m3 * depth_m.powi(2) + 2.0 * cohesion_t_m2 * depth_m * kp.sqrt()
}

/// Back-face inclination β from horizontal, in degrees.
///
/// A zero batter base is a vertical back face (β = 90°).
pub fn wall_inclination_deg(total_height_m: f64, stem_height_m: f64, batter_base_m: f64) -> f64 {
    if batter_base_m <= 0.0 {
        90.0
    } else {
        Degrees::from(Radians(((total_height_m - stem_height_m) / batter_base_m).atan())).0
    }
}

/// Coulomb active coefficient with every undefined branch reported.
pub fn coulomb_active_coefficient(beta_deg: f64, phi_deg: f64, delta_deg: f64, alpha_deg: f64) -> CalcResult<f64> {
    validate_friction_angle("backfill_friction_deg", phi_deg)?;

    let beta = Degrees(beta_deg).rad();
    let phi = Degrees(phi_deg).rad();
    let delta = Degrees(delta_deg).rad();
    let alpha = Degrees(alpha_deg).rad();

    let radicand_den = (beta - delta).sin() * (beta + alpha).sin();
    if radicand_den.abs() < ZERO_TOLERANCE {
        return Err(CalcError::incompatible(
            &["coulomb.batter_base_m", "coulomb.wall_friction_deg", "coulomb.backfill_slope_deg"],
            format!(
                "sin(β−δ)·sin(β+α) vanishes for β = {:.2}°, δ = {}°, α = {}°",
                beta_deg, delta_deg, alpha_deg
            ),
        ));
    }

    let radicand = (phi + delta).sin() * (phi - alpha).sin() / radicand_den;
    if radicand < 0.0 {
        return Err(CalcError::incompatible(
            &["backfill_friction_deg", "coulomb.wall_friction_deg", "coulomb.backfill_slope_deg"],
            format!("Coulomb radicand is negative ({:.4}); reduce the backfill slope or wall friction", radicand),
        ));
    }

    let denominator = beta.sin().powi(2) * (beta - delta).sin() * (1.0 + radicand.sqrt()).powi(2);
    if denominator.abs() < ZERO_TOLERANCE {
        return Err(CalcError::incompatible(
            &["coulomb.batter_base_m", "coulomb.wall_friction_deg"],
            format!("Coulomb denominator vanishes for β = {:.2}°", beta_deg),
        ));
    }

    let ka = (beta + phi).sin().powi(2) / denominator;
    if !(ka.is_finite() && ka > 0.0) {
        return Err(CalcError::incompatible(
            &["coulomb.batter_base_m", "coulomb.wall_friction_deg"],
            format!("Coulomb Ka = {} is not a positive coefficient", ka),
        ));
    }
    Ok(ka)
}

// ============================================================================
// Resultants
// ============================================================================

fn passive_for(params: &DesignParameters) -> CalcResult<(f64, f64)> {
    let kp = rankine_passive_coefficient(params.foundation_friction_deg)?;
    let cohesion = if params.criteria.include_passive_cohesion {
        params.foundation_cohesion_t_m2
    } else {
        0.0
    };
    let ep = passive_resistance(
        kp,
        params.foundation_unit_weight_t_m3,
        params.embedment_depth_m,
        cohesion,
    );
    Ok((kp, ep))
}

/// Rankine thrusts for a vertical smooth stem.
pub fn rankine(params: &DesignParameters) -> CalcResult<RankinePressure> {
    let ka = rankine_active_coefficient(params.backfill_friction_deg)?;
    let (kp, passive) = passive_for(params)?;

    let h = params.stem_height_m;
    let backfill = 0.5 * ka * params.backfill_unit_weight_t_m3 * h.powi(2);
    let surcharge = ka * params.surcharge_t_m2 * h;

    debug!(ka, kp, backfill, surcharge, passive, "rankine pressures");

    Ok(RankinePressure {
        ka,
        kp,
        backfill_thrust_t_m: backfill,
        surcharge_thrust_t_m: surcharge,
        total_active_thrust_t_m: backfill + surcharge,
        passive_resistance_t_m: passive,
    })
}

/// Coulomb thrusts for a battered wall with sloped backfill.
///
/// Requires the `coulomb` geometry block.
pub fn coulomb(params: &DesignParameters) -> CalcResult<CoulombPressure> {
    let geo = params.coulomb_geometry()?;

    let beta_deg = wall_inclination_deg(geo.total_height_m, params.stem_height_m, geo.batter_base_m);
    let ka = coulomb_active_coefficient(
        beta_deg,
        params.backfill_friction_deg,
        geo.wall_friction_deg,
        geo.backfill_slope_deg,
    )?;
    let (kp, passive) = passive_for(params)?;

    let beta = Degrees(beta_deg).rad();
    let delta = Degrees(geo.wall_friction_deg).rad();
    let alpha = Degrees(geo.backfill_slope_deg).rad();

    let effective_height = geo.total_height_m + (geo.batter_base_m / 2.0 + geo.heel_length_m / 2.0) * alpha.tan();
    let pa = 0.5 * ka * params.backfill_unit_weight_t_m3 * effective_height.powi(2);

    let thrust_angle = std::f64::consts::FRAC_PI_2 - beta + delta;
    let ph = pa * thrust_angle.cos();
    let pv = pa * thrust_angle.sin();

    // sin(β+α) was checked non-zero by the Ka radicand guard
    let psc = ka * geo.total_height_m * params.surcharge_t_m2 * beta.sin() / (beta + alpha).sin();

    debug!(beta_deg, ka, effective_height, pa, ph, pv, psc, "coulomb pressures");

    Ok(CoulombPressure {
        beta_deg,
        ka,
        kp,
        effective_height_m: effective_height,
        active_thrust_t_m: pa,
        horizontal_thrust_t_m: ph,
        vertical_thrust_t_m: pv,
        surcharge_thrust_t_m: psc,
        total_horizontal_thrust_t_m: ph + psc,
        passive_resistance_t_m: passive,
    })
}

/// Run the selected theory.
pub fn calculate(params: &DesignParameters, theory: Theory) -> CalcResult<PressureResult> {
    match theory {
        Theory::Rankine => rankine(params).map(PressureResult::Rankine),
        Theory::Coulomb => coulomb(params).map(PressureResult::Coulomb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wall::{CoulombGeometry, WallInput};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn params_with(phi_deg: f64, stem_height_m: f64) -> DesignParameters {
        let mut input = WallInput::default();
        input.soil.backfill_friction_deg = phi_deg;
        input.geometry.stem_height_m = stem_height_m;
        input.to_parameters().unwrap()
    }

    fn coulomb_params(geo: CoulombGeometry) -> DesignParameters {
        let mut input = WallInput::default();
        input.geometry.coulomb = Some(geo);
        input.to_parameters().unwrap()
    }

    #[test]
    fn test_rankine_ka_thirty_degrees() {
        assert_relative_eq!(rankine_active_coefficient(30.0).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rankine_ka_thirty_two_degrees() {
        // tan²(29°)
        assert_abs_diff_eq!(rankine_active_coefficient(32.0).unwrap(), 0.3073, epsilon = 1e-4);
    }

    #[test]
    fn test_rankine_ka_strictly_decreasing() {
        let kas: Vec<f64> = (1..90)
            .map(|phi| rankine_active_coefficient(phi as f64).unwrap())
            .collect();
        assert!(kas.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_passive_above_one_above_active() {
        for phi in 1..90 {
            let phi = phi as f64;
            let ka = rankine_active_coefficient(phi).unwrap();
            let kp = rankine_passive_coefficient(phi).unwrap();
            assert!(kp > 1.0 && 1.0 > ka, "phi = {}", phi);
            assert_relative_eq!(kp, Degrees(45.0 + phi / 2.0).rad().tan().powi(2), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_friction_rejected() {
        for phi in [0.0, -5.0, 90.0, 120.0, f64::NAN] {
            let err = rankine_active_coefficient(phi).unwrap_err();
            assert!(err.is_validation(), "phi = {}", phi);
        }
        assert!(rankine_passive_coefficient(0.0).is_err());
    }

    #[test]
    fn test_rankine_backfill_thrust() {
        // φ = 30°, γ = 1.8 t/m³, h = 3 m: ½ · ⅓ · 1.8 · 9 = 2.7 t/m
        let pressure = rankine(&params_with(30.0, 3.0)).unwrap();
        assert_abs_diff_eq!(pressure.backfill_thrust_t_m, 2.700, epsilon = 1e-9);
        // q = 1 t/m²: ⅓ · 1 · 3 = 1.0 t/m
        assert_abs_diff_eq!(pressure.surcharge_thrust_t_m, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pressure.total_active_thrust_t_m, 3.7, epsilon = 1e-9);
    }

    #[test]
    fn test_rankine_passive_resistance() {
        // φf = 25°, γf = 1.7 t/m³, D = 1.2 m
        let pressure = rankine(&params_with(30.0, 2.8)).unwrap();
        let kp = Degrees(57.5).rad().tan().powi(2);
        assert_relative_eq!(pressure.passive_resistance_t_m, 0.5 * kp * 1.7 * 1.44, epsilon = 1e-12);
    }

    #[test]
    fn test_passive_cohesion_switch() {
        let mut input = WallInput::default();
        let plain = rankine(&input.to_parameters().unwrap()).unwrap();
        input.criteria.include_passive_cohesion = true;
        let cohesive = rankine(&input.to_parameters().unwrap()).unwrap();
        // cf = 1 t/m², D = 1.2 m
        let extra = 2.0 * 1.0 * 1.2 * plain.kp.sqrt();
        assert_relative_eq!(
            cohesive.passive_resistance_t_m,
            plain.passive_resistance_t_m + extra,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_vertical_wall_branch() {
        assert_eq!(wall_inclination_deg(4.0, 2.8, 0.0), 90.0);
        assert_relative_eq!(wall_inclination_deg(4.0, 3.0, 1.0), 45.0, epsilon = 1e-12);
    }

    #[test]
    fn test_coulomb_reduces_to_rankine() {
        for phi in [20.0, 28.0, 32.0, 36.0, 40.0] {
            let coulomb = coulomb_active_coefficient(90.0, phi, 0.0, 0.0).unwrap();
            let rankine = rankine_active_coefficient(phi).unwrap();
            assert!((coulomb - rankine).abs() < 1e-6, "phi = {}", phi);
        }
    }

    #[test]
    fn test_coulomb_negative_radicand() {
        // α > φ makes sin(φ − α) negative
        let err = coulomb_active_coefficient(90.0, 30.0, 20.0, 35.0).unwrap_err();
        assert!(err.is_incompatibility());
        match err {
            CalcError::ParameterIncompatibility { parameters, .. } => {
                assert!(parameters.contains(&"coulomb.backfill_slope_deg".to_string()));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_coulomb_zero_denominator() {
        // β = δ makes sin(β − δ) vanish
        let err = coulomb_active_coefficient(30.0, 32.0, 30.0, 0.0).unwrap_err();
        assert!(err.is_incompatibility());
    }

    #[test]
    fn test_coulomb_incompatibility_from_full_run() {
        let params = coulomb_params(CoulombGeometry {
            backfill_slope_deg: 35.0,
            ..CoulombGeometry::default()
        });
        let err = coulomb(&params).unwrap_err();
        assert_eq!(err.error_code(), "PARAMETER_INCOMPATIBILITY");
    }

    #[test]
    fn test_coulomb_components_reconstruct_resultant() {
        let pressure = coulomb(&coulomb_params(CoulombGeometry::default())).unwrap();
        let magnitude_sq = pressure.horizontal_thrust_t_m.powi(2) + pressure.vertical_thrust_t_m.powi(2);
        assert_relative_eq!(magnitude_sq, pressure.active_thrust_t_m.powi(2), max_relative = 1e-12);
    }

    #[test]
    fn test_coulomb_default_case() {
        // H = 4.0, h = 2.8, base = 0.3: β = atan(1.2/0.3)
        let pressure = coulomb(&coulomb_params(CoulombGeometry::default())).unwrap();
        assert_relative_eq!(pressure.beta_deg, 4.0_f64.atan().to_degrees(), epsilon = 1e-12);
        // H' = 4 + (0.15 + 0.5)·tan 10°
        assert_relative_eq!(
            pressure.effective_height_m,
            4.0 + 0.65 * Degrees(10.0).rad().tan(),
            epsilon = 1e-12
        );
        assert!(pressure.ka > 0.0 && pressure.ka < 1.0);
        assert_relative_eq!(
            pressure.total_horizontal_thrust_t_m,
            pressure.horizontal_thrust_t_m + pressure.surcharge_thrust_t_m,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_coulomb_requires_geometry_block() {
        let params = WallInput::default().to_parameters().unwrap();
        let err = calculate(&params, Theory::Coulomb).unwrap_err();
        assert_eq!(err, CalcError::missing_field("geometry.coulomb"));
    }

    #[test]
    fn test_pressure_result_tagged_json() {
        let params = WallInput::default().to_parameters().unwrap();
        let result = calculate(&params, Theory::Rankine).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"theory\":\"rankine\""));
        let roundtrip: PressureResult = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.theory(), Theory::Rankine);
        assert_relative_eq!(roundtrip.active_coefficient(), result.active_coefficient(), epsilon = 1e-12);
    }
}
