//! # Wall Calculations
//!
//! The analysis pipeline for a cantilever retaining wall. Each stage is a pure
//! function of the canonical [`DesignParameters`] and the stage before it:
//!
//! ```text
//! WallInput ─► earth_pressure ─► geometry ─► stability ─► reinforcement ─► WallDesign
//!                    │
//!                    └─► comparison (advisory, both theories)
//! ```
//!
//! Each stage follows the pattern:
//!
//! - `*Result` - stage output (JSON-serializable)
//! - `calculate(...) -> CalcResult<*Result>` - pure calculation function
//!
//! ## Theories
//!
//! - **Rankine** sizes the wall, checks stability and designs the stem steel.
//! - **Coulomb** computes pressures and checks stability on an estimated
//!   section. It does not size the wall or design reinforcement.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::calculations::{analyze, Theory};
//! use wall_core::wall::WallInput;
//!
//! let design = analyze(&WallInput::default(), Theory::Rankine).unwrap();
//! assert!(design.geometry.is_some());
//! assert!(design.reinforcement.is_some());
//! println!("FS overturning = {:.2}", design.stability.fs_overturning);
//! ```

pub mod comparison;
pub mod earth_pressure;
pub mod geometry;
pub mod reinforcement;
pub mod stability;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::wall::{DesignParameters, WallInput};

// Re-export commonly used types
pub use comparison::TheoryComparison;
pub use earth_pressure::{CoulombPressure, PressureResult, RankinePressure};
pub use geometry::{CoulombSectionEstimate, GeometryResult, SectionDimensions};
pub use reinforcement::ReinforcementResult;
pub use stability::{LateralLoads, StabilityResult};

/// Earth pressure theory selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theory {
    /// Smooth vertical wall, level backfill
    Rankine,
    /// Battered wall with wall friction and sloped backfill
    Coulomb,
}

impl Theory {
    pub const ALL: [Theory; 2] = [Theory::Rankine, Theory::Coulomb];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theory::Rankine => "rankine",
            Theory::Coulomb => "coulomb",
        }
    }
}

impl fmt::Display for Theory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theory::Rankine => write!(f, "Rankine"),
            Theory::Coulomb => write!(f, "Coulomb"),
        }
    }
}

impl FromStr for Theory {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rankine" => Ok(Theory::Rankine),
            "coulomb" => Ok(Theory::Coulomb),
            _ => Err(CalcError::invalid_input("theory", s, "Expected 'rankine' or 'coulomb'")),
        }
    }
}

/// A failed design check. Reported in the result, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonConformance {
    /// FS_overturning below minimum
    Overturning,
    /// FS_sliding below minimum
    Sliding,
    /// Resultant outside the middle third
    Eccentricity,
    /// Negative minimum soil pressure
    SoilTension,
    /// Maximum soil pressure above allowable
    BearingExceeded,
    /// Available effective depth below required
    InsufficientDepth,
    /// Provided flexural steel below max(As, Asmin)
    SteelBelowRequired,
    /// Steel ratio above ρmax
    SteelRatioExceeded,
    /// Provided shrinkage steel below required
    ShrinkageSteelBelowRequired,
}

impl NonConformance {
    pub fn description(&self) -> &'static str {
        match self {
            NonConformance::Overturning => "Factor of safety against overturning below minimum",
            NonConformance::Sliding => "Factor of safety against sliding below minimum",
            NonConformance::Eccentricity => "Resultant falls outside the middle third of the footing",
            NonConformance::SoilTension => "Minimum soil pressure is negative (tension under heel)",
            NonConformance::BearingExceeded => "Maximum soil pressure exceeds allowable bearing",
            NonConformance::InsufficientDepth => "Available effective depth is less than required",
            NonConformance::SteelBelowRequired => "Provided flexural steel is below the required area",
            NonConformance::SteelRatioExceeded => "Steel ratio exceeds the maximum",
            NonConformance::ShrinkageSteelBelowRequired => "Provided shrinkage steel is below the required area",
        }
    }
}

impl fmt::Display for NonConformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Every non-conformance found in the stage results, in check order.
pub fn non_conformances(
    stability: &StabilityResult,
    reinforcement: Option<&ReinforcementResult>,
) -> Vec<NonConformance> {
    let mut found = Vec::new();

    let stability_checks = [
        (stability.overturning_ok, NonConformance::Overturning),
        (stability.sliding_ok, NonConformance::Sliding),
        (stability.middle_third_ok, NonConformance::Eccentricity),
        (!stability.soil_tension, NonConformance::SoilTension),
        (stability.bearing_ok, NonConformance::BearingExceeded),
    ];
    found.extend(stability_checks.into_iter().filter(|(ok, _)| !*ok).map(|(_, nc)| nc));

    if let Some(r) = reinforcement {
        let steel_checks = [
            (r.depth_ok, NonConformance::InsufficientDepth),
            (r.steel_ok, NonConformance::SteelBelowRequired),
            (r.ratio_ok, NonConformance::SteelRatioExceeded),
            (r.shrinkage_ok, NonConformance::ShrinkageSteelBelowRequired),
        ];
        found.extend(steel_checks.into_iter().filter(|(ok, _)| !*ok).map(|(_, nc)| nc));
    }

    found
}

/// Result bundle for one analysis run.
///
/// Rankine runs carry `geometry` and `reinforcement`. Coulomb runs carry
/// `estimated_section` instead and no reinforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallDesign {
    pub label: String,
    pub theory: Theory,
    pub pressure: PressureResult,
    pub geometry: Option<GeometryResult>,
    pub estimated_section: Option<CoulombSectionEstimate>,
    pub stability: StabilityResult,
    pub reinforcement: Option<ReinforcementResult>,
    pub non_conformances: Vec<NonConformance>,
}

impl WallDesign {
    /// True when no check failed
    pub fn passes(&self) -> bool {
        self.non_conformances.is_empty()
    }

    /// Section the stability analysis ran on
    pub fn section(&self) -> Option<SectionDimensions> {
        self.geometry
            .map(|g| g.section())
            .or_else(|| self.estimated_section.map(|e| e.section()))
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn run_rankine(label: String, params: &DesignParameters) -> CalcResult<WallDesign> {
    let pressure = earth_pressure::rankine(params)?;
    let geo = geometry::calculate(params, &pressure)?;
    let pressure = PressureResult::Rankine(pressure);
    let stab = stability::calculate(params, &geo.section(), &LateralLoads::from_pressure(&pressure))?;
    let reinf = reinforcement::calculate(params, &geo, &stab)?;
    let found = non_conformances(&stab, Some(&reinf));

    Ok(WallDesign {
        label,
        theory: Theory::Rankine,
        pressure,
        geometry: Some(geo),
        estimated_section: None,
        stability: stab,
        reinforcement: Some(reinf),
        non_conformances: found,
    })
}

fn run_coulomb(label: String, params: &DesignParameters) -> CalcResult<WallDesign> {
    let pressure = earth_pressure::coulomb(params)?;
    let estimate = geometry::estimate_coulomb_section(params, &pressure)?;
    let pressure = PressureResult::Coulomb(pressure);
    let stab = stability::calculate(params, &estimate.section(), &LateralLoads::from_pressure(&pressure))?;
    let found = non_conformances(&stab, None);

    Ok(WallDesign {
        label,
        theory: Theory::Coulomb,
        pressure,
        geometry: None,
        estimated_section: Some(estimate),
        stability: stab,
        reinforcement: None,
        non_conformances: found,
    })
}

/// Run the full pipeline for one theory.
///
/// Validation and parameter-incompatibility errors abort the run. Failed
/// design checks are listed in [`WallDesign::non_conformances`].
pub fn analyze(input: &WallInput, theory: Theory) -> CalcResult<WallDesign> {
    let params = input.to_parameters()?;
    debug!(label = %input.label, theory = theory.as_str(), "analyzing wall");

    let design = match theory {
        Theory::Rankine => run_rankine(input.label.clone(), &params)?,
        Theory::Coulomb => run_coulomb(input.label.clone(), &params)?,
    };

    for nc in &design.non_conformances {
        warn!(label = %design.label, theory = %design.theory, check = ?nc, "{}", nc);
    }

    Ok(design)
}

/// Compare both theories on the same input.
///
/// Requires the Coulomb geometry block. The footing-width difference uses the
/// Rankine design width against the Coulomb estimate.
pub fn compare_theories(input: &WallInput) -> CalcResult<TheoryComparison> {
    let params = input.to_parameters()?;

    let rankine = earth_pressure::rankine(&params)?;
    let coulomb = earth_pressure::coulomb(&params)?;
    let rankine_geo = geometry::calculate(&params, &rankine)?;
    let coulomb_est = geometry::estimate_coulomb_section(&params, &coulomb)?;

    let cmp = comparison::compare(&PressureResult::Rankine(rankine), &PressureResult::Coulomb(coulomb))?;
    Ok(cmp.with_footing_widths(rankine_geo.footing_width_m, coulomb_est.footing_width_m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wall::CoulombGeometry;

    #[test]
    fn test_theory_parsing() {
        assert_eq!("rankine".parse::<Theory>().unwrap(), Theory::Rankine);
        assert_eq!(" Coulomb ".parse::<Theory>().unwrap(), Theory::Coulomb);
        assert!("terzaghi".parse::<Theory>().is_err());
        for theory in Theory::ALL {
            assert_eq!(theory.as_str().parse::<Theory>().unwrap(), theory);
        }
    }

    #[test]
    fn test_theory_serialization() {
        assert_eq!(serde_json::to_string(&Theory::Coulomb).unwrap(), "\"coulomb\"");
        let theory: Theory = serde_json::from_str("\"rankine\"").unwrap();
        assert_eq!(theory, Theory::Rankine);
    }

    #[test]
    fn test_rankine_bundle_is_complete() {
        let design = analyze(&WallInput::default(), Theory::Rankine).unwrap();
        assert_eq!(design.theory, Theory::Rankine);
        assert_eq!(design.label, "MC-1");
        assert!(design.geometry.is_some());
        assert!(design.estimated_section.is_none());
        assert!(design.reinforcement.is_some());
        assert!(design.passes());
        assert_eq!(design.section().unwrap().footing_width_m, 2.63);
    }

    #[test]
    fn test_coulomb_bundle_is_partial() {
        let mut input = WallInput::default();
        input.geometry.coulomb = Some(CoulombGeometry::default());
        let design = analyze(&input, Theory::Coulomb).unwrap();
        assert_eq!(design.theory, Theory::Coulomb);
        assert!(design.geometry.is_none());
        assert!(design.reinforcement.is_none());
        assert!(design.estimated_section.is_some());
        assert!(design.stability.fs_overturning > 0.0);
    }

    #[test]
    fn test_coulomb_without_geometry_block() {
        let err = analyze(&WallInput::default(), Theory::Coulomb).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_non_conformances_collected_not_raised() {
        let mut input = WallInput::default();
        input.soil.foundation_friction_deg = 5.0;
        input.soil.backfill_friction_deg = 20.0;
        input.geometry.embedment_depth_m = 0.0;
        input.criteria.min_fs_sliding = 10.0;
        let design = analyze(&input, Theory::Rankine).unwrap();
        assert!(!design.passes());
        assert!(design.non_conformances.contains(&NonConformance::Sliding));
    }

    #[test]
    fn test_compare_theories_fills_footing_difference() {
        let mut input = WallInput::default();
        input.geometry.coulomb = Some(CoulombGeometry::default());
        let cmp = compare_theories(&input).unwrap();
        assert!(cmp.footing_width_diff_pct.is_some());
    }

    #[test]
    fn test_design_json_shape() {
        let design = analyze(&WallInput::default(), Theory::Rankine).unwrap();
        let value: serde_json::Value = serde_json::from_str(&design.to_json().unwrap()).unwrap();
        assert_eq!(value["theory"], "rankine");
        assert_eq!(value["pressure"]["theory"], "rankine");
        assert!(value["estimated_section"].is_null());
        assert_eq!(value["reinforcement"]["bar_size"], "#5");
    }
}
