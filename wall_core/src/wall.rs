//! # Wall Input
//!
//! The complete parameter set for one analysis run and its conversion into the
//! canonical units used by every calculation stage.
//!
//! ```text
//! WallInput (entry units: kg/m³, kg/m², kg/cm², m, degrees)
//! ├── soil: SoilProfile
//! ├── geometry: WallGeometryInput
//! │   └── coulomb: Option<CoulombGeometry>
//! ├── material: MaterialProperties
//! ├── surcharge: SurchargeLoad
//! └── criteria: DesignCriteria (optional in JSON)
//!         │
//!         ▼  to_parameters()  (validate once, convert once)
//! DesignParameters (t/m³, t/m², t, m)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wall_core::wall::WallInput;
//!
//! let input = WallInput::default();
//! let params = input.to_parameters().unwrap();
//! assert_eq!(params.backfill_unit_weight_t_m3, 1.8);
//! assert_eq!(params.surcharge_t_m2, 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::SurchargeLoad;
use crate::materials::MaterialProperties;
use crate::settings::DesignCriteria;
use crate::soil::SoilProfile;
use crate::units::{KgPerCm2, KgPerM2, KgPerM3, TonnePerM2, TonnePerM3};

/// Wall dimensions supplied by the designer.
///
/// ## JSON Example
///
/// ```json
/// {
///   "stem_height_m": 2.8,
///   "embedment_depth_m": 1.2,
///   "coping_height_m": 1.2,
///   "coulomb": {
///     "total_height_m": 4.0,
///     "batter_base_m": 0.3,
///     "heel_length_m": 1.0,
///     "wall_friction_deg": 21.0,
///     "backfill_slope_deg": 10.0
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallGeometryInput {
    /// Height of retained soil against the stem, h (m)
    pub stem_height_m: f64,

    /// Footing embedment below the toe-side grade, D (m)
    pub embedment_depth_m: f64,

    /// Coping (crown) height used in stem sizing, hm (m)
    pub coping_height_m: f64,

    /// Inclined-wall parameters, required only for Coulomb runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coulomb: Option<CoulombGeometry>,
}

/// Inclined back face, wall friction and sloped backfill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoulombGeometry {
    /// Total wall height H (m)
    pub total_height_m: f64,

    /// Horizontal run of the battered back face (m); zero means a vertical back
    pub batter_base_m: f64,

    /// Heel length behind the stem (m)
    pub heel_length_m: f64,

    /// Wall-soil friction angle δ (degrees)
    pub wall_friction_deg: f64,

    /// Backfill surface slope α (degrees)
    pub backfill_slope_deg: f64,
}

impl Default for WallGeometryInput {
    fn default() -> Self {
        WallGeometryInput {
            stem_height_m: 2.8,
            embedment_depth_m: 1.2,
            coping_height_m: 1.2,
            coulomb: None,
        }
    }
}

impl Default for CoulombGeometry {
    fn default() -> Self {
        CoulombGeometry {
            total_height_m: 4.0,
            batter_base_m: 0.3,
            heel_length_m: 1.0,
            wall_friction_deg: 21.0,
            backfill_slope_deg: 10.0,
        }
    }
}

impl WallGeometryInput {
    /// Validate dimensions common to both theories.
    ///
    /// The `coulomb` block is checked only when a Coulomb run reads it, see
    /// [`DesignParameters::coulomb_geometry`].
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.stem_height_m > 0.0) {
            return Err(CalcError::invalid_input(
                "stem_height_m",
                self.stem_height_m.to_string(),
                "Stem height must be positive",
            ));
        }
        if !(self.embedment_depth_m >= 0.0) {
            return Err(CalcError::invalid_input(
                "embedment_depth_m",
                self.embedment_depth_m.to_string(),
                "Embedment depth cannot be negative",
            ));
        }
        if !(self.coping_height_m >= 0.0) {
            return Err(CalcError::invalid_input(
                "coping_height_m",
                self.coping_height_m.to_string(),
                "Coping height cannot be negative",
            ));
        }
        Ok(())
    }
}

impl CoulombGeometry {
    /// Validate inclined-wall parameters against the stem height.
    pub fn validate(&self, stem_height_m: f64) -> CalcResult<()> {
        if !(self.total_height_m > 0.0) {
            return Err(CalcError::invalid_input(
                "coulomb.total_height_m",
                self.total_height_m.to_string(),
                "Total wall height must be positive",
            ));
        }
        if self.total_height_m < stem_height_m {
            return Err(CalcError::invalid_input(
                "coulomb.total_height_m",
                self.total_height_m.to_string(),
                format!("Total wall height cannot be less than the stem height ({} m)", stem_height_m),
            ));
        }
        if !(self.batter_base_m >= 0.0) {
            return Err(CalcError::invalid_input(
                "coulomb.batter_base_m",
                self.batter_base_m.to_string(),
                "Batter base length cannot be negative",
            ));
        }
        if !(self.heel_length_m >= 0.0) {
            return Err(CalcError::invalid_input(
                "coulomb.heel_length_m",
                self.heel_length_m.to_string(),
                "Heel length cannot be negative",
            ));
        }
        if !(self.wall_friction_deg >= 0.0 && self.wall_friction_deg < 90.0) {
            return Err(CalcError::invalid_input(
                "coulomb.wall_friction_deg",
                self.wall_friction_deg.to_string(),
                "Wall friction angle must be in [0, 90) degrees",
            ));
        }
        if !(self.backfill_slope_deg > -90.0 && self.backfill_slope_deg < 90.0) {
            return Err(CalcError::invalid_input(
                "coulomb.backfill_slope_deg",
                self.backfill_slope_deg.to_string(),
                "Backfill slope must be in (-90, 90) degrees",
            ));
        }
        Ok(())
    }
}

/// Full parameter set for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallInput {
    /// User label for this wall (e.g., "MC-1", "Ramp wall")
    #[serde(default)]
    pub label: String,

    /// Backfill and foundation soil
    pub soil: SoilProfile,

    /// Wall dimensions
    pub geometry: WallGeometryInput,

    /// Concrete and steel
    pub material: MaterialProperties,

    /// Surcharge on the backfill
    #[serde(default)]
    pub surcharge: SurchargeLoad,

    /// Code thresholds and detailing choices
    #[serde(default)]
    pub criteria: DesignCriteria,
}

impl Default for WallInput {
    fn default() -> Self {
        WallInput {
            label: "MC-1".to_string(),
            soil: SoilProfile::default(),
            geometry: WallGeometryInput::default(),
            material: MaterialProperties::default(),
            surcharge: SurchargeLoad::default(),
            criteria: DesignCriteria::default(),
        }
    }
}

impl WallInput {
    /// Validate every input block. Runs before any calculation.
    pub fn validate(&self) -> CalcResult<()> {
        self.soil.validate()?;
        self.geometry.validate()?;
        self.material.validate()?;
        self.surcharge.validate()?;
        self.criteria.validate()?;
        Ok(())
    }

    /// Validate and convert to canonical units.
    pub fn to_parameters(&self) -> CalcResult<DesignParameters> {
        self.validate()?;

        let soil = &self.soil;
        let geometry = &self.geometry;
        Ok(DesignParameters {
            backfill_unit_weight_t_m3: TonnePerM3::from(KgPerM3(soil.backfill_unit_weight_kg_m3)).0,
            backfill_friction_deg: soil.backfill_friction_deg,
            foundation_unit_weight_t_m3: TonnePerM3::from(KgPerM3(soil.foundation_unit_weight_kg_m3)).0,
            foundation_friction_deg: soil.foundation_friction_deg,
            foundation_cohesion_t_m2: TonnePerM2::from(KgPerM2(soil.foundation_cohesion_kg_m2)).0,
            allowable_bearing_t_m2: TonnePerM2::from(KgPerCm2(soil.allowable_bearing_kg_cm2)).0,
            stem_height_m: geometry.stem_height_m,
            embedment_depth_m: geometry.embedment_depth_m,
            coping_height_m: geometry.coping_height_m,
            coulomb: geometry.coulomb,
            concrete_unit_weight_t_m3: self.material.concrete_unit_weight().0,
            concrete_strength_kg_cm2: self.material.concrete_strength_kg_cm2,
            steel_yield_kg_cm2: self.material.steel_yield_kg_cm2,
            kc: self.material.kc(),
            surcharge_t_m2: self.surcharge.pressure().0,
            criteria: self.criteria,
        })
    }
}

/// Validated parameters in canonical units (t, m).
///
/// Strengths stay in kg/cm² because the strength-design formulas are written
/// in kg and cm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    /// Backfill unit weight γ (t/m³)
    pub backfill_unit_weight_t_m3: f64,
    /// Backfill friction angle φ (degrees)
    pub backfill_friction_deg: f64,
    /// Foundation soil unit weight γf (t/m³)
    pub foundation_unit_weight_t_m3: f64,
    /// Foundation soil friction angle φf (degrees)
    pub foundation_friction_deg: f64,
    /// Foundation soil cohesion (t/m²)
    pub foundation_cohesion_t_m2: f64,
    /// Allowable bearing pressure (t/m²)
    pub allowable_bearing_t_m2: f64,
    /// Stem height h (m)
    pub stem_height_m: f64,
    /// Embedment depth D (m)
    pub embedment_depth_m: f64,
    /// Coping height hm (m)
    pub coping_height_m: f64,
    /// Inclined-wall parameters, if supplied
    pub coulomb: Option<CoulombGeometry>,
    /// Concrete unit weight (t/m³)
    pub concrete_unit_weight_t_m3: f64,
    /// f'c (kg/cm²)
    pub concrete_strength_kg_cm2: f64,
    /// fy (kg/cm²)
    pub steel_yield_kg_cm2: f64,
    /// Empirical concrete sizing factor
    pub kc: f64,
    /// Surcharge q (t/m²)
    pub surcharge_t_m2: f64,
    /// Thresholds and detailing choices
    pub criteria: DesignCriteria,
}

impl DesignParameters {
    /// Validated Coulomb geometry, or a MissingField error for Rankine-only inputs
    pub fn coulomb_geometry(&self) -> CalcResult<&CoulombGeometry> {
        let geo = self
            .coulomb
            .as_ref()
            .ok_or_else(|| CalcError::missing_field("geometry.coulomb"))?;
        geo.validate(self.stem_height_m)?;
        Ok(geo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_converts() {
        let params = WallInput::default().to_parameters().unwrap();
        assert_eq!(params.foundation_unit_weight_t_m3, 1.7);
        assert_eq!(params.concrete_unit_weight_t_m3, 2.4);
        assert_eq!(params.foundation_cohesion_t_m2, 1.0);
        assert_eq!(params.allowable_bearing_t_m2, 25.0);
        assert!((params.kc - 14.28).abs() < 1e-12);
    }

    #[test]
    fn test_validation_runs_before_conversion() {
        let mut input = WallInput::default();
        input.geometry.stem_height_m = 0.0;
        let err = input.to_parameters().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_missing_coulomb_block() {
        let params = WallInput::default().to_parameters().unwrap();
        assert_eq!(
            params.coulomb_geometry().unwrap_err(),
            CalcError::missing_field("geometry.coulomb")
        );
    }

    #[test]
    fn test_total_height_below_stem_rejected() {
        let mut input = WallInput::default();
        input.geometry.coulomb = Some(CoulombGeometry {
            total_height_m: 2.0,
            ..CoulombGeometry::default()
        });
        let params = input.to_parameters().unwrap();
        let err = params.coulomb_geometry().unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "coulomb.total_height_m"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unused_coulomb_block_not_validated() {
        // H = 4.0 m in the default block is below this stem
        let mut input = WallInput::default();
        input.geometry.stem_height_m = 5.0;
        input.geometry.coulomb = Some(CoulombGeometry::default());
        assert!(input.validate().is_ok());
        assert!(input.to_parameters().is_ok());
    }

    #[test]
    fn test_json_without_criteria() {
        let json = r#"{
            "soil": {
                "backfill_unit_weight_kg_m3": 1800.0,
                "backfill_friction_deg": 32.0,
                "backfill_cohesion_kg_m2": 0.0,
                "foundation_unit_weight_kg_m3": 1700.0,
                "foundation_friction_deg": 25.0,
                "foundation_cohesion_kg_m2": 0.0,
                "allowable_bearing_kg_cm2": 2.5
            },
            "geometry": { "stem_height_m": 2.8, "embedment_depth_m": 1.2, "coping_height_m": 1.2 },
            "material": {
                "concrete_unit_weight_kg_m3": 2400.0,
                "concrete_strength_kg_cm2": 210.0,
                "steel_yield_kg_cm2": 4200.0
            }
        }"#;
        let input: WallInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.criteria, DesignCriteria::default());
        assert_eq!(input.surcharge.pressure_kg_m2, 1000.0);
        assert!(input.geometry.coulomb.is_none());
    }
}
