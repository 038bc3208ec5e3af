//! # Materials
//!
//! Concrete and reinforcing steel used by the wall.
//!
//! - [`MaterialProperties`] - the per-run material input (γc, f'c, fy)
//! - [`concrete`] - empirical concrete-strength factor kc
//! - [`rebar`] - reinforcing bar table
//!
//! ## Example
//!
//! ```rust
//! use wall_core::materials::MaterialProperties;
//!
//! let mat = MaterialProperties::default();
//! assert_eq!(mat.concrete_strength_kg_cm2, 210.0);
//! assert!((mat.kc() - 14.28).abs() < 1e-9);
//! ```

pub mod concrete;
pub mod rebar;

pub use rebar::RebarSize;

use serde::{Deserialize, Serialize};

use crate::constants::CONCRETE_UNIT_WEIGHT_KG_M3;
use crate::errors::{CalcError, CalcResult};
use crate::units::{KgPerM3, TonnePerM3};

/// Concrete and steel properties for one analysis run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "concrete_unit_weight_kg_m3": 2400.0,
///   "concrete_strength_kg_cm2": 210.0,
///   "steel_yield_kg_cm2": 4200.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Reinforced concrete unit weight γc (kg/m³)
    pub concrete_unit_weight_kg_m3: f64,

    /// Specified concrete compressive strength f'c (kg/cm²)
    pub concrete_strength_kg_cm2: f64,

    /// Reinforcing steel yield strength fy (kg/cm²)
    pub steel_yield_kg_cm2: f64,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        MaterialProperties {
            concrete_unit_weight_kg_m3: CONCRETE_UNIT_WEIGHT_KG_M3,
            concrete_strength_kg_cm2: 210.0,
            steel_yield_kg_cm2: 4200.0,
        }
    }
}

impl MaterialProperties {
    /// Validate material properties.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.concrete_unit_weight_kg_m3 > 0.0) {
            return Err(CalcError::invalid_input(
                "concrete_unit_weight_kg_m3",
                self.concrete_unit_weight_kg_m3.to_string(),
                "Concrete unit weight must be positive",
            ));
        }
        if !(self.concrete_strength_kg_cm2 > 0.0) {
            return Err(CalcError::invalid_input(
                "concrete_strength_kg_cm2",
                self.concrete_strength_kg_cm2.to_string(),
                "Concrete strength f'c must be positive",
            ));
        }
        if !(self.steel_yield_kg_cm2 > 0.0) {
            return Err(CalcError::invalid_input(
                "steel_yield_kg_cm2",
                self.steel_yield_kg_cm2.to_string(),
                "Steel yield strength fy must be positive",
            ));
        }
        Ok(())
    }

    /// Concrete unit weight in canonical units
    pub fn concrete_unit_weight(&self) -> TonnePerM3 {
        KgPerM3(self.concrete_unit_weight_kg_m3).into()
    }

    /// Empirical sizing factor kc for this concrete
    pub fn kc(&self) -> f64 {
        concrete::kc_factor(self.concrete_strength_kg_cm2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(MaterialProperties::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_strength() {
        let mut mat = MaterialProperties::default();
        mat.concrete_strength_kg_cm2 = 0.0;
        let err = mat.validate().unwrap_err();
        assert!(err.is_validation());

        let mut mat = MaterialProperties::default();
        mat.steel_yield_kg_cm2 = -4200.0;
        assert!(mat.validate().is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let mut mat = MaterialProperties::default();
        mat.concrete_unit_weight_kg_m3 = f64::NAN;
        assert!(mat.validate().is_err());
    }

    #[test]
    fn test_canonical_unit_weight() {
        assert_eq!(MaterialProperties::default().concrete_unit_weight().0, 2.4);
    }
}
