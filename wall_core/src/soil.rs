//! # Soil Profile
//!
//! Backfill retained by the wall and the foundation soil under the footing.

use serde::{Deserialize, Serialize};

use crate::constants::BACKFILL_UNIT_WEIGHT_KG_M3;
use crate::errors::{CalcError, CalcResult};

/// Backfill and foundation soil parameters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "backfill_unit_weight_kg_m3": 1800.0,
///   "backfill_friction_deg": 30.0,
///   "backfill_cohesion_kg_m2": 0.0,
///   "foundation_unit_weight_kg_m3": 1700.0,
///   "foundation_friction_deg": 25.0,
///   "foundation_cohesion_kg_m2": 1000.0,
///   "allowable_bearing_kg_cm2": 2.5
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    /// Backfill unit weight γ (kg/m³)
    pub backfill_unit_weight_kg_m3: f64,

    /// Backfill internal friction angle φ (degrees)
    pub backfill_friction_deg: f64,

    /// Backfill cohesion c (kg/m²); validated only, active pressure treats the backfill as cohesionless
    pub backfill_cohesion_kg_m2: f64,

    /// Foundation soil unit weight γf (kg/m³)
    pub foundation_unit_weight_kg_m3: f64,

    /// Foundation soil friction angle φf (degrees)
    pub foundation_friction_deg: f64,

    /// Foundation soil cohesion cf (kg/m²)
    pub foundation_cohesion_kg_m2: f64,

    /// Allowable bearing pressure of the foundation soil (kg/cm²)
    pub allowable_bearing_kg_cm2: f64,
}

impl Default for SoilProfile {
    fn default() -> Self {
        SoilProfile {
            backfill_unit_weight_kg_m3: BACKFILL_UNIT_WEIGHT_KG_M3,
            backfill_friction_deg: 30.0,
            backfill_cohesion_kg_m2: 0.0,
            foundation_unit_weight_kg_m3: 1700.0,
            foundation_friction_deg: 25.0,
            foundation_cohesion_kg_m2: 1000.0,
            allowable_bearing_kg_cm2: 2.5,
        }
    }
}

/// Check a friction angle lies strictly inside (0°, 90°).
pub(crate) fn validate_friction_angle(field: &str, phi_deg: f64) -> CalcResult<()> {
    if !(phi_deg > 0.0 && phi_deg < 90.0) {
        return Err(CalcError::invalid_input(
            field,
            phi_deg.to_string(),
            "Friction angle must be strictly between 0 and 90 degrees",
        ));
    }
    Ok(())
}

impl SoilProfile {
    /// Validate soil parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validate_friction_angle("backfill_friction_deg", self.backfill_friction_deg)?;
        validate_friction_angle("foundation_friction_deg", self.foundation_friction_deg)?;

        let positive = [
            ("backfill_unit_weight_kg_m3", self.backfill_unit_weight_kg_m3, "Unit weight must be positive"),
            ("foundation_unit_weight_kg_m3", self.foundation_unit_weight_kg_m3, "Unit weight must be positive"),
            ("allowable_bearing_kg_cm2", self.allowable_bearing_kg_cm2, "Allowable bearing pressure must be positive"),
        ];
        for (field, value, reason) in positive {
            if !(value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), reason));
            }
        }

        let non_negative = [
            ("backfill_cohesion_kg_m2", self.backfill_cohesion_kg_m2),
            ("foundation_cohesion_kg_m2", self.foundation_cohesion_kg_m2),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Cohesion cannot be negative"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(SoilProfile::default().validate().is_ok());
    }

    #[test]
    fn test_zero_friction_rejected() {
        let mut soil = SoilProfile::default();
        soil.backfill_friction_deg = 0.0;
        match soil.validate() {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "backfill_friction_deg"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_right_angle_friction_rejected() {
        let mut soil = SoilProfile::default();
        soil.foundation_friction_deg = 90.0;
        assert!(soil.validate().is_err());
    }

    #[test]
    fn test_negative_cohesion_rejected() {
        let mut soil = SoilProfile::default();
        soil.foundation_cohesion_kg_m2 = -1.0;
        assert!(soil.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let soil = SoilProfile::default();
        let json = serde_json::to_string_pretty(&soil).unwrap();
        let roundtrip: SoilProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(soil, roundtrip);
    }
}
