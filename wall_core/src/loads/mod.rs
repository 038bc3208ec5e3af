//! # Loads
//!
//! Surcharge acting on the backfill surface. Lateral earth thrusts are derived
//! quantities and live in [`crate::calculations::earth_pressure`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{KgPerM2, TonnePerM2};

/// Uniform surcharge on the retained surface.
///
/// ## JSON Example
///
/// ```json
/// { "pressure_kg_m2": 1000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurchargeLoad {
    /// Uniform surcharge pressure q (kg/m²)
    pub pressure_kg_m2: f64,
}

impl Default for SurchargeLoad {
    fn default() -> Self {
        SurchargeLoad { pressure_kg_m2: 1000.0 }
    }
}

impl SurchargeLoad {
    /// Create a surcharge from a pressure in kg/m²
    pub fn new(pressure_kg_m2: f64) -> Self {
        SurchargeLoad { pressure_kg_m2 }
    }

    /// Validate the surcharge (zero is allowed, negative is not).
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.pressure_kg_m2 >= 0.0) {
            return Err(CalcError::invalid_input(
                "surcharge.pressure_kg_m2",
                self.pressure_kg_m2.to_string(),
                "Surcharge cannot be negative",
            ));
        }
        Ok(())
    }

    /// Surcharge in canonical units
    pub fn pressure(&self) -> TonnePerM2 {
        KgPerM2(self.pressure_kg_m2).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_surcharge_allowed() {
        assert!(SurchargeLoad::new(0.0).validate().is_ok());
    }

    #[test]
    fn test_negative_surcharge_rejected() {
        assert!(SurchargeLoad::new(-50.0).validate().is_err());
    }

    #[test]
    fn test_canonical_pressure() {
        assert_eq!(SurchargeLoad::new(1000.0).pressure().0, 1.0);
    }
}
