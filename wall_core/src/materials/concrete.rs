//! Concrete sizing factor kc.
//!
//! The empirical footing/stem sizing formulas divide by a concrete-strength
//! factor kc. The tabulated reference is kc = 14.28 at f'c = 210 kg/cm²; other
//! strengths scale linearly from that reference.

use crate::constants::{KC_REFERENCE, KC_REFERENCE_FC_KG_CM2};

/// kc for a concrete strength f'c in kg/cm².
///
/// ```rust
/// use wall_core::materials::concrete::kc_factor;
///
/// assert!((kc_factor(210.0) - 14.28).abs() < 1e-12);
/// assert!(kc_factor(280.0) > kc_factor(210.0));
/// ```
pub fn kc_factor(fc_kg_cm2: f64) -> f64 {
    KC_REFERENCE * fc_kg_cm2 / KC_REFERENCE_FC_KG_CM2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_strength() {
        assert_relative_eq!(kc_factor(210.0), 14.28, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_scaling() {
        assert_relative_eq!(kc_factor(420.0), 28.56, epsilon = 1e-9);
        assert_relative_eq!(kc_factor(175.0), 11.9, epsilon = 1e-9);
    }
}
