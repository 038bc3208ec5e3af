//! Physical constants, code-minimum floors and empirical sizing coefficients.
//!
//! Values follow common Latin American practice for cantilever walls sized in
//! the technical-metric system (kg, t, m, kg/cm²).

/// Normal-weight reinforced concrete (kg/m³)
pub const CONCRETE_UNIT_WEIGHT_KG_M3: f64 = 2400.0;

/// Typical compacted granular backfill (kg/m³)
pub const BACKFILL_UNIT_WEIGHT_KG_M3: f64 = 1800.0;

/// Reference concrete strength for the empirical kc factor (kg/cm²)
pub const KC_REFERENCE_FC_KG_CM2: f64 = 210.0;

/// Empirical concrete-strength factor at the reference strength
pub const KC_REFERENCE: f64 = 14.28;

/// Divisor of the footing-thickness sizing formula, hz = √(.../(9·kc))
pub const FOOTING_THICKNESS_DIVISOR: f64 = 9.0;

/// Divisor of the stem-thickness sizing formula, b = √(.../(10·kc))
pub const STEM_THICKNESS_DIVISOR: f64 = 10.0;

// Code-minimum floors (m)

/// Minimum footing thickness hz
pub const MIN_FOOTING_THICKNESS_M: f64 = 0.40;

/// Minimum stem thickness b
pub const MIN_STEM_THICKNESS_M: f64 = 0.35;

/// Minimum toe length r
pub const MIN_TOE_LENGTH_M: f64 = 0.70;

// Coulomb cross-check section

/// Stem thickness assumed when estimating a Coulomb section
pub const COULOMB_ESTIMATE_STEM_M: f64 = 0.40;

/// Footing thickness assumed when estimating a Coulomb section
pub const COULOMB_ESTIMATE_FOOTING_M: f64 = 0.40;

/// Tolerance for treating a trigonometric denominator as zero
pub const ZERO_TOLERANCE: f64 = 1e-12;

/// Round to centimetre precision, as dimensions are drawn and built
pub fn round_cm(value_m: f64) -> f64 {
    (value_m * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cm() {
        assert_eq!(round_cm(2.634), 2.63);
        assert_eq!(round_cm(0.697), 0.70);
    }
}
