//! # Design Criteria
//!
//! Code thresholds, strength-design factors and detailing choices applied to
//! every run. Carried inside [`crate::wall::WallInput`] as an optional
//! `criteria` block; omitted fields fall back to the defaults below.
//!
//! ## Example
//!
//! ```rust
//! use wall_core::settings::DesignCriteria;
//!
//! let criteria: DesignCriteria = serde_json::from_str(r#"{ "min_fs_sliding": 1.75 }"#).unwrap();
//! assert_eq!(criteria.min_fs_sliding, 1.75);
//! assert_eq!(criteria.min_fs_overturning, 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::RebarSize;

/// Thresholds and factors for stability checks and stem design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignCriteria {
    /// Minimum factor of safety against overturning
    pub min_fs_overturning: f64,

    /// Minimum factor of safety against sliding
    pub min_fs_sliding: f64,

    /// Load factor applied to the overturning moment for strength design
    pub load_factor: f64,

    /// Strength-reduction factor for flexure (φ)
    pub flexure_phi: f64,

    /// Equivalent stress-block factor in the required-depth formula
    pub stress_block_factor: f64,

    /// Minimum flexural steel ratio ρmin
    pub min_steel_ratio: f64,

    /// Maximum flexural steel ratio ρmax
    pub max_steel_ratio: f64,

    /// Shrinkage and temperature steel ratio
    pub shrinkage_steel_ratio: f64,

    /// Clear cover to the bars at each face (cm)
    pub cover_cm: f64,

    /// Cover plus half bar subtracted from the section to get d (cm)
    pub effective_depth_deduction_cm: f64,

    /// Bar used for the main flexural steel
    pub flexural_bar: RebarSize,

    /// Bar used for shrinkage and temperature steel
    pub shrinkage_bar: RebarSize,

    /// Add the cohesive term 2·c·D·√Kp of the foundation soil to passive resistance
    pub include_passive_cohesion: bool,
}

impl Default for DesignCriteria {
    fn default() -> Self {
        DesignCriteria {
            min_fs_overturning: 2.0,
            min_fs_sliding: 1.5,
            load_factor: 1.4,
            flexure_phi: 0.9,
            stress_block_factor: 0.59,
            min_steel_ratio: 0.0033,
            max_steel_ratio: 0.0163,
            shrinkage_steel_ratio: 0.002,
            cover_cm: 3.0,
            effective_depth_deduction_cm: 9.0,
            flexural_bar: RebarSize::No5,
            shrinkage_bar: RebarSize::No4,
            include_passive_cohesion: false,
        }
    }
}

impl DesignCriteria {
    /// Validate criteria values.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("criteria.min_fs_overturning", self.min_fs_overturning),
            ("criteria.min_fs_sliding", self.min_fs_sliding),
            ("criteria.load_factor", self.load_factor),
            ("criteria.flexure_phi", self.flexure_phi),
            ("criteria.stress_block_factor", self.stress_block_factor),
            ("criteria.min_steel_ratio", self.min_steel_ratio),
            ("criteria.max_steel_ratio", self.max_steel_ratio),
            ("criteria.shrinkage_steel_ratio", self.shrinkage_steel_ratio),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }
        if self.flexure_phi > 1.0 {
            return Err(CalcError::invalid_input(
                "criteria.flexure_phi",
                self.flexure_phi.to_string(),
                "Strength-reduction factor cannot exceed 1.0",
            ));
        }
        if self.min_steel_ratio >= self.max_steel_ratio {
            return Err(CalcError::invalid_input(
                "criteria.min_steel_ratio",
                self.min_steel_ratio.to_string(),
                "Minimum steel ratio must be below the maximum",
            ));
        }
        if !(self.cover_cm >= 0.0) {
            return Err(CalcError::invalid_input(
                "criteria.cover_cm",
                self.cover_cm.to_string(),
                "Cover cannot be negative",
            ));
        }
        if !(self.effective_depth_deduction_cm >= 0.0) {
            return Err(CalcError::invalid_input(
                "criteria.effective_depth_deduction_cm",
                self.effective_depth_deduction_cm.to_string(),
                "Deduction cannot be negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(DesignCriteria::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_ratio_bounds_rejected() {
        let criteria = DesignCriteria {
            min_steel_ratio: 0.02,
            ..DesignCriteria::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_phi_above_one_rejected() {
        let criteria = DesignCriteria {
            flexure_phi: 1.1,
            ..DesignCriteria::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let criteria: DesignCriteria =
            serde_json::from_str(r##"{ "flexural_bar": "#6", "include_passive_cohesion": true }"##).unwrap();
        assert_eq!(criteria.flexural_bar, RebarSize::No6);
        assert!(criteria.include_passive_cohesion);
        assert_eq!(criteria.load_factor, 1.4);
    }
}
