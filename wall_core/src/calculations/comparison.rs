//! # Theory Comparison
//!
//! Advisory side-by-side of Rankine and Coulomb pressures for one input set.
//! Differences are signed relative to Rankine:
//!
//! ```text
//! %diff = (coulomb − rankine) / rankine × 100
//! ```
//!
//! Nothing here feeds back into geometry or stability.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::earth_pressure::PressureResult;
use super::Theory;
use crate::errors::{CalcError, CalcResult};

/// |ΔKa| below which the two theories are considered comparable (%)
pub const COMPARABLE_KA_DIFF_PCT: f64 = 10.0;

/// Result of comparing the two theories.
///
/// ## JSON Example
///
/// ```json
/// {
///   "ka_rankine": 0.3333,
///   "ka_coulomb": 0.4050,
///   "ka_diff_pct": 21.5,
///   "thrust_rankine_t_m": 3.285,
///   "thrust_coulomb_t_m": 6.12,
///   "thrust_diff_pct": 86.3,
///   "footing_width_diff_pct": 4.2,
///   "more_conservative": "coulomb",
///   "comparable": false,
///   "notes": ["..."]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoryComparison {
    pub ka_rankine: f64,
    pub ka_coulomb: f64,
    pub ka_diff_pct: f64,

    /// Total horizontal thrust, soil plus surcharge (t/m)
    pub thrust_rankine_t_m: f64,
    pub thrust_coulomb_t_m: f64,
    pub thrust_diff_pct: f64,

    /// Coulomb estimate against the Rankine design, when both were sized
    pub footing_width_diff_pct: Option<f64>,

    /// Theory giving the larger horizontal thrust
    pub more_conservative: Theory,

    /// |ka_diff_pct| < 10
    pub comparable: bool,

    /// Qualitative trade-offs for the report
    pub notes: Vec<String>,
}

impl TheoryComparison {
    /// Fill in the footing-width difference from both sized sections.
    pub fn with_footing_widths(mut self, rankine_m: f64, coulomb_m: f64) -> Self {
        self.footing_width_diff_pct = Some(percent_difference(rankine_m, coulomb_m));
        self
    }
}

/// (other − reference)/reference × 100
pub fn percent_difference(reference: f64, other: f64) -> f64 {
    (other - reference) / reference * 100.0
}

fn trade_off_notes(comparable: bool, more_conservative: Theory) -> Vec<String> {
    let mut notes = vec![
        if comparable {
            "Both theories give comparable active coefficients for this case".to_string()
        } else {
            "Active coefficients differ significantly between theories".to_string()
        },
        format!("{} gives the larger horizontal thrust", more_conservative),
        "Rankine: simple closed form for a smooth vertical stem, sizes the full section and drives design".to_string(),
        "Coulomb: accounts for wall friction, wall batter and sloped backfill, used as a cross-check".to_string(),
    ];
    if more_conservative == Theory::Coulomb {
        notes.push("Verify the Rankine design against the Coulomb thrust before relying on it".to_string());
    }
    notes
}

/// Compare a Rankine result against a Coulomb result.
///
/// Fails if the arguments are not one of each theory.
pub fn compare(rankine: &PressureResult, coulomb: &PressureResult) -> CalcResult<TheoryComparison> {
    if rankine.theory() != Theory::Rankine || coulomb.theory() != Theory::Coulomb {
        return Err(CalcError::Internal {
            message: format!(
                "Comparison expects (rankine, coulomb), got ({}, {})",
                rankine.theory(),
                coulomb.theory()
            ),
        });
    }

    let ka_rankine = rankine.active_coefficient();
    let ka_coulomb = coulomb.active_coefficient();
    let ka_diff_pct = percent_difference(ka_rankine, ka_coulomb);

    let thrust_rankine = rankine.total_horizontal_thrust_t_m();
    let thrust_coulomb = coulomb.total_horizontal_thrust_t_m();
    let thrust_diff_pct = percent_difference(thrust_rankine, thrust_coulomb);

    let more_conservative = if thrust_coulomb > thrust_rankine {
        Theory::Coulomb
    } else {
        Theory::Rankine
    };
    let comparable = ka_diff_pct.abs() < COMPARABLE_KA_DIFF_PCT;

    debug!(ka_diff_pct, thrust_diff_pct, %more_conservative, "theory comparison");

    Ok(TheoryComparison {
        ka_rankine,
        ka_coulomb,
        ka_diff_pct,
        thrust_rankine_t_m: thrust_rankine,
        thrust_coulomb_t_m: thrust_coulomb,
        thrust_diff_pct,
        footing_width_diff_pct: None,
        more_conservative,
        comparable,
        notes: trade_off_notes(comparable, more_conservative),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::earth_pressure;
    use crate::wall::{CoulombGeometry, WallInput};
    use approx::assert_relative_eq;

    fn pressures(geo: CoulombGeometry) -> (PressureResult, PressureResult) {
        let mut input = WallInput::default();
        input.geometry.coulomb = Some(geo);
        let params = input.to_parameters().unwrap();
        (
            earth_pressure::calculate(&params, Theory::Rankine).unwrap(),
            earth_pressure::calculate(&params, Theory::Coulomb).unwrap(),
        )
    }

    #[test]
    fn test_percent_difference_sign() {
        assert_relative_eq!(percent_difference(2.0, 2.5), 25.0, epsilon = 1e-12);
        assert_relative_eq!(percent_difference(2.0, 1.5), -25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_default_comparison() {
        let (r, c) = pressures(CoulombGeometry::default());
        let cmp = compare(&r, &c).unwrap();

        assert_relative_eq!(cmp.ka_rankine, 1.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(
            cmp.ka_diff_pct,
            (cmp.ka_coulomb - cmp.ka_rankine) / cmp.ka_rankine * 100.0,
            epsilon = 1e-9
        );
        assert_eq!(cmp.comparable, cmp.ka_diff_pct.abs() < 10.0);
        let expected = if cmp.thrust_coulomb_t_m > cmp.thrust_rankine_t_m {
            Theory::Coulomb
        } else {
            Theory::Rankine
        };
        assert_eq!(cmp.more_conservative, expected);
        assert!(cmp.footing_width_diff_pct.is_none());
        assert!(cmp.notes.len() >= 4);
    }

    #[test]
    fn test_vertical_smooth_level_case_is_comparable() {
        // β = 90°, δ = 0, α = 0 and H = h: Coulomb Ka collapses to Rankine
        let geo = CoulombGeometry {
            total_height_m: 2.8,
            batter_base_m: 0.0,
            heel_length_m: 1.0,
            wall_friction_deg: 0.0,
            backfill_slope_deg: 0.0,
        };
        let (r, c) = pressures(geo);
        let cmp = compare(&r, &c).unwrap();
        assert!(cmp.ka_diff_pct.abs() < 1e-4);
        assert!(cmp.thrust_diff_pct.abs() < 1e-4);
        assert!(cmp.comparable);
    }

    #[test]
    fn test_footing_width_difference() {
        let (r, c) = pressures(CoulombGeometry::default());
        let cmp = compare(&r, &c).unwrap().with_footing_widths(2.0, 2.2);
        assert_relative_eq!(cmp.footing_width_diff_pct.unwrap(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_swapped_arguments_rejected() {
        let (r, c) = pressures(CoulombGeometry::default());
        assert!(compare(&c, &r).is_err());
    }
}
