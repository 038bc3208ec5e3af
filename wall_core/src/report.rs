//! # Summary Report
//!
//! Flat label/value/unit/status rows over a [`WallDesign`] for tables and
//! printed reports. A Coulomb bundle reports its estimated section but has
//! no toe length or reinforcement; those rows carry [`NOT_AVAILABLE`].

use serde::{Deserialize, Serialize};

use crate::calculations::WallDesign;

/// Placeholder for values a partial bundle does not have
pub const NOT_AVAILABLE: &str = "N/A";

/// Outcome shown in the status column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Pass,
    Fail,
    /// Informational value, no check attached
    Info,
}

impl RowStatus {
    fn from_check(ok: bool) -> Self {
        if ok {
            RowStatus::Pass
        } else {
            RowStatus::Fail
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowStatus::Pass => "OK",
            RowStatus::Fail => "FAIL",
            RowStatus::Info => "",
        }
    }
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
    pub unit: String,
    pub status: RowStatus,
}

impl SummaryRow {
    fn new(label: &str, value: String, unit: &str, status: RowStatus) -> Self {
        SummaryRow {
            label: label.to_string(),
            value,
            unit: unit.to_string(),
            status,
        }
    }

    fn info(label: &str, value: String, unit: &str) -> Self {
        SummaryRow::new(label, value, unit, RowStatus::Info)
    }

    fn missing(label: &str, unit: &str) -> Self {
        SummaryRow::info(label, NOT_AVAILABLE.to_string(), unit)
    }

    /// True when the value is the placeholder
    pub fn is_missing(&self) -> bool {
        self.value == NOT_AVAILABLE
    }
}

fn fmt2(v: f64) -> String {
    format!("{:.2}", v)
}

/// Build the summary rows for a design.
///
/// Never fails: missing parts of a partial bundle become [`NOT_AVAILABLE`].
pub fn summary_rows(design: &WallDesign) -> Vec<SummaryRow> {
    let mut rows = Vec::new();
    let pressure = &design.pressure;
    let stab = &design.stability;

    rows.push(SummaryRow::info("Theory", design.theory.to_string(), ""));
    rows.push(SummaryRow::info("Ka", format!("{:.4}", pressure.active_coefficient()), ""));
    rows.push(SummaryRow::info("Kp", format!("{:.4}", pressure.passive_coefficient()), ""));
    rows.push(SummaryRow::info("Horizontal thrust", fmt2(pressure.total_horizontal_thrust_t_m()), "t/m"));
    rows.push(SummaryRow::info("Passive resistance", fmt2(pressure.passive_resistance_t_m()), "t/m"));

    match (&design.geometry, &design.estimated_section) {
        (Some(geo), _) => {
            rows.push(SummaryRow::info("Footing width Bz", fmt2(geo.footing_width_m), "m"));
            rows.push(SummaryRow::info("Footing thickness hz", fmt2(geo.footing_thickness_m), "m"));
            rows.push(SummaryRow::info("Stem thickness b", fmt2(geo.stem_thickness_m), "m"));
            rows.push(SummaryRow::info("Toe length r", fmt2(geo.toe_length_m), "m"));
            rows.push(SummaryRow::info("Heel length t", fmt2(geo.heel_length_m), "m"));
        }
        (None, Some(est)) => {
            rows.push(SummaryRow::info("Estimated footing width", fmt2(est.footing_width_m), "m"));
            rows.push(SummaryRow::info("Footing thickness hz", fmt2(est.footing_thickness_m), "m"));
            rows.push(SummaryRow::info("Stem thickness b", fmt2(est.stem_thickness_m), "m"));
            rows.push(SummaryRow::missing("Toe length r", "m"));
            rows.push(SummaryRow::info("Heel length t", fmt2(est.heel_length_m), "m"));
        }
        (None, None) => {
            for (label, unit) in [
                ("Estimated footing width", "m"),
                ("Footing thickness hz", "m"),
                ("Stem thickness b", "m"),
                ("Toe length r", "m"),
                ("Heel length t", "m"),
            ] {
                rows.push(SummaryRow::missing(label, unit));
            }
        }
    }

    rows.push(SummaryRow::new(
        "FS overturning",
        fmt2(stab.fs_overturning),
        "",
        RowStatus::from_check(stab.overturning_ok),
    ));
    rows.push(SummaryRow::new(
        "FS sliding",
        fmt2(stab.fs_sliding),
        "",
        RowStatus::from_check(stab.sliding_ok),
    ));
    rows.push(SummaryRow::new(
        "Eccentricity e",
        format!("{:.3} (limit {:.3})", stab.eccentricity_m, stab.middle_third_limit_m),
        "m",
        RowStatus::from_check(stab.middle_third_ok),
    ));
    rows.push(SummaryRow::new(
        "q max",
        fmt2(stab.q_max_kg_cm2),
        "kg/cm²",
        RowStatus::from_check(stab.bearing_ok),
    ));
    rows.push(SummaryRow::new(
        "q min",
        fmt2(stab.q_min_kg_cm2),
        "kg/cm²",
        RowStatus::from_check(!stab.soil_tension),
    ));

    match &design.reinforcement {
        Some(r) => {
            rows.push(SummaryRow::new(
                "Effective depth d",
                format!("{:.1} (req {:.1})", r.available_depth_cm, r.required_depth_cm),
                "cm",
                RowStatus::from_check(r.depth_ok),
            ));
            rows.push(SummaryRow::info("Required steel As", fmt2(r.required_steel_cm2), "cm²"));
            rows.push(SummaryRow::info("Minimum steel As,min", fmt2(r.minimum_steel_cm2), "cm²"));
            rows.push(SummaryRow::new(
                "Flexural bars",
                format!("{} ({:.2} cm²)", r.bar_callout(), r.provided_steel_cm2),
                "",
                RowStatus::from_check(r.steel_ok),
            ));
            rows.push(SummaryRow::new(
                "Steel ratio ρ",
                format!("{:.4} (max {:.4})", r.steel_ratio, r.max_steel_ratio),
                "",
                RowStatus::from_check(r.ratio_ok),
            ));
            rows.push(SummaryRow::new(
                "Shrinkage bars",
                format!(
                    "{} {} ({:.2} ≥ {:.2} cm²)",
                    r.shrinkage_bar_count, r.shrinkage_bar_size.code(), r.shrinkage_provided_cm2, r.shrinkage_steel_cm2
                ),
                "",
                RowStatus::from_check(r.shrinkage_ok),
            ));
        }
        None => {
            for (label, unit) in [
                ("Effective depth d", "cm"),
                ("Required steel As", "cm²"),
                ("Minimum steel As,min", "cm²"),
                ("Flexural bars", ""),
                ("Steel ratio ρ", ""),
                ("Shrinkage bars", ""),
            ] {
                rows.push(SummaryRow::missing(label, unit));
            }
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{analyze, Theory};
    use crate::wall::{CoulombGeometry, WallInput};

    #[test]
    fn test_rankine_rows_have_no_placeholders() {
        let design = analyze(&WallInput::default(), Theory::Rankine).unwrap();
        let rows = summary_rows(&design);
        assert!(rows.iter().all(|r| !r.is_missing()));
        assert!(rows.iter().all(|r| r.status != RowStatus::Fail));
        let bars = rows.iter().find(|r| r.label == "Flexural bars").unwrap();
        assert!(bars.value.starts_with("3 #5"));
    }

    #[test]
    fn test_coulomb_rows_use_placeholder() {
        let mut input = WallInput::default();
        input.geometry.coulomb = Some(CoulombGeometry::default());
        let design = analyze(&input, Theory::Coulomb).unwrap();
        let rows = summary_rows(&design);

        let missing: Vec<_> = rows.iter().filter(|r| r.is_missing()).map(|r| r.label.as_str()).collect();
        assert!(missing.contains(&"Toe length r"));
        assert!(missing.contains(&"Flexural bars"));
        assert!(missing.contains(&"Shrinkage bars"));
        assert!(!missing.contains(&"Estimated footing width"));
        assert!(!missing.contains(&"FS overturning"));
    }

    #[test]
    fn test_coulomb_rows_show_estimated_section() {
        let mut input = WallInput::default();
        input.geometry.coulomb = Some(CoulombGeometry::default());
        let design = analyze(&input, Theory::Coulomb).unwrap();
        let est = design.estimated_section.unwrap();
        let rows = summary_rows(&design);
        let value = |label: &str| rows.iter().find(|r| r.label == label).unwrap().value.clone();

        assert_eq!(value("Stem thickness b"), "0.40");
        assert_eq!(value("Footing thickness hz"), "0.40");
        assert_eq!(value("Heel length t"), format!("{:.2}", est.heel_length_m));
        assert_eq!(value("Toe length r"), NOT_AVAILABLE);
    }

    #[test]
    fn test_row_count_matches_between_theories() {
        let mut input = WallInput::default();
        input.geometry.coulomb = Some(CoulombGeometry::default());
        let rankine = summary_rows(&analyze(&input, Theory::Rankine).unwrap());
        let coulomb = summary_rows(&analyze(&input, Theory::Coulomb).unwrap());
        assert_eq!(rankine.len(), coulomb.len());
    }
}
