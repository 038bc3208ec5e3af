//! Reinforcing Bars (ASTM A615, inch-designated)
//!
//! Nominal areas and diameters in centimetres, as used for metric detailing of
//! inch-size bars.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Standard reinforcing bar sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RebarSize {
    /// #3 (3/8")
    #[serde(rename = "#3")]
    No3,
    /// #4 (1/2")
    #[serde(rename = "#4")]
    No4,
    /// #5 (5/8")
    #[serde(rename = "#5")]
    No5,
    /// #6 (3/4")
    #[serde(rename = "#6")]
    No6,
    /// #8 (1")
    #[serde(rename = "#8")]
    No8,
}

impl RebarSize {
    /// All bar sizes for selection lists
    pub const ALL: [RebarSize; 5] = [
        RebarSize::No3,
        RebarSize::No4,
        RebarSize::No5,
        RebarSize::No6,
        RebarSize::No8,
    ];

    /// Nominal cross-sectional area (cm²)
    pub fn area_cm2(&self) -> f64 {
        match self {
            RebarSize::No3 => 0.71,
            RebarSize::No4 => 1.27,
            RebarSize::No5 => 1.98,
            RebarSize::No6 => 2.85,
            RebarSize::No8 => 5.07,
        }
    }

    /// Nominal diameter (cm)
    pub fn diameter_cm(&self) -> f64 {
        match self {
            RebarSize::No3 => 0.95,
            RebarSize::No4 => 1.27,
            RebarSize::No5 => 1.59,
            RebarSize::No6 => 1.91,
            RebarSize::No8 => 2.54,
        }
    }

    /// Bar designation, e.g. "#5"
    pub fn code(&self) -> &'static str {
        match self {
            RebarSize::No3 => "#3",
            RebarSize::No4 => "#4",
            RebarSize::No5 => "#5",
            RebarSize::No6 => "#6",
            RebarSize::No8 => "#8",
        }
    }

    /// Nominal diameter in inches, for display
    pub fn inch_label(&self) -> &'static str {
        match self {
            RebarSize::No3 => "3/8\"",
            RebarSize::No4 => "1/2\"",
            RebarSize::No5 => "5/8\"",
            RebarSize::No6 => "3/4\"",
            RebarSize::No8 => "1\"",
        }
    }

    /// Parse from common string representations ("#5", "5", "5/8")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().trim_end_matches('"').trim_start_matches('#') {
            "3" | "3/8" => Ok(RebarSize::No3),
            "4" | "1/2" => Ok(RebarSize::No4),
            "5" | "5/8" => Ok(RebarSize::No5),
            "6" | "3/4" => Ok(RebarSize::No6),
            "8" | "1" => Ok(RebarSize::No8),
            _ => Err(CalcError::invalid_input("bar_size", s, "Unknown reinforcing bar size")),
        }
    }
}

impl std::fmt::Display for RebarSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.inch_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_increase_with_size() {
        let areas: Vec<f64> = RebarSize::ALL.iter().map(|b| b.area_cm2()).collect();
        assert!(areas.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_parse_flexible() {
        assert_eq!(RebarSize::from_str_flexible("#5").unwrap(), RebarSize::No5);
        assert_eq!(RebarSize::from_str_flexible("1/2\"").unwrap(), RebarSize::No4);
        assert!(RebarSize::from_str_flexible("#11").is_err());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&RebarSize::No5).unwrap();
        assert_eq!(json, "\"#5\"");
        let roundtrip: RebarSize = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, RebarSize::No5);
    }
}
