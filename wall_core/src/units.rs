//! # Unit Types
//!
//! Type-safe wrappers for the engineering units used by the wall engine.
//! These are plain f64 newtypes, serialized as bare numbers.
//!
//! ## Canonical Units
//!
//! Inputs arrive in the units practitioners enter (kg/m³, kg/m², kg/cm²) and
//! are converted once, at the input boundary, into the technical-metric
//! system every calculation uses:
//!
//! - Length: metres (m); reinforcement in centimetres (cm) and cm²
//! - Unit weight: tonnes per cubic metre (t/m³)
//! - Pressure: tonnes per square metre (t/m²)
//! - Line force: tonnes per metre of wall (t/m)
//! - Moment: tonne-metres per metre of wall (t·m)
//! - Angles: degrees at the API, radians inside trigonometry
//!
//! ## Example
//!
//! ```rust
//! use wall_core::units::{KgPerM3, TonnePerM3, TonnePerM2, KgPerCm2};
//!
//! let gamma: TonnePerM3 = KgPerM3(1800.0).into();
//! assert_eq!(gamma.0, 1.8);
//!
//! let q: KgPerCm2 = TonnePerM2(25.0).into();
//! assert_eq!(q.0, 2.5);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

// ============================================================================
// Unit Weight
// ============================================================================

/// Unit weight in kilograms per cubic metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM3(pub f64);

/// Unit weight in tonnes per cubic metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonnePerM3(pub f64);

impl From<KgPerM3> for TonnePerM3 {
    fn from(kg: KgPerM3) -> Self {
        TonnePerM3(kg.0 / 1000.0)
    }
}

impl From<TonnePerM3> for KgPerM3 {
    fn from(t: TonnePerM3) -> Self {
        KgPerM3(t.0 * 1000.0)
    }
}

// ============================================================================
// Pressure / Stress
// ============================================================================

/// Pressure in kilograms per square metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM2(pub f64);

/// Pressure in tonnes per square metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonnePerM2(pub f64);

/// Pressure or stress in kilograms per square centimetre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerCm2(pub f64);

impl From<KgPerM2> for TonnePerM2 {
    fn from(kg: KgPerM2) -> Self {
        TonnePerM2(kg.0 / 1000.0)
    }
}

impl From<TonnePerM2> for KgPerM2 {
    fn from(t: TonnePerM2) -> Self {
        KgPerM2(t.0 * 1000.0)
    }
}

impl From<TonnePerM2> for KgPerCm2 {
    fn from(t: TonnePerM2) -> Self {
        KgPerCm2(t.0 * 0.1)
    }
}

impl From<KgPerCm2> for TonnePerM2 {
    fn from(kg: KgPerCm2) -> Self {
        TonnePerM2(kg.0 * 10.0)
    }
}

// ============================================================================
// Line Force (per metre of wall)
// ============================================================================

/// Force in tonnes per metre of wall
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonnePerM(pub f64);

/// Force in kilograms per metre of wall
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerM(pub f64);

impl From<TonnePerM> for KgPerM {
    fn from(t: TonnePerM) -> Self {
        KgPerM(t.0 * 1000.0)
    }
}

impl From<KgPerM> for TonnePerM {
    fn from(kg: KgPerM) -> Self {
        TonnePerM(kg.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in tonne-metres (per metre of wall)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonneMeter(pub f64);

/// Moment in kilogram-centimetres (per metre of wall)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgCm(pub f64);

impl From<TonneMeter> for KgCm {
    fn from(tm: TonneMeter) -> Self {
        KgCm(tm.0 * 100_000.0)
    }
}

impl From<KgCm> for TonneMeter {
    fn from(kgcm: KgCm) -> Self {
        TonneMeter(kgcm.0 / 100_000.0)
    }
}

// ============================================================================
// Angles
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Degrees {
    /// Angle in radians, for trigonometry
    pub fn rad(self) -> f64 {
        Radians::from(self).0
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(KgPerM3);
impl_arithmetic!(TonnePerM3);
impl_arithmetic!(KgPerM2);
impl_arithmetic!(TonnePerM2);
impl_arithmetic!(KgPerCm2);
impl_arithmetic!(TonnePerM);
impl_arithmetic!(KgPerM);
impl_arithmetic!(TonneMeter);
impl_arithmetic!(KgCm);
impl_arithmetic!(Degrees);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_weight_conversion() {
        let gamma: TonnePerM3 = KgPerM3(2400.0).into();
        assert_eq!(gamma.0, 2.4);
    }

    #[test]
    fn test_bearing_pressure_conversion() {
        // 1 t/m² = 1000 kg / 10 000 cm² = 0.1 kg/cm²
        let q: KgPerCm2 = TonnePerM2(18.5).into();
        assert_relative_eq!(q.0, 1.85, epsilon = 1e-12);
        let back: TonnePerM2 = q.into();
        assert_relative_eq!(back.0, 18.5, epsilon = 1e-12);
    }

    #[test]
    fn test_moment_conversion() {
        let m: KgCm = TonneMeter(4.9).into();
        assert_relative_eq!(m.0, 490_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_passive_force_restated_in_kg() {
        let ep: KgPerM = TonnePerM(3.034).into();
        assert_relative_eq!(ep.0, 3034.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angles() {
        let r: Radians = Degrees(180.0).into();
        assert_relative_eq!(r.0, std::f64::consts::PI, epsilon = 1e-12);
        assert_relative_eq!(Degrees(90.0).rad(), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        let back: Degrees = Radians(std::f64::consts::FRAC_PI_4).into();
        assert_relative_eq!(back.0, 45.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Meters(2.8);
        let b = Meters(1.2);
        assert_relative_eq!((a + b).0, 4.0, epsilon = 1e-12);
        assert_relative_eq!((a - b).0, 1.6, epsilon = 1e-12);
        assert_relative_eq!((a * 2.0).0, 5.6, epsilon = 1e-12);
        assert_relative_eq!((a / 2.0).0, 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_serialization() {
        let h = Meters(2.8);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, "2.8");

        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(h, roundtrip);
    }
}
