//! # Error Types
//!
//! Structured error types for wall_core. A run either produces a complete
//! result bundle or aborts with one of these errors before any downstream
//! stage executes.
//!
//! Two families matter to callers:
//!
//! - **Validation** (`InvalidInput`, `MissingField`): a single parameter is
//!   malformed or out of its physical domain.
//! - **Parameter incompatibility** (`ParameterIncompatibility`): every
//!   parameter is in range on its own, but their combination makes an
//!   intermediate quantity undefined (negative Coulomb radicand, zero sine
//!   denominators).
//!
//! Failed design checks (low factor of safety, soil tension, etc.) are not
//! errors. See [`crate::calculations::NonConformance`].
//!
//! ## Example
//!
//! ```rust
//! use wall_core::errors::{CalcError, CalcResult};
//!
//! fn validate_height(stem_height_m: f64) -> CalcResult<()> {
//!     if stem_height_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "stem_height_m".to_string(),
//!             value: stem_height_m.to_string(),
//!             reason: "Stem height must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wall_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-positive dimension, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A block required by the selected theory is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Individually valid parameters whose combination is undefined
    #[error("Incompatible parameters [{}]: {reason}", .parameters.join(", "))]
    ParameterIncompatibility {
        parameters: Vec<String>,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ParameterIncompatibility error naming the offending parameters
    pub fn incompatible(parameters: &[&str], reason: impl Into<String>) -> Self {
        CalcError::ParameterIncompatibility {
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for single-parameter validation failures
    pub fn is_validation(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::MissingField { .. })
    }

    /// True when the parameter combination, not a single value, is at fault
    pub fn is_incompatibility(&self) -> bool {
        matches!(self, CalcError::ParameterIncompatibility { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::ParameterIncompatibility { .. } => "PARAMETER_INCOMPATIBILITY",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("backfill_friction_deg", "0", "Friction angle must be in (0, 90) degrees");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("geometry.coulomb").error_code(), "MISSING_FIELD");
        assert_eq!(
            CalcError::incompatible(&["backfill_slope_deg"], "negative radicand").error_code(),
            "PARAMETER_INCOMPATIBILITY"
        );
    }

    #[test]
    fn test_incompatibility_names_parameters() {
        let err = CalcError::incompatible(&["wall_friction_deg", "backfill_slope_deg"], "negative radicand");
        assert!(err.is_incompatibility());
        assert!(!err.is_validation());
        let msg = err.to_string();
        assert!(msg.contains("wall_friction_deg, backfill_slope_deg"));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let parse: Result<f64, _> = serde_json::from_str("not a number");
        let err: CalcError = parse.unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
