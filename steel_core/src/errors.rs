//! # Error Types
//!
//! Structured error types for steel_core. Every capacity check fails fast and
//! hands the caller enough context (property name, shape designation, code
//! provision) to fix the input programmatically.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::errors::{CalcError, CalcResult};
//!
//! fn require_zx(zx: Option<f64>, shape: &str) -> CalcResult<f64> {
//!     zx.ok_or_else(|| CalcError::missing_parameter("zx", shape))
//! }
//!
//! let err = require_zx(None, "W10X22").unwrap_err();
//! assert_eq!(err.error_code(), "MISSING_PARAMETER");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for steel_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for capacity checks.
///
/// None of these conditions is transient: all computation is pure and local,
/// so nothing here is worth retrying.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is present but unusable (zero, negative, NaN)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A section, material or element property required by the check is absent
    #[error("Missing parameter \"{parameter}\" for element {shape}")]
    MissingParameter { parameter: String, shape: String },

    /// The check's formula family does not cover this shape
    #[error("Unsupported shape for {check}: {shape}")]
    UnsupportedShape { check: String, shape: String },

    /// The member's classification makes the requested formula inapplicable
    #[error("Precondition violated in {check}: {reason}")]
    PreconditionViolated { check: String, reason: String },

    /// A recognized code provision that is not implemented
    #[error("Not implemented: {provision}")]
    NotImplemented { provision: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingParameter error
    pub fn missing_parameter(parameter: impl Into<String>, shape: impl Into<String>) -> Self {
        CalcError::MissingParameter {
            parameter: parameter.into(),
            shape: shape.into(),
        }
    }

    /// Create an UnsupportedShape error
    pub fn unsupported_shape(check: impl Into<String>, shape: impl Into<String>) -> Self {
        CalcError::UnsupportedShape {
            check: check.into(),
            shape: shape.into(),
        }
    }

    /// Create a PreconditionViolated error
    pub fn precondition_violated(check: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::PreconditionViolated {
            check: check.into(),
            reason: reason.into(),
        }
    }

    /// Create a NotImplemented error
    pub fn not_implemented(provision: impl Into<String>) -> Self {
        CalcError::NotImplemented {
            provision: provision.into(),
        }
    }

    /// Name of the missing property, if this is a MissingParameter error
    pub fn missing_parameter_name(&self) -> Option<&str> {
        match self {
            CalcError::MissingParameter { parameter, .. } => Some(parameter.as_str()),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingParameter { .. } => "MISSING_PARAMETER",
            CalcError::UnsupportedShape { .. } => "UNSUPPORTED_SHAPE",
            CalcError::PreconditionViolated { .. } => "PRECONDITION_VIOLATED",
            CalcError::NotImplemented { .. } => "NOT_IMPLEMENTED",
        }
    }
}

/// Validate that a present numeric input is finite and strictly positive.
///
/// Returns the value unchanged so it can be used inline with `?`.
pub fn ensure_positive(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a finite, strictly positive number",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("fy", 36.0), Ok(36.0));
        assert!(ensure_positive("fy", 0.0).is_err());
        assert!(ensure_positive("fy", -1.0).is_err());
        assert!(ensure_positive("fy", f64::NAN).is_err());
        assert!(ensure_positive("fy", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_serialization() {
        let error = CalcError::missing_parameter("zx", "W10X22");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"MissingParameter\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_parameter("d", "W8X10").error_code(), "MISSING_PARAMETER");
        assert_eq!(CalcError::unsupported_shape("shear", "L4X4X1/2").error_code(), "UNSUPPORTED_SHAPE");
        assert_eq!(CalcError::not_implemented("G2.2").error_code(), "NOT_IMPLEMENTED");
        assert_eq!(
            CalcError::precondition_violated("compression", "slender").error_code(),
            "PRECONDITION_VIOLATED"
        );
    }

    #[test]
    fn test_missing_parameter_message() {
        let err = CalcError::missing_parameter("zx", "W10X22");
        assert_eq!(err.to_string(), "Missing parameter \"zx\" for element W10X22");
        assert_eq!(err.missing_parameter_name(), Some("zx"));
    }
}
