//! Construction-time errors for orbit and impact models.
//!
//! Everything that can go wrong is caught when a model value is built.
//! Per-frame evaluation is total and never returns these.

/// A field failed its range check.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("invalid {field}: {value} ({reason})")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
    pub reason: &'static str,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self {
            field,
            value,
            reason,
        }
    }
}

/// An input that would leave a derived quantity undefined.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("degenerate input: {what} must be positive, got {value}")]
pub struct DegenerateInputError {
    pub what: &'static str,
    pub value: f64,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DegenerateInput(#[from] DegenerateInputError),
}

/// Reject NaN and infinities for `field`.
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::new(field, value, "must be finite"))
    }
}

/// Require a finite, strictly positive value for `field`.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = require_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(field, value, "must be positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::new("eccentricity", 1.2, "must be in [0, 1)");
        assert_eq!(err.to_string(), "invalid eccentricity: 1.2 (must be in [0, 1))");

        let err: ModelError = DegenerateInputError {
            what: "target radius",
            value: 0.0,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "degenerate input: target radius must be positive, got 0"
        );
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("a", 2.0), Ok(2.0));
        assert!(require_positive("a", 0.0).is_err());
        assert!(require_positive("a", -1.0).is_err());
        assert!(require_positive("a", f64::NAN).is_err());
        assert!(require_positive("a", f64::INFINITY).is_err());
    }
}
