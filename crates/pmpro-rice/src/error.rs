//! Error types for the feature ranking engine
//!
//! All validation happens at the mutation boundary. The scorer and ranker
//! never see invalid data, so they have no error paths of their own.

use crate::record::{Criterion, FeatureId};

/// Main ranking engine error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeatureError {
    /// Rejected feature input; the store is left unchanged
    #[error("invalid feature input: {0}")]
    InvalidFeatureInput(#[from] InvalidInput),

    /// No record with this id (only raised by input updates; removal of an
    /// unknown id reports `false` instead)
    #[error("feature not found: {0}")]
    NotFound(FeatureId),
}

impl FeatureError {
    /// Check if error is an input validation failure
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidFeatureInput(_))
    }

    /// Check if the rejection was caused by a zero effort value
    #[inline]
    #[must_use]
    pub fn is_division_by_zero(&self) -> bool {
        matches!(self, Self::InvalidFeatureInput(InvalidInput::DivisionByZero))
    }
}

/// Cause of an [`FeatureError::InvalidFeatureInput`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    /// Name missing or whitespace only
    #[error("feature name must not be empty")]
    EmptyName,

    /// Criterion outside the inclusive `[1, 10]` range
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        /// Offending criterion
        field: Criterion,
        /// Supplied value
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },

    /// NaN or infinite criterion
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Offending criterion
        field: Criterion,
    },

    /// Effort of zero would divide by zero in the scorer
    #[error("effort must be strictly positive (division by zero)")]
    DivisionByZero,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_error_display() {
        let err = FeatureError::from(InvalidInput::EmptyName);
        assert!(err.to_string().contains("invalid feature input"));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn division_by_zero_is_validation() {
        let err = FeatureError::from(InvalidInput::DivisionByZero);
        assert!(err.is_validation());
        assert!(err.is_division_by_zero());
    }

    #[test]
    fn not_found_is_not_validation() {
        let err = FeatureError::NotFound(FeatureId::new(7));
        assert!(!err.is_validation());
        assert!(!err.is_division_by_zero());
        assert_eq!(err.to_string(), "feature not found: 7");
    }

    #[test]
    fn out_of_range_names_the_field() {
        let err = InvalidInput::OutOfRange {
            field: Criterion::Reach,
            value: 11.0,
            min: 1.0,
            max: 10.0,
        };
        assert_eq!(err.to_string(), "reach must be within [1, 10], got 11");
    }
}
