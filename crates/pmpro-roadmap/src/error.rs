//! Error types for roadmap editing

use crate::milestone::MilestoneId;
use thiserror::Error;

/// Result type for roadmap operations
pub type Result<T> = std::result::Result<T, RoadmapError>;

/// Roadmap errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoadmapError {
    /// Quarter left blank
    #[error("milestone quarter is required")]
    MissingQuarter,

    /// Title left blank
    #[error("milestone title is required")]
    MissingTitle,

    /// Progress above 100 percent
    #[error("progress must be within [0, 100], got {0}")]
    InvalidProgress(u8),

    /// No milestone with this id
    #[error("milestone not found: {0}")]
    NotFound(MilestoneId),
}

impl RoadmapError {
    /// Whether the draft itself was rejected
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, RoadmapError::NotFound(_))
    }
}
