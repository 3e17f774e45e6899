//! Error types for GroupWatch core values

use thiserror::Error;

/// Errors raised when parsing core values from their string forms.
///
/// The classifier, aggregator and filter never fail; only conversions from
/// user or wire input do.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid status category: {0}")]
    InvalidCategory(String),

    #[error("Invalid category filter: {0}")]
    InvalidCategoryFilter(String),

    #[error("Invalid assignment field: {0}")]
    InvalidAssignmentField(String),
}

/// Result type for core conversions.
pub type CoreResult<T> = Result<T, CoreError>;
