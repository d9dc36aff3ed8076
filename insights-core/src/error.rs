//! Error types for gcal-insights.

use thiserror::Error;

/// Errors that can occur in gcal-insights operations.
#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid period '{0}'. Expected YYYY-MM")]
    InvalidPeriod(String),

    #[error("End date {end} cannot be before start date {start}")]
    EndBeforeStart {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Category mapping error: {0}")]
    CategoryMapping(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl InsightsError {
    /// Errors caused by what the user typed. These are worth re-prompting for.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            InsightsError::InvalidDate(_)
                | InsightsError::InvalidPeriod(_)
                | InsightsError::EndBeforeStart { .. }
        )
    }
}

/// Result type alias for gcal-insights operations.
pub type InsightsResult<T> = Result<T, InsightsError>;
