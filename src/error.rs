//! Error types for the derived-state layer.
//!
//! Validation failures are raised before any backend call. Backend failures
//! arrive as [`ApiError`] from the [`FinanceApi`](crate::api::FinanceApi)
//! implementation and are never retried here.

use chrono::NaiveDate;
use thiserror::Error;

pub use crate::api::ApiError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("No transaction is waiting for confirmation")]
    NothingPending,

    #[error("Totals are too large to compute")]
    Overflow,
}

/// Input rejected on the client, surfaced inline next to the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter an amount greater than 0")]
    NonPositiveAmount,

    #[error("Enter a non-zero amount (positive to contribute, negative to withdraw)")]
    ZeroSavingsAmount,

    #[error("Select or enter a category")]
    EmptyCategory,

    #[error("Select a savings goal")]
    MissingSavingsGoal,

    #[error("Savings goal '{0}' no longer exists, refresh and try again")]
    UnknownSavingsGoal(String),

    #[error("Enter a goal name")]
    EmptyGoalName,

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}
