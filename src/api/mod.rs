//! Seam to the finance backend.
//!
//! The backend owns persistence and the server-computed fields (`spent` on
//! budgets, `currentAmount` on goals, the ledger summary). This crate only
//! derives state from what it returns, so everything above this trait can be
//! driven by an in-memory implementation.

#[cfg(test)]
mod fake;
mod snapshot;

#[cfg(test)]
pub(crate) use fake::{FakeApi, Resource};
pub use snapshot::SnapshotApi;

use thiserror::Error;

use crate::models::{Budget, Profile, SavingsGoal, Transaction, TransactionSummary};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Could not reach the server: {0}")]
    Network(String),

    #[error("Session expired, please log in again")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Authenticated backend operations. Write methods return the stored record
/// with its id assigned; server-computed fields on it may be stale until the
/// next read.
pub trait FinanceApi {
    /// `None` when the user has not set up a profile yet.
    fn get_profile(&self) -> ApiResult<Option<Profile>>;
    /// Fails with [`ApiError::NotFound`] when no profile exists.
    fn update_profile(&mut self, profile: &Profile) -> ApiResult<Profile>;
    fn create_profile(&mut self, profile: &Profile) -> ApiResult<Profile>;

    fn get_summary(&self) -> ApiResult<TransactionSummary>;

    fn list_budgets(&self) -> ApiResult<Vec<Budget>>;
    fn create_budget(&mut self, budget: &Budget) -> ApiResult<Budget>;
    fn update_budget(&mut self, id: i64, budget: &Budget) -> ApiResult<Budget>;
    fn delete_budget(&mut self, id: i64) -> ApiResult<()>;

    fn list_goals(&self) -> ApiResult<Vec<SavingsGoal>>;
    fn create_goal(&mut self, goal: &SavingsGoal) -> ApiResult<SavingsGoal>;
    fn update_goal(&mut self, id: i64, goal: &SavingsGoal) -> ApiResult<SavingsGoal>;
    fn delete_goal(&mut self, id: i64) -> ApiResult<()>;

    fn list_transactions(&self) -> ApiResult<Vec<Transaction>>;
    fn create_transaction(&mut self, transaction: &Transaction) -> ApiResult<Transaction>;
    fn update_transaction(&mut self, id: i64, transaction: &Transaction)
        -> ApiResult<Transaction>;
    fn delete_transaction(&mut self, id: i64) -> ApiResult<()>;

    /// Create when a profile does not exist yet, otherwise update it.
    fn save_profile(&mut self, profile: &Profile) -> ApiResult<Profile> {
        match self.update_profile(profile) {
            Err(ApiError::NotFound(_)) => {
                log::info!("No profile on record, creating one");
                self.create_profile(profile)
            }
            other => other,
        }
    }
}
