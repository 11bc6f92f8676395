use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Budget, Profile, SavingsGoal, Transaction, TransactionSummary};

/// Everything one view has fetched from the backend. Every part defaults to
/// empty so a view can compute with partial data while fetches are pending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub profile: Option<Profile>,
    pub summary: TransactionSummary,
    pub budgets: Vec<Budget>,
    pub goals: Vec<SavingsGoal>,
    pub transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn target_expenses(&self) -> Decimal {
        self.profile
            .as_ref()
            .map(|p| p.target_expenses)
            .unwrap_or_default()
    }
}
