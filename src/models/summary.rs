use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de::zero_if_null;
use super::{DateRange, Transaction, TransactionType};

/// Ledger totals per transaction type, as the summary endpoint reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_income: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_expenses: Decimal,
    /// Net of contributions and withdrawals.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_savings: Decimal,
    /// Sent by the backend but not used for balance math.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_balance: Option<Decimal>,
}

impl TransactionSummary {
    pub fn new(total_income: Decimal, total_expenses: Decimal, total_savings: Decimal) -> Self {
        Self {
            total_income,
            total_expenses,
            total_savings,
            available_balance: None,
        }
    }

    /// Sum a fetched transaction list the way the summary endpoint does,
    /// optionally restricted to a date range.
    pub fn from_transactions(transactions: &[Transaction], range: Option<&DateRange>) -> Self {
        let mut summary = Self::default();
        for txn in transactions
            .iter()
            .filter(|t| range.map_or(true, |r| r.contains(t.date)))
        {
            let total = match txn.kind {
                TransactionType::Income => &mut summary.total_income,
                TransactionType::Expense => &mut summary.total_expenses,
                TransactionType::Savings => &mut summary.total_savings,
            };
            *total = total.saturating_add(txn.amount);
        }
        summary
    }
}
