use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SavingsGoal;
use crate::calc::find_goal;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    #[serde(alias = "INCOME", alias = "Income")]
    Income,
    #[serde(alias = "EXPENSE", alias = "Expense")]
    Expense,
    #[serde(alias = "SAVINGS", alias = "Savings")]
    Savings,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Savings => "savings",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" | "expenses" => Some(Self::Expense),
            "savings" | "saving" => Some(Self::Savings),
            _ => None,
        }
    }

    pub fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Expense, Self::Savings]
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Positive magnitude for income and expenses. Savings are signed:
    /// negative amounts are withdrawals from the goal named by `category`.
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionType,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            kind,
            amount,
            category: category.into(),
            date,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_savings(&self) -> bool {
        self.kind == TransactionType::Savings
    }

    pub fn is_withdrawal(&self) -> bool {
        self.is_savings() && self.amount < Decimal::ZERO
    }

    /// Expenses and savings contributions take money out of the available balance.
    pub fn reduces_balance(&self) -> bool {
        self.is_expense() || (self.is_savings() && self.amount > Decimal::ZERO)
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    /// `YYYY-MM` key of the transaction date.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Client-side checks run before anything reaches the backend. Savings
    /// must reference an existing goal by exact name.
    pub fn validate(&self, goals: &[SavingsGoal]) -> Result<(), ValidationError> {
        let category = self.category.trim();
        if self.is_savings() {
            if self.amount.is_zero() {
                return Err(ValidationError::ZeroSavingsAmount);
            }
            if category.is_empty() {
                return Err(ValidationError::MissingSavingsGoal);
            }
            if find_goal(goals, &self.category).is_none() {
                return Err(ValidationError::UnknownSavingsGoal(self.category.clone()));
            }
        } else {
            if self.amount <= Decimal::ZERO {
                return Err(ValidationError::NonPositiveAmount);
            }
            if category.is_empty() {
                return Err(ValidationError::EmptyCategory);
            }
        }
        Ok(())
    }
}
