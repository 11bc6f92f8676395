use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de::zero_if_null;
use crate::calc::percent_of;

/// Monthly planning figures from the user's profile record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub monthly_income: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub savings_goal: Decimal,
    /// Persisted independently; re-derived only when income or goal is edited.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub target_expenses: Decimal,
}

impl Profile {
    pub fn new(monthly_income: Decimal, savings_goal: Decimal) -> Self {
        Self {
            monthly_income,
            savings_goal,
            target_expenses: derive_target_expenses(monthly_income, savings_goal),
        }
    }

    pub fn set_monthly_income(&mut self, monthly_income: Decimal) {
        self.monthly_income = monthly_income;
        self.target_expenses = derive_target_expenses(self.monthly_income, self.savings_goal);
    }

    pub fn set_savings_goal(&mut self, savings_goal: Decimal) {
        self.savings_goal = savings_goal;
        self.target_expenses = derive_target_expenses(self.monthly_income, self.savings_goal);
    }

    /// Explicit override of the derived figure. Never negative.
    pub fn set_target_expenses(&mut self, target_expenses: Decimal) {
        self.target_expenses = target_expenses.max(Decimal::ZERO);
    }

    /// Share of monthly income, 0 when no income is recorded.
    pub fn percent_of_income(&self, value: Decimal) -> Decimal {
        percent_of(value, self.monthly_income)
    }
}

/// Income left after the planned savings contribution, floored at zero.
pub fn derive_target_expenses(monthly_income: Decimal, savings_goal: Decimal) -> Decimal {
    (monthly_income - savings_goal).max(Decimal::ZERO)
}
