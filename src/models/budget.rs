use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DateRange;
use crate::calc::percent_of;
use crate::error::ValidationError;

/// Planned spending cap for one category over a date range. `spent` and
/// `remaining` are filled in by the backend when the budget is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub category: String,
    pub amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<Decimal>,
}

impl Budget {
    pub fn new(category: impl Into<String>, amount: Decimal, period: DateRange) -> Self {
        Self {
            id: None,
            category: category.into(),
            amount,
            start_date: period.start(),
            end_date: period.end(),
            spent: None,
            remaining: None,
        }
    }

    /// Budget covering one calendar month.
    pub fn for_month(
        category: impl Into<String>,
        amount: Decimal,
        year: i32,
        month: u32,
    ) -> Result<Self, ValidationError> {
        Ok(Self::new(category, amount, DateRange::month(year, month)?))
    }

    pub fn period(&self) -> Result<DateRange, ValidationError> {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn spent(&self) -> Decimal {
        self.spent.unwrap_or_default()
    }

    /// Server value when present, otherwise planned minus spent.
    pub fn remaining(&self) -> Decimal {
        self.remaining.unwrap_or_else(|| self.amount - self.spent())
    }

    pub fn percentage_used(&self) -> Decimal {
        percent_of(self.spent(), self.amount)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        self.period().map(|_| ())
    }
}
