use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::de::{blank_date_as_none, zero_if_null};
use crate::error::ValidationError;

pub const DEFAULT_GOAL_TYPE: &str = "Personal";

/// A named savings target. `current_amount` is computed server-side from
/// savings transactions whose category equals `goal_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub goal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<String>,
    pub target_amount: Decimal,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub current_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "blank_date_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<NaiveDate>,
}

impl SavingsGoal {
    pub fn new(goal_name: impl Into<String>, target_amount: Decimal) -> Self {
        Self {
            id: None,
            goal_name: goal_name.into(),
            goal_type: None,
            target_amount,
            current_amount: Decimal::ZERO,
            remaining_amount: None,
            deadline: None,
        }
    }

    pub fn goal_type(&self) -> &str {
        self.goal_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_GOAL_TYPE)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.goal_name.trim().is_empty() {
            return Err(ValidationError::EmptyGoalName);
        }
        if self.target_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}
