use rust_decimal::Decimal;

use super::money::percent_of;
use crate::error::{Error, Result};
use crate::models::SavingsGoal;

#[derive(Debug, Clone, PartialEq)]
pub struct GoalProgress {
    pub progress_percent: Decimal,
    pub is_complete: bool,
    /// Negative once the goal is overshot.
    pub remaining: Decimal,
}

impl GoalProgress {
    pub fn of(goal: &SavingsGoal) -> Self {
        let progress_percent = percent_of(goal.current_amount, goal.target_amount);
        Self {
            progress_percent,
            is_complete: progress_percent >= Decimal::ONE_HUNDRED,
            remaining: goal
                .remaining_amount
                .unwrap_or(goal.target_amount.saturating_sub(goal.current_amount)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalTotals {
    pub total_target: Decimal,
    pub total_saved: Decimal,
    pub total_remaining: Decimal,
    pub overall_progress: Decimal,
}

impl GoalTotals {
    pub fn of(goals: &[SavingsGoal]) -> Result<Self> {
        let mut totals = goals.iter().try_fold(Self::default(), |mut acc, g| {
            let remaining = g.target_amount.checked_sub(g.current_amount)?;
            acc.total_target = acc.total_target.checked_add(g.target_amount)?;
            acc.total_saved = acc.total_saved.checked_add(g.current_amount)?;
            acc.total_remaining = acc.total_remaining.checked_add(remaining)?;
            Some(acc)
        })
        .ok_or(Error::Overflow)?;
        totals.overall_progress = percent_of(totals.total_saved, totals.total_target);
        Ok(totals)
    }
}

/// Goals are referenced by exact name from a savings transaction's category.
pub fn find_goal<'a>(goals: &'a [SavingsGoal], name: &str) -> Option<&'a SavingsGoal> {
    goals.iter().find(|g| g.goal_name == name)
}
