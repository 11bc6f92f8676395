use rust_decimal::Decimal;

use super::warnings::Severity;
use crate::models::Budget;

/// Consumption tier of a budget. Ordered by severity, so a higher
/// percentage used never maps to a lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BudgetTier {
    OnTrack,
    Caution,
    Warning,
    Exceeded,
}

impl BudgetTier {
    pub fn from_percentage(pct: Decimal) -> Self {
        match Severity::classify(pct) {
            None => Self::OnTrack,
            Some(Severity::Caution) => Self::Caution,
            Some(Severity::Warning) => Self::Warning,
            Some(Severity::Exceeded) => Self::Exceeded,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "ON TRACK",
            Self::Caution => "CAUTION",
            Self::Warning => "WARNING",
            Self::Exceeded => "EXCEEDED",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::OnTrack => "#34c759",
            Self::Caution => "#ffc107",
            Self::Warning => "#ff9500",
            Self::Exceeded => "#ff3b30",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::OnTrack => "✅",
            Self::Caution | Self::Warning => "⚠️",
            Self::Exceeded => "🚨",
        }
    }
}

impl std::fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackedBudget {
    pub budget: Budget,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage_used: Decimal,
    pub tier: BudgetTier,
}

impl TrackedBudget {
    pub fn from_budget(budget: &Budget) -> Self {
        let percentage_used = budget.percentage_used();
        Self {
            budget: budget.clone(),
            spent: budget.spent(),
            remaining: budget.remaining(),
            percentage_used,
            tier: BudgetTier::from_percentage(percentage_used),
        }
    }

    pub fn is_over(&self) -> bool {
        self.remaining < Decimal::ZERO
    }
}

pub fn track(budgets: &[Budget]) -> Vec<TrackedBudget> {
    budgets.iter().map(TrackedBudget::from_budget).collect()
}

/// Summary cards above the budget list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetTotals {
    pub planned: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

impl BudgetTotals {
    pub fn of(tracked: &[TrackedBudget]) -> Self {
        tracked.iter().fold(Self::default(), |mut acc, t| {
            acc.planned += t.budget.amount;
            acc.spent += t.spent;
            acc.remaining += t.remaining;
            acc
        })
    }

    pub fn percentage_used(&self) -> Decimal {
        super::percent_of(self.spent, self.planned)
    }
}

/// Width of a progress bar fill, clamped to 0..=100.
pub fn progress_width(pct: Decimal) -> Decimal {
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}
