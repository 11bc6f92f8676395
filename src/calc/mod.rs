//! Pure derived-state computations shared by every view.
//!
//! Nothing in here fetches or stores. Each function takes already-fetched
//! models and returns the figures a view displays, so the balance, tier and
//! warning formulas exist exactly once.

mod balance;
mod goals;
mod money;
mod tracker;
mod warnings;

pub use balance::{balance, Overview};
pub use goals::{find_goal, GoalProgress, GoalTotals};
pub use money::{format_amount, format_percent, percent_of};
pub use tracker::{progress_width, track, BudgetTier, BudgetTotals, TrackedBudget};
pub use warnings::{
    budget_alerts, preview_submission, target_expense_warning, AlertBadge, AlertStatus,
    BudgetAlert, ExpenseWarning, PendingTransaction, Severity, Submission,
};

#[cfg(test)]
mod tests;
