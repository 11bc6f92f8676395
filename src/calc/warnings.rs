use rust_decimal::Decimal;

use super::money::{format_amount, format_percent, percent_of};
use crate::models::{Budget, Transaction};

const CAUTION_PCT: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const WARNING_PCT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
const EXCEEDED_PCT: Decimal = Decimal::ONE_HUNDRED;

/// Threshold band of a percentage-used figure. Lower bounds are inclusive and
/// bands are tested from the top, so exactly 100 is `Exceeded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Caution,
    Warning,
    Exceeded,
}

impl Severity {
    /// `None` below the caution threshold.
    pub fn classify(pct: Decimal) -> Option<Self> {
        if pct >= EXCEEDED_PCT {
            Some(Self::Exceeded)
        } else if pct >= WARNING_PCT {
            Some(Self::Warning)
        } else if pct >= CAUTION_PCT {
            Some(Self::Caution)
        } else {
            None
        }
    }

    /// Level name used by the target-expense banner.
    pub fn banner_level(&self) -> &'static str {
        match self {
            Self::Caution => "caution",
            Self::Warning => "warning",
            Self::Exceeded => "danger",
        }
    }
}

// ── Budget alerts ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Warning,
    Exceeded,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetAlert {
    pub id: Option<i64>,
    pub category: String,
    pub amount: Decimal,
    pub spent: Decimal,
    pub percentage_used: Decimal,
    pub status: AlertStatus,
}

/// Alerts shown behind the notification badge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertBadge {
    pub alerts: Vec<BudgetAlert>,
}

impl AlertBadge {
    pub fn count(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// One alert per budget at or above the caution threshold, in budget order.
pub fn budget_alerts(budgets: &[Budget]) -> AlertBadge {
    let alerts = budgets
        .iter()
        .filter_map(|budget| {
            let percentage_used = budget.percentage_used();
            let status = match Severity::classify(percentage_used)? {
                Severity::Exceeded => AlertStatus::Exceeded,
                Severity::Caution | Severity::Warning => AlertStatus::Warning,
            };
            Some(BudgetAlert {
                id: budget.id,
                category: budget.category.clone(),
                amount: budget.amount,
                spent: budget.spent(),
                percentage_used,
                status,
            })
        })
        .collect();
    AlertBadge { alerts }
}

// ── Target-expense banner ────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseWarning {
    pub severity: Severity,
    pub percentage: Decimal,
    pub expenses: Decimal,
    pub target_expenses: Decimal,
}

impl ExpenseWarning {
    /// Amount over target once exceeded, otherwise what is left.
    pub fn cited_amount(&self) -> Decimal {
        match self.severity {
            Severity::Exceeded => self.expenses - self.target_expenses,
            Severity::Caution | Severity::Warning => self.target_expenses - self.expenses,
        }
    }

    pub fn message(&self, symbol: &str) -> String {
        let amount = format_amount(self.cited_amount(), symbol);
        let pct = format_percent(self.percentage);
        match self.severity {
            Severity::Exceeded => {
                format!("Alert! You've exceeded your target expenses by {amount}")
            }
            Severity::Warning => format!(
                "Warning! You've used {pct}% of your target expenses. Only {amount} remaining."
            ),
            Severity::Caution => format!(
                "Heads up! You've used {pct}% of your target expenses. {amount} remaining."
            ),
        }
    }
}

/// Only evaluated when both a target and some spending exist.
pub fn target_expense_warning(expenses: Decimal, target_expenses: Decimal) -> Option<ExpenseWarning> {
    if target_expenses <= Decimal::ZERO || expenses <= Decimal::ZERO {
        return None;
    }
    let percentage = percent_of(expenses, target_expenses);
    Severity::classify(percentage).map(|severity| ExpenseWarning {
        severity,
        percentage,
        expenses,
        target_expenses,
    })
}

// ── Negative-balance confirmation ────────────────────────────

/// A transaction held back because writing it would take the balance below
/// zero. Nothing has been sent; dropping it cancels with no side effect.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTransaction {
    transaction: Transaction,
    current_balance: Decimal,
    new_balance: Decimal,
}

impl PendingTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn current_balance(&self) -> Decimal {
        self.current_balance
    }

    pub fn new_balance(&self) -> Decimal {
        self.new_balance
    }

    /// The user accepted the projected balance; hand back the write.
    pub fn confirm(self) -> Transaction {
        self.transaction
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Ready(Transaction),
    NeedsConfirmation(PendingTransaction),
}

/// First phase of a submission. Income and savings withdrawals always pass;
/// anything that reduces the balance is held if the projection is negative.
pub fn preview_submission(current_balance: Decimal, transaction: Transaction) -> Submission {
    if !transaction.reduces_balance() {
        return Submission::Ready(transaction);
    }
    // Saturating keeps an out-of-range projection negative.
    let new_balance = current_balance.saturating_sub(transaction.amount);
    if new_balance < Decimal::ZERO {
        log::warn!(
            "{} of {} would take balance from {} to {}, confirmation required",
            transaction.kind,
            transaction.amount,
            current_balance,
            new_balance
        );
        Submission::NeedsConfirmation(PendingTransaction {
            transaction,
            current_balance,
            new_balance,
        })
    } else {
        Submission::Ready(transaction)
    }
}
