use rust_decimal::Decimal;

use super::money::percent_of;
use super::warnings::{preview_submission, target_expense_warning, ExpenseWarning, Submission};
use crate::error::{Error, Result};
use crate::models::{Profile, Transaction, TransactionSummary};

/// `(target expenses + ledger income) − (expenses + savings)`.
///
/// Target expenses stand in for the month's spendable income; savings
/// contributions lock money away just like expenses do.
pub fn balance(target_expenses: Decimal, summary: &TransactionSummary) -> Result<Decimal> {
    let income = checked(target_expenses.checked_add(summary.total_income))?;
    let outflow = checked(summary.total_expenses.checked_add(summary.total_savings))?;
    checked(income.checked_sub(outflow))
}

fn checked(value: Option<Decimal>) -> Result<Decimal> {
    value.ok_or(Error::Overflow)
}

/// The balance card and its banner, as every view shows them.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub monthly_income: Decimal,
    pub target_expenses: Decimal,
    /// Target expenses plus ledger income.
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_savings: Decimal,
    /// Expenses plus savings.
    pub total_outflow: Decimal,
    pub balance: Decimal,
    pub expense_warning: Option<ExpenseWarning>,
}

impl Overview {
    /// Without a profile the target is taken as zero.
    pub fn compute(profile: Option<&Profile>, summary: &TransactionSummary) -> Result<Self> {
        let monthly_income = profile.map(|p| p.monthly_income).unwrap_or_default();
        let target_expenses = profile.map(|p| p.target_expenses).unwrap_or_default();
        let total_income = checked(target_expenses.checked_add(summary.total_income))?;
        let total_outflow = checked(summary.total_expenses.checked_add(summary.total_savings))?;
        let balance = checked(total_income.checked_sub(total_outflow))?;
        Ok(Self {
            monthly_income,
            target_expenses,
            total_income,
            total_expenses: summary.total_expenses,
            total_savings: summary.total_savings,
            total_outflow,
            balance,
            expense_warning: target_expense_warning(summary.total_expenses, target_expenses),
        })
    }

    pub fn is_negative(&self) -> bool {
        self.balance < Decimal::ZERO
    }

    pub fn percent_of_income(&self, value: Decimal) -> Decimal {
        percent_of(value, self.monthly_income)
    }

    /// Phase one of a submission against this balance.
    pub fn preview(&self, transaction: Transaction) -> Submission {
        preview_submission(self.balance, transaction)
    }
}
