use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::calc::percent_of;
use crate::error::ValidationError;
use crate::models::{DateRange, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: String,
    pub amount: Decimal,
    /// Share of all expenses in the input, 0 when there are none.
    pub percentage: Decimal,
}

/// Expense totals per category, largest first.
pub fn spending_by_category(transactions: &[Transaction]) -> Vec<CategorySpending> {
    let mut by_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *by_category.entry(txn.category.as_str()).or_default() += txn.amount;
    }
    let total: Decimal = by_category.values().copied().sum();

    let mut rows: Vec<CategorySpending> = by_category
        .into_iter()
        .map(|(category, amount)| CategorySpending {
            category: category.to_string(),
            amount,
            percentage: percent_of(amount, total),
        })
        .collect();
    // Stable sort keeps ties in category order.
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Monthly,
    Yearly,
}

impl Period {
    /// Sortable grouping key: `YYYY-MM` or `YYYY`.
    fn key(&self, date: NaiveDate) -> String {
        match self {
            Self::Monthly => date.format("%Y-%m").to_string(),
            Self::Yearly => date.year().to_string(),
        }
    }

    fn label(&self, date: NaiveDate) -> String {
        match self {
            Self::Monthly => date.format("%b %Y").to_string(),
            Self::Yearly => date.year().to_string(),
        }
    }

    /// Planned spendable income added to every period.
    pub fn baseline(&self, target_expenses: Decimal) -> Decimal {
        match self {
            Self::Monthly => target_expenses,
            Self::Yearly => target_expenses * Decimal::from(12),
        }
    }

    /// How many of the most recent periods a comparison keeps.
    pub fn window(&self) -> usize {
        match self {
            Self::Monthly => 6,
            Self::Yearly => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodTotals {
    pub key: String,
    pub label: String,
    /// Ledger income plus the period's baseline.
    pub income: Decimal,
    /// Everything that is not income, savings included.
    pub expenses: Decimal,
    pub savings: Decimal,
}

/// Income against outflow per period, oldest first, limited to the most
/// recent [`Period::window`] periods that have transactions.
pub fn period_comparison(
    transactions: &[Transaction],
    target_expenses: Decimal,
    period: Period,
) -> Vec<PeriodTotals> {
    let mut grouped: BTreeMap<String, (NaiveDate, Decimal, Decimal)> = BTreeMap::new();
    for txn in transactions {
        let entry = grouped
            .entry(period.key(txn.date))
            .or_insert((txn.date, Decimal::ZERO, Decimal::ZERO));
        if txn.is_income() {
            entry.1 += txn.amount;
        } else {
            entry.2 += txn.amount;
        }
    }

    let baseline = period.baseline(target_expenses);
    let skip = grouped.len().saturating_sub(period.window());
    grouped
        .into_iter()
        .skip(skip)
        .map(|(key, (date, income, expenses))| {
            let income = income + baseline;
            PeriodTotals {
                key,
                label: period.label(date),
                income,
                expenses,
                savings: income - expenses,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: String,
    /// Target expenses plus the month's ledger income.
    pub income: Decimal,
    pub expenses: Decimal,
    pub savings: Decimal,
}

/// Summary cards for one `YYYY-MM` month.
pub fn month_summary(
    transactions: &[Transaction],
    target_expenses: Decimal,
    month: &str,
) -> Result<MonthSummary, ValidationError> {
    let range = DateRange::parse_month(month)?;
    let in_month = transactions.iter().filter(|t| range.contains(t.date));

    let (income, expenses) = in_month.fold((Decimal::ZERO, Decimal::ZERO), |(i, e), t| {
        if t.is_income() {
            (i + t.amount, e)
        } else if t.is_expense() {
            (i, e + t.amount)
        } else {
            (i, e)
        }
    });
    let income = target_expenses + income;
    Ok(MonthSummary {
        month: range.start().format("%Y-%m").to_string(),
        income,
        expenses,
        savings: income - expenses,
    })
}

/// Distinct `YYYY-MM` months with transactions, newest first.
pub fn available_months(transactions: &[Transaction]) -> Vec<String> {
    let months: BTreeSet<String> = transactions.iter().map(Transaction::month_key).collect();
    months.into_iter().rev().collect()
}
