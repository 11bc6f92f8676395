//! Next-month expense projections.
//!
//! [`run_rate`] extrapolates the current month's daily spending average.
//! [`trend_forecast`] fits a least-squares line through completed months.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{DateRange, Transaction};

const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    /// Short month name, e.g. `"Nov"`.
    pub label: String,
    pub value: Decimal,
}

impl DataPoint {
    fn for_month(date: NaiveDate, value: Decimal) -> Self {
        Self {
            label: date.format("%b").to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePrediction {
    pub historical: Vec<DataPoint>,
    pub predicted: Vec<DataPoint>,
    pub next_month_prediction: Decimal,
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn expenses_in(transactions: &[Transaction], range: &DateRange) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_expense() && range.contains(t.date))
        .map(|t| t.amount)
        .sum()
}

/// This month's expenses so far, divided by the days elapsed and scaled to
/// a 30-day month.
pub fn run_rate(transactions: &[Transaction], today: NaiveDate) -> ExpensePrediction {
    let spent = DateRange::month(today.year(), today.month())
        .map(|range| expenses_in(transactions, &range))
        .unwrap_or_default();
    let days_elapsed = Decimal::from(today.day().max(1));
    let predicted = spent
        .checked_div(days_elapsed)
        .and_then(|daily| daily.checked_mul(DAYS_PER_MONTH))
        .map(round_money)
        .unwrap_or_default();

    let next_month = today.checked_add_months(Months::new(1)).unwrap_or(today);
    log::debug!("Run rate: {spent} over {days_elapsed} day(s) projects {predicted}");
    ExpensePrediction {
        historical: vec![DataPoint::for_month(today, spent)],
        predicted: vec![DataPoint::for_month(next_month, predicted)],
        next_month_prediction: predicted,
    }
}

/// Expense totals for the `months` calendar months before the current one,
/// oldest first.
pub fn monthly_expense_history(
    transactions: &[Transaction],
    today: NaiveDate,
    months: u32,
) -> Vec<DataPoint> {
    (1..=months)
        .rev()
        .filter_map(|back| today.checked_sub_months(Months::new(back)))
        .filter_map(|month| {
            let range = DateRange::month(month.year(), month.month()).ok()?;
            Some(DataPoint::for_month(month, expenses_in(transactions, &range)))
        })
        .collect()
}

/// Least-squares line `y = slope·x + intercept` over `x = 0..n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTrend {
    pub slope: Decimal,
    pub intercept: Decimal,
}

impl LinearTrend {
    /// Fewer than two points give a flat line at the mean.
    pub fn fit(values: &[Decimal]) -> Self {
        let mean = Self::mean(values);
        if values.len() < 2 {
            return Self::flat(mean);
        }

        let n = Decimal::from(values.len());
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) =
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        for (i, y) in values.iter().enumerate() {
            let x = Decimal::from(i);
            sum_x += x;
            sum_y += *y;
            sum_xy += x * *y;
            sum_x2 += x * x;
        }

        let denominator = n * sum_x2 - sum_x * sum_x;
        if denominator.is_zero() {
            return Self::flat(mean);
        }
        let fitted = (n * sum_xy - sum_x * sum_y)
            .checked_div(denominator)
            .and_then(|slope| {
                let intercept = (sum_y - slope * sum_x).checked_div(n)?;
                Some(Self { slope, intercept })
            });
        fitted.unwrap_or_else(|| Self::flat(mean))
    }

    fn flat(mean: Decimal) -> Self {
        Self {
            slope: Decimal::ZERO,
            intercept: mean,
        }
    }

    fn mean(values: &[Decimal]) -> Decimal {
        let total: Decimal = values.iter().copied().sum();
        total
            .checked_div(Decimal::from(values.len()))
            .unwrap_or_default()
    }

    /// Expenses cannot be negative.
    pub fn predict(&self, x: Decimal) -> Decimal {
        (self.slope * x + self.intercept).max(Decimal::ZERO)
    }
}

/// Fit a trend through the last `months` completed months and project the
/// current one.
pub fn trend_forecast(
    transactions: &[Transaction],
    today: NaiveDate,
    months: u32,
) -> ExpensePrediction {
    let historical = monthly_expense_history(transactions, today, months);
    let values: Vec<Decimal> = historical.iter().map(|p| p.value).collect();
    let trend = LinearTrend::fit(&values);
    let predicted = round_money(trend.predict(Decimal::from(values.len())));
    log::debug!(
        "Trend over {} month(s): slope {}, intercept {}",
        values.len(),
        trend.slope,
        trend.intercept
    );
    ExpensePrediction {
        historical,
        predicted: vec![DataPoint::for_month(today, predicted)],
        next_month_prediction: predicted,
    }
}
