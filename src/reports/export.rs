use std::io;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::ValidationError;
use crate::models::{DateRange, Transaction};

/// Earliest date the all-time export reaches back to.
const ALL_TIME_START: (i32, u32, u32) = (2020, 1, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPreset {
    Last30Days,
    ThisMonth,
    LastMonth,
    AllTime,
}

impl ExportPreset {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "last30" | "last-30" | "30d" => Some(Self::Last30Days),
            "this-month" | "thismonth" | "month" => Some(Self::ThisMonth),
            "last-month" | "lastmonth" => Some(Self::LastMonth),
            "all" | "all-time" | "alltime" => Some(Self::AllTime),
            _ => None,
        }
    }

    /// Inclusive range relative to `today`.
    pub fn range(&self, today: NaiveDate) -> Result<DateRange, ValidationError> {
        let invalid = || ValidationError::InvalidMonth(today.format("%Y-%m").to_string());
        match self {
            Self::Last30Days => {
                let start = today.checked_sub_days(Days::new(30)).ok_or_else(invalid)?;
                DateRange::new(start, today)
            }
            Self::ThisMonth => DateRange::month(today.year(), today.month()),
            Self::LastMonth => {
                let prev = today.checked_sub_months(Months::new(1)).ok_or_else(invalid)?;
                DateRange::month(prev.year(), prev.month())
            }
            Self::AllTime => {
                let (y, m, d) = ALL_TIME_START;
                let start = NaiveDate::from_ymd_opt(y, m, d).ok_or_else(invalid)?;
                DateRange::new(start.min(today), today)
            }
        }
    }
}

/// `transactions_<start>_to_<end>.csv`
pub fn export_file_name(range: &DateRange) -> String {
    format!("transactions_{}_to_{}.csv", range.start(), range.end())
}

/// Write the transactions inside `range` as CSV, newest first.
/// Returns the number of rows written.
pub fn export_csv<W: io::Write>(
    writer: W,
    transactions: &[Transaction],
    range: &DateRange,
) -> csv::Result<usize> {
    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| range.contains(t.date))
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Date", "Type", "Category", "Description", "Amount"])?;
    for txn in &rows {
        wtr.write_record([
            txn.date.to_string(),
            txn.kind.to_string(),
            txn.category.clone(),
            txn.description.clone().unwrap_or_default(),
            txn.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    log::debug!("Exported {} transaction(s) for {range}", rows.len());
    Ok(rows.len())
}
