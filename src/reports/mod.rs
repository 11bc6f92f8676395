//! Aggregations behind the reports page and the transaction export.

mod analytics;
mod export;

pub use analytics::{
    available_months, month_summary, period_comparison, spending_by_category, CategorySpending,
    MonthSummary, Period, PeriodTotals,
};
pub use export::{export_csv, export_file_name, ExportPreset};
