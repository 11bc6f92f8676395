mod budget;
mod date_range;
mod de;
mod profile;
mod savings_goal;
mod snapshot;
mod summary;
mod transaction;

pub use budget::Budget;
pub use date_range::DateRange;
pub use profile::{derive_target_expenses, Profile};
pub use savings_goal::SavingsGoal;
pub use snapshot::Snapshot;
pub use summary::TransactionSummary;
pub use transaction::{Transaction, TransactionType};
