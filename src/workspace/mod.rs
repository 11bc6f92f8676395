//! The state one view works from: the fetched [`Snapshot`], a transaction
//! held for confirmation, and the status and error lines shown to the user.
//!
//! Reads go through [`Workspace::refresh`] and its per-resource variants.
//! Every write goes to the [`FinanceApi`], re-fetches what it affects and
//! then publishes a [`DataEvent`].

use rust_decimal::Decimal;

use crate::api::{ApiResult, FinanceApi};
use crate::calc::{
    budget_alerts, format_amount, track, AlertBadge, BudgetTotals, GoalProgress, GoalTotals,
    Overview, PendingTransaction, Submission, TrackedBudget,
};
use crate::error::{Error, Result};
use crate::events::{DataEvent, EventBus, Mutation, SubscriptionId};
use crate::models::{Budget, Profile, SavingsGoal, Snapshot, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Written to the backend; carries the stored record.
    Submitted(Transaction),
    /// Held until [`Workspace::confirm_pending`] or [`Workspace::cancel_pending`].
    NeedsConfirmation {
        current_balance: Decimal,
        new_balance: Decimal,
    },
}

#[derive(Debug)]
pub struct Workspace<A: FinanceApi> {
    api: A,
    events: EventBus,
    snapshot: Snapshot,
    pending: Option<PendingTransaction>,
    currency_symbol: String,
    status_message: String,
    error_message: Option<String>,
}

impl<A: FinanceApi> Workspace<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            events: EventBus::new(),
            snapshot: Snapshot::default(),
            pending: None,
            currency_symbol: String::new(),
            status_message: String::new(),
            error_message: None,
        }
    }

    /// Symbol used in status lines.
    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn into_api(self) -> A {
        self.api
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn pending(&self) -> Option<&PendingTransaction> {
        self.pending.as_ref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&DataEvent) + 'static) -> SubscriptionId {
        self.events.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ── Fetching ──────────────────────────────────────────────

    /// Re-fetch every resource. A failed part keeps its previous value and
    /// the rest still load; the last failure is returned.
    pub fn refresh(&mut self) -> Result<()> {
        self.clear_error();
        let results = [
            self.refresh_profile(),
            self.refresh_summary(),
            self.refresh_budgets(),
            self.refresh_goals(),
            self.refresh_transactions(),
        ];
        results.into_iter().fold(Ok(()), |acc, r| r.and(acc))
    }

    pub fn refresh_profile(&mut self) -> Result<()> {
        let fetched = self.api.get_profile();
        self.snapshot.profile = self.fetched("profile", fetched)?;
        Ok(())
    }

    pub fn refresh_summary(&mut self) -> Result<()> {
        let fetched = self.api.get_summary();
        self.snapshot.summary = self.fetched("summary", fetched)?;
        Ok(())
    }

    pub fn refresh_budgets(&mut self) -> Result<()> {
        let fetched = self.api.list_budgets();
        self.snapshot.budgets = self.fetched("budgets", fetched)?;
        Ok(())
    }

    pub fn refresh_goals(&mut self) -> Result<()> {
        let fetched = self.api.list_goals();
        self.snapshot.goals = self.fetched("savings goals", fetched)?;
        Ok(())
    }

    pub fn refresh_transactions(&mut self) -> Result<()> {
        let fetched = self.api.list_transactions();
        self.snapshot.transactions = self.fetched("transactions", fetched)?;
        Ok(())
    }

    fn fetched<T>(&mut self, what: &str, result: ApiResult<T>) -> Result<T> {
        match result {
            Ok(value) => {
                log::debug!("Loaded {what}");
                Ok(value)
            }
            Err(e) => {
                log::warn!("Failed to load {what}: {e}");
                self.error_message = Some(format!("Failed to load {what}: {e}"));
                Err(e.into())
            }
        }
    }

    // ── Derived state ─────────────────────────────────────────

    pub fn overview(&self) -> Result<Overview> {
        Overview::compute(self.snapshot.profile.as_ref(), &self.snapshot.summary)
    }

    pub fn tracked_budgets(&self) -> Vec<TrackedBudget> {
        track(&self.snapshot.budgets)
    }

    pub fn budget_totals(&self) -> BudgetTotals {
        BudgetTotals::of(&self.tracked_budgets())
    }

    pub fn alerts(&self) -> AlertBadge {
        budget_alerts(&self.snapshot.budgets)
    }

    pub fn goal_progress(&self) -> Vec<(&SavingsGoal, GoalProgress)> {
        self.snapshot
            .goals
            .iter()
            .map(|g| (g, GoalProgress::of(g)))
            .collect()
    }

    pub fn goal_totals(&self) -> Result<GoalTotals> {
        GoalTotals::of(&self.snapshot.goals)
    }

    // ── Transactions ──────────────────────────────────────────

    /// Validate and run the balance check without storing anything.
    pub fn preview_transaction(&self, transaction: Transaction) -> Result<Submission> {
        transaction.validate(&self.snapshot.goals)?;
        Ok(self.overview()?.preview(transaction))
    }

    /// Records without an id are created, records with one are updated.
    /// Either way a write that would take the balance negative is held.
    pub fn submit_transaction(&mut self, transaction: Transaction) -> Result<SubmitOutcome> {
        let submission = self
            .preview_transaction(transaction)
            .map_err(|e| self.fail(e))?;
        match submission {
            Submission::Ready(transaction) => {
                if self.pending.take().is_some() {
                    log::debug!("Dropped an unconfirmed transaction for a new submission");
                }
                self.write_transaction(transaction)
                    .map(SubmitOutcome::Submitted)
            }
            Submission::NeedsConfirmation(pending) => {
                let outcome = SubmitOutcome::NeedsConfirmation {
                    current_balance: pending.current_balance(),
                    new_balance: pending.new_balance(),
                };
                let status = format!(
                    "This will make your balance {}. Confirm to continue.",
                    format_amount(pending.new_balance(), &self.currency_symbol)
                );
                self.set_status(status);
                if self.pending.replace(pending).is_some() {
                    log::debug!("Replaced an unconfirmed transaction");
                }
                Ok(outcome)
            }
        }
    }

    pub fn update_transaction(
        &mut self,
        id: i64,
        mut transaction: Transaction,
    ) -> Result<SubmitOutcome> {
        transaction.id = Some(id);
        self.submit_transaction(transaction)
    }

    /// Write the held transaction as-is.
    pub fn confirm_pending(&mut self) -> Result<Transaction> {
        let pending = self.pending.take().ok_or(Error::NothingPending)?;
        log::info!(
            "Confirmed {} leaving balance at {}",
            pending.transaction().kind,
            pending.new_balance()
        );
        self.write_transaction(pending.confirm())
    }

    /// Drop the held transaction. Nothing was sent, so nothing is undone.
    pub fn cancel_pending(&mut self) -> Option<Transaction> {
        let pending = self.pending.take()?;
        self.set_status("Transaction cancelled");
        Some(pending.confirm())
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<()> {
        self.api
            .delete_transaction(id)
            .map_err(|e| self.fail(e))?;
        log::info!("Deleted transaction {id}");
        self.set_status("Transaction deleted");
        self.after_write(DataEvent::TransactionsChanged(Mutation::Deleted));
        Ok(())
    }

    fn write_transaction(&mut self, transaction: Transaction) -> Result<Transaction> {
        let (stored, mutation) = match transaction.id {
            Some(id) => (
                self.api.update_transaction(id, &transaction),
                Mutation::Updated,
            ),
            None => (self.api.create_transaction(&transaction), Mutation::Created),
        };
        let stored = stored.map_err(|e| self.fail(e))?;
        log::info!(
            "{mutation:?} {} transaction of {} in '{}'",
            stored.kind,
            stored.amount,
            stored.category
        );
        self.set_status(match mutation {
            Mutation::Updated => "Transaction updated",
            _ => "Transaction added",
        });
        self.after_write(DataEvent::TransactionsChanged(mutation));
        Ok(stored)
    }

    // ── Budgets ───────────────────────────────────────────────

    pub fn save_budget(&mut self, budget: Budget) -> Result<Budget> {
        budget.validate().map_err(|e| self.fail(e))?;
        let (stored, mutation) = match budget.id {
            Some(id) => (self.api.update_budget(id, &budget), Mutation::Updated),
            None => (self.api.create_budget(&budget), Mutation::Created),
        };
        let stored = stored.map_err(|e| self.fail(e))?;
        log::info!("{mutation:?} budget for '{}'", stored.category);
        self.set_status(format!("Budget for {} saved", stored.category));
        self.after_write(DataEvent::BudgetsChanged(mutation));
        Ok(stored)
    }

    pub fn delete_budget(&mut self, id: i64) -> Result<()> {
        self.api.delete_budget(id).map_err(|e| self.fail(e))?;
        log::info!("Deleted budget {id}");
        self.set_status("Budget deleted");
        self.after_write(DataEvent::BudgetsChanged(Mutation::Deleted));
        Ok(())
    }

    // ── Savings goals ─────────────────────────────────────────

    pub fn save_goal(&mut self, goal: SavingsGoal) -> Result<SavingsGoal> {
        goal.validate().map_err(|e| self.fail(e))?;
        let (stored, mutation) = match goal.id {
            Some(id) => (self.api.update_goal(id, &goal), Mutation::Updated),
            None => (self.api.create_goal(&goal), Mutation::Created),
        };
        let stored = stored.map_err(|e| self.fail(e))?;
        log::info!("{mutation:?} savings goal '{}'", stored.goal_name);
        self.set_status(format!("Goal {} saved", stored.goal_name));
        self.after_write(DataEvent::GoalsChanged(mutation));
        Ok(stored)
    }

    pub fn delete_goal(&mut self, id: i64) -> Result<()> {
        self.api.delete_goal(id).map_err(|e| self.fail(e))?;
        log::info!("Deleted savings goal {id}");
        self.set_status("Goal deleted");
        self.after_write(DataEvent::GoalsChanged(Mutation::Deleted));
        Ok(())
    }

    // ── Profile ───────────────────────────────────────────────

    pub fn save_profile(&mut self, profile: Profile) -> Result<Profile> {
        let stored = self.api.save_profile(&profile).map_err(|e| self.fail(e))?;
        log::info!(
            "Saved profile, target expenses now {}",
            stored.target_expenses
        );
        self.set_status("Profile saved");
        self.after_write(DataEvent::ProfileChanged);
        Ok(stored)
    }

    // ── Internals ─────────────────────────────────────────────

    fn fail(&mut self, err: impl Into<Error>) -> Error {
        let err = err.into();
        log::warn!("{err}");
        self.error_message = Some(err.to_string());
        err
    }

    /// The write already succeeded, so a failed re-fetch only leaves the
    /// affected part stale; the banner says so.
    fn after_write(&mut self, event: DataEvent) {
        self.clear_error();
        let results = match event {
            DataEvent::TransactionsChanged(_) => vec![
                self.refresh_transactions(),
                self.refresh_summary(),
                self.refresh_budgets(),
                self.refresh_goals(),
            ],
            DataEvent::BudgetsChanged(_) => vec![self.refresh_budgets()],
            DataEvent::GoalsChanged(_) => vec![self.refresh_goals()],
            DataEvent::ProfileChanged => vec![self.refresh_profile()],
        };
        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            log::warn!("{failed} re-fetch(es) failed after {event:?}");
        }
        self.events.publish(event);
    }
}
