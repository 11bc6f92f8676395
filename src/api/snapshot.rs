use rust_decimal::Decimal;

use super::{ApiError, ApiResult, FinanceApi};
use crate::models::{Budget, Profile, SavingsGoal, Snapshot, Transaction, TransactionSummary};

/// A [`FinanceApi`] served from a saved snapshot.
///
/// The server-computed fields are recalculated from the transaction list
/// on load and after each write, the same way the backend does it, so a
/// snapshot file can be used as an offline store. Totals saturate instead
/// of overflowing.
#[derive(Debug, Clone)]
pub struct SnapshotApi {
    state: Snapshot,
    next_id: i64,
}

impl SnapshotApi {
    pub fn new(state: Snapshot) -> Self {
        let max_id = state
            .budgets
            .iter()
            .map(|b| b.id)
            .chain(state.goals.iter().map(|g| g.id))
            .chain(state.transactions.iter().map(|t| t.id))
            .flatten()
            .max()
            .unwrap_or(0);
        let mut api = Self {
            state,
            next_id: max_id + 1,
        };
        api.recompute();
        api
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn into_snapshot(self) -> Snapshot {
        self.state
    }

    fn assign_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// `spent` is the sum of expenses in the budget's category and period.
    /// A goal's `currentAmount` is the net of savings tagged with its name.
    fn recompute(&mut self) {
        let transactions = &self.state.transactions;

        for budget in &mut self.state.budgets {
            let spent = total(transactions.iter().filter(|t| {
                t.is_expense()
                    && t.category == budget.category
                    && budget.start_date <= t.date
                    && t.date <= budget.end_date
            }));
            budget.spent = Some(spent);
            budget.remaining = Some(budget.amount.saturating_sub(spent));
        }

        for goal in &mut self.state.goals {
            let saved = total(
                transactions
                    .iter()
                    .filter(|t| t.is_savings() && t.category == goal.goal_name),
            );
            goal.current_amount = saved;
            goal.remaining_amount = Some(goal.target_amount.saturating_sub(saved));
        }

        self.state.summary = TransactionSummary::from_transactions(transactions, None);
    }
}

fn total<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Decimal {
    transactions
        .map(|t| t.amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

fn not_found(kind: &str, id: i64) -> ApiError {
    ApiError::NotFound(format!("{kind} {id}"))
}

fn duplicate_goal(name: &str) -> ApiError {
    ApiError::Rejected(format!("A goal named '{name}' already exists"))
}

impl FinanceApi for SnapshotApi {
    fn get_profile(&self) -> ApiResult<Option<Profile>> {
        Ok(self.state.profile.clone())
    }

    fn update_profile(&mut self, profile: &Profile) -> ApiResult<Profile> {
        let stored = self
            .state
            .profile
            .as_mut()
            .ok_or_else(|| ApiError::NotFound("Profile".into()))?;
        *stored = profile.clone();
        Ok(profile.clone())
    }

    fn create_profile(&mut self, profile: &Profile) -> ApiResult<Profile> {
        if self.state.profile.is_some() {
            return Err(ApiError::Rejected("Profile already exists".into()));
        }
        self.state.profile = Some(profile.clone());
        Ok(profile.clone())
    }

    fn get_summary(&self) -> ApiResult<TransactionSummary> {
        Ok(self.state.summary.clone())
    }

    fn list_budgets(&self) -> ApiResult<Vec<Budget>> {
        Ok(self.state.budgets.clone())
    }

    fn create_budget(&mut self, budget: &Budget) -> ApiResult<Budget> {
        let mut stored = budget.clone();
        stored.id = Some(self.assign_id());
        self.state.budgets.push(stored);
        self.recompute();
        Ok(self.state.budgets.last().cloned().unwrap_or_else(|| budget.clone()))
    }

    fn update_budget(&mut self, id: i64, budget: &Budget) -> ApiResult<Budget> {
        let idx = self
            .state
            .budgets
            .iter()
            .position(|b| b.id == Some(id))
            .ok_or_else(|| not_found("Budget", id))?;
        let mut stored = budget.clone();
        stored.id = Some(id);
        self.state.budgets[idx] = stored;
        self.recompute();
        Ok(self.state.budgets[idx].clone())
    }

    fn delete_budget(&mut self, id: i64) -> ApiResult<()> {
        let before = self.state.budgets.len();
        self.state.budgets.retain(|b| b.id != Some(id));
        if self.state.budgets.len() == before {
            return Err(not_found("Budget", id));
        }
        Ok(())
    }

    fn list_goals(&self) -> ApiResult<Vec<SavingsGoal>> {
        Ok(self.state.goals.clone())
    }

    fn create_goal(&mut self, goal: &SavingsGoal) -> ApiResult<SavingsGoal> {
        if self.state.goals.iter().any(|g| g.goal_name == goal.goal_name) {
            return Err(duplicate_goal(&goal.goal_name));
        }
        let mut stored = goal.clone();
        stored.id = Some(self.assign_id());
        self.state.goals.push(stored);
        self.recompute();
        Ok(self.state.goals.last().cloned().unwrap_or_else(|| goal.clone()))
    }

    fn update_goal(&mut self, id: i64, goal: &SavingsGoal) -> ApiResult<SavingsGoal> {
        let idx = self
            .state
            .goals
            .iter()
            .position(|g| g.id == Some(id))
            .ok_or_else(|| not_found("Goal", id))?;
        if self
            .state
            .goals
            .iter()
            .any(|g| g.id != Some(id) && g.goal_name == goal.goal_name)
        {
            return Err(duplicate_goal(&goal.goal_name));
        }
        let mut stored = goal.clone();
        stored.id = Some(id);
        self.state.goals[idx] = stored;
        self.recompute();
        Ok(self.state.goals[idx].clone())
    }

    fn delete_goal(&mut self, id: i64) -> ApiResult<()> {
        let before = self.state.goals.len();
        self.state.goals.retain(|g| g.id != Some(id));
        if self.state.goals.len() == before {
            return Err(not_found("Goal", id));
        }
        Ok(())
    }

    fn list_transactions(&self) -> ApiResult<Vec<Transaction>> {
        Ok(self.state.transactions.clone())
    }

    fn create_transaction(&mut self, transaction: &Transaction) -> ApiResult<Transaction> {
        let mut stored = transaction.clone();
        stored.id = Some(self.assign_id());
        self.state.transactions.push(stored.clone());
        self.recompute();
        Ok(stored)
    }

    fn update_transaction(
        &mut self,
        id: i64,
        transaction: &Transaction,
    ) -> ApiResult<Transaction> {
        let stored = self
            .state
            .transactions
            .iter_mut()
            .find(|t| t.id == Some(id))
            .ok_or_else(|| not_found("Transaction", id))?;
        *stored = transaction.clone();
        stored.id = Some(id);
        let updated = stored.clone();
        self.recompute();
        Ok(updated)
    }

    fn delete_transaction(&mut self, id: i64) -> ApiResult<()> {
        let before = self.state.transactions.len();
        self.state.transactions.retain(|t| t.id != Some(id));
        if self.state.transactions.len() == before {
            return Err(not_found("Transaction", id));
        }
        self.recompute();
        Ok(())
    }
}
