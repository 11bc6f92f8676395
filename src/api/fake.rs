use super::{ApiError, ApiResult, FinanceApi, SnapshotApi};
use crate::models::{Budget, Profile, SavingsGoal, Snapshot, Transaction, TransactionSummary};

/// Resources a [`FakeApi`] can be told to fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resource {
    Profile,
    Summary,
    Budgets,
    Goals,
    Transactions,
}

/// In-memory backend for tests. Delegates to [`SnapshotApi`] for the
/// server-side arithmetic and counts the writes that reach it.
#[derive(Debug)]
pub(crate) struct FakeApi {
    inner: SnapshotApi,
    pub(crate) failing_reads: Vec<Resource>,
    pub(crate) reject_writes: Option<String>,
    pub(crate) writes: usize,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::with_snapshot(Snapshot::default())
    }

    pub(crate) fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            inner: SnapshotApi::new(snapshot),
            failing_reads: Vec::new(),
            reject_writes: None,
            writes: 0,
        }
    }

    pub(crate) fn stored(&self) -> Snapshot {
        self.inner.snapshot().clone()
    }

    fn read(&self, resource: Resource) -> ApiResult<&SnapshotApi> {
        if self.failing_reads.contains(&resource) {
            return Err(ApiError::Network(format!("{resource:?} unavailable")));
        }
        Ok(&self.inner)
    }

    fn write(&mut self) -> ApiResult<&mut SnapshotApi> {
        if let Some(msg) = &self.reject_writes {
            return Err(ApiError::Rejected(msg.clone()));
        }
        self.writes += 1;
        Ok(&mut self.inner)
    }
}

impl FinanceApi for FakeApi {
    fn get_profile(&self) -> ApiResult<Option<Profile>> {
        self.read(Resource::Profile)?.get_profile()
    }

    fn update_profile(&mut self, profile: &Profile) -> ApiResult<Profile> {
        self.write()?.update_profile(profile)
    }

    fn create_profile(&mut self, profile: &Profile) -> ApiResult<Profile> {
        self.write()?.create_profile(profile)
    }

    fn get_summary(&self) -> ApiResult<TransactionSummary> {
        self.read(Resource::Summary)?.get_summary()
    }

    fn list_budgets(&self) -> ApiResult<Vec<Budget>> {
        self.read(Resource::Budgets)?.list_budgets()
    }

    fn create_budget(&mut self, budget: &Budget) -> ApiResult<Budget> {
        self.write()?.create_budget(budget)
    }

    fn update_budget(&mut self, id: i64, budget: &Budget) -> ApiResult<Budget> {
        self.write()?.update_budget(id, budget)
    }

    fn delete_budget(&mut self, id: i64) -> ApiResult<()> {
        self.write()?.delete_budget(id)
    }

    fn list_goals(&self) -> ApiResult<Vec<SavingsGoal>> {
        self.read(Resource::Goals)?.list_goals()
    }

    fn create_goal(&mut self, goal: &SavingsGoal) -> ApiResult<SavingsGoal> {
        self.write()?.create_goal(goal)
    }

    fn update_goal(&mut self, id: i64, goal: &SavingsGoal) -> ApiResult<SavingsGoal> {
        self.write()?.update_goal(id, goal)
    }

    fn delete_goal(&mut self, id: i64) -> ApiResult<()> {
        self.write()?.delete_goal(id)
    }

    fn list_transactions(&self) -> ApiResult<Vec<Transaction>> {
        self.read(Resource::Transactions)?.list_transactions()
    }

    fn create_transaction(&mut self, transaction: &Transaction) -> ApiResult<Transaction> {
        self.write()?.create_transaction(transaction)
    }

    fn update_transaction(
        &mut self,
        id: i64,
        transaction: &Transaction,
    ) -> ApiResult<Transaction> {
        self.write()?.update_transaction(id, transaction)
    }

    fn delete_transaction(&mut self, id: i64) -> ApiResult<()> {
        self.write()?.delete_transaction(id)
    }
}
