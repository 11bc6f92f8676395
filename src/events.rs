//! Typed change notifications.
//!
//! Every successful create, update or delete on the [`Workspace`](crate::workspace::Workspace)
//! publishes a [`DataEvent`]. Views that show derived figures subscribe and
//! re-fetch what they display. Delivery is synchronous, in subscription order.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataEvent {
    TransactionsChanged(Mutation),
    BudgetsChanged(Mutation),
    GoalsChanged(Mutation),
    ProfileChanged,
}

impl DataEvent {
    /// Budget alerts depend on budget limits and on expense transactions.
    pub fn affects_budget_alerts(&self) -> bool {
        matches!(self, Self::TransactionsChanged(_) | Self::BudgetsChanged(_))
    }

    /// The balance card depends on the profile and the ledger.
    pub fn affects_balance(&self) -> bool {
        matches!(self, Self::TransactionsChanged(_) | Self::ProfileChanged)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&DataEvent)>;

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&DataEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn publish(&mut self, event: DataEvent) {
        log::debug!(
            "Publishing {event:?} to {} subscriber(s)",
            self.subscribers.len()
        );
        for (_, handler) in &mut self.subscribers {
            handler(&event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
