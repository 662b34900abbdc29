use std::sync::Arc;

pub use balances::{BalanceSheet, compute_balances};
pub use error::EngineError;
pub use expense::{Expense, SplitMethod};
pub use money::{SETTLE_EPSILON, ZERO_SUM_TOLERANCE, is_settled, round_to_cents};
pub use participant::{Participant, display_name};
pub use settlement::{Settlement, plan_settlements};
pub use split::resolve_splits;
pub use store::{
    JsonFileStore, MemoryStore, StoreError, StoreEvent, StoreResult, TripStore,
};
pub use trip::{Trip, TripSummary};

mod balances;
mod error;
mod expense;
mod money;
mod participant;
mod settlement;
mod split;
mod store;
mod trip;

pub type ResultEngine<T> = Result<T, EngineError>;

/// Facade over the trip store: CRUD on trips, participants and expenses,
/// and on-demand summary computation.
///
/// The engine keeps no state of its own. Every operation loads the latest
/// trip snapshot, applies the change, and writes the whole document back
/// (last writer wins, matching the store's semantics). Summaries are
/// recomputed from the snapshot on every call.
#[derive(Clone, Debug)]
pub struct Engine {
    store: Arc<dyn TripStore>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    async fn require_trip(&self, trip_id: &str) -> ResultEngine<Trip> {
        self.store
            .get(trip_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("trip not exists".to_string()))
    }

    /// Creates a trip with `creator` as its first participant.
    pub async fn create_trip(&self, name: &str, creator: Participant) -> ResultEngine<Trip> {
        let trip = Trip::new(name, creator)?;
        self.store.put(trip.clone()).await?;
        tracing::info!(trip_id = %trip.id, name = %trip.name, "created trip");
        Ok(trip)
    }

    /// Returns the latest snapshot of a trip.
    pub async fn trip(&self, trip_id: &str) -> ResultEngine<Trip> {
        self.require_trip(trip_id).await
    }

    /// Lists all trips, oldest first.
    pub async fn list_trips(&self) -> ResultEngine<Vec<Trip>> {
        let mut trips = self.store.list().await?;
        trips.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(trips)
    }

    pub async fn delete_trip(&self, trip_id: &str) -> ResultEngine<()> {
        if self.store.remove(trip_id).await?.is_none() {
            return Err(EngineError::KeyNotFound("trip not exists".to_string()));
        }
        tracing::info!(trip_id = %trip_id, "deleted trip");
        Ok(())
    }

    pub async fn add_participant(
        &self,
        trip_id: &str,
        participant: Participant,
    ) -> ResultEngine<()> {
        let mut trip = self.require_trip(trip_id).await?;
        trip.add_participant(participant)?;
        self.store.put(trip).await?;
        Ok(())
    }

    pub async fn remove_participant(&self, trip_id: &str, email: &str) -> ResultEngine<()> {
        let mut trip = self.require_trip(trip_id).await?;
        trip.remove_participant(email)?;
        self.store.put(trip).await?;
        Ok(())
    }

    /// Appends an expense and returns its ledger index.
    pub async fn add_expense(&self, trip_id: &str, expense: Expense) -> ResultEngine<usize> {
        let mut trip = self.require_trip(trip_id).await?;
        let index = trip.add_expense(expense)?;
        self.store.put(trip).await?;
        Ok(index)
    }

    /// Replaces the expense record at `index`.
    pub async fn update_expense(
        &self,
        trip_id: &str,
        index: usize,
        expense: Expense,
    ) -> ResultEngine<()> {
        let mut trip = self.require_trip(trip_id).await?;
        trip.update_expense(index, expense)?;
        self.store.put(trip).await?;
        Ok(())
    }

    pub async fn remove_expense(&self, trip_id: &str, index: usize) -> ResultEngine<()> {
        let mut trip = self.require_trip(trip_id).await?;
        trip.remove_expense(index)?;
        self.store.put(trip).await?;
        Ok(())
    }

    /// Balances, totals and a settlement plan for the latest snapshot.
    pub async fn summary(&self, trip_id: &str) -> ResultEngine<TripSummary> {
        let trip = self.require_trip(trip_id).await?;
        trip.summary()
    }

    /// The store's change feed, for clients that re-fetch on updates.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn TripStore>>,
}

impl EngineBuilder {
    /// Pass the trip store backing the engine.
    pub fn store(mut self, store: Arc<dyn TripStore>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Construct `Engine`, defaulting to an in-memory store.
    pub fn build(self) -> Engine {
        Engine {
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryStore::new())),
        }
    }
}
