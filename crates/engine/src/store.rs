//! The trip document store seam.
//!
//! Trips persist in an external key-value document store with
//! last-writer-wins semantics; the engine only ever sees snapshots. This
//! module defines the store port, an in-memory implementation, and a JSON
//! snapshot variant for single-node deployments. The `subscribe` primitive
//! is the change feed clients use to re-fetch after concurrent edits.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{RwLock, broadcast};

use crate::Trip;

/// Errors surfaced by store implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store io failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A change-feed notification carrying the affected trip id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    Updated(String),
    Removed(String),
}

/// Document-store port: whole-trip get/put/remove/list plus a change feed.
#[async_trait]
pub trait TripStore: Send + Sync + std::fmt::Debug {
    async fn get(&self, trip_id: &str) -> StoreResult<Option<Trip>>;
    /// Upserts the whole document. Last writer wins.
    async fn put(&self, trip: Trip) -> StoreResult<()>;
    async fn remove(&self, trip_id: &str) -> StoreResult<Option<Trip>>;
    async fn list(&self) -> StoreResult<Vec<Trip>>;
    /// Subscribes to the change feed. Slow receivers may observe lag and
    /// should re-list rather than assume a complete event history.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}

/// In-memory store, the default collaborator for tests and ephemeral runs.
#[derive(Debug)]
pub struct MemoryStore {
    trips: RwLock<HashMap<String, Trip>>,
    events: broadcast::Sender<StoreEvent>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_trips(HashMap::new())
    }

    fn with_trips(trips: HashMap<String, Trip>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            trips: RwLock::new(trips),
            events,
        }
    }

    fn notify(&self, event: StoreEvent) {
        // No receivers is fine; the feed is best effort.
        let _ = self.events.send(event);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TripStore for MemoryStore {
    async fn get(&self, trip_id: &str) -> StoreResult<Option<Trip>> {
        Ok(self.trips.read().await.get(trip_id).cloned())
    }

    async fn put(&self, trip: Trip) -> StoreResult<()> {
        let id = trip.id.clone();
        self.trips.write().await.insert(id.clone(), trip);
        self.notify(StoreEvent::Updated(id));
        Ok(())
    }

    async fn remove(&self, trip_id: &str) -> StoreResult<Option<Trip>> {
        let removed = self.trips.write().await.remove(trip_id);
        if removed.is_some() {
            self.notify(StoreEvent::Removed(trip_id.to_string()));
        }
        Ok(removed)
    }

    async fn list(&self) -> StoreResult<Vec<Trip>> {
        Ok(self.trips.read().await.values().cloned().collect())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

/// Memory store with a JSON snapshot written after every mutation and loaded
/// back on startup.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Opens the store, loading an existing snapshot if the file is present.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let trips = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Self {
            path,
            inner: MemoryStore::with_trips(trips),
        })
    }

    async fn persist(&self) -> StoreResult<()> {
        let snapshot = {
            let trips = self.inner.trips.read().await;
            serde_json::to_vec_pretty(&*trips)?
        };
        tokio::fs::write(&self.path, snapshot).await?;
        Ok(())
    }
}

#[async_trait]
impl TripStore for JsonFileStore {
    async fn get(&self, trip_id: &str) -> StoreResult<Option<Trip>> {
        self.inner.get(trip_id).await
    }

    async fn put(&self, trip: Trip) -> StoreResult<()> {
        self.inner.put(trip).await?;
        self.persist().await
    }

    async fn remove(&self, trip_id: &str) -> StoreResult<Option<Trip>> {
        let removed = self.inner.remove(trip_id).await?;
        if removed.is_some() {
            self.persist().await?;
        }
        Ok(removed)
    }

    async fn list(&self) -> StoreResult<Vec<Trip>> {
        self.inner.list().await
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.subscribe()
    }
}
