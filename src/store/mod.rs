//! String-keyed persistence for JSON blobs.
//!
//! Every component reads and writes whole values under a fixed key; there is
//! no relational structure and no locking across read-modify-write cycles.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Names of the values held in the store. Their JSON shapes are stable.
pub mod keys {
    pub const JOURNAL_ENTRIES: &str = "journalEntries";
    pub const TRACKING_HISTORY: &str = "trackingHistory";
    pub const QUIZ_ANSWERS: &str = "quizAnswers";
    pub const QUIZ_STEP: &str = "quizStep";
    pub const CYCLE_START_DATE: &str = "cycleStartDate";
    pub const CYCLE_AVERAGE_LENGTH: &str = "cycleAverageLength";
    pub const CURRENT_CYCLE_DAY: &str = "currentCycleDay";
    pub const CURRENT_CYCLE_PHASE: &str = "currentCyclePhase";
    pub const NEXT_PERIOD_ESTIMATE: &str = "nextPeriodEstimate";
    pub const USER_SETTINGS: &str = "userSettings";

    /// Keys written when the quiz derives the cycle state.
    pub const DERIVED_CYCLE_STATE: [&str; 5] = [
        CYCLE_START_DATE,
        CYCLE_AVERAGE_LENGTH,
        CURRENT_CYCLE_DAY,
        CURRENT_CYCLE_PHASE,
        NEXT_PERIOD_ESTIMATE,
    ];
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Typed access to a [`KeyValueStore`].
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
}

impl Store {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub async fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        Ok(self.load(key).await?.unwrap_or_default())
    }

    /// Raw stored text, for callers that tolerate malformed values.
    pub async fn load_raw(&self, key: &str) -> Result<Option<String>> {
        self.backend.get(key).await
    }

    pub async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, raw).await
    }

    pub async fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove(key).await
    }
}
