//! In-process purchase store for development and tests

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use shared::payment::PurchaseRecord;

use super::{InsertOutcome, PurchaseStore, StoreError};

/// DashMap keyed by `(user_id, movie_id)`.
///
/// Inserts go through the entry API, so concurrent duplicates resolve to a
/// single winner under the shard lock.
#[derive(Debug, Default)]
pub struct MemoryPurchaseStore {
    rows: DashMap<(String, String), PurchaseRecord>,
}

impl MemoryPurchaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl PurchaseStore for MemoryPurchaseStore {
    async fn insert_purchase(&self, record: PurchaseRecord) -> InsertOutcome {
        let key = (record.user_id.clone(), record.movie_id.clone());
        match self.rows.entry(key) {
            Entry::Occupied(_) => InsertOutcome::Conflict,
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                InsertOutcome::Inserted(record)
            }
        }
    }

    async fn find_purchase(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> Result<Option<PurchaseRecord>, StoreError> {
        Ok(self
            .rows
            .get(&(user_id.to_string(), movie_id.to_string()))
            .map(|r| r.value().clone()))
    }
}
