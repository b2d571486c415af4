//! Purchase persistence
//!
//! [`PurchaseStore`] is the seam the coordinator writes through. The
//! uniqueness of `(user_id, movie_id)` is the store's job, never the caller's.

pub mod memory;
pub mod purchases;

pub use memory::MemoryPurchaseStore;
pub use purchases::PgPurchaseStore;

use async_trait::async_trait;
use shared::payment::PurchaseRecord;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a purchase insert.
///
/// Stores classify their own failures so callers never inspect
/// engine-specific error codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Row written
    Inserted(PurchaseRecord),
    /// A purchase for the same user and item already exists
    Conflict,
    /// Any other storage failure
    Other(String),
}

/// Storage lookup failure
#[derive(Debug, thiserror::Error)]
#[error("purchase store error: {0}")]
pub struct StoreError(#[from] pub BoxError);

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError(e.into())
    }
}

#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Insert a purchase, enforcing one row per `(user_id, movie_id)`.
    async fn insert_purchase(&self, record: PurchaseRecord) -> InsertOutcome;

    /// Look up the purchase for a user and item.
    async fn find_purchase(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> Result<Option<PurchaseRecord>, StoreError>;
}
