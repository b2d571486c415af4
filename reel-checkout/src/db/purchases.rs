use async_trait::async_trait;
use shared::payment::PurchaseRecord;
use sqlx::PgPool;

use super::{InsertOutcome, PurchaseStore, StoreError};

/// PostgreSQL purchase store (`purchases` table, see `migrations/`)
#[derive(Clone)]
pub struct PgPurchaseStore {
    pool: PgPool,
}

impl PgPurchaseStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError(e.into()))?;
        Ok(Self::new(pool))
    }
}

/// Map an insert error onto the store outcome. SQLSTATE 23505 is a conflict.
fn classify(err: sqlx::Error) -> InsertOutcome {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => InsertOutcome::Conflict,
        _ => InsertOutcome::Other(err.to_string()),
    }
}

#[async_trait]
impl PurchaseStore for PgPurchaseStore {
    async fn insert_purchase(&self, record: PurchaseRecord) -> InsertOutcome {
        let result = sqlx::query_as::<_, PurchaseRecord>(
            "INSERT INTO purchases (id, user_id, movie_id, amount, payment_id, payment_method, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, user_id, movie_id, amount, payment_id, payment_method, status, created_at",
        )
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(&record.movie_id)
        .bind(record.amount)
        .bind(&record.payment_id)
        .bind(&record.payment_method)
        .bind(&record.status)
        .bind(record.created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => InsertOutcome::Inserted(row),
            Err(e) => classify(e),
        }
    }

    async fn find_purchase(
        &self,
        user_id: &str,
        movie_id: &str,
    ) -> Result<Option<PurchaseRecord>, StoreError> {
        let row = sqlx::query_as::<_, PurchaseRecord>(
            "SELECT id, user_id, movie_id, amount, payment_id, payment_method, status, created_at
             FROM purchases WHERE user_id = $1 AND movie_id = $2",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
