//! Application state for reel-checkout

use std::sync::Arc;

use crate::checkout::Coordinator;
use crate::config::{Config, PayPalConfig};
use crate::db::{MemoryPurchaseStore, PgPurchaseStore, PurchaseStore};
use crate::paypal::{PayPalClient, PaymentGateway};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
///
/// Only immutable handles live here; nothing per-order is kept in process.
#[derive(Clone)]
pub struct AppState {
    /// Order lifecycle coordinator (gateway + store injected)
    pub coordinator: Arc<Coordinator>,
    /// PayPal settings, read by the self-test readiness check
    pub paypal: PayPalConfig,
}

impl AppState {
    /// Assemble state from already-built parts
    pub fn from_parts(coordinator: Coordinator, paypal: PayPalConfig) -> Self {
        Self {
            coordinator: Arc::new(coordinator),
            paypal,
        }
    }

    /// Create a new AppState
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let gateway: Arc<dyn PaymentGateway> = Arc::new(PayPalClient::new(config.paypal.clone())?);

        let store: Arc<dyn PurchaseStore> = match &config.database_url {
            Some(url) => {
                let store = PgPurchaseStore::connect(url).await?;
                tracing::info!("Purchase store ready (PostgreSQL)");
                Arc::new(store)
            }
            None => {
                tracing::warn!(
                    "DATABASE_URL not set, purchases are kept in memory and lost on restart"
                );
                Arc::new(MemoryPurchaseStore::new())
            }
        };

        if let Err(missing) = crate::checkout::self_test::readiness(&config.paypal) {
            tracing::warn!(?missing, "PayPal credentials incomplete, checkout will fall back");
        }

        Ok(Self::from_parts(
            Coordinator::new(gateway, store),
            config.paypal.clone(),
        ))
    }
}
