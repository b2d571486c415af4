//! Order lifecycle coordinator
//!
//! Sequences create → capture → verify against the payment gateway and
//! records purchases exactly once through the purchase store.
//!
//! - Creation walks an ordered strategy chain; a failing strategy is logged
//!   and the next one is tried.
//! - Capture is authoritative: once PayPal reports `COMPLETED`, storage
//!   failures only degrade the response (`purchase: null`), never fail it.
//! - Nothing is cached between calls; duplicate captures are serialized by
//!   the store's uniqueness constraint.

pub mod self_test;
pub mod strategy;

use std::sync::Arc;

use shared::payment::{
    CaptureReceipt, OrderRequest, OrderVerification, PendingOrder, PurchaseRecord,
};

use crate::db::{InsertOutcome, PurchaseStore, StoreError};
use crate::error::CheckoutError;
use crate::paypal::PaymentGateway;
use strategy::CreationStrategy;

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct Coordinator {
    strategies: Vec<Box<dyn CreationStrategy>>,
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn PurchaseStore>,
}

impl Coordinator {
    /// Coordinator with the default API → redirect chain.
    pub fn new(gateway: Arc<dyn PaymentGateway>, store: Arc<dyn PurchaseStore>) -> Self {
        let strategies = strategy::default_chain(gateway.clone());
        Self::with_strategies(strategies, gateway, store)
    }

    pub fn with_strategies(
        strategies: Vec<Box<dyn CreationStrategy>>,
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<dyn PurchaseStore>,
    ) -> Self {
        Self {
            strategies,
            gateway,
            store,
        }
    }

    pub fn gateway(&self) -> &Arc<dyn PaymentGateway> {
        &self.gateway
    }

    /// Create an order the payer can approve.
    ///
    /// Returns the first strategy's success. Strategy errors are logged and
    /// never reach the caller; exhaustion yields a generic error.
    pub async fn create(&self, request: &OrderRequest) -> Result<PendingOrder, CheckoutError> {
        for strategy in &self.strategies {
            match strategy.create(request).await {
                Ok(order) => {
                    tracing::info!(
                        item_id = %request.item_id,
                        user_id = %request.user_id,
                        method = %strategy.method(),
                        order_id = order.order_id.as_deref().unwrap_or("-"),
                        "PayPal order created"
                    );
                    return Ok(order);
                }
                Err(e) => {
                    tracing::warn!(
                        item_id = %request.item_id,
                        method = %strategy.method(),
                        error = %e,
                        "Order creation strategy failed"
                    );
                }
            }
        }

        tracing::error!(
            item_id = %request.item_id,
            user_id = %request.user_id,
            "All order creation strategies failed"
        );
        Err(CheckoutError::OrderCreation)
    }

    /// Capture an approved order and record the purchase.
    pub async fn capture(&self, order_id: &str) -> Result<CaptureReceipt, CheckoutError> {
        let order_id = order_id.trim();
        if order_id.is_empty() {
            return Err(CheckoutError::missing("orderId"));
        }

        let payment = self.gateway.capture_order(order_id).await.map_err(|e| {
            tracing::error!(order_id, error = %e, "PayPal capture failed");
            CheckoutError::Capture(e.to_string())
        })?;

        if !payment.is_completed() {
            tracing::warn!(order_id, status = %payment.status, "Capture returned without completion");
            return Err(CheckoutError::PaymentIncomplete {
                status: payment.status,
            });
        }

        if payment.user_id.is_empty() || payment.item_id.is_empty() {
            tracing::error!(
                order_id,
                "Completed capture has no user/item reference, purchase not recorded"
            );
            return Ok(CaptureReceipt {
                success: true,
                payment,
                purchase: None,
            });
        }

        let record =
            PurchaseRecord::from_capture(uuid::Uuid::new_v4().to_string(), &payment, now_millis());

        let purchase = match self.store.insert_purchase(record).await {
            InsertOutcome::Inserted(row) => {
                tracing::info!(
                    order_id,
                    user_id = %row.user_id,
                    movie_id = %row.movie_id,
                    "Purchase recorded"
                );
                Some(row)
            }
            InsertOutcome::Conflict => {
                tracing::info!(
                    order_id,
                    user_id = %payment.user_id,
                    movie_id = %payment.item_id,
                    "Purchase already recorded, skipping"
                );
                None
            }
            InsertOutcome::Other(detail) => {
                tracing::error!(
                    order_id,
                    user_id = %payment.user_id,
                    movie_id = %payment.item_id,
                    error = %detail,
                    "Failed to record purchase for captured payment"
                );
                None
            }
        };

        Ok(CaptureReceipt {
            success: true,
            payment,
            purchase,
        })
    }

    /// Report whether PayPal considers the order completed.
    pub async fn verify(&self, order_id: &str) -> Result<OrderVerification, CheckoutError> {
        let order_id = order_id.trim();
        if order_id.is_empty() {
            return Err(CheckoutError::missing("orderId"));
        }

        match self.gateway.query_order_status(order_id).await {
            Ok(completed) => Ok(OrderVerification::new(order_id, completed)),
            Err(e) => Err(CheckoutError::Verification(e.to_string())),
        }
    }

    /// Whether the user already owns the item.
    pub async fn owns(&self, user_id: &str, item_id: &str) -> Result<bool, StoreError> {
        Ok(self.store.find_purchase(user_id, item_id).await?.is_some())
    }
}
