//! PayPal integration via REST API (no SDK dependency)
//!
//! [`PaymentGateway`] is the seam the checkout coordinator depends on;
//! [`PayPalClient`] is the production implementation.

mod client;

pub use client::PayPalClient;

use async_trait::async_trait;
use shared::payment::{CapturedPayment, OrderRequest, PendingOrder};

/// Errors raised by a payment gateway call
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("PayPal is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("PayPal request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("PayPal rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected PayPal response: {0}")]
    Malformed(String),
}

/// External payment processor operations used by the checkout flow.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order through the Orders API.
    async fn create_order(&self, request: &OrderRequest) -> Result<PendingOrder, GatewayError>;

    /// Build a classic checkout URL for the request. No network call.
    async fn create_redirect_order(&self, request: &OrderRequest) -> Result<String, GatewayError>;

    /// Capture funds for an approved order.
    async fn capture_order(&self, order_id: &str) -> Result<CapturedPayment, GatewayError>;

    /// `true` only when PayPal reports the order as completed.
    async fn query_order_status(&self, order_id: &str) -> Result<bool, GatewayError>;
}
