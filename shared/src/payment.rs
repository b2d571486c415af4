//! Payment data model shared by the checkout service and its clients
//!
//! Wire shapes follow the storefront frontend: request/response payloads are
//! camelCase, the persisted purchase row is snake_case.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status string PayPal reports for a finalized order or capture.
pub const COMPLETED_STATUS: &str = "COMPLETED";

/// Payment method stored on every purchase row written by this service.
pub const PAYMENT_METHOD_PAYPAL: &str = "paypal";

/// Status stored on every purchase row written by this service.
pub const PURCHASE_STATUS_COMPLETED: &str = "completed";

// ── Order creation ──

/// Raw create-order body as posted by the storefront.
///
/// Every field is optional on the wire so that absent fields surface as a
/// validation error naming them, not as a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub item_id: Option<String>,
    pub user_id: Option<String>,
    pub amount: Option<Decimal>,
    pub email: Option<String>,
    pub title: Option<String>,
}

/// Fields that were absent, blank, or unusable in a [`CreateOrderBody`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing or invalid fields: {}", .fields.join(", "))]
pub struct InvalidOrder {
    pub fields: Vec<&'static str>,
}

impl CreateOrderBody {
    /// Validate into an [`OrderRequest`]. Reports every offending field at once.
    pub fn into_request(self) -> Result<OrderRequest, InvalidOrder> {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let item_id = present(self.item_id);
        let user_id = present(self.user_id);
        let amount = self.amount.filter(|a| a.is_sign_positive() && !a.is_zero());
        let user_email = present(self.email);
        let item_title = present(self.title);

        match (item_id, user_id, amount, user_email, item_title) {
            (Some(item_id), Some(user_id), Some(amount), Some(user_email), Some(item_title)) => {
                Ok(OrderRequest {
                    item_id,
                    user_id,
                    amount,
                    user_email,
                    item_title,
                })
            }
            (item_id, user_id, amount, user_email, item_title) => {
                let fields = [
                    ("itemId", item_id.is_none()),
                    ("userId", user_id.is_none()),
                    ("amount", amount.is_none()),
                    ("email", user_email.is_none()),
                    ("title", item_title.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, missing)| missing.then_some(name))
                .collect();
                Err(InvalidOrder { fields })
            }
        }
    }
}

/// A validated purchase intent for one catalogue item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub item_id: String,
    pub user_id: String,
    pub amount: Decimal,
    pub user_email: String,
    pub item_title: String,
}

/// How a pending order was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreationMethod {
    /// Orders API (`/v2/checkout/orders`)
    #[serde(rename = "api")]
    Api,
    /// Classic checkout URL, used when the Orders API is unavailable
    #[serde(rename = "standard")]
    RedirectFallback,
}

impl CreationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::RedirectFallback => "standard",
        }
    }
}

impl std::fmt::Display for CreationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order awaiting payer approval. Held by PayPal, never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_url: Option<String>,
    pub method: CreationMethod,
}

impl PendingOrder {
    /// Order created through the redirect fallback: only a URL exists.
    pub fn redirect(approval_url: impl Into<String>) -> Self {
        Self {
            order_id: None,
            status: None,
            approval_url: Some(approval_url.into()),
            method: CreationMethod::RedirectFallback,
        }
    }
}

// ── Capture ──

/// Result of a capture call; the authoritative proof that money moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedPayment {
    pub order_id: String,
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub item_id: String,
    pub user_id: String,
    pub user_email: String,
}

impl CapturedPayment {
    /// Only the exact `COMPLETED` status counts as finalized funds.
    pub fn is_completed(&self) -> bool {
        self.status == COMPLETED_STATUS
    }
}

/// Durable proof that a user owns an item.
///
/// At most one row exists per `(user_id, movie_id)`; the store enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PurchaseRecord {
    pub id: String,
    pub user_id: String,
    pub movie_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub payment_id: String,
    pub payment_method: String,
    pub status: String,
    pub created_at: i64,
}

impl PurchaseRecord {
    /// Build the record for a completed capture.
    pub fn from_capture(id: String, payment: &CapturedPayment, created_at: i64) -> Self {
        Self {
            id,
            user_id: payment.user_id.clone(),
            movie_id: payment.item_id.clone(),
            amount: payment.amount,
            payment_id: payment.order_id.clone(),
            payment_method: PAYMENT_METHOD_PAYPAL.to_string(),
            status: PURCHASE_STATUS_COMPLETED.to_string(),
            created_at,
        }
    }
}

/// Capture response body. `purchase` is `null` when the local record was not
/// written (duplicate or storage failure); the payment fields are always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureReceipt {
    pub success: bool,
    pub payment: CapturedPayment,
    pub purchase: Option<PurchaseRecord>,
}

// ── Verification ──

/// Binary completion signal for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderVerification {
    pub order_id: String,
    pub is_valid: bool,
    pub status: String,
}

impl OrderVerification {
    pub const COMPLETED: &'static str = "completed";
    pub const NOT_FOUND_OR_PENDING: &'static str = "not_found_or_pending";

    pub fn new(order_id: impl Into<String>, completed: bool) -> Self {
        Self {
            order_id: order_id.into(),
            is_valid: completed,
            status: if completed {
                Self::COMPLETED
            } else {
                Self::NOT_FOUND_OR_PENDING
            }
            .to_string(),
        }
    }
}
