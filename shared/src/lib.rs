//! Shared types for the Reel storefront services
//!
//! Error codes, the unified `AppError`, and the payment data model exchanged
//! between the checkout service and its clients.

pub mod error;
pub mod payment;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use payment::{
    CaptureReceipt, CapturedPayment, CreateOrderBody, CreationMethod, InvalidOrder, OrderRequest,
    OrderVerification, PendingOrder, PurchaseRecord,
};
