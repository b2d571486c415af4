//! Checkout error taxonomy
//!
//! `CheckoutError` is what the coordinator returns. It converts into
//! `shared::AppError`, which renders the client-facing body. Processor detail
//! stays in the logs except where the cause is safe to restate.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Missing or malformed client input
    #[error("Missing or invalid fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    /// Every creation strategy failed
    #[error("Failed to create PayPal order")]
    OrderCreation,

    /// Transport or processor failure while capturing
    #[error("Failed to capture payment: {0}")]
    Capture(String),

    /// Capture call returned but funds are not finalized
    #[error("Payment not completed (status: {status})")]
    PaymentIncomplete { status: String },

    /// Transport or processor failure while querying status
    #[error("Failed to verify order: {0}")]
    Verification(String),
}

impl CheckoutError {
    pub fn missing(field: &'static str) -> Self {
        Self::Validation(vec![field])
    }
}

impl From<shared::payment::InvalidOrder> for CheckoutError {
    fn from(e: shared::payment::InvalidOrder) -> Self {
        Self::Validation(e.fields)
    }
}

impl From<CheckoutError> for AppError {
    fn from(e: CheckoutError) -> Self {
        match e {
            CheckoutError::Validation(fields) => {
                let message = if fields.len() == 1 {
                    format!("{} is required", fields[0])
                } else {
                    format!("Missing required fields: {}", fields.join(", "))
                };
                AppError::required(message).with_detail("fields", fields)
            }
            CheckoutError::OrderCreation => AppError::new(ErrorCode::OrderCreationFailed),
            CheckoutError::Capture(detail) => AppError::with_message(
                ErrorCode::CaptureFailed,
                format!("Failed to capture payment: {detail}"),
            ),
            CheckoutError::PaymentIncomplete { .. } => {
                AppError::new(ErrorCode::PaymentIncomplete)
            }
            CheckoutError::Verification(detail) => {
                tracing::warn!(error = %detail, "Order verification failed");
                AppError::new(ErrorCode::VerificationFailed)
            }
        }
    }
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> axum::response::Response {
        AppError::from(self).into_response()
    }
}
