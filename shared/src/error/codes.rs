//! Unified error codes for the Reel services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 5xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the storefront frontend
/// can switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 5xxx: Payment ====================
    /// Generic payment failure
    PaymentFailed = 5001,
    /// Processor credentials are not configured
    PaymentNotConfigured = 5002,
    /// Every order creation strategy failed
    OrderCreationFailed = 5101,
    /// Processor rejected or could not be reached during capture
    CaptureFailed = 5102,
    /// Capture returned but funds are not finalized
    PaymentIncomplete = 5103,
    /// Processor status query failed
    VerificationFailed = 5104,

    // ==================== 9xxx: System ====================
    /// Purchase store unavailable
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",

            // Payment
            ErrorCode::PaymentFailed => "Payment failed",
            ErrorCode::PaymentNotConfigured => "PayPal configuration missing",
            ErrorCode::OrderCreationFailed => "Failed to create PayPal order",
            ErrorCode::CaptureFailed => "Failed to capture payment",
            ErrorCode::PaymentIncomplete => "Payment not completed",
            ErrorCode::VerificationFailed => "Failed to verify order",

            // System
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentNotConfigured),
            5101 => Ok(ErrorCode::OrderCreationFailed),
            5102 => Ok(ErrorCode::CaptureFailed),
            5103 => Ok(ErrorCode::PaymentIncomplete),
            5104 => Ok(ErrorCode::VerificationFailed),

            // System
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
