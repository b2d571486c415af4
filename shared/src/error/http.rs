//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 400 Bad Request (validation, missing processor credentials)
            Self::InvalidRequest | Self::RequiredField | Self::PaymentNotConfigured => {
                StatusCode::BAD_REQUEST
            }

            // 500 Internal Server Error (processor-side failures included)
            Self::PaymentFailed
            | Self::OrderCreationFailed
            | Self::CaptureFailed
            | Self::PaymentIncomplete
            | Self::VerificationFailed
            | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ErrorCode::RequiredField.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidRequest.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::PaymentNotConfigured.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_payment_failures_are_server_errors() {
        assert_eq!(
            ErrorCode::OrderCreationFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::CaptureFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::PaymentIncomplete.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::VerificationFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_no_code_maps_to_conflict() {
        for code in [
            ErrorCode::InvalidRequest,
            ErrorCode::RequiredField,
            ErrorCode::PaymentFailed,
            ErrorCode::PaymentNotConfigured,
            ErrorCode::OrderCreationFailed,
            ErrorCode::CaptureFailed,
            ErrorCode::PaymentIncomplete,
            ErrorCode::VerificationFailed,
            ErrorCode::DatabaseError,
        ] {
            assert_ne!(code.http_status(), StatusCode::CONFLICT);
        }
    }
}
