//! PayPal checkout handlers
//!
//! POST /api/paypal/create-order  - create order (API, redirect fallback)
//! POST /api/paypal/capture-order - capture funds + record purchase
//! GET  /api/paypal/verify-order  - completion check by order id
//! GET  /api/paypal/self-test     - sandbox integration check

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::Value;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::payment::{CaptureReceipt, CreateOrderBody, OrderVerification, PendingOrder};

use crate::checkout::self_test::{self, SelfTestOptions, SelfTestReport};
use crate::error::CheckoutError;
use crate::state::AppState;

// ── Request types ──

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureOrderBody {
    pub order_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyParams {
    pub order_id: Option<String>,
}

// ── Helpers ──

/// Unwrap a JSON body, reporting syntax/content-type problems as 400.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::invalid_request(e.body_text()))
}

// ── POST /api/paypal/create-order ──

pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderBody>, JsonRejection>,
) -> AppResult<Json<PendingOrder>> {
    let request = json_body(payload)?
        .into_request()
        .map_err(CheckoutError::from)?;

    let order = state.coordinator.create(&request).await?;
    Ok(Json(order))
}

// ── POST /api/paypal/capture-order ──

pub async fn capture_order(
    State(state): State<AppState>,
    payload: Result<Json<CaptureOrderBody>, JsonRejection>,
) -> AppResult<Json<CaptureReceipt>> {
    let order_id = json_body(payload)?.order_id.unwrap_or_default();

    let receipt = state.coordinator.capture(&order_id).await?;
    Ok(Json(receipt))
}

// ── GET /api/paypal/verify-order ──

pub async fn verify_order(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> AppResult<Json<OrderVerification>> {
    let order_id = params.order_id.unwrap_or_default();

    match state.coordinator.verify(&order_id).await {
        Ok(verification) => Ok(Json(verification)),
        Err(e @ CheckoutError::Verification(_)) => Err(AppError::from(e)
            .with_detail("orderId", Value::Null)
            .with_detail("isValid", false)),
        Err(e) => Err(e.into()),
    }
}

// ── GET /api/paypal/self-test ──

pub async fn self_test(State(state): State<AppState>) -> AppResult<Json<SelfTestReport>> {
    if let Err(missing) = self_test::readiness(&state.paypal) {
        return Err(AppError::new(ErrorCode::PaymentNotConfigured).with_detail("missing", missing));
    }

    let options = SelfTestOptions {
        capture: state.paypal.self_test_capture,
    };
    let report = self_test::run(
        state.coordinator.gateway().as_ref(),
        state.paypal.mode.as_str(),
        options,
    )
    .await;

    if report.success {
        return Ok(Json(report));
    }

    let mut err = AppError::with_message(ErrorCode::PaymentFailed, "PayPal self-test failed");
    if let Ok(Value::Object(fields)) = serde_json::to_value(&report) {
        for (key, value) in fields {
            err = err.with_detail(key, value);
        }
    }
    Err(err)
}
