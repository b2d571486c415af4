//! Test fixtures: scripted PayPal gateway, stores, and in-process HTTP calls

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use reel_checkout::checkout::Coordinator;
use reel_checkout::config::{PayPalConfig, PayPalMode};
use reel_checkout::db::{InsertOutcome, PurchaseStore, StoreError};
use reel_checkout::paypal::{GatewayError, PaymentGateway};
use reel_checkout::{AppState, api};
use shared::payment::{
    CapturedPayment, CreationMethod, OrderRequest, PendingOrder, PurchaseRecord,
};

/// Gateway whose every answer is fixed up front.
#[derive(Default)]
pub struct ScriptedGateway {
    pub api_fails: bool,
    pub redirect_fails: bool,
    /// `None` makes capture fail with a processor rejection
    pub capture_status: Option<&'static str>,
    /// `None` makes the status query fail
    pub completed: Option<bool>,
    pub api_calls: AtomicUsize,
    pub redirect_calls: AtomicUsize,
    pub capture_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn calls(&self) -> usize {
        self.api_calls.load(Ordering::SeqCst)
            + self.redirect_calls.load(Ordering::SeqCst)
            + self.capture_calls.load(Ordering::SeqCst)
            + self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<PendingOrder, GatewayError> {
        self.api_calls.fetch_add(1, Ordering::SeqCst);
        if self.api_fails {
            return Err(GatewayError::Rejected {
                status: 500,
                message: "INTERNAL_SERVICE_ERROR".into(),
            });
        }
        Ok(PendingOrder {
            order_id: Some(format!("ORDER-{}", request.item_id)),
            status: Some("CREATED".into()),
            approval_url: Some("https://www.sandbox.paypal.com/checkoutnow?token=T".into()),
            method: CreationMethod::Api,
        })
    }

    async fn create_redirect_order(&self, request: &OrderRequest) -> Result<String, GatewayError> {
        self.redirect_calls.fetch_add(1, Ordering::SeqCst);
        if self.redirect_fails {
            return Err(GatewayError::NotConfigured("PAYPAL_BUSINESS_EMAIL"));
        }
        Ok(format!(
            "https://www.sandbox.paypal.com/cgi-bin/webscr?cmd=_xclick&item_number={}",
            request.item_id
        ))
    }

    async fn capture_order(&self, order_id: &str) -> Result<CapturedPayment, GatewayError> {
        self.capture_calls.fetch_add(1, Ordering::SeqCst);
        let status = self.capture_status.ok_or_else(|| GatewayError::Rejected {
            status: 422,
            message: "Payer has not yet approved the Order for payment.".into(),
        })?;
        Ok(CapturedPayment {
            order_id: order_id.into(),
            status: status.into(),
            amount: Decimal::new(999, 2),
            item_id: "m1".into(),
            user_id: "u1".into(),
            user_email: "a@b.com".into(),
        })
    }

    async fn query_order_status(&self, _: &str) -> Result<bool, GatewayError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.completed
            .ok_or_else(|| GatewayError::Malformed("connection reset".into()))
    }
}

/// Store that reports every insert as a uniqueness conflict.
pub struct ConflictStore;

#[async_trait]
impl PurchaseStore for ConflictStore {
    async fn insert_purchase(&self, _: PurchaseRecord) -> InsertOutcome {
        InsertOutcome::Conflict
    }

    async fn find_purchase(&self, _: &str, _: &str) -> Result<Option<PurchaseRecord>, StoreError> {
        Ok(None)
    }
}

/// Store that fails every operation.
pub struct BrokenStore;

#[async_trait]
impl PurchaseStore for BrokenStore {
    async fn insert_purchase(&self, _: PurchaseRecord) -> InsertOutcome {
        InsertOutcome::Other("disk full".into())
    }

    async fn find_purchase(&self, _: &str, _: &str) -> Result<Option<PurchaseRecord>, StoreError> {
        Err(StoreError("disk full".into()))
    }
}

pub fn paypal_config(client_id: &str, client_secret: &str) -> PayPalConfig {
    PayPalConfig {
        client_id: client_id.into(),
        client_secret: client_secret.into(),
        mode: PayPalMode::Sandbox,
        business_email: Some("shop@reel.example".into()),
        currency: "USD".into(),
        public_base_url: "http://localhost:3000".into(),
        http_timeout_secs: 5,
        self_test_capture: false,
    }
}

pub fn app_with(
    gateway: Arc<ScriptedGateway>,
    store: Arc<dyn PurchaseStore>,
    paypal: PayPalConfig,
) -> Router {
    let coordinator = Coordinator::new(gateway, store);
    api::create_router(AppState::from_parts(coordinator, paypal))
}

pub fn app(gateway: Arc<ScriptedGateway>, store: Arc<dyn PurchaseStore>) -> Router {
    app_with(gateway, store, paypal_config("client", "secret"))
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(http::Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Run one request through the router and decode the JSON response.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
