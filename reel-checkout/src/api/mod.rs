//! API routes for reel-checkout

pub mod health;
pub mod paypal;
pub mod purchases;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let paypal = Router::new()
        .route("/api/paypal/create-order", post(paypal::create_order))
        .route("/api/paypal/capture-order", post(paypal::capture_order))
        .route("/api/paypal/verify-order", get(paypal::verify_order))
        .route("/api/paypal/self-test", get(paypal::self_test));

    let purchases = Router::new().route("/api/purchases/check", get(purchases::check_ownership));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(paypal)
        .merge(purchases)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
