//! GET /api/purchases/check - does a user own an item

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use shared::error::{AppError, AppResult, ErrorCode};

use crate::error::CheckoutError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipParams {
    pub user_id: Option<String>,
    pub item_id: Option<String>,
}

pub async fn check_ownership(
    State(state): State<AppState>,
    Query(params): Query<OwnershipParams>,
) -> AppResult<Json<Value>> {
    let user_id = params.user_id.unwrap_or_default();
    let item_id = params.item_id.unwrap_or_default();

    let mut missing = Vec::new();
    if user_id.trim().is_empty() {
        missing.push("userId");
    }
    if item_id.trim().is_empty() {
        missing.push("itemId");
    }
    if !missing.is_empty() {
        return Err(CheckoutError::Validation(missing).into());
    }

    let owned = state
        .coordinator
        .owns(user_id.trim(), item_id.trim())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Ownership lookup failed");
            AppError::new(ErrorCode::DatabaseError)
        })?;

    Ok(Json(json!({ "owned": owned })))
}
