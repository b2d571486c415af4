//! PayPal REST client
//!
//! Orders API v2 for create/capture/status, classic `webscr` URLs for the
//! redirect fallback. A fresh OAuth token is requested per operation.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use shared::payment::{
    COMPLETED_STATUS, CapturedPayment, CreationMethod, OrderRequest, PendingOrder,
};

use super::{GatewayError, PaymentGateway};
use crate::config::PayPalConfig;

/// Production [`PaymentGateway`] backed by the PayPal REST API
#[derive(Clone)]
pub struct PayPalClient {
    http: reqwest::Client,
    config: PayPalConfig,
}

impl PayPalClient {
    pub fn new(config: PayPalConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &PayPalConfig {
        &self.config
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.mode.api_base())
    }

    /// `/v2/checkout/orders/{id}[/{action}]` with the id as one encoded segment.
    fn order_url(&self, order_id: &str, action: Option<&str>) -> Result<Url, GatewayError> {
        if matches!(order_id, "" | "." | "..") {
            return Err(GatewayError::Malformed(format!("invalid order id: {order_id:?}")));
        }

        let mut url = Url::parse(&self.api_url("/v2/checkout/orders"))
            .map_err(|e| GatewayError::Malformed(format!("order url: {e}")))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| GatewayError::Malformed("api base cannot take a path".into()))?;
            segments.push(order_id);
            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }

    /// OAuth2 client-credentials token
    async fn access_token(&self) -> Result<String, GatewayError> {
        if self.config.client_id.trim().is_empty() {
            return Err(GatewayError::NotConfigured("PAYPAL_CLIENT_ID"));
        }
        if self.config.client_secret.trim().is_empty() {
            return Err(GatewayError::NotConfigured("PAYPAL_CLIENT_SECRET"));
        }

        let resp = self
            .http
            .post(self.api_url("/v1/oauth2/token"))
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let body = read_json(resp).await?;

        body["access_token"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| GatewayError::Malformed(format!("token response without access_token: {body}")))
    }
}

#[async_trait]
impl PaymentGateway for PayPalClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<PendingOrder, GatewayError> {
        let token = self.access_token().await?;
        let resp = self
            .http
            .post(self.api_url("/v2/checkout/orders"))
            .bearer_auth(token)
            .json(&order_payload(&self.config, request))
            .send()
            .await?;
        let body = read_json(resp).await?;
        parse_created_order(&body)
    }

    async fn create_redirect_order(&self, request: &OrderRequest) -> Result<String, GatewayError> {
        build_redirect_url(&self.config, request)
    }

    async fn capture_order(&self, order_id: &str) -> Result<CapturedPayment, GatewayError> {
        let url = self.order_url(order_id, Some("capture"))?;
        let token = self.access_token().await?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(token)
            // PayPal replays the original capture for a repeated request id
            .header("PayPal-Request-Id", format!("capture-{order_id}"))
            .json(&json!({}))
            .send()
            .await?;
        let body = read_json(resp).await?;
        parse_capture(order_id, &body)
    }

    async fn query_order_status(&self, order_id: &str) -> Result<bool, GatewayError> {
        let url = self.order_url(order_id, None)?;
        let token = self.access_token().await?;
        let resp = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        let body = read_json(resp).await?;
        Ok(body["status"].as_str() == Some(COMPLETED_STATUS))
    }
}

// ── Request building ──

fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

fn order_payload(config: &PayPalConfig, request: &OrderRequest) -> Value {
    json!({
        "intent": "CAPTURE",
        "purchase_units": [{
            "reference_id": request.item_id,
            "custom_id": request.user_id,
            "description": request.item_title,
            "amount": {
                "currency_code": config.currency,
                "value": format_amount(request.amount),
            },
        }],
        "payer": { "email_address": request.user_email },
        "application_context": {
            "brand_name": "Reel",
            "user_action": "PAY_NOW",
            "shipping_preference": "NO_SHIPPING",
            "return_url": config.return_url(),
            "cancel_url": config.cancel_url(),
        },
    })
}

/// Classic `_xclick` checkout URL carrying the whole order in its query.
fn build_redirect_url(config: &PayPalConfig, request: &OrderRequest) -> Result<String, GatewayError> {
    let business = config
        .business_email
        .as_deref()
        .ok_or(GatewayError::NotConfigured("PAYPAL_BUSINESS_EMAIL"))?;

    let amount = format_amount(request.amount);
    let custom = format!("{}:{}", request.user_id, request.item_id);
    let return_url = config.return_url();
    let cancel_url = config.cancel_url();

    let url = Url::parse_with_params(
        &format!("{}/cgi-bin/webscr", config.mode.checkout_base()),
        &[
            ("cmd", "_xclick"),
            ("business", business),
            ("item_name", request.item_title.as_str()),
            ("item_number", request.item_id.as_str()),
            ("amount", amount.as_str()),
            ("currency_code", config.currency.as_str()),
            ("custom", custom.as_str()),
            ("email", request.user_email.as_str()),
            ("return", return_url.as_str()),
            ("cancel_return", cancel_url.as_str()),
            ("no_shipping", "1"),
        ],
    )
    .map_err(|e| GatewayError::Malformed(format!("redirect url: {e}")))?;

    Ok(url.into())
}

// ── Response handling ──

async fn read_json(resp: reqwest::Response) -> Result<Value, GatewayError> {
    let status = resp.status();
    let text = resp.text().await?;
    let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(GatewayError::Rejected {
            status: status.as_u16(),
            message: error_message(&body).unwrap_or_else(|| text.chars().take(200).collect()),
        });
    }
    if body.is_null() {
        return Err(GatewayError::Malformed(format!(
            "non-JSON body ({status})"
        )));
    }
    Ok(body)
}

/// Most specific human-readable message in a PayPal error body.
fn error_message(body: &Value) -> Option<String> {
    body["details"][0]["description"]
        .as_str()
        .or_else(|| body["message"].as_str())
        .or_else(|| body["error_description"].as_str())
        .map(String::from)
}

fn parse_created_order(body: &Value) -> Result<PendingOrder, GatewayError> {
    let order_id = body["id"]
        .as_str()
        .ok_or_else(|| GatewayError::Malformed(format!("order without id: {body}")))?;

    let approval_url = body["links"].as_array().and_then(|links| {
        links
            .iter()
            .find(|l| matches!(l["rel"].as_str(), Some("approve") | Some("payer-action")))
            .and_then(|l| l["href"].as_str())
            .map(String::from)
    });

    Ok(PendingOrder {
        order_id: Some(order_id.to_string()),
        status: body["status"].as_str().map(String::from),
        approval_url,
        method: CreationMethod::Api,
    })
}

/// Map a capture response onto [`CapturedPayment`].
///
/// Only `status` is mandatory; ownership fields left blank are caught by the
/// coordinator before anything is persisted.
fn parse_capture(order_id: &str, body: &Value) -> Result<CapturedPayment, GatewayError> {
    let status = body["status"]
        .as_str()
        .ok_or_else(|| GatewayError::Malformed(format!("capture without status: {body}")))?;

    let unit = &body["purchase_units"][0];
    let capture = &unit["payments"]["captures"][0];

    let amount = capture["amount"]["value"]
        .as_str()
        .or_else(|| unit["amount"]["value"].as_str())
        .map(Decimal::from_str)
        .transpose()
        .map_err(|e| GatewayError::Malformed(format!("capture amount: {e}")))?;
    let amount = match amount {
        Some(amount) => amount,
        None if status == COMPLETED_STATUS => {
            return Err(GatewayError::Malformed(format!(
                "completed capture without amount: {body}"
            )));
        }
        None => Decimal::ZERO,
    };

    let text = |v: &Value| v.as_str().unwrap_or_default().to_string();

    let user_id = capture["custom_id"]
        .as_str()
        .or_else(|| unit["custom_id"].as_str())
        .unwrap_or_default()
        .to_string();

    Ok(CapturedPayment {
        order_id: body["id"].as_str().unwrap_or(order_id).to_string(),
        status: status.to_string(),
        amount,
        item_id: text(&unit["reference_id"]),
        user_id,
        user_email: text(&body["payer"]["email_address"]),
    })
}
