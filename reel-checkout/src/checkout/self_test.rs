//! PayPal integration self-test
//!
//! Exercises the gateway end-to-end with a throwaway order. Never touches the
//! purchase store.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::payment::OrderRequest;

use crate::config::PayPalConfig;
use crate::paypal::PaymentGateway;

#[derive(Debug, Clone, Copy, Default)]
pub struct SelfTestOptions {
    /// Also capture the test order (needs a pre-approved sandbox order to pass)
    pub capture: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelfTestStep {
    pub name: &'static str,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfTestReport {
    pub success: bool,
    pub environment: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub steps: Vec<SelfTestStep>,
}

impl SelfTestReport {
    fn push(&mut self, name: &'static str, ok: bool, detail: impl Into<String>) {
        self.success &= ok;
        self.steps.push(SelfTestStep {
            name,
            ok,
            detail: detail.into(),
        });
    }
}

/// Fail fast when credentials are absent. Returns the missing keys.
pub fn readiness(config: &PayPalConfig) -> Result<(), Vec<&'static str>> {
    let missing = config.missing_keys();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

fn probe_request() -> OrderRequest {
    OrderRequest {
        item_id: "self-test".into(),
        user_id: "self-test".into(),
        amount: Decimal::new(100, 2),
        user_email: "self-test@reel.invalid".into(),
        item_title: "Integration self-test".into(),
    }
}

/// create → status query → (optional) capture
pub async fn run(
    gateway: &dyn PaymentGateway,
    environment: &'static str,
    options: SelfTestOptions,
) -> SelfTestReport {
    let mut report = SelfTestReport {
        success: true,
        environment,
        order_id: None,
        steps: Vec::new(),
    };

    let order_id = match gateway.create_order(&probe_request()).await {
        Ok(order) => match order.order_id {
            Some(id) => {
                report.push(
                    "create_order",
                    true,
                    format!("status={}", order.status.as_deref().unwrap_or("unknown")),
                );
                id
            }
            None => {
                report.push("create_order", false, "order created without id");
                return report;
            }
        },
        Err(e) => {
            report.push("create_order", false, e.to_string());
            return report;
        }
    };
    report.order_id = Some(order_id.clone());

    match gateway.query_order_status(&order_id).await {
        Ok(completed) => report.push("query_status", true, format!("completed={completed}")),
        Err(e) => report.push("query_status", false, e.to_string()),
    }

    if options.capture {
        match gateway.capture_order(&order_id).await {
            Ok(payment) => report.push("capture_order", true, format!("status={}", payment.status)),
            Err(e) => report.push("capture_order", false, e.to_string()),
        }
    }

    tracing::info!(
        success = report.success,
        order_id = %order_id,
        "PayPal self-test finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayPalMode;
    use crate::paypal::GatewayError;
    use async_trait::async_trait;
    use shared::payment::{CapturedPayment, CreationMethod, PendingOrder};

    struct ProbeGateway {
        create_ok: bool,
        status_ok: bool,
    }

    #[async_trait]
    impl PaymentGateway for ProbeGateway {
        async fn create_order(&self, _: &OrderRequest) -> Result<PendingOrder, GatewayError> {
            if !self.create_ok {
                return Err(GatewayError::Rejected {
                    status: 401,
                    message: "Client Authentication failed".into(),
                });
            }
            Ok(PendingOrder {
                order_id: Some("T1".into()),
                status: Some("CREATED".into()),
                approval_url: None,
                method: CreationMethod::Api,
            })
        }

        async fn create_redirect_order(&self, _: &OrderRequest) -> Result<String, GatewayError> {
            unreachable!("self-test never uses the redirect strategy")
        }

        async fn capture_order(&self, _: &str) -> Result<CapturedPayment, GatewayError> {
            Err(GatewayError::Rejected {
                status: 422,
                message: "ORDER_NOT_APPROVED".into(),
            })
        }

        async fn query_order_status(&self, _: &str) -> Result<bool, GatewayError> {
            if self.status_ok {
                Ok(false)
            } else {
                Err(GatewayError::Malformed("boom".into()))
            }
        }
    }

    #[test]
    fn test_readiness_lists_missing_keys() {
        let cfg = PayPalConfig {
            client_id: String::new(),
            client_secret: "s".into(),
            mode: PayPalMode::Sandbox,
            business_email: None,
            currency: "USD".into(),
            public_base_url: "http://localhost:3000".into(),
            http_timeout_secs: 30,
            self_test_capture: false,
        };
        assert_eq!(readiness(&cfg), Err(vec!["PAYPAL_CLIENT_ID"]));
    }

    #[tokio::test]
    async fn test_passes_without_capture() {
        let gw = ProbeGateway {
            create_ok: true,
            status_ok: true,
        };
        let report = run(&gw, "sandbox", SelfTestOptions::default()).await;
        assert!(report.success);
        assert_eq!(report.order_id.as_deref(), Some("T1"));
        assert_eq!(report.steps.len(), 2);
    }

    #[tokio::test]
    async fn test_create_failure_stops_early() {
        let gw = ProbeGateway {
            create_ok: false,
            status_ok: true,
        };
        let report = run(&gw, "sandbox", SelfTestOptions::default()).await;
        assert!(!report.success);
        assert_eq!(report.steps.len(), 1);
        assert!(report.steps[0].detail.contains("Client Authentication failed"));
    }

    #[tokio::test]
    async fn test_capture_step_is_optional() {
        let gw = ProbeGateway {
            create_ok: true,
            status_ok: true,
        };
        let report = run(&gw, "sandbox", SelfTestOptions { capture: true }).await;
        assert!(!report.success);
        assert_eq!(report.steps.last().unwrap().name, "capture_order");
    }

    #[tokio::test]
    async fn test_status_failure_fails_report() {
        let gw = ProbeGateway {
            create_ok: true,
            status_ok: false,
        };
        let report = run(&gw, "sandbox", SelfTestOptions::default()).await;
        assert!(!report.success);
        assert!(!report.steps[1].ok);
    }
}
