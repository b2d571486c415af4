//! Order creation strategies, tried in order by the coordinator

use std::sync::Arc;

use async_trait::async_trait;
use shared::payment::{CreationMethod, OrderRequest, PendingOrder};

use crate::paypal::{GatewayError, PaymentGateway};

#[async_trait]
pub trait CreationStrategy: Send + Sync {
    fn method(&self) -> CreationMethod;

    async fn create(&self, request: &OrderRequest) -> Result<PendingOrder, GatewayError>;
}

/// Orders API
pub struct ApiCreation {
    gateway: Arc<dyn PaymentGateway>,
}

impl ApiCreation {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CreationStrategy for ApiCreation {
    fn method(&self) -> CreationMethod {
        CreationMethod::Api
    }

    async fn create(&self, request: &OrderRequest) -> Result<PendingOrder, GatewayError> {
        self.gateway.create_order(request).await
    }
}

/// Classic checkout URL
pub struct RedirectCreation {
    gateway: Arc<dyn PaymentGateway>,
}

impl RedirectCreation {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl CreationStrategy for RedirectCreation {
    fn method(&self) -> CreationMethod {
        CreationMethod::RedirectFallback
    }

    async fn create(&self, request: &OrderRequest) -> Result<PendingOrder, GatewayError> {
        let url = self.gateway.create_redirect_order(request).await?;
        Ok(PendingOrder::redirect(url))
    }
}

/// API first, redirect as fallback.
pub fn default_chain(gateway: Arc<dyn PaymentGateway>) -> Vec<Box<dyn CreationStrategy>> {
    vec![
        Box::new(ApiCreation::new(gateway.clone())),
        Box::new(RedirectCreation::new(gateway)),
    ]
}
