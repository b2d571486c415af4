//! Checkout service configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// PayPal environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayPalMode {
    Sandbox,
    Live,
}

impl PayPalMode {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" | "production" => Self::Live,
            _ => Self::Sandbox,
        }
    }

    /// REST API host
    pub fn api_base(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://api-m.sandbox.paypal.com",
            Self::Live => "https://api-m.paypal.com",
        }
    }

    /// Classic checkout host (redirect fallback)
    pub fn checkout_base(&self) -> &'static str {
        match self {
            Self::Sandbox => "https://www.sandbox.paypal.com",
            Self::Live => "https://www.paypal.com",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        }
    }
}

/// PayPal credentials and checkout settings
#[derive(Debug, Clone)]
pub struct PayPalConfig {
    /// REST app client id (env: PAYPAL_CLIENT_ID)
    pub client_id: String,
    /// REST app secret (env: PAYPAL_CLIENT_SECRET)
    pub client_secret: String,
    /// sandbox | live (env: PAYPAL_MODE)
    pub mode: PayPalMode,
    /// Merchant account used by the redirect fallback (env: PAYPAL_BUSINESS_EMAIL)
    pub business_email: Option<String>,
    /// ISO currency code (env: PAYPAL_CURRENCY)
    pub currency: String,
    /// Storefront base URL for return/cancel redirects (env: PUBLIC_BASE_URL)
    pub public_base_url: String,
    /// Transport timeout for PayPal calls (env: PAYPAL_HTTP_TIMEOUT_SECS)
    pub http_timeout_secs: u64,
    /// Capture the self-test order as well (env: PAYPAL_SELF_TEST_CAPTURE)
    pub self_test_capture: bool,
}

impl PayPalConfig {
    pub fn return_url(&self) -> String {
        format!("{}/payment/success", self.public_base_url.trim_end_matches('/'))
    }

    pub fn cancel_url(&self) -> String {
        format!("{}/payment/cancel", self.public_base_url.trim_end_matches('/'))
    }

    /// Names of the credentials that are not set.
    ///
    /// The self-test refuses to contact PayPal unless this is empty.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.client_id.trim().is_empty() {
            missing.push("PAYPAL_CLIENT_ID");
        }
        if self.client_secret.trim().is_empty() {
            missing.push("PAYPAL_CLIENT_SECRET");
        }
        missing
    }
}

/// Checkout server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (in-memory store when unset in development)
    pub database_url: Option<String>,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    pub paypal: PayPalConfig,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    ///
    /// Development falls back to an empty value so the service still starts;
    /// the self-test readiness check reports it.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = std::env::var(name).unwrap_or_default();
        if val.trim().is_empty() && environment != "development" {
            return Err(format!("{name} must be set in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty());
        if database_url.is_none() && environment != "development" {
            return Err(format!("DATABASE_URL must be set in {environment} environment").into());
        }

        let paypal = PayPalConfig {
            client_id: Self::require_secret("PAYPAL_CLIENT_ID", &environment)?,
            client_secret: Self::require_secret("PAYPAL_CLIENT_SECRET", &environment)?,
            mode: PayPalMode::parse(
                &std::env::var("PAYPAL_MODE").unwrap_or_else(|_| "sandbox".into()),
            ),
            business_email: std::env::var("PAYPAL_BUSINESS_EMAIL")
                .ok()
                .filter(|s| !s.is_empty()),
            currency: std::env::var("PAYPAL_CURRENCY").unwrap_or_else(|_| "USD".into()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            http_timeout_secs: std::env::var("PAYPAL_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            self_test_capture: std::env::var("PAYPAL_SELF_TEST_CAPTURE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        };

        Ok(Self {
            database_url,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment,
            paypal,
        })
    }
}
