//! reel-checkout - PayPal checkout service for the Reel storefront
//!
//! Creates PayPal orders (Orders API, classic checkout URL as fallback),
//! captures them, verifies completion, and records each purchase once.

pub mod api;
pub mod checkout;
pub mod config;
pub mod db;
pub mod error;
pub mod paypal;
pub mod state;

pub use config::Config;
pub use state::AppState;
