//! Payment gateway trait definitions
//!
//! Defines the interface the host platform's payment layer calls into.

use crate::payments::error::WompiResult;
use crate::payments::types::{AcceptanceToken, Transaction};
use async_trait::async_trait;

/// Trait for gateway clients
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Fetch the merchant's current terms-acceptance token
    ///
    /// The token must be attached to the next transaction request.
    async fn fetch_acceptance_token(&self) -> WompiResult<AcceptanceToken>;

    /// Submit a payment
    ///
    /// # Arguments
    /// * `payload` - JSON object carrying at least `acceptance_token`,
    ///   `amount_in_cents`, `customer_email`, `reference` and `payment_method`
    ///
    /// # Returns
    /// * `Transaction` - Gateway snapshot of the created transaction
    async fn generate_transaction(&self, payload: &serde_json::Value) -> WompiResult<Transaction>;
}
