//! Client for the Wompi payment gateway
//!
//! Fetches merchant acceptance tokens and creates transactions, mapping
//! responses into typed records and failures into typed errors.

pub mod config;
pub mod payments;

pub use config::WompiConfig;
pub use payments::constants::{ErrorCode, HttpMethod, PaymentMethod, TransactionStatus, WompiUrl};
pub use payments::error::{GatewayError, TransactionError, WompiError, WompiResult};
pub use payments::providers::{Operation, WompiHandler};
pub use payments::traits::PaymentGateway;
pub use payments::types::{
    AcceptanceToken, PaymentMethodDetails, PresignedAcceptance, Transaction, TransactionRequest,
};
