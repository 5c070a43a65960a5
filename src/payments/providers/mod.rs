//! Payment gateway implementations
//!
//! Concrete implementations of the PaymentGateway trait.

pub mod wompi;

pub use wompi::{validate_transaction_payload, Operation, WompiHandler, REQUIRED_TRANSACTION_FIELDS};
