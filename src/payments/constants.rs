//! Fixed lookup tables for the Wompi API
//!
//! HTTP methods, transaction states, payment-method codes, base URLs,
//! success status codes and the gateway error-code catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP methods used by the Wompi operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Valid Wompi transaction states
///
/// The set is closed: a response carrying any other value fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Approved,
    Declined,
    Voided,
    Error,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Approved => "APPROVED",
            TransactionStatus::Declined => "DECLINED",
            TransactionStatus::Voided => "VOIDED",
            TransactionStatus::Error => "ERROR",
        }
    }

    /// Whether the gateway will move the transaction out of this state on its own
    pub fn is_final(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical payment methods offered at checkout
///
/// Several logical methods are submitted under the same gateway code:
/// PSE and cash at a Bancolombia correspondent both go out as `CARD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    Card,
    Nequi,
    Pse,
    CashAtBbc,
    BancolombiaTransferButton,
}

impl PaymentMethod {
    /// Method string the gateway accepts in `payment_method.type`
    pub fn gateway_code(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Nequi => "NEQUI",
            PaymentMethod::Pse => "CARD",
            PaymentMethod::CashAtBbc => "CARD",
            PaymentMethod::BancolombiaTransferButton => "BANCOLOMBIA_COLLECT",
        }
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.gateway_code())
    }
}

/// Base URLs for the two Wompi environments
pub struct WompiUrl;

impl WompiUrl {
    pub const SANDBOX_URL: &'static str = "https://sandbox.wompi.co/v1";
    pub const PRODUCTION_URL: &'static str = "https://production.wompi.co/v1";
}

/// Status-code groupings used to classify gateway responses
pub mod http_status {
    /// Codes treated as a successful exchange
    pub const OK_CODES: [u16; 2] = [200, 201];

    pub fn is_ok(status: u16) -> bool {
        OK_CODES.contains(&status)
    }
}

/// Catalogue of error types reported in `error.type` of a gateway error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InputValidationError,
    NotFoundError,
    InvalidAccessToken,
    InvalidPublicKey,
    Unprocessable,
    InternalServerError,
}

impl ErrorCode {
    /// Look up a raw `error.type` string; unknown types yield `None`
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(raw.to_string())).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_codes() {
        assert_eq!(PaymentMethod::Card.gateway_code(), "CARD");
        assert_eq!(PaymentMethod::Nequi.gateway_code(), "NEQUI");
        assert_eq!(PaymentMethod::Pse.gateway_code(), "CARD");
        assert_eq!(PaymentMethod::CashAtBbc.gateway_code(), "CARD");
        assert_eq!(
            PaymentMethod::BancolombiaTransferButton.gateway_code(),
            "BANCOLOMBIA_COLLECT"
        );
    }

    #[test]
    fn test_payment_method_serializes_as_gateway_code() {
        let value = serde_json::to_value(PaymentMethod::Pse).unwrap();
        assert_eq!(value, serde_json::json!("CARD"));
    }

    #[test]
    fn test_transaction_status_rejects_unknown_values() {
        let parsed: TransactionStatus = serde_json::from_str("\"APPROVED\"").unwrap();
        assert_eq!(parsed, TransactionStatus::Approved);
        assert!(serde_json::from_str::<TransactionStatus>("\"REFUNDED\"").is_err());
    }

    #[test]
    fn test_only_pending_is_not_final() {
        assert!(!TransactionStatus::Pending.is_final());
        assert!(TransactionStatus::Declined.is_final());
        assert!(TransactionStatus::Error.is_final());
    }

    #[test]
    fn test_ok_codes() {
        assert!(http_status::is_ok(200));
        assert!(http_status::is_ok(201));
        assert!(!http_status::is_ok(204));
        assert!(!http_status::is_ok(422));
    }

    #[test]
    fn test_error_code_lookup() {
        assert_eq!(
            ErrorCode::parse("INPUT_VALIDATION_ERROR"),
            Some(ErrorCode::InputValidationError)
        );
        assert_eq!(ErrorCode::parse("SOMETHING_NEW"), None);
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(HttpMethod::Post), reqwest::Method::POST);
        assert_eq!(HttpMethod::Get.to_string(), "GET");
    }
}
