//! Wompi request and response types
//!
//! Records are mapped field by field from the `data` object of gateway
//! responses. Fields the gateway adds that are not declared here are dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payments::constants::{PaymentMethod, TransactionStatus};

/// Wrapper every successful Wompi response uses
#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// Terms-acceptance token issued for a merchant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PresignedAcceptance {
    /// Token to attach to the next transaction
    pub acceptance_token: String,
    /// Link to the terms the customer accepts
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Merchant lookup result carrying the acceptance token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcceptanceToken {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub accepted_currencies: Vec<String>,
    #[serde(default)]
    pub accepted_payment_methods: Vec<String>,
    pub presigned_acceptance: PresignedAcceptance,
}

impl AcceptanceToken {
    pub fn acceptance_token(&self) -> &str {
        &self.presigned_acceptance.acceptance_token
    }

    pub fn permalink(&self) -> Option<&str> {
        self.presigned_acceptance.permalink.as_deref()
    }
}

/// Snapshot of a transaction as reported by the gateway at call time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub amount_in_cents: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub acceptance_token: Option<String>,
    #[serde(default)]
    pub payment_method_type: Option<String>,
    #[serde(default)]
    pub payment_method: Option<serde_json::Value>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn is_approved(&self) -> bool {
        self.status == TransactionStatus::Approved
    }
}

/// Payment method descriptor sent as `payment_method`
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodDetails {
    #[serde(rename = "type")]
    pub method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Method-specific fields passed through as-is
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PaymentMethodDetails {
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            token: None,
            installments: None,
            phone_number: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Tokenized card, paid in `installments` instalments
    pub fn card(token: impl Into<String>, installments: u32) -> Self {
        Self {
            token: Some(token.into()),
            installments: Some(installments),
            ..Self::new(PaymentMethod::Card)
        }
    }

    pub fn nequi(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            ..Self::new(PaymentMethod::Nequi)
        }
    }
}

/// Transaction creation body
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub acceptance_token: String,
    /// Amount in the smallest currency unit
    pub amount_in_cents: u64,
    pub currency: String,
    pub customer_email: String,
    /// Merchant-side unique reference
    pub reference: String,
    pub payment_method: PaymentMethodDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_data: Option<serde_json::Value>,
}

impl TransactionRequest {
    pub fn new(
        acceptance_token: impl Into<String>,
        amount_in_cents: u64,
        customer_email: impl Into<String>,
        reference: impl Into<String>,
        payment_method: PaymentMethodDetails,
    ) -> Self {
        Self {
            acceptance_token: acceptance_token.into(),
            amount_in_cents,
            currency: "COP".to_string(),
            customer_email: customer_email.into(),
            reference: reference.into(),
            payment_method,
            redirect_url: None,
            customer_data: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_redirect_url(mut self, redirect_url: impl Into<String>) -> Self {
        self.redirect_url = Some(redirect_url.into());
        self
    }

    /// Buyer details such as `full_name` and `phone_number`
    pub fn with_customer_data(mut self, customer_data: serde_json::Value) -> Self {
        self.customer_data = Some(customer_data);
        self
    }
}
