//! Wompi payment gateway implementation
//!
//! This module provides integration with Wompi's REST API: fetching the
//! merchant acceptance token and creating transactions. Every operation is a
//! single request/response exchange with no retries.

use crate::config::WompiConfig;
use crate::payments::constants::{http_status, HttpMethod, WompiUrl};
use crate::payments::error::{GatewayError, TransactionError, WompiError, WompiResult};
use crate::payments::traits::PaymentGateway;
use crate::payments::types::{AcceptanceToken, DataEnvelope, Transaction, TransactionRequest};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

/// Fields every transaction payload must carry, checked in this order
pub const REQUIRED_TRANSACTION_FIELDS: [&str; 5] = [
    "acceptance_token",
    "amount_in_cents",
    "customer_email",
    "reference",
    "payment_method",
];

/// Gateway operations supported by the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Merchant lookup returning the acceptance token
    AcceptanceTokenFetch,
    /// Payment submission
    TransactionCreate,
}

impl Operation {
    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::AcceptanceTokenFetch => HttpMethod::Get,
            Operation::TransactionCreate => HttpMethod::Post,
        }
    }

    /// Path relative to the base host; the merchant lookup is keyed by the public key
    pub fn path(&self, key: &str) -> String {
        match self {
            Operation::AcceptanceTokenFetch => format!("merchants/{}", key),
            Operation::TransactionCreate => "transactions".to_string(),
        }
    }

    pub fn authentication_required(&self) -> bool {
        matches!(self, Operation::TransactionCreate)
    }

    /// Wrap a non-success gateway response in this operation's error type
    pub fn reject(&self, err: GatewayError) -> WompiError {
        match self {
            Operation::AcceptanceTokenFetch => WompiError::Gateway(err),
            Operation::TransactionCreate => {
                WompiError::Transaction(TransactionError::Rejected(err))
            }
        }
    }
}

/// Check that every required transaction field is present and not null
///
/// A field sent as JSON `null` is reported as missing, so the gateway never
/// sees an explicit null for a required input. A payload that is not a JSON
/// object is missing every field.
pub fn validate_transaction_payload(payload: &serde_json::Value) -> Result<(), TransactionError> {
    let missing: Vec<&'static str> = REQUIRED_TRANSACTION_FIELDS
        .iter()
        .copied()
        .filter(|field| payload.get(field).map_or(true, |v| v.is_null()))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(TransactionError::missing_fields(missing))
    }
}

/// Log line for a rejected exchange; the body may echo customer data and stays out
fn rejection_summary(operation: Operation, err: &GatewayError) -> String {
    format!(
        "Wompi rejected {:?} with status {}, code {:?}",
        operation,
        err.status.unwrap_or_default(),
        err.code
    )
}

/// Wompi API handler
pub struct WompiHandler {
    key: String,
    authorization: HeaderValue,
    config: WompiConfig,
    client: Client,
}

impl WompiHandler {
    /// Create a handler, failing immediately when credentials are missing
    pub fn new(config: WompiConfig) -> WompiResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            WompiError::config_error(format!("Failed to create HTTP client: {}", e))
        })?;

        let key = config.key.clone().unwrap_or_default();
        let secret = config.secret.as_deref().unwrap_or_default();
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", secret))
            .map_err(|_| WompiError::config_error("Invalid secret for Wompi"))?;
        authorization.set_sensitive(true);

        debug!(
            "Wompi handler initialized: sandbox={}, host={}",
            config.sandbox,
            Self::host_for(&config)
        );

        Ok(Self {
            key,
            authorization,
            config,
            client,
        })
    }

    fn host_for(config: &WompiConfig) -> &str {
        match &config.base_url {
            Some(base_url) => base_url.trim_end_matches('/'),
            None if config.sandbox => WompiUrl::SANDBOX_URL,
            None => WompiUrl::PRODUCTION_URL,
        }
    }

    pub fn config(&self) -> &WompiConfig {
        &self.config
    }

    /// Sandbox or production base URL, unless overridden in config
    pub fn resolve_base_host(&self) -> &str {
        Self::host_for(&self.config)
    }

    pub fn build_target_url(&self, operation_path: &str) -> String {
        format!("{}/{}", self.resolve_base_host(), operation_path)
    }

    /// Add the bearer token when the operation requires it
    pub fn apply_authorization(&self, operation: Operation, mut headers: HeaderMap) -> HeaderMap {
        if operation.authentication_required() {
            headers.insert(AUTHORIZATION, self.authorization.clone());
        }
        headers
    }

    /// Perform one exchange and return the decoded JSON body on success
    ///
    /// Any status outside the OK set is turned into the operation's error
    /// type, carrying the raw response text.
    pub async fn send_request(
        &self,
        operation: Operation,
        payload: Option<String>,
    ) -> WompiResult<serde_json::Value> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let headers = self.apply_authorization(operation, headers);

        let url = self.build_target_url(&operation.path(&self.key));
        debug!("Sending Wompi request: {} {}", operation.method(), url);

        let mut request = self
            .client
            .request(operation.method().into(), &url)
            .headers(headers);
        if let Some(body) = payload {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("Wompi request to {} failed: {}", url, e);
            WompiError::from(e)
        })?;

        let status = response.status().as_u16();
        let response_text = response.text().await?;

        if http_status::is_ok(status) {
            debug!("Wompi responded {} for {:?}", status, operation);
            Ok(serde_json::from_str(&response_text)?)
        } else {
            let err = GatewayError::from_response(status, response_text);
            warn!("{}", rejection_summary(operation, &err));
            debug!("Wompi rejection body: {}", err.body);
            Err(operation.reject(err))
        }
    }

    /// Unwrap the `data` object of a successful response into a record
    fn unwrap_data<T: DeserializeOwned>(body: serde_json::Value) -> WompiResult<T> {
        let envelope: DataEnvelope<T> = serde_json::from_value(body).map_err(|e| {
            error!("Unexpected Wompi response shape: {}", e);
            WompiError::serialization_error(format!("Invalid response format: {}", e))
        })?;
        Ok(envelope.data)
    }

    /// Look up the merchant and return its acceptance token
    pub async fn fetch_acceptance_token(&self) -> WompiResult<AcceptanceToken> {
        info!("Fetching Wompi acceptance token");

        let body = self
            .send_request(Operation::AcceptanceTokenFetch, None)
            .await?;
        let token: AcceptanceToken = Self::unwrap_data(body)?;

        info!(
            "Wompi acceptance token fetched for merchant {:?}",
            token.name.as_deref().unwrap_or("unknown")
        );
        Ok(token)
    }

    /// Validate and submit a raw transaction payload
    ///
    /// Nothing is sent when a required field is missing.
    pub async fn generate_transaction(
        &self,
        payload: &serde_json::Value,
    ) -> WompiResult<Transaction> {
        if let Err(err) = validate_transaction_payload(payload) {
            if let TransactionError::MissingFields { missing } = &err {
                warn!("Wompi transaction payload missing fields: {:?}", missing);
            }
            return Err(err.into());
        }

        info!(
            "Creating Wompi transaction: reference={}, amount_in_cents={}",
            payload["reference"], payload["amount_in_cents"]
        );

        let body = serde_json::to_string(payload)?;
        let response = self
            .send_request(Operation::TransactionCreate, Some(body))
            .await?;
        let transaction: Transaction = Self::unwrap_data(response)?;

        info!(
            "Wompi transaction created: id={}, status={}",
            transaction.id, transaction.status
        );
        Ok(transaction)
    }

    /// Submit a typed transaction request
    pub async fn create_transaction(&self, request: TransactionRequest) -> WompiResult<Transaction> {
        let payload = serde_json::to_value(&request)?;
        self.generate_transaction(&payload).await
    }
}

#[async_trait]
impl PaymentGateway for WompiHandler {
    async fn fetch_acceptance_token(&self) -> WompiResult<AcceptanceToken> {
        WompiHandler::fetch_acceptance_token(self).await
    }

    async fn generate_transaction(&self, payload: &serde_json::Value) -> WompiResult<Transaction> {
        WompiHandler::generate_transaction(self, payload).await
    }
}
