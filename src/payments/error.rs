use serde::Deserialize;
use thiserror::Error;

use crate::payments::constants::ErrorCode;

pub type WompiResult<T> = Result<T, WompiError>;

/// Non-success response from the gateway
///
/// Displays as the raw response body so callers can surface it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{body}")]
pub struct GatewayError {
    pub status: Option<u16>,
    pub body: String,
    pub code: Option<ErrorCode>,
}

impl GatewayError {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            status: None,
            body: body.into(),
            code: None,
        }
    }

    /// Build from an HTTP response, picking up `error.type` when the body carries one
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let code = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| ErrorCode::parse(&envelope.error.kind));

        Self {
            status: Some(status),
            body,
            code,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: String,
}

/// Failure of a transaction-creation call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("Required keys are not provided")]
    MissingFields { missing: Vec<&'static str> },

    #[error(transparent)]
    Rejected(GatewayError),
}

impl TransactionError {
    pub fn missing_fields(missing: Vec<&'static str>) -> Self {
        Self::MissingFields { missing }
    }

    /// Raw gateway error, when the gateway was reached
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            TransactionError::Rejected(err) => Some(err),
            TransactionError::MissingFields { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum WompiError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl WompiError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn network_error(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Gateway error carried by this failure, for either operation
    pub fn gateway_error(&self) -> Option<&GatewayError> {
        match self {
            WompiError::Gateway(err) => Some(err),
            WompiError::Transaction(err) => err.gateway_error(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WompiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WompiError::network_error(format!("Request timed out: {}", err))
        } else {
            WompiError::network_error(format!("Request error: {}", err))
        }
    }
}

impl From<serde_json::Error> for WompiError {
    fn from(err: serde_json::Error) -> Self {
        WompiError::serialization_error(format!("JSON error: {}", err))
    }
}
