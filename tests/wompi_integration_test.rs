//! HTTP-level tests for the Wompi handler
//!
//! Each test starts a local mock server and points the handler at it through
//! the `base_url` override.

use serde_json::{json, Value};
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};
use wompi_client::{
    ErrorCode, PaymentGateway, PaymentMethodDetails, TransactionError, TransactionRequest,
    TransactionStatus, WompiConfig, WompiError, WompiHandler,
};

const KEY: &str = "pub_test_key";
const SECRET: &str = "prv_test_secret";

fn handler_for(server: &MockServer) -> WompiHandler {
    let config = WompiConfig::new(KEY, SECRET, true).with_base_url(format!("{}/v1", server.uri()));
    WompiHandler::new(config).expect("Failed to create handler")
}

fn valid_payload() -> Value {
    json!({
        "acceptance_token": "acc_tok_123",
        "amount_in_cents": 4990000,
        "customer_email": "buyer@example.com",
        "reference": "order-1001",
        "payment_method": { "type": "CARD", "token": "tok_test_1", "installments": 1 },
        "currency": "COP"
    })
}

/// Replies with the submitted body wrapped in `data`, plus gateway-assigned fields
struct EchoTransaction;

impl Respond for EchoTransaction {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut data: Value = serde_json::from_slice(&request.body).unwrap_or(json!({}));
        data["id"] = json!("12-1700000000-10000");
        data["status"] = json!("PENDING");
        data["payment_method_type"] = data["payment_method"]["type"].clone();
        ResponseTemplate::new(201).set_body_json(json!({ "data": data }))
    }
}

#[tokio::test]
async fn test_fetch_acceptance_token_without_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/merchants/{}", KEY)))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": 10,
                "name": "Tienda de prueba",
                "public_key": KEY,
                "accepted_payment_methods": ["CARD", "NEQUI"],
                "presigned_acceptance": {
                    "acceptance_token": "eyJhbGciOiJIUzI1NiJ9",
                    "permalink": "https://wompi.co/wp-content/uploads/terms.pdf",
                    "type": "END_USER_POLICY"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = handler_for(&server).fetch_acceptance_token().await.unwrap();
    assert_eq!(token.acceptance_token(), "eyJhbGciOiJIUzI1NiJ9");
    assert_eq!(token.name.as_deref(), Some("Tienda de prueba"));
    assert_eq!(token.accepted_payment_methods, vec!["CARD", "NEQUI"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_acceptance_token_gateway_error() {
    let server = MockServer::start().await;
    let body = r#"{"error":{"type":"NOT_FOUND_ERROR","reason":"El comercio no existe"}}"#;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(body))
        .mount(&server)
        .await;

    let err = handler_for(&server).fetch_acceptance_token().await.unwrap_err();
    match err {
        WompiError::Gateway(gateway) => {
            assert_eq!(gateway.to_string(), body);
            assert_eq!(gateway.status, Some(404));
            assert_eq!(gateway.code, Some(ErrorCode::NotFoundError));
        }
        other => panic!("expected gateway error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_transaction_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .and(header("Authorization", format!("Bearer {}", SECRET).as_str()))
        .and(body_partial_json(json!({ "reference": "order-1001" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "t1", "status": "APPROVED", "amount_in_cents": 4990000 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tx = handler_for(&server)
        .generate_transaction(&valid_payload())
        .await
        .unwrap();
    assert_eq!(tx.id, "t1");
    assert_eq!(tx.status, TransactionStatus::Approved);
    assert_eq!(tx.status.as_str(), "APPROVED");
    assert_eq!(tx.amount_in_cents, Some(4990000));
}

#[tokio::test]
async fn test_generate_transaction_missing_fields_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let handler = handler_for(&server);
    for field in [
        "acceptance_token",
        "amount_in_cents",
        "customer_email",
        "reference",
        "payment_method",
    ] {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove(field);

        let err = handler.generate_transaction(&payload).await.unwrap_err();
        match err {
            WompiError::Transaction(TransactionError::MissingFields { missing }) => {
                assert_eq!(missing, vec![field]);
            }
            other => panic!("expected missing fields error, got {:?}", other),
        }
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_transaction_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(1)
        .mount(&server)
        .await;

    let err = handler_for(&server)
        .generate_transaction(&valid_payload())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WompiError::Transaction(TransactionError::Rejected(_))
    ));
    assert_eq!(err.to_string(), "bad request");
    assert_eq!(err.gateway_error().and_then(|e| e.status), Some(400));
}

#[tokio::test]
async fn test_generate_transaction_structured_error_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "error": {
                "type": "INPUT_VALIDATION_ERROR",
                "messages": { "customer_email": ["Debe ser un email valido"] }
            }
        })))
        .mount(&server)
        .await;

    let err = handler_for(&server)
        .generate_transaction(&valid_payload())
        .await
        .unwrap_err();
    assert_eq!(
        err.gateway_error().and_then(|e| e.code),
        Some(ErrorCode::InputValidationError)
    );
}

#[tokio::test]
async fn test_submitted_fields_reflected_in_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .respond_with(EchoTransaction)
        .mount(&server)
        .await;

    let request = TransactionRequest::new(
        "acc_tok_456",
        125000,
        "someone@example.com",
        "order-2002",
        PaymentMethodDetails::nequi("3107654321"),
    );
    let tx = handler_for(&server).create_transaction(request).await.unwrap();

    assert_eq!(tx.acceptance_token.as_deref(), Some("acc_tok_456"));
    assert_eq!(tx.amount_in_cents, Some(125000));
    assert_eq!(tx.customer_email.as_deref(), Some("someone@example.com"));
    assert_eq!(tx.reference.as_deref(), Some("order-2002"));
    assert_eq!(
        tx.payment_method,
        Some(json!({ "type": "NEQUI", "phone_number": "3107654321" }))
    );
    assert_eq!(tx.payment_method_type.as_deref(), Some("NEQUI"));
    assert_eq!(tx.currency.as_deref(), Some("COP"));
    assert_eq!(tx.status, TransactionStatus::Pending);
}

#[tokio::test]
async fn test_unknown_transaction_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "t9", "status": "REFUNDED" }
        })))
        .mount(&server)
        .await;

    let err = handler_for(&server)
        .generate_transaction(&valid_payload())
        .await
        .unwrap_err();
    assert!(matches!(err, WompiError::Serialization { .. }));
}

#[tokio::test]
async fn test_success_status_with_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = handler_for(&server).fetch_acceptance_token().await.unwrap_err();
    assert!(matches!(err, WompiError::Serialization { .. }));
}

#[tokio::test]
async fn test_handler_behind_trait_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "t3", "status": "DECLINED", "status_message": "Fondos insuficientes" }
        })))
        .mount(&server)
        .await;

    let gateway: Box<dyn PaymentGateway> = Box::new(handler_for(&server));
    let tx = gateway.generate_transaction(&valid_payload()).await.unwrap();
    assert_eq!(tx.status, TransactionStatus::Declined);
    assert!(!tx.is_approved());
    assert_eq!(tx.status_message.as_deref(), Some("Fondos insuficientes"));
}

#[tokio::test]
async fn test_key_with_path_characters_never_reaches_gateway() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = WompiConfig::new("../transactions?x=", SECRET, true)
        .with_base_url(format!("{}/v1", server.uri()));
    let result = WompiHandler::new(config);

    assert!(matches!(result, Err(WompiError::Config { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}
