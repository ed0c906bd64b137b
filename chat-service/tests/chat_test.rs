mod common;

use axum::http::{header, Method, StatusCode};
use chat_service::handlers::chat::MISSING_KEY_MESSAGE;
use chat_service::services::providers::mock::{MockBehavior, MockChatProvider};
use chat_service::startup::{build_router, AppState};
use common::{chat_body, send, test_config};
use std::sync::Arc;

fn mock_app(behavior: MockBehavior) -> axum::Router {
    let provider = Arc::new(MockChatProvider::new(behavior));
    build_router(AppState::with_provider(test_config(), provider))
}

fn unconfigured_app() -> axum::Router {
    build_router(AppState::from_config(test_config()).expect("Failed to build state"))
}

#[tokio::test]
async fn options_returns_preflight_headers() {
    let response = send(unconfigured_app(), Method::OPTIONS, "").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, POST, OPTIONS"
    );
    assert_eq!(
        response.headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, X-User-Id"
    );
    assert_eq!(response.headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn missing_api_key_returns_instructions() {
    let response = send(unconfigured_app(), Method::POST, chat_body("2+2")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        response.headers[header::CONTENT_TYPE],
        "application/json"
    );

    let body = response.json();
    assert_eq!(body["response"], MISSING_KEY_MESSAGE);
    assert_eq!(body["hasTools"], false);
}

#[tokio::test]
async fn arithmetic_message_gets_math_marker() {
    let app = mock_app(MockBehavior::Fixed("2 + 2 = 4".to_string()));
    let response = send(app, Method::POST, chat_body("2+2")).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["response"], "2 + 2 = 4 🔢");
    assert_eq!(body["hasTools"], true);
}

#[tokio::test]
async fn search_question_gets_globe_marker() {
    let app = mock_app(MockBehavior::Fixed("Пушкин".to_string()));
    let response = send(app, Method::POST, chat_body("Кто написал Онегина?")).await;

    let body = response.json();
    assert_eq!(body["response"], "Пушкин 🌐");
    assert_eq!(body["hasTools"], true);
}

#[tokio::test]
async fn plain_message_is_forwarded_unannotated() {
    let response = send(mock_app(MockBehavior::Echo), Method::POST, chat_body("Привет")).await;

    let body = response.json();
    assert_eq!(body["response"], "Mock response for: Привет");
    assert_eq!(body["hasTools"], false);
}

#[tokio::test]
async fn only_last_message_is_used() {
    let body = serde_json::json!({
        "messages": [
            { "role": "user", "content": "посчитай 3*3" },
            { "role": "user", "content": "спасибо" }
        ]
    })
    .to_string();
    let response = send(mock_app(MockBehavior::Echo), Method::POST, body).await;

    let body = response.json();
    assert_eq!(body["response"], "Mock response for: спасибо");
    assert_eq!(body["hasTools"], false);
}

#[tokio::test]
async fn empty_conversation_sends_empty_message() {
    let response = send(mock_app(MockBehavior::Echo), Method::POST, "{}").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["response"], "Mock response for: ");
}

#[tokio::test]
async fn null_messages_send_empty_message() {
    let response = send(
        mock_app(MockBehavior::Echo),
        Method::POST,
        r#"{"messages":null}"#,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["response"], "Mock response for: ");
}

#[tokio::test]
async fn message_role_is_ignored() {
    for body in [
        r#"{"messages":[{"role":null,"content":"2+2"}]}"#,
        r#"{"messages":[{"content":"2+2","role":1}]}"#,
    ] {
        let response = send(mock_app(MockBehavior::Echo), Method::POST, body).await;

        let json = response.json();
        assert_eq!(json["response"], "Mock response for: 2+2 🔢", "body: {}", body);
        assert_eq!(json["hasTools"], true);
    }
}

#[tokio::test]
async fn upstream_error_message_is_reported_with_200() {
    let app = mock_app(MockBehavior::ApiError {
        status: 401,
        message: Some("Incorrect API key provided".to_string()),
    });
    let response = send(app, Method::POST, chat_body("2+2")).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["response"], "Ошибка API: Incorrect API key provided");
    assert_eq!(body["hasTools"], false);
}

#[tokio::test]
async fn upstream_error_without_message_is_unknown() {
    let app = mock_app(MockBehavior::ApiError {
        status: 503,
        message: None,
    });
    let response = send(app, Method::POST, chat_body("hello")).await;

    assert_eq!(response.json()["response"], "Ошибка API: Неизвестная ошибка");
}

#[tokio::test]
async fn transport_failure_is_reported_with_200() {
    let app = mock_app(MockBehavior::NetworkError("connection refused".to_string()));
    let response = send(app, Method::POST, chat_body("2+2")).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["response"], "Произошла ошибка: connection refused");
    assert_eq!(body["hasTools"], false);
}

#[tokio::test]
async fn malformed_body_is_reported_with_200() {
    let response = send(mock_app(MockBehavior::Echo), Method::POST, "{not json").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("Произошла ошибка: "));
    assert_eq!(body["hasTools"], false);
}

#[tokio::test]
async fn other_methods_are_rejected() {
    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = send(unconfigured_app(), method.clone(), "").await;

        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            response.json(),
            serde_json::json!({ "error": "Method not allowed" })
        );
    }
}

#[tokio::test]
async fn responses_carry_request_id() {
    let response = send(unconfigured_app(), Method::POST, "{}").await;
    assert!(response.headers.contains_key("x-request-id"));
}
