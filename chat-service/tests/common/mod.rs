#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chat_service::config::{ChatConfig, OpenAiConfig};
use http_body_util::BodyExt;
use secrecy::SecretString;
use service_core::config::Config as CoreConfig;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "sk-test-key";

/// Config with a random port and no API key.
pub fn test_config() -> ChatConfig {
    ChatConfig {
        common: CoreConfig { port: 0 },
        openai: OpenAiConfig::default(),
    }
}

/// Config pointing the real provider at `api_base`.
pub fn upstream_config(api_base: &str) -> ChatConfig {
    ChatConfig {
        common: CoreConfig { port: 0 },
        openai: OpenAiConfig {
            api_key: Some(SecretString::new(TEST_API_KEY.to_string())),
            api_base: api_base.to_string(),
            timeout_secs: 5,
            ..OpenAiConfig::default()
        },
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

/// Drive one request through the router in process.
pub async fn send(app: Router, method: Method, body: impl Into<Body>) -> TestResponse {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn chat_body(message: &str) -> String {
    serde_json::json!({
        "messages": [
            { "role": "assistant", "content": "Привет! Чем помочь?" },
            { "role": "user", "content": message }
        ]
    })
    .to_string()
}

/// A request the upstream stub received.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// In-process stand-in for the chat completion API.
pub struct UpstreamStub {
    pub api_base: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl UpstreamStub {
    pub async fn spawn(status: StatusCode, body: impl Into<String>) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            body: body.into(),
            captured: captured.clone(),
        };

        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind upstream stub");
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            api_base: format!("http://127.0.0.1:{}/v1", port),
            captured,
        }
    }

    /// Stub answering 200 with a single choice.
    pub async fn replying(content: &str) -> Self {
        let body = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 42, "completion_tokens": 3, "total_tokens": 45 }
        });
        Self::spawn(StatusCode::OK, body.to_string()).await
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

async fn completions(State(stub): State<StubState>, headers: HeaderMap, body: Bytes) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

    stub.captured
        .lock()
        .unwrap()
        .push(CapturedRequest {
            authorization,
            body,
        });

    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body,
    )
        .into_response()
}
