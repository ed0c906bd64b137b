#![allow(dead_code)]

use avatar_service::config::{AvatarConfig, StorageBackend, StorageConfig};
use avatar_service::services::storage;
use avatar_service::startup::{build_router, AppState};
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use service_core::config::Config as CoreConfig;
use tower::ServiceExt;
use uuid::Uuid;

pub const CDN_BASE: &str = "http://cdn.test/projects";

// 1x1 transparent PNG.
pub const PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub fn local_config(storage_path: &str) -> AvatarConfig {
    AvatarConfig {
        common: CoreConfig { port: 0 },
        storage: StorageConfig {
            backend: StorageBackend::Local,
            local_path: storage_path.to_string(),
            cdn_base_url: CDN_BASE.to_string(),
            ..StorageConfig::default()
        },
        max_body_bytes: 1024 * 1024,
    }
}

/// Router backed by a fresh local storage directory under `target/`.
pub struct TestApp {
    pub router: Router,
    pub storage_path: String,
}

impl TestApp {
    pub async fn local() -> Self {
        Self::with_config(local_config(&format!(
            "target/test-storage-{}",
            Uuid::new_v4()
        )))
        .await
    }

    pub async fn with_config(config: AvatarConfig) -> Self {
        let storage_path = config.storage.local_path.clone();
        let storage = storage::from_config(&config.storage)
            .await
            .expect("Failed to create storage");

        TestApp {
            router: build_router(AppState { config, storage }),
            storage_path,
        }
    }

    pub async fn send(&self, method: Method, body: impl Into<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
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

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.storage_path).await;
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

pub fn image_body(image: &str) -> String {
    serde_json::json!({ "image": image }).to_string()
}

/// Assert `key` is `avatars/<uuid>.png`.
pub fn assert_avatar_key(key: &str) {
    let id = key
        .strip_prefix("avatars/")
        .and_then(|rest| rest.strip_suffix(".png"))
        .unwrap_or_else(|| panic!("Unexpected key shape: {}", key));
    assert!(Uuid::parse_str(id).is_ok(), "Key id is not a UUID: {}", key);
}
