//! Application startup and lifecycle management.

use crate::config::ChatConfig;
use crate::handlers;
use crate::services::providers::openai::OpenAiProvider;
use crate::services::{ChatProvider, GenerationParams};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use service_core::error::{method_not_allowed, AppError};
use service_core::middleware::{allow_any_origin, metrics_middleware, request_id_middleware};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ChatConfig,
    /// `None` when no API key is configured.
    pub provider: Option<Arc<dyn ChatProvider>>,
}

impl AppState {
    /// Pick the upstream provider from configuration.
    pub fn from_config(config: ChatConfig) -> Result<Self, AppError> {
        let provider: Option<Arc<dyn ChatProvider>> = if config.openai.has_api_key() {
            let provider = OpenAiProvider::new(&config.openai)
                .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
            tracing::info!(
                model = %config.openai.model,
                api_base = %config.openai.api_base,
                "Initialized OpenAI provider"
            );
            Some(Arc::new(provider) as Arc<dyn ChatProvider>)
        } else {
            tracing::warn!("No OPENAI_API_KEY configured; serving setup instructions");
            None
        };

        Ok(Self { config, provider })
    }

    pub fn with_provider(config: ChatConfig, provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            config,
            provider: Some(provider),
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.config.openai.temperature,
            max_tokens: self.config.openai.max_tokens,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::chat)
                .options(handlers::chat_preflight)
                .fallback(method_not_allowed),
        )
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(allow_any_origin())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: ChatConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config)?;
        Self::build_with_state(state).await
    }

    /// Build around a prepared state, e.g. one holding a mock provider.
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Chat service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }

    pub async fn run_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(signal)
            .await
    }
}
