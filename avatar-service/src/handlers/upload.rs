use crate::dtos::{UploadRequest, UploadResponse};
use crate::services::image::{self, AVATAR_CONTENT_TYPE};
use crate::services::metrics;
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, response::Response, Json};
use service_core::error::AppError;
use service_core::middleware::CorsPolicy;

pub const UPLOAD_CORS: CorsPolicy = CorsPolicy::new("POST, OPTIONS", "Content-Type");

pub async fn upload_preflight() -> Response {
    UPLOAD_CORS.preflight()
}

/// Store a base64 avatar and return where it can be fetched.
///
/// Only an absent or empty `image` answers 400. Unparseable bodies, payloads
/// that are not base64 and storage failures answer 500.
#[tracing::instrument(name = "upload_avatar", skip_all)]
pub async fn upload_avatar(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UploadResponse>, AppError> {
    let result = store(&state, &body).await;
    metrics::record_upload(match &result {
        Ok(_) => "stored",
        Err(AppError::BadRequest(_)) => "rejected",
        Err(_) => "failed",
    });
    result.map(Json)
}

async fn store(state: &AppState, body: &[u8]) -> Result<UploadResponse, AppError> {
    let request = UploadRequest::from_body(body).map_err(|e| {
        tracing::warn!(error = %e, "Malformed upload body");
        AppError::InternalError(anyhow::anyhow!("Invalid JSON body: {}", e))
    })?;

    let encoded = request
        .image()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No image provided")))?;

    let data = image::decode_image(encoded).map_err(|e| {
        tracing::warn!(error = %e, "Undecodable avatar payload");
        AppError::InternalError(anyhow::anyhow!(e))
    })?;

    let key = image::avatar_key(&state.config.storage.key_prefix);
    let size = data.len();

    state
        .storage
        .upload(&key, data, AVATAR_CONTENT_TYPE)
        .await
        .map_err(|e| {
            tracing::error!(key = %key, error = %e, "Failed to store avatar");
            e
        })?;

    metrics::record_upload_size(size);
    tracing::info!(key = %key, bytes = size, "Avatar stored");

    Ok(UploadResponse {
        url: state.storage.public_url(&key),
        key,
    })
}
