use crate::config::{StorageBackend, StorageConfig};
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use secrecy::ExposeSecret;
use service_core::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError>;

    /// Public address of an uploaded object.
    fn public_url(&self, key: &str) -> String;
}

/// Pick the backend named in configuration.
///
/// S3 without credentials still yields a storage, one that fails every
/// upload, so the function keeps answering preflight and validation errors.
pub async fn from_config(config: &StorageConfig) -> Result<Arc<dyn Storage>, AppError> {
    match config.backend {
        StorageBackend::Local => {
            let storage = LocalStorage::new(&config.local_path, &config.cdn_base_url).await?;
            tracing::info!(path = %config.local_path, "Initialized local storage");
            Ok(Arc::new(storage))
        }
        StorageBackend::S3 => match S3Storage::from_config(config) {
            Ok(storage) => {
                tracing::info!(
                    endpoint = %config.endpoint_url,
                    bucket = %config.bucket,
                    "Initialized S3 storage"
                );
                Ok(Arc::new(storage))
            }
            Err(missing) => {
                tracing::warn!(missing, "S3 credentials missing; uploads will fail");
                Ok(Arc::new(UnconfiguredStorage { missing }))
            }
        },
    }
}

pub struct LocalStorage {
    base_path: PathBuf,
    cdn_base_url: String,
}

impl LocalStorage {
    pub async fn new(
        base_path: impl Into<PathBuf>,
        cdn_base_url: impl Into<String>,
    ) -> Result<Self, AppError> {
        let base_path = base_path.into();
        if !base_path.exists() {
            fs::create_dir_all(&base_path).await?;
        }
        Ok(Self {
            base_path,
            cdn_base_url: cdn_base_url.into(),
        })
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<(), AppError> {
        let path = self.base_path.join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, data).await?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/local/bucket/{}", self.cdn_base_url, key)
    }
}

pub struct S3Storage {
    client: S3Client,
    bucket: String,
    access_key_id: String,
    cdn_base_url: String,
}

impl S3Storage {
    pub fn new(
        client: S3Client,
        bucket: String,
        access_key_id: String,
        cdn_base_url: String,
    ) -> Self {
        Self {
            client,
            bucket,
            access_key_id,
            cdn_base_url,
        }
    }

    /// Static-credential client against the configured endpoint.
    /// Errors with the name of the first missing credential variable.
    pub fn from_config(config: &StorageConfig) -> Result<Self, &'static str> {
        let access_key_id = config.access_key_id.clone().ok_or("AWS_ACCESS_KEY_ID")?;
        let secret_access_key = config
            .secret_access_key
            .as_ref()
            .ok_or("AWS_SECRET_ACCESS_KEY")?;

        let credentials = Credentials::new(
            access_key_id.clone(),
            secret_access_key.expose_secret().clone(),
            None,
            None,
            "avatar-service",
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint_url.clone())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        Ok(Self::new(
            S3Client::from_conf(s3_config),
            config.bucket.clone(),
            access_key_id,
            config.cdn_base_url.clone(),
        ))
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                AppError::InternalError(anyhow::anyhow!(
                    "S3 upload failed: {}",
                    aws_sdk_s3::error::DisplayErrorContext(&e)
                ))
            })?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}/bucket/{}",
            self.cdn_base_url, self.access_key_id, key
        )
    }
}

/// Stand-in when S3 credentials are absent.
pub struct UnconfiguredStorage {
    missing: &'static str,
}

#[async_trait]
impl Storage for UnconfiguredStorage {
    async fn upload(&self, _key: &str, _data: Vec<u8>, _content_type: &str) -> Result<(), AppError> {
        Err(AppError::InternalError(anyhow::anyhow!(
            "{} is not set",
            self.missing
        )))
    }

    fn public_url(&self, key: &str) -> String {
        key.to_string()
    }
}
