use secrecy::SecretString;
use service_core::config::{self as core_config, get_env, get_optional_env, get_parsed_env};
use service_core::error::AppError;

const DEFAULT_S3_ENDPOINT: &str = "https://bucket.poehali.dev";
const DEFAULT_S3_BUCKET: &str = "files";
const DEFAULT_S3_REGION: &str = "us-east-1";
const DEFAULT_KEY_PREFIX: &str = "avatars";
const DEFAULT_CDN_BASE_URL: &str = "https://cdn.poehali.dev/projects";
const DEFAULT_LOCAL_PATH: &str = "storage";

/// Base64 bodies are a third larger than the image they carry.
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AvatarConfig {
    pub common: core_config::Config,
    pub storage: StorageConfig,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub endpoint_url: String,
    pub bucket: String,
    pub region: String,
    pub key_prefix: String,
    pub cdn_base_url: String,
    pub local_path: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<SecretString>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    S3,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::S3,
            endpoint_url: DEFAULT_S3_ENDPOINT.to_string(),
            bucket: DEFAULT_S3_BUCKET.to_string(),
            region: DEFAULT_S3_REGION.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            cdn_base_url: DEFAULT_CDN_BASE_URL.to_string(),
            local_path: DEFAULT_LOCAL_PATH.to_string(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl AvatarConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(AvatarConfig {
            common: common_config,
            storage: StorageConfig {
                backend: get_env("STORAGE_BACKEND", Some("s3"), false)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                endpoint_url: get_env("STORAGE_S3_ENDPOINT", Some(DEFAULT_S3_ENDPOINT), false)?,
                bucket: get_env("STORAGE_S3_BUCKET", Some(DEFAULT_S3_BUCKET), false)?,
                region: get_env("STORAGE_S3_REGION", Some(DEFAULT_S3_REGION), false)?,
                key_prefix: get_env("STORAGE_KEY_PREFIX", Some(DEFAULT_KEY_PREFIX), false)?
                    .trim_matches('/')
                    .to_string(),
                cdn_base_url: get_env("CDN_BASE_URL", Some(DEFAULT_CDN_BASE_URL), false)?
                    .trim_end_matches('/')
                    .to_string(),
                local_path: get_env("STORAGE_LOCAL_PATH", Some(DEFAULT_LOCAL_PATH), false)?,
                access_key_id: get_optional_env("AWS_ACCESS_KEY_ID"),
                secret_access_key: get_optional_env("AWS_SECRET_ACCESS_KEY").map(SecretString::new),
            },
            max_body_bytes: get_parsed_env("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "s3" => Ok(StorageBackend::S3),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}
