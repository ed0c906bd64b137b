use secrecy::{ExposeSecret, SecretString};
use service_core::config::{self as core_config, get_env, get_optional_env, get_parsed_env};
use service_core::error::AppError;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub common: core_config::Config,
    pub openai: OpenAiConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Absent key is not a startup error: every chat request answers with
    /// setup instructions instead.
    pub api_key: Option<SecretString>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OpenAiConfig {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().is_empty())
    }
}

impl ChatConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = core_config::is_production();

        let config = ChatConfig {
            common: common_config,
            openai: OpenAiConfig {
                api_key: get_optional_env("OPENAI_API_KEY").map(SecretString::new),
                api_base: get_env("OPENAI_API_BASE", Some(DEFAULT_API_BASE), false)?
                    .trim_end_matches('/')
                    .to_string(),
                model: get_env("OPENAI_MODEL", Some(DEFAULT_MODEL), false)?,
                temperature: get_parsed_env("OPENAI_TEMPERATURE", DEFAULT_TEMPERATURE)?,
                max_tokens: get_parsed_env("OPENAI_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
                timeout_secs: get_parsed_env("OPENAI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            },
        };

        if is_prod && !config.openai.has_api_key() {
            tracing::warn!("OPENAI_API_KEY is not set; chat requests will return setup instructions");
        }

        Ok(config)
    }
}
