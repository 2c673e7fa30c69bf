use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Default model tier used by every task; `/api/chat` may override per
/// request.
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct TutorConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub openai: OpenAiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    /// API credential. May be empty: absence is reported by the health
    /// check, and requests then fail upstream rather than at startup.
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
}

impl TutorConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(TutorConfig {
            common,
            openai: OpenAiSettings {
                api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_API_BASE), is_prod)?,
                chat_model: get_env("TUTOR_CHAT_MODEL", Some(DEFAULT_CHAT_MODEL), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
