use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

use crate::services::providers::gemini::DEFAULT_GEMINI_API_BASE;

/// Primary credential variable; `GOOGLE_API_KEY` is accepted as a fallback.
pub const API_KEY_VAR: &str = "API_KEY";
const FALLBACK_API_KEY_VAR: &str = "GOOGLE_API_KEY";

#[derive(Debug, Clone)]
pub struct TutorConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    /// Replaces the embedded course notes when set.
    pub curriculum_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// Missing key is not a startup error; every reply explains it instead.
    pub api_key: Option<Secret<String>>,
    pub api_base: String,
}

impl TutorConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(TutorConfig {
            common,
            gemini: GeminiSettings {
                api_key: optional_env(API_KEY_VAR)
                    .or_else(|| optional_env(FALLBACK_API_KEY_VAR))
                    .map(Secret::new),
                api_base: optional_env("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            },
            curriculum_path: optional_env("TUTOR_CURRICULUM_PATH").map(PathBuf::from),
        })
    }

    /// Configuration for local runs and tests: no credential, port 0.
    pub fn unconfigured() -> Self {
        TutorConfig {
            common: core_config::Config {
                port: 0,
                log_level: "info".to_string(),
                otlp_endpoint: None,
            },
            gemini: GeminiSettings {
                api_key: None,
                api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            },
            curriculum_path: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.gemini.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.gemini.api_base = api_base.into();
        self
    }
}

/// Read an environment variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
