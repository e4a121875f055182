//! Completion client: one remote call per student message.
//!
//! Failures never propagate to the session. Each error kind has a fixed,
//! user-safe reply that is shown as an ordinary tutor message.

use std::sync::Arc;

use secrecy::ExposeSecret;
use thiserror::Error;

use super::prompt::CompletionRequest;
use super::providers::gemini::{GeminiConfig, GeminiTextProvider};
use super::providers::{ProviderError, TextProvider};
use crate::config::TutorConfig;

pub const MISSING_KEY_REPLY: &str = "Error: API Key configuration missing. Please ensure API_KEY is set in your environment variables.";

pub const TRANSPORT_FAILURE_REPLY: &str =
    "Error: Unable to connect to the AI tutor. Please check your API key or try again later.";

pub const EMPTY_RESPONSE_REPLY: &str =
    "I'm sorry, I couldn't generate a response based on the course material.";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("API key configuration missing")]
    Configuration,

    #[error("completion request failed: {0}")]
    Transport(#[source] ProviderError),

    #[error("completion returned no text")]
    EmptyResponse,
}

impl CompletionError {
    /// The text the student sees in place of an answer.
    pub fn user_message(&self) -> &'static str {
        match self {
            CompletionError::Configuration => MISSING_KEY_REPLY,
            CompletionError::Transport(_) => TRANSPORT_FAILURE_REPLY,
            CompletionError::EmptyResponse => EMPTY_RESPONSE_REPLY,
        }
    }
}

impl From<ProviderError> for CompletionError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(_) => CompletionError::Configuration,
            // A blocked answer is a reply with no usable text.
            ProviderError::ContentFiltered => CompletionError::EmptyResponse,
            other => CompletionError::Transport(other),
        }
    }
}

/// Owns the provider handle; `None` means no credential was configured.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Option<Arc<dyn TextProvider>>,
}

impl CompletionClient {
    /// Build the Gemini-backed client, or an unconfigured one if no key is set.
    pub fn from_config(config: &TutorConfig) -> Result<Self, ProviderError> {
        let Some(api_key) = config
            .gemini
            .api_key
            .clone()
            .filter(|key| !key.expose_secret().trim().is_empty())
        else {
            tracing::warn!("API key not found; tutor replies will report the missing key");
            return Ok(Self::unconfigured());
        };

        let provider = GeminiTextProvider::new(GeminiConfig::new(
            api_key,
            config.gemini.api_base.clone(),
        ))?;

        tracing::info!(model = %provider.model(), "Initialized Gemini text provider");
        Ok(Self::with_provider(Arc::new(provider)))
    }

    pub fn with_provider(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Issue one completion call. Never retries.
    pub async fn send(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(CompletionError::Configuration)?;

        let response = provider.generate(request).await?;

        tracing::info!(
            model = %provider.model(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = ?response.finish_reason,
            "Completion finished"
        );

        response
            .text
            .filter(|text| !text.is_empty())
            .ok_or(CompletionError::EmptyResponse)
    }

    /// Like [`send`](Self::send), but folds every failure into its reply text.
    pub async fn respond(&self, request: &CompletionRequest) -> String {
        match self.send(request).await {
            Ok(text) => text,
            Err(err) => {
                match &err {
                    CompletionError::Configuration => {
                        tracing::warn!("Completion skipped: API key not configured")
                    }
                    CompletionError::Transport(source) => {
                        tracing::error!(error = %source, "Error communicating with Gemini")
                    }
                    CompletionError::EmptyResponse => {
                        tracing::warn!("Gemini returned no usable text")
                    }
                }
                err.user_message().to_string()
            }
        }
    }
}
