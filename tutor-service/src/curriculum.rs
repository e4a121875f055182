//! Course knowledge base and the greeting that opens every session.

use service_core::error::AppError;
use std::path::Path;
use std::sync::Arc;

/// Condensed CAP course notes the tutor is allowed to answer from.
pub const COURSE_CONTENT: &str = include_str!("../assets/curriculum.md");

/// Id of the seeded greeting turn.
pub const WELCOME_TURN_ID: &str = "init-1";

pub const WELCOME_MESSAGE: &str = "Hello! I am your CAP Python Tutor. I can help you with Python Basics, Lists, Sets, Tuples, Functions, NumPy, and Probability distributions as covered in Dr. Ahmed Alia's course. What would you like to review?";

/// Read-only curriculum text, loaded once at startup and shared.
#[derive(Debug, Clone)]
pub struct Curriculum {
    text: Arc<str>,
}

impl Curriculum {
    /// The notes compiled into the binary.
    pub fn embedded() -> Self {
        Self::from_text(COURSE_CONTENT)
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            text: Arc::from(text.trim()),
        }
    }

    /// Load the override file when given, otherwise the embedded notes.
    pub async fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self::embedded());
        };

        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "failed to read curriculum file {}: {}",
                path.display(),
                e
            ))
        })?;

        if text.trim().is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "curriculum file {} is empty",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), bytes = text.len(), "Loaded curriculum override");
        Ok(Self::from_text(&text))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
