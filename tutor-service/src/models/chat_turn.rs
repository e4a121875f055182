//! A single message in the tutoring conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::curriculum::{WELCOME_MESSAGE, WELCOME_TURN_ID};

/// Who wrote a turn. Serialized with the wire names the chat front-end uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model")]
    Assistant,
}

impl Sender {
    /// Speaker label used when the turn is replayed into a prompt.
    pub fn prompt_role(self) -> &'static str {
        match self {
            Sender::User => "Student",
            Sender::Assistant => "Tutor",
        }
    }
}

/// An immutable chat turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatTurn {
    id: String,
    text: String,
    sender: Sender,
    created_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// The tutor's greeting that opens a fresh session.
    pub fn welcome() -> Self {
        Self {
            id: WELCOME_TURN_ID.to_string(),
            ..Self::assistant(WELCOME_MESSAGE)
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
