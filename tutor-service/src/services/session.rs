//! Session controller: the Idle/Awaiting state machine around one conversation.
//!
//! At most one completion is in flight. The lock is released while the
//! remote call runs, so readers can still snapshot the transcript.

use tokio::sync::Mutex;

use super::completion::CompletionClient;
use super::prompt::{self, HISTORY_WINDOW};
use crate::curriculum::Curriculum;
use crate::models::{ChatTurn, MessageStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Awaiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyInput,
    Busy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing was appended.
    Rejected(RejectReason),
    Completed { user: ChatTurn, assistant: ChatTurn },
}

/// Point-in-time copy of the session for rendering.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub turns: Vec<ChatTurn>,
    pub busy: bool,
}

struct Session {
    store: MessageStore,
    state: SessionState,
}

pub struct SessionController {
    session: Mutex<Session>,
    client: CompletionClient,
    curriculum: Curriculum,
}

impl SessionController {
    /// A fresh session seeded with the tutor's greeting.
    pub fn new(client: CompletionClient, curriculum: Curriculum) -> Self {
        Self {
            session: Mutex::new(Session {
                store: MessageStore::seeded(),
                state: SessionState::Idle,
            }),
            client,
            curriculum,
        }
    }

    /// Handle one student message.
    ///
    /// Blank input and input arriving while a reply is pending are ignored.
    /// Otherwise the user turn is recorded before the remote call is made,
    /// and an assistant turn (answer or error text) is always recorded after.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let utterance = text.trim();
        if utterance.is_empty() {
            return SubmitOutcome::Rejected(RejectReason::EmptyInput);
        }

        let (user, prior_turns) = {
            let mut session = self.session.lock().await;
            if session.state == SessionState::Awaiting {
                tracing::debug!("Ignoring submit while a reply is pending");
                return SubmitOutcome::Rejected(RejectReason::Busy);
            }

            let prior_turns = session.store.recent(HISTORY_WINDOW).to_vec();
            let user = ChatTurn::user(utterance);
            session.store.append(user.clone());
            session.state = SessionState::Awaiting;
            (user, prior_turns)
        };

        tracing::info!(
            turn_id = %user.id(),
            chars = utterance.chars().count(),
            "Student message accepted"
        );

        let request = prompt::build(self.curriculum.as_str(), &prior_turns, utterance);
        let reply = self.client.respond(&request).await;
        let assistant = ChatTurn::assistant(reply);

        let mut session = self.session.lock().await;
        session.store.append(assistant.clone());
        session.state = SessionState::Idle;

        SubmitOutcome::Completed { user, assistant }
    }

    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.lock().await;
        SessionSnapshot {
            turns: session.store.all().to_vec(),
            busy: session.state == SessionState::Awaiting,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }
}
