//! Chat endpoints: read the transcript, send a message.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

use crate::render::TurnView;
use crate::services::{RejectReason, SubmitOutcome};
use crate::startup::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub busy: bool,
    pub turns: Vec<TurnView>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub user: TurnView,
    pub assistant: TurnView,
}

pub async fn get_transcript(State(state): State<AppState>) -> Json<TranscriptResponse> {
    let snapshot = state.controller.snapshot().await;
    Json(TranscriptResponse {
        busy: snapshot.busy,
        turns: snapshot.turns.iter().map(TurnView::from).collect(),
    })
}

pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let controller = state.controller.clone();

    // Detached so a dropped connection cannot leave the session Awaiting.
    let outcome = tokio::spawn(async move { controller.submit(&body.text).await })
        .await
        .map_err(|e| {
            tracing::error!("Chat submit task failed: {}", e);
            AppError::InternalError(anyhow::anyhow!("chat submit task failed: {}", e))
        })?;

    match outcome {
        SubmitOutcome::Completed { user, assistant } => Ok(Json(SendMessageResponse {
            user: TurnView::from(&user),
            assistant: TurnView::from(&assistant),
        })),
        SubmitOutcome::Rejected(RejectReason::EmptyInput) => Err(AppError::ValidationError(
            "message text must not be empty".to_string(),
        )),
        SubmitOutcome::Rejected(RejectReason::Busy) => Err(AppError::Conflict(anyhow::anyhow!(
            "the tutor is still answering the previous message"
        ))),
    }
}
