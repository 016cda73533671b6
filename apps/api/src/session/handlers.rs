//! HTTP surface of the candidate session flow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

use super::controller::{CandidateIntake, NextQuestion, StartedSession, SubmitOutcome};

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub link_token: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: Uuid,
    pub total: usize,
}

/// POST /api/v1/sessions
pub async fn handle_start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<StartSessionResponse>), AppError> {
    let StartedSession { session_id, total } = state
        .sessions
        .start(
            &req.link_token,
            CandidateIntake {
                name: req.name,
                email: req.email,
                phone: req.phone,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(StartSessionResponse { session_id, total }),
    ))
}

/// POST /api/v1/sessions/:id/next
///
/// A POST because reading a question advances the cursor.
pub async fn handle_next_question(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<NextQuestion>, AppError> {
    let next = state.sessions.next_question(session_id).await?;
    Ok(Json(next))
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub index: usize,
    pub answer: String,
}

/// POST /api/v1/sessions/:id/answers
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitOutcome>, AppError> {
    let outcome = state
        .sessions
        .submit_answer(session_id, req.index, &req.answer)
        .await?;
    Ok(Json(outcome))
}
