//! HTTP surface of the HR interview-management flow.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::{InterviewKind, InterviewRow};
use crate::session::evaluation::evaluate_with_sentinel;
use crate::state::AppState;
use crate::store::{NewHr, NewInterview};

use super::{analytics, export};

#[derive(Debug, Deserialize)]
pub struct CreateInterviewRequest {
    pub hr_email: String,
    pub company_name: Option<String>,
    pub kind: InterviewKind,
    pub job_title: Option<String>,
    pub job_desc: Option<String>,
    pub custom_questions: Option<String>,
    #[serde(default = "default_num_questions")]
    pub num_questions: i32,
}

fn default_num_questions() -> i32 {
    5
}

/// POST /api/v1/interviews
///
/// Issues a fresh shareable link token. The HR account is created on first
/// use of the email address.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Json(req): Json<CreateInterviewRequest>,
) -> Result<(StatusCode, Json<InterviewRow>), AppError> {
    if req.hr_email.trim().is_empty() {
        return Err(AppError::Validation("hr_email is required".to_string()));
    }
    if req.kind.includes_jd() && req.job_desc.as_deref().unwrap_or("").trim().is_empty() {
        return Err(AppError::Validation(
            "job_desc is required for jd and both interviews".to_string(),
        ));
    }
    if req.kind.includes_custom()
        && req
            .custom_questions
            .as_deref()
            .unwrap_or("")
            .trim()
            .is_empty()
    {
        return Err(AppError::Validation(
            "custom_questions is required for custom and both interviews".to_string(),
        ));
    }
    if req.kind.includes_jd() && req.num_questions <= 0 {
        return Err(AppError::Validation(
            "num_questions must be positive".to_string(),
        ));
    }

    let hr_email = req.hr_email.trim().to_string();
    let hr = match state.store.hr_by_email(&hr_email).await? {
        Some(existing) => existing,
        None => {
            state
                .store
                .insert_hr(NewHr {
                    email: hr_email,
                    company_name: req.company_name.clone(),
                })
                .await?
        }
    };

    let interview = state
        .store
        .insert_interview(NewInterview {
            link_token: Uuid::new_v4().to_string(),
            kind: req.kind,
            job_title: req.job_title,
            company_name: req.company_name,
            job_desc: req.job_desc,
            custom_questions: req.custom_questions,
            num_questions: req.num_questions,
            hr_id: hr.id,
        })
        .await?;

    info!(interview = %interview.id, hr = %hr.id, "interview created");
    Ok((StatusCode::CREATED, Json(interview)))
}

#[derive(Debug, Deserialize)]
pub struct HrQuery {
    pub hr_email: String,
}

async fn require_hr(state: &AppState, email: &str) -> Result<crate::models::people::HrRow, AppError> {
    state
        .store
        .hr_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No HR account for {email}")))
}

/// GET /api/v1/interviews?hr_email=...
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    Query(query): Query<HrQuery>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    let hr = require_hr(&state, &query.hr_email).await?;
    let interviews = state.store.interviews_by_hr(hr.id).await?;
    Ok(Json(interviews))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InterviewRow>, AppError> {
    let interview = state
        .store
        .interview_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;
    Ok(Json(interview))
}

#[derive(Debug, Deserialize)]
pub struct UpdateInterviewRequest {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_desc: Option<String>,
    pub custom_questions: Option<String>,
    pub num_questions: Option<i32>,
}

/// PUT /api/v1/interviews/:id
///
/// Updates the mutable definition fields. The link token and kind are fixed
/// at creation: candidates may already hold the link.
pub async fn handle_update_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInterviewRequest>,
) -> Result<Json<InterviewRow>, AppError> {
    let mut interview = state
        .store
        .interview_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))?;

    if let Some(job_title) = req.job_title {
        interview.job_title = Some(job_title);
    }
    if let Some(company_name) = req.company_name {
        interview.company_name = Some(company_name);
    }
    if let Some(job_desc) = req.job_desc {
        interview.job_desc = Some(job_desc);
    }
    if let Some(custom_questions) = req.custom_questions {
        interview.custom_questions = Some(custom_questions);
    }
    if let Some(num_questions) = req.num_questions {
        if num_questions <= 0 {
            return Err(AppError::Validation(
                "num_questions must be positive".to_string(),
            ));
        }
        interview.num_questions = num_questions;
    }

    state.store.update_interview(&interview).await?;
    Ok(Json(interview))
}

/// DELETE /api/v1/interviews/:id
pub async fn handle_delete_interview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_interview(id).await?;
    info!(interview = %id, "interview deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/interviews/export?hr_email=...
///
/// Streams every interview of the HR, one CSV row per question slot.
pub async fn handle_export_interviews(
    State(state): State<AppState>,
    Query(query): Query<HrQuery>,
) -> Result<impl IntoResponse, AppError> {
    let hr = require_hr(&state, &query.hr_email).await?;
    let interviews = state.store.interviews_by_hr(hr.id).await?;
    let (bytes, rows) = export::export_interviews_csv(state.store.as_ref(), &interviews).await?;
    info!(hr = %hr.id, rows, "interview export generated");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"interview_export.csv\"",
            ),
        ],
        bytes,
    ))
}

/// GET /api/v1/interviews/analytics?hr_email=...
pub async fn handle_analytics(
    State(state): State<AppState>,
    Query(query): Query<HrQuery>,
) -> Result<Json<analytics::HrAnalytics>, AppError> {
    let hr = require_hr(&state, &query.hr_email).await?;
    let analytics = analytics::analytics_for_hr(state.store.as_ref(), hr.id).await?;
    Ok(Json(analytics))
}

#[derive(Debug, Deserialize)]
pub struct EvaluateSlotRequest {
    /// Replacement answer; when absent the stored answer is evaluated.
    pub answer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateSlotResponse {
    pub slot_id: Uuid,
    pub ideal_answer: String,
    pub score: f64,
    /// False when the stored verdict was returned instead of re-running.
    pub evaluated_now: bool,
}

/// POST /api/v1/slots/:id/evaluate
///
/// On-demand evaluation of a single slot. A slot that already carries a
/// verdict returns it unchanged, so repeated calls are free.
pub async fn handle_evaluate_slot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EvaluateSlotRequest>,
) -> Result<Json<EvaluateSlotResponse>, AppError> {
    let slot = state
        .store
        .slot_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Slot {id} not found")))?;

    if let (Some(ideal_answer), Some(score)) = (slot.ideal_answer.clone(), slot.score) {
        return Ok(Json(EvaluateSlotResponse {
            slot_id: slot.id,
            ideal_answer,
            score,
            evaluated_now: false,
        }));
    }

    let answer = match req.answer {
        Some(answer) => {
            state.store.update_slot_answer(slot.id, &answer).await?;
            answer
        }
        None => slot.answer_text.clone().ok_or_else(|| {
            AppError::Validation("slot has no answer to evaluate".to_string())
        })?,
    };

    let verdict = evaluate_with_sentinel(state.evaluator.as_ref(), &slot.question, &answer).await;
    state
        .store
        .update_slot_evaluation(slot.id, &verdict.ideal_answer, verdict.score)
        .await?;

    Ok(Json(EvaluateSlotResponse {
        slot_id: slot.id,
        ideal_answer: verdict.ideal_answer,
        score: verdict.score,
        evaluated_now: true,
    }))
}
