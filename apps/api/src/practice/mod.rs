//! Resume-based practice questions: a candidate uploads a PDF resume and
//! receives interview questions tailored to it, with no interview or
//! session record involved.

use anyhow::Context;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// Resume text beyond this length adds cost without adding signal.
const MAX_CONTEXT_CHARS: usize = 6000;

const PLACEHOLDER_QUESTION: &str =
    "Tell me about a project from your resume you are most proud of, and your role in it.";

#[derive(Debug, Serialize)]
pub struct PracticeQuestionsResponse {
    pub questions: Vec<String>,
}

/// POST /api/v1/practice/questions (multipart: `num_questions`, `resume`)
pub async fn handle_practice_questions(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PracticeQuestionsResponse>, AppError> {
    let mut num_questions: Option<usize> = None;
    let mut resume_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("num_questions") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable field: {e}")))?;
                let parsed = text.trim().parse::<usize>().map_err(|_| {
                    AppError::Validation("num_questions must be a positive integer".to_string())
                })?;
                num_questions = Some(parsed);
            }
            Some("resume") => {
                let is_pdf = field
                    .file_name()
                    .map(|n| n.to_ascii_lowercase().ends_with(".pdf"))
                    .unwrap_or(false);
                if !is_pdf {
                    return Err(AppError::Validation(
                        "resume must be a PDF file".to_string(),
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("unreadable upload: {e}")))?;
                resume_bytes = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let count = match num_questions {
        Some(n) if n > 0 => n,
        _ => {
            return Err(AppError::Validation(
                "num_questions must be a positive integer".to_string(),
            ))
        }
    };
    let bytes = resume_bytes
        .ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

    let mut context = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .context("resume extraction task panicked")?
        .map_err(|e| AppError::Validation(format!("could not read the PDF: {e}")))?;
    context.truncate(context.char_indices().nth(MAX_CONTEXT_CHARS).map_or(context.len(), |(i, _)| i));

    if context.trim().is_empty() {
        return Err(AppError::Validation(
            "the PDF contains no extractable text".to_string(),
        ));
    }

    let mut questions = match state.generator.generate(&context, count).await {
        Ok(generated) => generated,
        Err(e) => {
            warn!("practice question generation degraded: {e}");
            Vec::new()
        }
    };
    questions.truncate(count);
    while questions.len() < count {
        questions.push(PLACEHOLDER_QUESTION.to_string());
    }

    info!(count, "practice questions generated");
    Ok(Json(PracticeQuestionsResponse { questions }))
}
