//! Interview Session Controller: the request/response state machine driving
//! one candidate through an interview, one question at a time.
//!
//! Lifecycle: `start` creates the slots and a persisted session record;
//! `next_question` hands out the slot under the cursor and advances it;
//! `submit_answer` writes a slot and, once every slot holds an answer,
//! marks the interview used, evaluates the batch, and dispatches a single
//! completion notification.
//!
//! Completion is detected server-side ("all slots answered"), not from the
//! client-supplied index, so out-of-order submission still completes.
//! The cursor advances on read: a client that fetches a question without
//! answering has consumed it, though the slot stays answerable by index.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::session::SessionRow;
use crate::notify::{templates, Notifier};
use crate::store::{NewCandidate, NewSession, NewSlot, Store};

use super::{evaluation, question_bank, AnswerEvaluator, QuestionGenerator};

/// Intake info a candidate submits when opening an interview link.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateIntake {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Handle returned by [`SessionController::start`].
#[derive(Debug, Clone, Serialize)]
pub struct StartedSession {
    pub session_id: Uuid,
    pub total: usize,
}

/// Outcome of a `next_question` exchange. The wire shape
/// (`{"status":"question",...}` / `{"status":"complete"}`) is load-bearing:
/// candidate UIs poll on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NextQuestion {
    Question {
        question: String,
        index: usize,
        total: usize,
    },
    Complete,
}

/// Outcome of a `submit_answer` exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitOutcome {
    Accepted,
    Completed,
}

#[derive(Clone)]
pub struct SessionController {
    store: Arc<dyn Store>,
    generator: Arc<dyn QuestionGenerator>,
    evaluator: Arc<dyn AnswerEvaluator>,
    notifier: Arc<dyn Notifier>,
}

impl SessionController {
    pub fn new(
        store: Arc<dyn Store>,
        generator: Arc<dyn QuestionGenerator>,
        evaluator: Arc<dyn AnswerEvaluator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            generator,
            evaluator,
            notifier,
        }
    }

    /// Starts a session for the interview behind `link_token`. Rejects a
    /// candidate who already has any slot for that interview with
    /// `DuplicateAttempt`; otherwise builds the question bank, bulk-creates
    /// the slots, and returns a fresh session handle.
    pub async fn start(
        &self,
        link_token: &str,
        intake: CandidateIntake,
    ) -> Result<StartedSession, AppError> {
        if intake.name.trim().is_empty()
            || intake.email.trim().is_empty()
            || intake.phone.trim().is_empty()
        {
            return Err(AppError::Validation(
                "name, email, and phone are required".to_string(),
            ));
        }

        let interview = self
            .store
            .interview_by_link(link_token)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No interview found for link {link_token}")))?;

        let candidate = match self.store.candidate_by_email(intake.email.trim()).await? {
            Some(existing) => existing,
            None => {
                self.store
                    .insert_candidate(NewCandidate {
                        name: intake.name.trim().to_string(),
                        email: intake.email.trim().to_string(),
                        phone: Some(intake.phone.trim().to_string()),
                    })
                    .await?
            }
        };

        let attempted = self
            .store
            .slot_count_for_attempt(interview.id, candidate.id)
            .await?;
        if attempted > 0 {
            return Err(AppError::DuplicateAttempt(
                "this candidate has already attended this interview".to_string(),
            ));
        }

        let questions = question_bank::build(&interview, self.generator.as_ref()).await;
        if questions.is_empty() {
            return Err(AppError::Validation(
                "interview has no questions configured".to_string(),
            ));
        }

        let slots = self
            .store
            .insert_slots(
                questions
                    .into_iter()
                    .enumerate()
                    .map(|(position, question)| NewSlot {
                        interview_id: interview.id,
                        candidate_id: candidate.id,
                        position: position as i32,
                        question,
                    })
                    .collect(),
            )
            .await?;

        let session = self
            .store
            .insert_session(NewSession {
                interview_id: interview.id,
                candidate_id: candidate.id,
                link_token: interview.link_token.clone(),
                slot_ids: slots.iter().map(|s| s.id).collect(),
            })
            .await?;

        info!(
            session = %session.id,
            interview = %interview.id,
            candidate = %candidate.id,
            total = session.total(),
            "interview session started"
        );

        Ok(StartedSession {
            session_id: session.id,
            total: session.total(),
        })
    }

    /// Returns the question under the cursor and advances it by one.
    /// Past the end this returns `Complete` without mutating anything, so
    /// clients can poll it idempotently.
    pub async fn next_question(&self, session_id: Uuid) -> Result<NextQuestion, AppError> {
        let session = self.require_session(session_id).await?;
        let index = session.current_index.max(0) as usize;
        let total = session.total();

        // A completed session stays complete even when the cursor never
        // reached the end (answers can arrive out of order).
        if session.completed || index >= total {
            return Ok(NextQuestion::Complete);
        }

        let slot_id = session.slot_ids[index];
        let slot = self.store.slot_by_id(slot_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("question slot {slot_id} no longer exists"))
        })?;

        self.store
            .update_session_cursor(session.id, (index + 1) as i32)
            .await?;

        Ok(NextQuestion::Question {
            question: slot.question,
            index,
            total,
        })
    }

    /// Writes `answer` into the slot at `index` (last write wins, so retry
    /// after a lost acknowledgement is safe). When every slot of the session
    /// holds an answer and the session is not yet completed: marks the
    /// interview used, evaluates all unscored slots, marks the session
    /// completed, and dispatches one completion notification off the
    /// synchronous path.
    pub async fn submit_answer(
        &self,
        session_id: Uuid,
        index: usize,
        answer: &str,
    ) -> Result<SubmitOutcome, AppError> {
        let session = self.require_session(session_id).await?;
        let total = session.total();
        if index >= total {
            return Err(AppError::InvalidIndex { index, total });
        }

        self.store
            .update_slot_answer(session.slot_ids[index], answer)
            .await?;

        if session.completed {
            return Ok(SubmitOutcome::Completed);
        }

        let slots = self
            .store
            .slots_for_attempt(session.interview_id, session.candidate_id)
            .await?;
        if !slots.iter().all(|s| s.answered()) {
            return Ok(SubmitOutcome::Accepted);
        }

        self.complete_session(&session).await?;
        Ok(SubmitOutcome::Completed)
    }

    /// One-shot completion path: used flag, evaluation batch, completed
    /// flag, then the async notification. The completed flag is persisted
    /// only after evaluation succeeds, so a mid-batch storage failure leaves
    /// the session re-runnable (already-scored slots are skipped on
    /// re-entry).
    async fn complete_session(&self, session: &SessionRow) -> Result<(), AppError> {
        self.store.mark_interview_used(session.interview_id).await?;

        let summary = evaluation::evaluate_session(
            self.store.as_ref(),
            self.evaluator.as_ref(),
            session.interview_id,
            session.candidate_id,
        )
        .await?;

        self.store.mark_session_completed(session.id).await?;

        info!(
            session = %session.id,
            evaluated = summary.evaluated,
            skipped = summary.skipped,
            "interview session completed"
        );

        let candidate = self.store.candidate_by_id(session.candidate_id).await?;
        let interview = self.store.interview_by_id(session.interview_id).await?;
        if let (Some(candidate), Some(interview)) = (candidate, interview) {
            let (subject, body) = templates::interview_completed(&candidate.name, &interview);
            let notifier = Arc::clone(&self.notifier);
            let recipient = candidate.email.clone();
            tokio::spawn(async move {
                if let Err(e) = notifier.send(&recipient, &subject, &body, None).await {
                    warn!("failed to send completion email to {recipient}: {e}");
                }
            });
        }

        Ok(())
    }

    async fn require_session(&self, session_id: Uuid) -> Result<SessionRow, AppError> {
        self.store
            .session_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
    }
}
