//! Evaluation Trigger: scores every answered-but-unscored slot of one
//! candidate's attempt. Each slot is persisted independently so a mid-batch
//! failure leaves earlier verdicts in place and the batch safely re-runnable.

use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::store::Store;

use super::{AnswerEvaluator, Evaluation};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct EvaluationSummary {
    /// Slots scored during this run.
    pub evaluated: usize,
    /// Slots skipped: unanswered, or already scored from a previous run.
    pub skipped: usize,
}

/// Calls the evaluator through the degrade-to-sentinel policy: the result is
/// always a verdict, clamped into the 0-100 score range.
pub async fn evaluate_with_sentinel(
    evaluator: &dyn AnswerEvaluator,
    question: &str,
    answer: &str,
) -> Evaluation {
    match evaluator.evaluate(question, answer).await {
        Ok(mut verdict) => {
            verdict.score = verdict.score.clamp(0.0, 100.0);
            verdict
        }
        Err(e) => {
            warn!("answer evaluation degraded, using sentinel: {e}");
            Evaluation::unavailable()
        }
    }
}

/// Evaluates every slot of the (interview, candidate) pair that has an
/// answer and lacks an ideal answer or score. Evaluator failures are
/// fault-isolated per slot via the sentinel; only storage errors propagate.
pub async fn evaluate_session(
    store: &dyn Store,
    evaluator: &dyn AnswerEvaluator,
    interview_id: Uuid,
    candidate_id: Uuid,
) -> Result<EvaluationSummary, AppError> {
    let slots = store.slots_for_attempt(interview_id, candidate_id).await?;

    let mut summary = EvaluationSummary::default();
    for slot in &slots {
        let answer = match slot.answer_text.as_deref() {
            Some(a) => a,
            None => {
                summary.skipped += 1;
                continue;
            }
        };
        if slot.scored() {
            summary.skipped += 1;
            continue;
        }

        let verdict = evaluate_with_sentinel(evaluator, &slot.question, answer).await;
        store
            .update_slot_evaluation(slot.id, &verdict.ideal_answer, verdict.score)
            .await?;
        summary.evaluated += 1;
    }

    Ok(summary)
}
