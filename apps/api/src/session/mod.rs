//! The sequential interview session: question bank construction, the
//! per-candidate state machine, and the batched evaluation trigger.

pub mod controller;
pub mod evaluation;
pub mod handlers;
pub mod question_bank;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Ideal-answer text persisted when the evaluator cannot produce a verdict.
pub const UNAVAILABLE_IDEAL_ANSWER: &str = "evaluation unavailable";
/// Score persisted when the evaluator cannot produce a verdict.
pub const UNAVAILABLE_SCORE: f64 = 0.0;

/// External question-generation collaborator. May fail; callers supply a
/// fallback so an interview link never becomes unusable.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, context: &str, count: usize) -> anyhow::Result<Vec<String>>;
}

/// The evaluator's verdict on one question/answer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub ideal_answer: String,
    /// Expected range 0-100 inclusive, may be fractional.
    pub score: f64,
}

impl Evaluation {
    /// The sentinel verdict: evaluation must always terminate with a value.
    pub fn unavailable() -> Self {
        Self {
            ideal_answer: UNAVAILABLE_IDEAL_ANSWER.to_string(),
            score: UNAVAILABLE_SCORE,
        }
    }
}

/// External answer-scoring collaborator. May fail; the evaluation trigger
/// substitutes [`Evaluation::unavailable`] per slot.
#[async_trait]
pub trait AnswerEvaluator: Send + Sync {
    async fn evaluate(&self, question: &str, answer: &str) -> anyhow::Result<Evaluation>;
}
