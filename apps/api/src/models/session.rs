use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One question/answer/score record within a candidate's attempt.
/// Bulk-created at session start; `answer_text` is filled by submission and
/// `ideal_answer`/`score` by evaluation. Rows are only ever deleted in bulk
/// with the owning interview.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SlotRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub candidate_id: Uuid,
    pub position: i32,
    pub question: String,
    pub answer_text: Option<String>,
    pub ideal_answer: Option<String>,
    pub score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl SlotRow {
    pub fn answered(&self) -> bool {
        self.answer_text.is_some()
    }

    /// A slot is fully scored once both evaluation fields are present.
    pub fn scored(&self) -> bool {
        self.ideal_answer.is_some() && self.score.is_some()
    }
}

/// A candidate's live attempt at an interview: the ordered slot ids, the
/// read cursor, and the completion flag that keys the one-shot evaluation
/// and notification.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionRow {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub candidate_id: Uuid,
    pub link_token: String,
    pub slot_ids: Vec<Uuid>,
    pub current_index: i32,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl SessionRow {
    pub fn total(&self) -> usize {
        self.slot_ids.len()
    }
}
