//! Persistence seam. Everything the interview flow needs from storage is
//! behind the [`Store`] trait so the session controller, retention sweep,
//! and HR handlers can be exercised without a live database.

pub mod pg;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::interview::{InterviewKind, InterviewRow};
use crate::models::people::{CandidateRow, HrRow};
use crate::models::session::{SessionRow, SlotRow};

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Fields for a new interview definition. The link token is issued by the
/// caller and never changes afterwards.
#[derive(Debug, Clone)]
pub struct NewInterview {
    pub link_token: String,
    pub kind: InterviewKind,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub job_desc: Option<String>,
    pub custom_questions: Option<String>,
    pub num_questions: i32,
    pub hr_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewHr {
    pub email: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCandidate {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// One question slot to bulk-insert when a session starts. `position`
/// preserves the question-bank ordering everywhere downstream.
#[derive(Debug, Clone)]
pub struct NewSlot {
    pub interview_id: Uuid,
    pub candidate_id: Uuid,
    pub position: i32,
    pub question: String,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub interview_id: Uuid,
    pub candidate_id: Uuid,
    pub link_token: String,
    pub slot_ids: Vec<Uuid>,
}

#[async_trait]
pub trait Store: Send + Sync {
    // Interview definitions
    async fn insert_interview(&self, new: NewInterview) -> Result<InterviewRow, StoreError>;
    async fn interview_by_id(&self, id: Uuid) -> Result<Option<InterviewRow>, StoreError>;
    async fn interview_by_link(&self, link_token: &str)
        -> Result<Option<InterviewRow>, StoreError>;
    async fn interviews_by_hr(&self, hr_id: Uuid) -> Result<Vec<InterviewRow>, StoreError>;
    async fn interviews_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<InterviewRow>, StoreError>;
    async fn update_interview(&self, row: &InterviewRow) -> Result<(), StoreError>;
    async fn mark_interview_used(&self, id: Uuid) -> Result<(), StoreError>;
    /// Deletes the interview and, by cascade, its slots and sessions.
    async fn delete_interview(&self, id: Uuid) -> Result<(), StoreError>;

    // HR accounts
    async fn insert_hr(&self, new: NewHr) -> Result<HrRow, StoreError>;
    async fn hr_by_id(&self, id: Uuid) -> Result<Option<HrRow>, StoreError>;
    async fn hr_by_email(&self, email: &str) -> Result<Option<HrRow>, StoreError>;

    // Candidates
    async fn insert_candidate(&self, new: NewCandidate) -> Result<CandidateRow, StoreError>;
    async fn candidate_by_id(&self, id: Uuid) -> Result<Option<CandidateRow>, StoreError>;
    async fn candidate_by_email(&self, email: &str) -> Result<Option<CandidateRow>, StoreError>;

    // Question/answer slots
    async fn insert_slots(&self, new: Vec<NewSlot>) -> Result<Vec<SlotRow>, StoreError>;
    async fn slot_by_id(&self, id: Uuid) -> Result<Option<SlotRow>, StoreError>;
    /// All slots for one candidate's attempt at one interview, in question
    /// order.
    async fn slots_for_attempt(
        &self,
        interview_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Vec<SlotRow>, StoreError>;
    /// Slot count for the duplicate-attempt guard.
    async fn slot_count_for_attempt(
        &self,
        interview_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<u64, StoreError>;
    async fn slots_for_interview(&self, interview_id: Uuid) -> Result<Vec<SlotRow>, StoreError>;
    async fn update_slot_answer(&self, id: Uuid, answer: &str) -> Result<(), StoreError>;
    async fn update_slot_evaluation(
        &self,
        id: Uuid,
        ideal_answer: &str,
        score: f64,
    ) -> Result<(), StoreError>;

    // Sessions
    async fn insert_session(&self, new: NewSession) -> Result<SessionRow, StoreError>;
    async fn session_by_id(&self, id: Uuid) -> Result<Option<SessionRow>, StoreError>;
    async fn update_session_cursor(&self, id: Uuid, cursor: i32) -> Result<(), StoreError>;
    async fn mark_session_completed(&self, id: Uuid) -> Result<(), StoreError>;
}
