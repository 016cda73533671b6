//! In-memory [`Store`] used by the unit tests. Mirrors the Postgres
//! implementation's semantics, including cascade deletion of slots and
//! sessions with their interview.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::interview::InterviewRow;
use crate::models::people::{CandidateRow, HrRow};
use crate::models::session::{SessionRow, SlotRow};

use super::{NewCandidate, NewHr, NewInterview, NewSession, NewSlot, Store, StoreError};

#[derive(Default)]
struct Inner {
    interviews: HashMap<Uuid, InterviewRow>,
    hrs: HashMap<Uuid, HrRow>,
    candidates: HashMap<Uuid, CandidateRow>,
    slots: HashMap<Uuid, SlotRow>,
    sessions: HashMap<Uuid, SessionRow>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backdates an interview's creation timestamp (retention sweep tests).
    pub fn set_interview_created_at(&self, id: Uuid, created_at: DateTime<Utc>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(row) = inner.interviews.get_mut(&id) {
            row.created_at = created_at;
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_interview(&self, new: NewInterview) -> Result<InterviewRow, StoreError> {
        let row = InterviewRow {
            id: Uuid::new_v4(),
            link_token: new.link_token,
            kind: new.kind.as_str().to_string(),
            job_title: new.job_title,
            company_name: new.company_name,
            job_desc: new.job_desc,
            custom_questions: new.custom_questions,
            num_questions: new.num_questions,
            used: false,
            hr_id: new.hr_id,
            created_at: Utc::now(),
        };
        let mut inner = self.inner.lock().unwrap();
        inner.interviews.insert(row.id, row.clone());
        Ok(row)
    }

    async fn interview_by_id(&self, id: Uuid) -> Result<Option<InterviewRow>, StoreError> {
        Ok(self.inner.lock().unwrap().interviews.get(&id).cloned())
    }

    async fn interview_by_link(
        &self,
        link_token: &str,
    ) -> Result<Option<InterviewRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .interviews
            .values()
            .find(|i| i.link_token == link_token)
            .cloned())
    }

    async fn interviews_by_hr(&self, hr_id: Uuid) -> Result<Vec<InterviewRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .interviews
            .values()
            .filter(|i| i.hr_id == hr_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn interviews_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<InterviewRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .interviews
            .values()
            .filter(|i| i.created_at <= cutoff)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.hr_id, a.created_at).cmp(&(b.hr_id, b.created_at)));
        Ok(rows)
    }

    async fn update_interview(&self, row: &InterviewRow) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let existing = inner
            .interviews
            .get_mut(&row.id)
            .ok_or(StoreError::NotFound)?;
        existing.kind = row.kind.clone();
        existing.job_title = row.job_title.clone();
        existing.company_name = row.company_name.clone();
        existing.job_desc = row.job_desc.clone();
        existing.custom_questions = row.custom_questions.clone();
        existing.num_questions = row.num_questions;
        Ok(())
    }

    async fn mark_interview_used(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let existing = inner.interviews.get_mut(&id).ok_or(StoreError::NotFound)?;
        existing.used = true;
        Ok(())
    }

    async fn delete_interview(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.interviews.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        inner.slots.retain(|_, s| s.interview_id != id);
        inner.sessions.retain(|_, s| s.interview_id != id);
        Ok(())
    }

    async fn insert_hr(&self, new: NewHr) -> Result<HrRow, StoreError> {
        let row = HrRow {
            id: Uuid::new_v4(),
            email: new.email,
            company_name: new.company_name,
            phone: None,
            created_at: Utc::now(),
        };
        self.inner.lock().unwrap().hrs.insert(row.id, row.clone());
        Ok(row)
    }

    async fn hr_by_id(&self, id: Uuid) -> Result<Option<HrRow>, StoreError> {
        Ok(self.inner.lock().unwrap().hrs.get(&id).cloned())
    }

    async fn hr_by_email(&self, email: &str) -> Result<Option<HrRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.hrs.values().find(|h| h.email == email).cloned())
    }

    async fn insert_candidate(&self, new: NewCandidate) -> Result<CandidateRow, StoreError> {
        let row = CandidateRow {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .unwrap()
            .candidates
            .insert(row.id, row.clone());
        Ok(row)
    }

    async fn candidate_by_id(&self, id: Uuid) -> Result<Option<CandidateRow>, StoreError> {
        Ok(self.inner.lock().unwrap().candidates.get(&id).cloned())
    }

    async fn candidate_by_email(&self, email: &str) -> Result<Option<CandidateRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.candidates.values().find(|c| c.email == email).cloned())
    }

    async fn insert_slots(&self, new: Vec<NewSlot>) -> Result<Vec<SlotRow>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let mut rows = Vec::with_capacity(new.len());
        for slot in new {
            let row = SlotRow {
                id: Uuid::new_v4(),
                interview_id: slot.interview_id,
                candidate_id: slot.candidate_id,
                position: slot.position,
                question: slot.question,
                answer_text: None,
                ideal_answer: None,
                score: None,
                created_at: Utc::now(),
            };
            inner.slots.insert(row.id, row.clone());
            rows.push(row);
        }
        Ok(rows)
    }

    async fn slot_by_id(&self, id: Uuid) -> Result<Option<SlotRow>, StoreError> {
        Ok(self.inner.lock().unwrap().slots.get(&id).cloned())
    }

    async fn slots_for_attempt(
        &self,
        interview_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Vec<SlotRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .slots
            .values()
            .filter(|s| s.interview_id == interview_id && s.candidate_id == candidate_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| s.position);
        Ok(rows)
    }

    async fn slot_count_for_attempt(
        &self,
        interview_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<u64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .slots
            .values()
            .filter(|s| s.interview_id == interview_id && s.candidate_id == candidate_id)
            .count() as u64)
    }

    async fn slots_for_interview(&self, interview_id: Uuid) -> Result<Vec<SlotRow>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .slots
            .values()
            .filter(|s| s.interview_id == interview_id)
            .cloned()
            .collect();
        rows.sort_by_key(|s| (s.candidate_id, s.position));
        Ok(rows)
    }

    async fn update_slot_answer(&self, id: Uuid, answer: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let slot = inner.slots.get_mut(&id).ok_or(StoreError::NotFound)?;
        slot.answer_text = Some(answer.to_string());
        Ok(())
    }

    async fn update_slot_evaluation(
        &self,
        id: Uuid,
        ideal_answer: &str,
        score: f64,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let slot = inner.slots.get_mut(&id).ok_or(StoreError::NotFound)?;
        slot.ideal_answer = Some(ideal_answer.to_string());
        slot.score = Some(score);
        Ok(())
    }

    async fn insert_session(&self, new: NewSession) -> Result<SessionRow, StoreError> {
        let row = SessionRow {
            id: Uuid::new_v4(),
            interview_id: new.interview_id,
            candidate_id: new.candidate_id,
            link_token: new.link_token,
            slot_ids: new.slot_ids,
            current_index: 0,
            completed: false,
            created_at: Utc::now(),
        };
        self.inner
            .lock()
            .unwrap()
            .sessions
            .insert(row.id, row.clone());
        Ok(row)
    }

    async fn session_by_id(&self, id: Uuid) -> Result<Option<SessionRow>, StoreError> {
        Ok(self.inner.lock().unwrap().sessions.get(&id).cloned())
    }

    async fn update_session_cursor(&self, id: Uuid, cursor: i32) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let session = inner.sessions.get_mut(&id).ok_or(StoreError::NotFound)?;
        session.current_index = cursor;
        Ok(())
    }

    async fn mark_session_completed(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let session = inner.sessions.get_mut(&id).ok_or(StoreError::NotFound)?;
        session.completed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::InterviewKind;

    fn new_interview(hr_id: Uuid) -> NewInterview {
        NewInterview {
            link_token: Uuid::new_v4().to_string(),
            kind: InterviewKind::Custom,
            job_title: Some("Backend Engineer".to_string()),
            company_name: Some("Acme".to_string()),
            job_desc: None,
            custom_questions: Some("Q1, Q2".to_string()),
            num_questions: 2,
            hr_id,
        }
    }

    #[tokio::test]
    async fn test_delete_interview_cascades() {
        let store = MemoryStore::new();
        let hr = store
            .insert_hr(NewHr {
                email: "hr@acme.test".to_string(),
                company_name: None,
            })
            .await
            .unwrap();
        let interview = store.insert_interview(new_interview(hr.id)).await.unwrap();
        let candidate = store
            .insert_candidate(NewCandidate {
                name: "Ada".to_string(),
                email: "ada@example.test".to_string(),
                phone: None,
            })
            .await
            .unwrap();
        let slots = store
            .insert_slots(vec![NewSlot {
                interview_id: interview.id,
                candidate_id: candidate.id,
                position: 0,
                question: "Q1".to_string(),
            }])
            .await
            .unwrap();
        store
            .insert_session(NewSession {
                interview_id: interview.id,
                candidate_id: candidate.id,
                link_token: interview.link_token.clone(),
                slot_ids: slots.iter().map(|s| s.id).collect(),
            })
            .await
            .unwrap();

        store.delete_interview(interview.id).await.unwrap();

        assert!(store.slot_by_id(slots[0].id).await.unwrap().is_none());
        assert!(store
            .interview_by_link(&interview.link_token)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_missing_slot_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_slot_answer(Uuid::new_v4(), "answer")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }
}
