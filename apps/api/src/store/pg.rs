//! PostgreSQL-backed [`Store`] implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::interview::InterviewRow;
use crate::models::people::{CandidateRow, HrRow};
use crate::models::session::{SessionRow, SlotRow};

use super::{NewCandidate, NewHr, NewInterview, NewSession, NewSlot, Store, StoreError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_interview(&self, new: NewInterview) -> Result<InterviewRow, StoreError> {
        let row = sqlx::query_as::<_, InterviewRow>(
            r#"
            INSERT INTO interviews
                (id, link_token, kind, job_title, company_name, job_desc,
                 custom_questions, num_questions, used, hr_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, $9, now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.link_token)
        .bind(new.kind.as_str())
        .bind(&new.job_title)
        .bind(&new.company_name)
        .bind(&new.job_desc)
        .bind(&new.custom_questions)
        .bind(new.num_questions)
        .bind(new.hr_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn interview_by_id(&self, id: Uuid) -> Result<Option<InterviewRow>, StoreError> {
        let row = sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn interview_by_link(
        &self,
        link_token: &str,
    ) -> Result<Option<InterviewRow>, StoreError> {
        let row =
            sqlx::query_as::<_, InterviewRow>("SELECT * FROM interviews WHERE link_token = $1")
                .bind(link_token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn interviews_by_hr(&self, hr_id: Uuid) -> Result<Vec<InterviewRow>, StoreError> {
        let rows = sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interviews WHERE hr_id = $1 ORDER BY created_at DESC",
        )
        .bind(hr_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn interviews_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<InterviewRow>, StoreError> {
        let rows = sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interviews WHERE created_at <= $1 ORDER BY hr_id, created_at",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_interview(&self, row: &InterviewRow) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE interviews
            SET kind = $1, job_title = $2, company_name = $3, job_desc = $4,
                custom_questions = $5, num_questions = $6
            WHERE id = $7
            "#,
        )
        .bind(&row.kind)
        .bind(&row.job_title)
        .bind(&row.company_name)
        .bind(&row.job_desc)
        .bind(&row.custom_questions)
        .bind(row.num_questions)
        .bind(row.id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn mark_interview_used(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE interviews SET used = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_interview(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn insert_hr(&self, new: NewHr) -> Result<HrRow, StoreError> {
        let row = sqlx::query_as::<_, HrRow>(
            r#"
            INSERT INTO hrs (id, email, company_name, phone, created_at)
            VALUES ($1, $2, $3, NULL, now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.email)
        .bind(&new.company_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn hr_by_id(&self, id: Uuid) -> Result<Option<HrRow>, StoreError> {
        let row = sqlx::query_as::<_, HrRow>("SELECT * FROM hrs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn hr_by_email(&self, email: &str) -> Result<Option<HrRow>, StoreError> {
        let row = sqlx::query_as::<_, HrRow>("SELECT * FROM hrs WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_candidate(&self, new: NewCandidate) -> Result<CandidateRow, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            INSERT INTO candidates (id, name, email, phone, created_at)
            VALUES ($1, $2, $3, $4, now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn candidate_by_id(&self, id: Uuid) -> Result<Option<CandidateRow>, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn candidate_by_email(&self, email: &str) -> Result<Option<CandidateRow>, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_slots(&self, new: Vec<NewSlot>) -> Result<Vec<SlotRow>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut rows = Vec::with_capacity(new.len());
        for slot in new {
            let row = sqlx::query_as::<_, SlotRow>(
                r#"
                INSERT INTO slots
                    (id, interview_id, candidate_id, position, question, created_at)
                VALUES ($1, $2, $3, $4, $5, now())
                RETURNING *
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(slot.interview_id)
            .bind(slot.candidate_id)
            .bind(slot.position)
            .bind(&slot.question)
            .fetch_one(&mut *tx)
            .await?;
            rows.push(row);
        }
        tx.commit().await?;
        Ok(rows)
    }

    async fn slot_by_id(&self, id: Uuid) -> Result<Option<SlotRow>, StoreError> {
        let row = sqlx::query_as::<_, SlotRow>("SELECT * FROM slots WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn slots_for_attempt(
        &self,
        interview_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<Vec<SlotRow>, StoreError> {
        let rows = sqlx::query_as::<_, SlotRow>(
            "SELECT * FROM slots WHERE interview_id = $1 AND candidate_id = $2 ORDER BY position",
        )
        .bind(interview_id)
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn slot_count_for_attempt(
        &self,
        interview_id: Uuid,
        candidate_id: Uuid,
    ) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM slots WHERE interview_id = $1 AND candidate_id = $2",
        )
        .bind(interview_id)
        .bind(candidate_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count as u64)
    }

    async fn slots_for_interview(&self, interview_id: Uuid) -> Result<Vec<SlotRow>, StoreError> {
        let rows = sqlx::query_as::<_, SlotRow>(
            "SELECT * FROM slots WHERE interview_id = $1 ORDER BY candidate_id, position",
        )
        .bind(interview_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_slot_answer(&self, id: Uuid, answer: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE slots SET answer_text = $1 WHERE id = $2")
            .bind(answer)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn update_slot_evaluation(
        &self,
        id: Uuid,
        ideal_answer: &str,
        score: f64,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE slots SET ideal_answer = $1, score = $2 WHERE id = $3")
            .bind(ideal_answer)
            .bind(score)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn insert_session(&self, new: NewSession) -> Result<SessionRow, StoreError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions
                (id, interview_id, candidate_id, link_token, slot_ids,
                 current_index, completed, created_at)
            VALUES ($1, $2, $3, $4, $5, 0, FALSE, now())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.interview_id)
        .bind(new.candidate_id)
        .bind(&new.link_token)
        .bind(&new.slot_ids)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn session_by_id(&self, id: Uuid) -> Result<Option<SessionRow>, StoreError> {
        let row = sqlx::query_as::<_, SessionRow>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_session_cursor(&self, id: Uuid, cursor: i32) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE sessions SET current_index = $1 WHERE id = $2")
            .bind(cursor)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn mark_session_completed(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE sessions SET completed = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
