//! Shared test doubles and seed helpers for the in-memory store.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::interview::{InterviewKind, InterviewRow};
use crate::models::people::CandidateRow;
use crate::models::session::SlotRow;
use crate::notify::{Attachment, Notifier};
use crate::session::controller::CandidateIntake;
use crate::session::question_bank::split_custom_questions;
use crate::session::{AnswerEvaluator, Evaluation, QuestionGenerator};
use crate::store::memory::MemoryStore;
use crate::store::{NewCandidate, NewHr, NewInterview, NewSlot, Store};

/// Generator that yields `G1..Gn` for any context.
pub struct SeqGenerator;

#[async_trait]
impl QuestionGenerator for SeqGenerator {
    async fn generate(&self, _context: &str, count: usize) -> Result<Vec<String>> {
        Ok((1..=count).map(|i| format!("G{i}")).collect())
    }
}

pub struct FailingGenerator;

#[async_trait]
impl QuestionGenerator for FailingGenerator {
    async fn generate(&self, _context: &str, _count: usize) -> Result<Vec<String>> {
        Err(anyhow!("model offline"))
    }
}

/// Evaluator that scores every answer with a fixed value.
pub struct StubEvaluator {
    pub score: f64,
}

#[async_trait]
impl AnswerEvaluator for StubEvaluator {
    async fn evaluate(&self, question: &str, _answer: &str) -> Result<Evaluation> {
        Ok(Evaluation {
            ideal_answer: format!("ideal: {question}"),
            score: self.score,
        })
    }
}

pub struct FailingEvaluator;

#[async_trait]
impl AnswerEvaluator for FailingEvaluator {
    async fn evaluate(&self, _question: &str, _answer: &str) -> Result<Evaluation> {
        Err(anyhow!("model offline"))
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

/// Notifier that records outbound mail for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment: Option<Attachment>,
    ) -> Result<()> {
        self.sent.lock().unwrap().push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: html_body.to_string(),
            attachment,
        });
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _: &str, _: &str, _: &str, _: Option<Attachment>) -> Result<()> {
        Err(anyhow!("relay unreachable"))
    }
}

/// Polls until the notifier has recorded at least `count` mails. Returns
/// false when the count is not reached within a short window, so the same
/// helper asserts both "mail arrived" and "no further mail arrived".
pub async fn wait_for_sent(notifier: &RecordingNotifier, count: usize) -> bool {
    for _ in 0..50 {
        if notifier.sent().len() >= count {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    notifier.sent().len() >= count
}

pub fn intake(email: &str) -> CandidateIntake {
    CandidateIntake {
        name: "Ada".to_string(),
        email: email.to_string(),
        phone: "555-0100".to_string(),
    }
}

/// Seeds an HR account plus one interview of the given kind with the given
/// comma-separated custom questions.
pub async fn seed_interview(
    store: &MemoryStore,
    kind: InterviewKind,
    custom_questions: &str,
    num_questions: i32,
) -> InterviewRow {
    let hr = store
        .insert_hr(NewHr {
            email: "hr@acme.test".to_string(),
            company_name: Some("Acme".to_string()),
        })
        .await
        .unwrap();
    store
        .insert_interview(NewInterview {
            link_token: uuid::Uuid::new_v4().to_string(),
            kind,
            job_title: Some("Backend Engineer".to_string()),
            company_name: Some("Acme".to_string()),
            job_desc: Some("Rust services on Postgres".to_string()),
            custom_questions: Some(custom_questions.to_string()),
            num_questions,
            hr_id: hr.id,
        })
        .await
        .unwrap()
}

/// Seeds an interview, a candidate, and one unanswered slot per custom
/// question, mirroring what a session start would create.
pub async fn seed_attempt(
    store: &MemoryStore,
    kind: InterviewKind,
    custom_questions: &str,
) -> (InterviewRow, CandidateRow, Vec<SlotRow>) {
    let interview = seed_interview(store, kind, custom_questions, 0).await;
    let candidate = store
        .insert_candidate(NewCandidate {
            name: "Ada".to_string(),
            email: "ada@example.test".to_string(),
            phone: Some("555-0100".to_string()),
        })
        .await
        .unwrap();
    let slots = store
        .insert_slots(
            split_custom_questions(custom_questions)
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
        .await
        .unwrap();
    (interview, candidate, slots)
}
