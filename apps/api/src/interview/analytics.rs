//! Per-HR reporting: interview totals plus a per-attempt score summary.

use std::collections::BTreeMap;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::store::Store;

/// One candidate's attempt at one interview, aggregated over its slots.
#[derive(Debug, Clone, Serialize)]
pub struct AttemptSummary {
    pub interview_id: Uuid,
    pub job_title: String,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub questions: usize,
    pub answered: usize,
    /// Mean over scored slots; absent until evaluation has run.
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HrAnalytics {
    pub total_interviews: usize,
    pub used_interviews: usize,
    pub pending_interviews: usize,
    pub total_attempts: usize,
    pub attempts: Vec<AttemptSummary>,
}

pub async fn analytics_for_hr(store: &dyn Store, hr_id: Uuid) -> Result<HrAnalytics, AppError> {
    let interviews = store.interviews_by_hr(hr_id).await?;
    let used_interviews = interviews.iter().filter(|i| i.used).count();

    let mut attempts = Vec::new();
    for interview in &interviews {
        let slots = store.slots_for_interview(interview.id).await?;

        let mut by_candidate: BTreeMap<Uuid, Vec<&crate::models::session::SlotRow>> =
            BTreeMap::new();
        for slot in &slots {
            by_candidate.entry(slot.candidate_id).or_default().push(slot);
        }

        for (candidate_id, slots) in by_candidate {
            let candidate = store.candidate_by_id(candidate_id).await?.ok_or_else(|| {
                AppError::NotFound(format!("candidate {candidate_id} not found"))
            })?;
            let scores: Vec<f64> = slots.iter().filter_map(|s| s.score).collect();
            let average_score = if scores.is_empty() {
                None
            } else {
                Some(scores.iter().sum::<f64>() / scores.len() as f64)
            };
            attempts.push(AttemptSummary {
                interview_id: interview.id,
                job_title: interview.job_title_or_default().to_string(),
                candidate_id,
                candidate_name: candidate.name,
                candidate_email: candidate.email,
                questions: slots.len(),
                answered: slots.iter().filter(|s| s.answered()).count(),
                average_score,
            });
        }
    }

    Ok(HrAnalytics {
        total_interviews: interviews.len(),
        used_interviews,
        pending_interviews: interviews.len() - used_interviews,
        total_attempts: attempts.len(),
        attempts,
    })
}
