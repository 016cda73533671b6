//! CSV export of interview transcripts, one row per question slot.

use std::collections::BTreeMap;

use anyhow::Context;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::interview::InterviewRow;
use crate::models::people::CandidateRow;
use crate::store::Store;

const HEADER: [&str; 11] = [
    "Interview ID",
    "Company Name",
    "Job Title",
    "Candidate Name",
    "Candidate Email",
    "Candidate Phone",
    "No. of Questions",
    "Question",
    "Candidate Answer",
    "Ideal Answer",
    "Score",
];

/// Serializes the given interviews and every recorded answer into CSV bytes.
/// Returns the encoded document and the number of data rows written.
pub async fn export_interviews_csv(
    store: &dyn Store,
    interviews: &[InterviewRow],
) -> Result<(Vec<u8>, usize), AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .context("failed to write CSV header")?;

    let mut rows = 0usize;
    let mut candidates: BTreeMap<Uuid, CandidateRow> = BTreeMap::new();

    for interview in interviews {
        let slots = store.slots_for_interview(interview.id).await?;
        for slot in slots {
            let candidate = match candidates.get(&slot.candidate_id) {
                Some(c) => c.clone(),
                None => {
                    let fetched = store
                        .candidate_by_id(slot.candidate_id)
                        .await?
                        .ok_or_else(|| {
                            AppError::NotFound(format!(
                                "candidate {} referenced by slot {} not found",
                                slot.candidate_id, slot.id
                            ))
                        })?;
                    candidates.insert(slot.candidate_id, fetched.clone());
                    fetched
                }
            };

            writer
                .write_record([
                    interview.id.to_string().as_str(),
                    interview.company_name_or_default(),
                    interview.job_title_or_default(),
                    candidate.name.as_str(),
                    candidate.email.as_str(),
                    candidate.phone.as_deref().unwrap_or(""),
                    interview.num_questions.to_string().as_str(),
                    slot.question.as_str(),
                    slot.answer_text.as_deref().unwrap_or(""),
                    slot.ideal_answer.as_deref().unwrap_or(""),
                    slot.score
                        .map(|s| s.to_string())
                        .unwrap_or_default()
                        .as_str(),
                ])
                .context("failed to write CSV row")?;
            rows += 1;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV writer: {}", e.error()))?;
    Ok((bytes, rows))
}
