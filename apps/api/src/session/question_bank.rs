//! Question Bank Builder: turns an interview definition into the ordered
//! question list a session is seeded with.

use tracing::warn;

use crate::models::interview::InterviewRow;

use super::QuestionGenerator;

/// Placeholder used when the generator fails or returns nothing. The link
/// must stay usable, so generation degrades instead of failing.
pub const FALLBACK_QUESTION: &str =
    "Walk me through a technical problem you solved recently and how you approached it.";

/// Builds the ordered question list for one session: generated questions
/// first (for `jd`/`both`), then the custom list (for `custom`/`both`), no
/// de-duplication. Never fails; the returned order is the slot order used
/// everywhere downstream.
pub async fn build(interview: &InterviewRow, generator: &dyn QuestionGenerator) -> Vec<String> {
    let kind = interview.kind();
    let mut questions = Vec::new();

    if kind.includes_jd() {
        let desired = interview.num_questions.max(0) as usize;
        let context = interview.job_desc.as_deref().unwrap_or("");
        match generator.generate(context, desired).await {
            Ok(generated) if !generated.is_empty() => {
                questions.extend(generated.into_iter().take(desired));
            }
            Ok(_) => {
                warn!(
                    interview = %interview.id,
                    "question generator returned nothing, using fallback question"
                );
                questions.push(FALLBACK_QUESTION.to_string());
            }
            Err(e) => {
                warn!(
                    interview = %interview.id,
                    "question generation degraded, using fallback question: {e}"
                );
                questions.push(FALLBACK_QUESTION.to_string());
            }
        }
    }

    if kind.includes_custom() {
        let custom = interview.custom_questions.as_deref().unwrap_or("");
        questions.extend(split_custom_questions(custom));
    }

    questions
}

/// Splits HR-authored custom questions on commas, trims whitespace, drops
/// empty entries, and preserves the stored order.
pub fn split_custom_questions(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}
