// Prompt constants and builders for question generation and answer
// evaluation. Both prompts demand JSON-only output; call_json strips any
// stray code fences before parsing.

/// System prompt for generating interview questions from a job description.
pub const QUESTION_GEN_SYSTEM: &str = "You are an experienced technical interviewer. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// System prompt for scoring a candidate's answer.
pub const EVALUATION_SYSTEM: &str = "You are a strict but fair interview assessor. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

pub fn question_generation_prompt(job_desc: &str, count: usize) -> String {
    format!(
        r#"Generate exactly {count} interview questions for a candidate applying to the role described below.

Job description:
{job_desc}

Rules:
- Questions must be answerable in speech or a short paragraph, not whiteboard coding.
- Cover a mix of technical depth and practical experience relevant to the role.
- Do not number the questions inside their text.

Respond with JSON of the shape:
{{"questions": ["...", "..."]}}"#
    )
}

pub fn evaluation_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"Evaluate the candidate's answer to the interview question below.

Question:
{question}

Candidate's answer:
{answer}

Rules:
- "ideal_answer" is a concise model answer to the question, at most a short paragraph.
- "score" is a number from 0 to 100 rating how well the candidate's answer matches the ideal.
- An empty or off-topic answer scores at most 10.

Respond with JSON of the shape:
{{"ideal_answer": "...", "score": 0}}"#
    )
}
