//! Prompt templates for the three analysis workflows.
//! Pure composition: (task, extracted text, optional description) → prompt.

/// Score prompt template. Replace `{resume_text}` before sending.
/// The output shape is additionally enforced by the attached response schema.
pub const SCORE_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and provide a JSON object with:
- score (as a string formatted "<0-100> / 100")
- strengths (as a string)
- weaknesses (as a string)
- suggestions (as a string)

Resume: {resume_text}"#;

/// Rewrite prompt template. Replace `{resume_text}` before sending.
/// No schema attached — the result is plain text.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Enhance this resume to pass Applicant Tracking Systems and highlight technical achievements.
Return only the enhanced resume text.

Resume: {resume_text}"#;

/// Match prompt template. Replace `{job_description}` and `{resume_text}`.
/// The resume text sits inside a triple-backtick delimiter so the model can
/// tell candidate data apart from the instruction. The text itself is not
/// escaped beyond the delimiter.
pub const MATCH_PROMPT_TEMPLATE: &str = r#"Compare the job description below against the resume delimited by triple backticks. Report:
match: what in the resume matches the job description
missing: what the job description asks for that the resume lacks
score: how closely the resume fits the job, as a percentage

Job description: {job_description}

```{resume_text}```"#;

pub fn score_prompt(resume_text: &str) -> String {
    SCORE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

pub fn rewrite_prompt(resume_text: &str) -> String {
    REWRITE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

pub fn match_prompt(resume_text: &str, job_description: &str) -> String {
    MATCH_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}
