// Prompt templates for the career features. Replace `{placeholders}` before sending.

/// Résumé review. Replace `{resume_text}`.
pub const RESUME_REVIEW_PROMPT_TEMPLATE: &str = "You are a career expert reviewing a candidate's resume.

Analyze the following resume text and provide:
1. Summary of strengths
2. Weaknesses or areas for improvement
3. Suggestions to improve this resume

Resume:
{resume_text}";

/// Free-text role comparison. Replace `{job_title}` and `{resume_text}`.
pub const SKILL_GAP_PROMPT_TEMPLATE: &str = "You are an expert in career development.
Compare the following resume against the job role: {job_title}.
Provide:
1. Key skills required for {job_title}
2. Skills present and missing from the resume
3. Learning resources to fill the skill gap

Resume:
{resume_text}";

pub fn resume_review_prompt(resume_text: &str) -> String {
    render(RESUME_REVIEW_PROMPT_TEMPLATE, &[("resume_text", resume_text)])
}

pub fn skill_gap_prompt(job_title: &str, resume_text: &str) -> String {
    render(
        SKILL_GAP_PROMPT_TEMPLATE,
        &[("job_title", job_title), ("resume_text", resume_text)],
    )
}

/// Fills `{name}` placeholders in a single left-to-right pass. Substituted
/// values are never rescanned, so user text containing `{...}` stays literal.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
