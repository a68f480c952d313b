// All LLM prompt templates for resume analysis.
// Placeholders are `{name}`; substitution is a single pass, so inserted resume or
// job description text is never re-scanned for placeholders.

use crate::extraction::ExtractedText;
use crate::models::AnalysisMode;

/// Substituted for the job description when the user left it blank.
pub const JOB_DESCRIPTION_NOT_PROVIDED: &str = "Not provided";

/// Quick scan template. Replace: {resume_text}, {job_description}
pub const QUICK_SCAN_TEMPLATE: &str = r#"You are ResumeChecker, an expert in resume analysis. Provide a quick scan of the following resume:
1. Identify the most suitable profession for this resume.
2. List exactly 3 key strengths.
3. Suggest exactly 2 quick improvements.
4. Give an overall ATS score out of 100.

Resume:
{resume_text}

Job description (if any):
{job_description}"#;

/// Detailed analysis template. Replace: {resume_text}, {job_description}
pub const DETAILED_ANALYSIS_TEMPLATE: &str = r#"You are ResumeChecker, an expert in resume analysis. Provide a detailed analysis of the following resume:
1. Identify the most suitable profession.
2. List exactly 5 strengths.
3. Suggest 3-5 improvements, with specific rewording or additions for each.
4. Rate the resume out of 10 on each of: Impact, Brevity, Style, Structure, Skills.
5. Provide a brief review of each major section (e.g., Summary, Experience, Education).
6. Give an ATS score out of 100 with a breakdown of how the score was reached.

Resume:
{resume_text}

Job description (if any):
{job_description}"#;

/// ATS optimization template. Replace: {resume_text}, {job_description}
pub const ATS_OPTIMIZATION_TEMPLATE: &str = r#"You are ResumeChecker, an expert in ATS optimization. Analyze the following resume against the job description:
1. Identify and extract the keywords from the job description.
2. Suggest reformatting that improves readability for applicant tracking systems.
3. Recommend keyword density changes without keyword stuffing.
4. Provide 3-5 bullet points to tailor the resume to the job.
5. Give an ATS compatibility score out of 100 with guidance on how to improve it.

Resume:
{resume_text}

Job description:
{job_description}"#;

/// Follow-up chat template. Replace: {question}, {resume_text}, {previous_analysis}
pub const FOLLOW_UP_TEMPLATE: &str = r#"Based on the resume and analysis below, answer the question: {question}

Resume:
{resume_text}

Previous analysis:
{previous_analysis}"#;

/// Template for a mode. Exhaustive: adding a mode without a template fails to compile.
pub fn template_for(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::QuickScan => QUICK_SCAN_TEMPLATE,
        AnalysisMode::DetailedAnalysis => DETAILED_ANALYSIS_TEMPLATE,
        AnalysisMode::AtsOptimization => ATS_OPTIMIZATION_TEMPLATE,
    }
}

/// Normalizes the optional job description: blank input counts as absent.
pub fn provided_job_description(job_description: Option<&str>) -> Option<&str> {
    job_description.filter(|jd| !jd.trim().is_empty())
}

/// Builds the instruction for an analysis. Pure and deterministic; never fails.
pub fn build_analysis_prompt(
    text: &ExtractedText,
    job_description: Option<&str>,
    mode: AnalysisMode,
) -> String {
    let job_description =
        provided_job_description(job_description).unwrap_or(JOB_DESCRIPTION_NOT_PROVIDED);
    render(
        template_for(mode),
        &[
            ("resume_text", text.as_str()),
            ("job_description", job_description),
        ],
    )
}

/// Builds the follow-up instruction from the prior analysis and the user's question.
pub fn build_follow_up_prompt(resume_text: &str, previous_analysis: &str, question: &str) -> String {
    render(
        FOLLOW_UP_TEMPLATE,
        &[
            ("question", question),
            ("resume_text", resume_text),
            ("previous_analysis", previous_analysis),
        ],
    )
}

/// Single-pass `{name}` substitution. Unknown placeholders are left as-is.
fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let value = tail.find('}').and_then(|close| {
            let name = &tail[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
