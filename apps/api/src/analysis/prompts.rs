// LLM prompt constants for gap-analysis advice.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for the advisor: career coach persona, JSON-only output.
pub const ADVICE_SYSTEM: &str = "You are a gap analysis specialist and career coach. \
    You compare a resume against a job description and produce a detailed, actionable \
    improvement plan focused on ATS keyword coverage and recruiter attention.";

/// Advice prompt template. Replace `{candidate_name}`, `{target_role}`, `{match_score}`,
/// `{matched_keywords}` and `{missing_keywords}` before sending.
pub const ADVICE_PROMPT_TEMPLATE: &str = r#"Candidate: {candidate_name}
Target role: {target_role}
ATS match score: {match_score}%
Matched keywords: {matched_keywords}
Missing keywords: {missing_keywords}

Write improvement suggestions based on the missing keywords. For each major missing skill:
- WHERE on the resume to add it (Summary, Skills, Experience, Projects)
- HOW to phrase it naturally in a bullet point
- if it is a tool or technology, a short project idea that demonstrates it

Also include:
- a rewritten Professional Summary that incorporates the top missing keywords
- 2-3 recommended certifications or online courses for the most critical missing skills
- a priority list: which missing keywords to add FIRST for maximum ATS impact

Then write 3-5 bullet points of industry insights for the target role: in-demand skills,
emerging technologies, certifications that boost employability.

Return a JSON object with this EXACT schema (no extra fields), both values in Markdown:
{
  "suggestions": "...",
  "industry_insights": "..."
}

Only suggest additions that the candidate could truthfully make. Never advise keyword stuffing."#;
