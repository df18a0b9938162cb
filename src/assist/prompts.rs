// src/assist/prompts.rs
//! Prompt builders for the text service

use crate::types::{CareerProfile, JobBrief, RewriteTone};

/// Job descriptions are clipped to this many characters before analysis.
pub const JOB_DESCRIPTION_LIMIT: usize = 3000;
/// Pasted resume text is clipped before parsing.
pub const RESUME_TEXT_LIMIT: usize = 15000;
/// LinkedIn activity text is clipped before insight extraction.
pub const LINKEDIN_TEXT_LIMIT: usize = 10000;

/// Target role baked into section rewrites.
pub const DEFAULT_TARGET_ROLE: &str = "Senior Software Engineer";
/// Style constraints baked into section rewrites.
pub const REWRITE_CONSTRAINTS: [&str; 2] = ["concise", "outcome-oriented"];

const JOB_ANALYSIS_SCHEMA: &str = r#"{
  "roleTitle": "string",
  "companyName": "string",
  "extractedKeywords": ["string", "string"],
  "seniority": "Junior" | "Mid" | "Senior" | "Lead" | "Executive"
}"#;

const RESUME_PARSE_SCHEMA: &str = r#"{
  "basics": {
    "name": "string", "title": "string", "location": "string", "email": "string", "phone": "string",
    "links": [{ "label": "string", "url": "string" }]
  },
  "summary": "string",
  "experience": [{
    "id": "string", "company": "string", "role": "string", "startDate": "string", "endDate": "string", "location": "string",
    "highlights": [{ "id": "string", "text": "string" }]
  }],
  "skills": [{ "name": "string", "items": ["string"] }],
  "education": [{ "id": "string", "institution": "string", "degree": "string", "year": "string" }],
  "projects": [{ "id": "string", "name": "string", "description": "string", "url": "string", "highlights": ["string"] }],
  "certifications": [{ "id": "string", "name": "string", "issuer": "string", "date": "string" }],
  "publications": [{ "id": "string", "title": "string", "publisher": "string", "date": "string", "url": "string" }],
  "conferences": [{ "id": "string", "name": "string", "event": "string", "date": "string" }]
}"#;

const LINKEDIN_INSIGHTS_SCHEMA: &str = r#"{
  "skills": [{ "name": "string", "items": ["string"] }],
  "projects": [{ "id": "string", "name": "string", "description": "string", "highlights": ["string"] }]
}"#;

/// Clips to at most `max_chars` characters, never splitting a char.
pub fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn rewrite_prompt(
    text: &str,
    target_role: &str,
    tone: RewriteTone,
    constraints: &[&str],
    extra_context: Option<&str>,
) -> String {
    let context_block = match extra_context.filter(|ctx| !ctx.trim().is_empty()) {
        Some(ctx) => format!(
            "Additional Context (from user's LinkedIn/Background): \"{}\"\n\
             Use this context to enrich the content where relevant (e.g. adding specific metrics or project details mentioned in the context).\n\n",
            ctx
        ),
        None => String::new(),
    };

    format!(
        "You are a world-class executive resume editor.\n\
         Rewrite the following resume section content to be more impactful for a \"{}\" role.\n\n\
         Original Content:\n\
         \"{}\"\n\n\
         {}\
         Style & Constraints:\n\
         - Tone: {}\n\
         - Use Australian English spelling (e.g., 'optimise', 'specialise').\n\
         - Constraints: {}.\n\
         - Do not fabricate numbers. If a claim is strong, keep it.\n\
         - Output ONLY the rewritten text, no conversational filler.",
        target_role,
        text,
        context_block,
        tone,
        constraints.join(", ")
    )
}

pub fn job_analysis_prompt(description: &str) -> String {
    format!(
        "Analyze the following job description and extract key structured data.\n\
         Return a pure JSON object (no markdown formatting).\n\n\
         Job Description:\n\
         \"{}\"\n\n\
         Schema:\n{}",
        clip(description, JOB_DESCRIPTION_LIMIT),
        JOB_ANALYSIS_SCHEMA
    )
}

pub fn cover_letter_prompt(profile: &CareerProfile, brief: &JobBrief) -> String {
    let linkedin_block = match profile
        .linkedin_context
        .as_deref()
        .filter(|ctx| !ctx.trim().is_empty())
    {
        Some(ctx) => format!(
            "Additional Background (LinkedIn Posts/Articles): \"{}\"\n\
             Use insights from this background to add unique personal hooks or professional philosophy if relevant.\n\n",
            ctx
        ),
        None => String::new(),
    };

    let skills = profile
        .skills
        .iter()
        .map(|group| group.items.join(", "))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Write a tailored cover letter for:\n\
         Candidate: {} ({})\n\
         Target Role: {} at {}\n\
         Tone: {}\n\n\
         Resume Summary: {}\n\
         Key Skills: {}\n\n\
         {}\
         Job Context:\n\
         Keywords: {}\n\n\
         Rules:\n\
         - Use Australian English.\n\
         - 300 words maximum.\n\
         - No cliches like \"I am writing to apply\". Start with a hook.\n\
         - Focus on value delivery.\n\
         - Return only the body of the letter (no address header needed).",
        profile.basics.name,
        profile.basics.title,
        brief.role_title,
        brief.company_name,
        brief.tone,
        profile.summary,
        skills,
        linkedin_block,
        brief.extracted_keywords.join(", ")
    )
}

pub fn resume_parse_prompt(text: &str) -> String {
    format!(
        "You are an expert resume parser. Extract structured data from the following resume text into a JSON object matching this schema.\n\n\
         Schema:\n{}\n\n\
         Rules:\n\
         - Generate unique IDs (e.g., \"exp-1\", \"edu-1\") for array items.\n\
         - If a field is missing, omit it or return empty array.\n\
         - Use Australian English spelling.\n\n\
         Resume Text:\n\
         \"{}\"",
        RESUME_PARSE_SCHEMA,
        clip(text, RESUME_TEXT_LIMIT)
    )
}

pub fn linkedin_insights_prompt(text: &str) -> String {
    format!(
        "Analyze the following LinkedIn activity text (posts, articles, about section) and extract structured Skills and Projects that are mentioned.\n\n\
         Schema:\n{}\n\n\
         Context Text:\n\
         \"{}\"",
        LINKEDIN_INSIGHTS_SCHEMA,
        clip(text, LINKEDIN_TEXT_LIMIT)
    )
}
