// src/assist/service.rs
//! Assisted-writing operations with graceful fallbacks

use std::sync::Arc;

use tracing::warn;

use crate::assist::client::{strip_json_fences, TextModel};
use crate::assist::prompts;
use crate::types::{CareerProfile, JobAnalysis, JobBrief, LinkedInsights, ProfileDraft, RewriteTone};

/// Fallback letter body when the service call fails outright.
pub const LETTER_ERROR_FALLBACK: &str = "Error generating cover letter. Please try again.";
/// Fallback letter body when the call succeeds but comes back empty.
pub const LETTER_EMPTY_FALLBACK: &str = "Could not generate cover letter.";

/// All assisted-writing operations. Every method resolves to a usable value;
/// service failures degrade to documented fallbacks instead of surfacing.
pub struct AssistService {
    model: Arc<dyn TextModel>,
}

impl AssistService {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// Rewrites one section's text. On failure, or when the service returns
    /// nothing usable, the original text comes back unchanged.
    pub async fn rewrite_section(
        &self,
        text: &str,
        target_role: &str,
        tone: RewriteTone,
        constraints: &[&str],
        extra_context: Option<&str>,
    ) -> String {
        let prompt = prompts::rewrite_prompt(text, target_role, tone, constraints, extra_context);
        match self.model.complete(&prompt).await {
            Ok(rewritten) => {
                let rewritten = rewritten.trim();
                if rewritten.is_empty() {
                    text.to_string()
                } else {
                    rewritten.to_string()
                }
            }
            Err(err) => {
                warn!("Section rewrite failed, keeping original text: {:#}", err);
                text.to_string()
            }
        }
    }

    /// Extracts role, company, keywords and seniority from a job description.
    /// An empty response yields an empty partial; a failed call or unparsable
    /// response yields the neutral Unknown analysis.
    pub async fn analyze_job(&self, description: &str) -> JobAnalysis {
        let prompt = prompts::job_analysis_prompt(description);
        match self.model.complete(&prompt).await {
            Ok(body) => {
                if body.trim().is_empty() {
                    return JobAnalysis::default();
                }
                match serde_json::from_str(strip_json_fences(&body)) {
                    Ok(analysis) => analysis,
                    Err(err) => {
                        warn!("Job analysis response was not valid JSON: {:#}", err);
                        JobAnalysis::unknown()
                    }
                }
            }
            Err(err) => {
                warn!("Job analysis failed: {:#}", err);
                JobAnalysis::unknown()
            }
        }
    }

    /// Drafts a cover letter body for the profile against the brief.
    pub async fn draft_letter(&self, profile: &CareerProfile, brief: &JobBrief) -> String {
        let prompt = prompts::cover_letter_prompt(profile, brief);
        match self.model.complete(&prompt).await {
            Ok(letter) if letter.is_empty() => LETTER_EMPTY_FALLBACK.to_string(),
            Ok(letter) => letter,
            Err(err) => {
                warn!("Cover letter generation failed: {:#}", err);
                LETTER_ERROR_FALLBACK.to_string()
            }
        }
    }

    /// Parses free-form resume text into a partial profile. Any failure
    /// yields an empty draft.
    pub async fn parse_resume(&self, text: &str) -> ProfileDraft {
        let prompt = prompts::resume_parse_prompt(text);
        match self.model.complete(&prompt).await {
            Ok(body) => match serde_json::from_str(strip_json_fences(&body)) {
                Ok(draft) => draft,
                Err(err) => {
                    warn!("Resume parse response was not valid JSON: {:#}", err);
                    ProfileDraft::default()
                }
            },
            Err(err) => {
                warn!("Resume parsing failed: {:#}", err);
                ProfileDraft::default()
            }
        }
    }

    /// Extracts skills and projects mentioned in pasted LinkedIn activity.
    /// Any failure yields empty insights.
    pub async fn linkedin_insights(&self, text: &str) -> LinkedInsights {
        let prompt = prompts::linkedin_insights_prompt(text);
        match self.model.complete(&prompt).await {
            Ok(body) => match serde_json::from_str(strip_json_fences(&body)) {
                Ok(insights) => insights,
                Err(err) => {
                    warn!("LinkedIn insight response was not valid JSON: {:#}", err);
                    LinkedInsights::default()
                }
            },
            Err(err) => {
                warn!("LinkedIn insight extraction failed: {:#}", err);
                LinkedInsights::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LetterTone, Seniority};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    struct ScriptedModel {
        response: Result<String>,
    }

    impl ScriptedModel {
        fn ok(text: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(text.to_string()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                response: Err(anyhow!("service unavailable")),
            })
        }
    }

    #[async_trait]
    impl TextModel for ScriptedModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(err) => Err(anyhow!("{}", err)),
            }
        }
    }

    fn service(model: Arc<ScriptedModel>) -> AssistService {
        AssistService::new(model)
    }

    #[tokio::test]
    async fn test_failed_rewrite_returns_the_original_text() {
        let svc = service(ScriptedModel::failing());
        let out = svc
            .rewrite_section(
                "Led migration projects.",
                prompts::DEFAULT_TARGET_ROLE,
                RewriteTone::ModernProfessional,
                &prompts::REWRITE_CONSTRAINTS,
                None,
            )
            .await;
        assert_eq!(out, "Led migration projects.");
    }

    #[tokio::test]
    async fn test_blank_rewrite_returns_the_original_text() {
        let svc = service(ScriptedModel::ok("   \n  "));
        let out = svc
            .rewrite_section(
                "Shipped the design system.",
                prompts::DEFAULT_TARGET_ROLE,
                RewriteTone::Executive,
                &prompts::REWRITE_CONSTRAINTS,
                None,
            )
            .await;
        assert_eq!(out, "Shipped the design system.");
    }

    #[tokio::test]
    async fn test_successful_rewrite_is_trimmed() {
        let svc = service(ScriptedModel::ok("  Drove the platform migration.  "));
        let out = svc
            .rewrite_section(
                "old",
                prompts::DEFAULT_TARGET_ROLE,
                RewriteTone::ModernProfessional,
                &prompts::REWRITE_CONSTRAINTS,
                Some("context"),
            )
            .await;
        assert_eq!(out, "Drove the platform migration.");
    }

    #[tokio::test]
    async fn test_analyze_job_parses_fenced_json() {
        let svc = service(ScriptedModel::ok(
            "```json\n{\"roleTitle\": \"Platform Lead\", \"companyName\": \"Meridian\", \"extractedKeywords\": [\"rust\"], \"seniority\": \"Lead\"}\n```",
        ));
        let analysis = svc.analyze_job("jd text").await;
        assert_eq!(analysis.role_title.as_deref(), Some("Platform Lead"));
        assert_eq!(analysis.seniority, Some(Seniority::Lead));
        assert_eq!(analysis.extracted_keywords, vec!["rust".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_analysis_degrades_to_unknown() {
        let svc = service(ScriptedModel::failing());
        assert_eq!(svc.analyze_job("jd").await, JobAnalysis::unknown());

        let svc = service(ScriptedModel::ok("not json at all"));
        assert_eq!(svc.analyze_job("jd").await, JobAnalysis::unknown());
    }

    #[tokio::test]
    async fn test_empty_analysis_response_is_an_empty_partial() {
        let svc = service(ScriptedModel::ok(""));
        assert_eq!(svc.analyze_job("jd").await, JobAnalysis::default());
    }

    #[tokio::test]
    async fn test_letter_fallbacks() {
        let profile = CareerProfile::starter();
        let brief = JobBrief::from_analysis(
            JobAnalysis::unknown(),
            "jd".to_string(),
            LetterTone::Professional,
        );

        let svc = service(ScriptedModel::failing());
        assert_eq!(
            svc.draft_letter(&profile, &brief).await,
            LETTER_ERROR_FALLBACK
        );

        let svc = service(ScriptedModel::ok(""));
        assert_eq!(
            svc.draft_letter(&profile, &brief).await,
            LETTER_EMPTY_FALLBACK
        );

        let svc = service(ScriptedModel::ok("Dear team, here is the hook."));
        assert_eq!(
            svc.draft_letter(&profile, &brief).await,
            "Dear team, here is the hook."
        );
    }

    #[tokio::test]
    async fn test_failed_resume_parse_is_an_empty_draft() {
        let svc = service(ScriptedModel::failing());
        assert_eq!(svc.parse_resume("resume text").await, ProfileDraft::default());

        let svc = service(ScriptedModel::ok("<<garbage>>"));
        assert_eq!(svc.parse_resume("resume text").await, ProfileDraft::default());
    }

    #[tokio::test]
    async fn test_resume_parse_reads_partial_documents() {
        let svc = service(ScriptedModel::ok(
            "{\"basics\": {\"name\": \"River Quinn\"}, \"summary\": \"Engineer.\"}",
        ));
        let draft = svc.parse_resume("resume text").await;
        assert_eq!(
            draft.basics.as_ref().and_then(|b| b.name.as_deref()),
            Some("River Quinn")
        );
        assert_eq!(draft.summary.as_deref(), Some("Engineer."));
        assert!(draft.experience.is_none());
    }

    #[tokio::test]
    async fn test_failed_insight_extraction_is_empty() {
        let svc = service(ScriptedModel::failing());
        let insights = svc.linkedin_insights("posts").await;
        assert!(insights.skills.is_empty());
        assert!(insights.projects.is_empty());
    }

    #[tokio::test]
    async fn test_insights_parse_skills_and_projects() {
        let svc = service(ScriptedModel::ok(
            "{\"skills\": [{\"name\": \"Cloud\", \"items\": [\"AWS\"]}], \"projects\": [{\"id\": \"proj-9\", \"name\": \"Atlas\", \"description\": \"Mapping tool\", \"highlights\": []}]}",
        ));
        let insights = svc.linkedin_insights("posts").await;
        assert_eq!(insights.skills.len(), 1);
        assert_eq!(insights.skills[0].name, "Cloud");
        assert_eq!(insights.projects[0].name, "Atlas");
    }
}
