// src/types/job.rs
//! Job brief and tone vocabulary for analysis, rewriting and cover letters

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seniority band extracted from a job description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Seniority {
    Junior,
    #[default]
    Mid,
    Senior,
    Lead,
    Executive,
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seniority::Junior => "Junior",
            Seniority::Mid => "Mid",
            Seniority::Senior => "Senior",
            Seniority::Lead => "Lead",
            Seniority::Executive => "Executive",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for Seniority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "junior" => Ok(Seniority::Junior),
            "mid" => Ok(Seniority::Mid),
            "senior" => Ok(Seniority::Senior),
            "lead" => Ok(Seniority::Lead),
            "executive" => Ok(Seniority::Executive),
            other => bail!("unknown seniority '{}'", other),
        }
    }
}

/// Voice used when drafting a cover letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LetterTone {
    #[default]
    Professional,
    Relaxed,
    Corporate,
    #[serde(rename = "Light Hearted")]
    LightHearted,
    Technical,
    Founder,
    Formal,
    Punchy,
}

impl LetterTone {
    pub const ALL: [LetterTone; 8] = [
        LetterTone::Professional,
        LetterTone::Relaxed,
        LetterTone::Corporate,
        LetterTone::LightHearted,
        LetterTone::Technical,
        LetterTone::Founder,
        LetterTone::Formal,
        LetterTone::Punchy,
    ];
}

impl fmt::Display for LetterTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LetterTone::Professional => "Professional",
            LetterTone::Relaxed => "Relaxed",
            LetterTone::Corporate => "Corporate",
            LetterTone::LightHearted => "Light Hearted",
            LetterTone::Technical => "Technical",
            LetterTone::Founder => "Founder",
            LetterTone::Formal => "Formal",
            LetterTone::Punchy => "Punchy",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for LetterTone {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "professional" => Ok(LetterTone::Professional),
            "relaxed" => Ok(LetterTone::Relaxed),
            "corporate" => Ok(LetterTone::Corporate),
            "light hearted" | "lighthearted" => Ok(LetterTone::LightHearted),
            "technical" => Ok(LetterTone::Technical),
            "founder" => Ok(LetterTone::Founder),
            "formal" => Ok(LetterTone::Formal),
            "punchy" => Ok(LetterTone::Punchy),
            other => bail!("unknown letter tone '{}'", other),
        }
    }
}

/// Voice used when rewriting a resume section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RewriteTone {
    #[default]
    #[serde(rename = "Modern Professional")]
    ModernProfessional,
    Executive,
    #[serde(rename = "Startup / Founder")]
    StartupFounder,
    #[serde(rename = "Technical Operator")]
    TechnicalOperator,
}

impl fmt::Display for RewriteTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RewriteTone::ModernProfessional => "Modern Professional",
            RewriteTone::Executive => "Executive",
            RewriteTone::StartupFounder => "Startup / Founder",
            RewriteTone::TechnicalOperator => "Technical Operator",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for RewriteTone {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern" | "modern professional" => Ok(RewriteTone::ModernProfessional),
            "executive" => Ok(RewriteTone::Executive),
            "startup" | "founder" | "startup / founder" => Ok(RewriteTone::StartupFounder),
            "technical" | "technical operator" => Ok(RewriteTone::TechnicalOperator),
            other => bail!("unknown rewrite tone '{}'", other),
        }
    }
}

// ===== Job brief =====

/// Target role derived from a pasted job description. Lives in the studio's
/// derived state, outside undo history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBrief {
    pub id: String,
    pub role_title: String,
    pub company_name: String,
    pub raw_description: String,
    #[serde(default)]
    pub extracted_keywords: Vec<String>,
    #[serde(default)]
    pub seniority: Seniority,
    #[serde(default)]
    pub tone: LetterTone,
}

/// Partial analysis returned by the text service for a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysis {
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub extracted_keywords: Vec<String>,
    #[serde(default)]
    pub seniority: Option<Seniority>,
}

impl JobAnalysis {
    /// Neutral result used when the service call fails.
    pub fn unknown() -> Self {
        Self {
            role_title: Some("Unknown Role".to_string()),
            company_name: Some("Unknown Company".to_string()),
            extracted_keywords: Vec::new(),
            seniority: Some(Seniority::Mid),
        }
    }
}

impl JobBrief {
    /// Builds a brief from an analysis result, the raw description it came
    /// from and the tone the user picked.
    pub fn from_analysis(analysis: JobAnalysis, raw_description: String, tone: LetterTone) -> Self {
        Self {
            id: format!("job-{}", Uuid::new_v4()),
            role_title: analysis.role_title.unwrap_or_else(|| "Role".to_string()),
            company_name: analysis
                .company_name
                .unwrap_or_else(|| "Company".to_string()),
            raw_description,
            extracted_keywords: analysis.extracted_keywords,
            seniority: analysis.seniority.unwrap_or_default(),
            tone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_tone_serializes_with_display_strings() {
        let json = serde_json::to_string(&LetterTone::LightHearted).unwrap();
        assert_eq!(json, "\"Light Hearted\"");
        let parsed: LetterTone = serde_json::from_str("\"Light Hearted\"").unwrap();
        assert_eq!(parsed, LetterTone::LightHearted);
    }

    #[test]
    fn test_rewrite_tone_wire_names() {
        assert_eq!(
            serde_json::to_string(&RewriteTone::StartupFounder).unwrap(),
            "\"Startup / Founder\""
        );
        assert_eq!(
            serde_json::to_string(&RewriteTone::ModernProfessional).unwrap(),
            "\"Modern Professional\""
        );
    }

    #[test]
    fn test_tone_from_str_accepts_cli_spellings() {
        assert_eq!(
            "light-hearted".parse::<LetterTone>().unwrap(),
            LetterTone::LightHearted
        );
        assert_eq!("PUNCHY".parse::<LetterTone>().unwrap(), LetterTone::Punchy);
        assert_eq!(
            "startup".parse::<RewriteTone>().unwrap(),
            RewriteTone::StartupFounder
        );
        assert!("breezy".parse::<LetterTone>().is_err());
    }

    #[test]
    fn test_analysis_parses_partial_json() {
        let json = r#"{"roleTitle": "Platform Engineer", "seniority": "Senior"}"#;
        let analysis: JobAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.role_title.as_deref(), Some("Platform Engineer"));
        assert_eq!(analysis.seniority, Some(Seniority::Senior));
        assert!(analysis.extracted_keywords.is_empty());
        assert!(analysis.company_name.is_none());
    }

    #[test]
    fn test_brief_from_analysis_fills_missing_fields() {
        let brief = JobBrief::from_analysis(
            JobAnalysis::default(),
            "raw jd".to_string(),
            LetterTone::Formal,
        );
        assert_eq!(brief.role_title, "Role");
        assert_eq!(brief.company_name, "Company");
        assert_eq!(brief.seniority, Seniority::Mid);
        assert_eq!(brief.tone, LetterTone::Formal);
        assert!(brief.id.starts_with("job-"));
    }

    #[test]
    fn test_unknown_analysis_is_the_neutral_fallback() {
        let unknown = JobAnalysis::unknown();
        assert_eq!(unknown.role_title.as_deref(), Some("Unknown Role"));
        assert_eq!(unknown.company_name.as_deref(), Some("Unknown Company"));
        assert_eq!(unknown.seniority, Some(Seniority::Mid));
        assert!(unknown.extracted_keywords.is_empty());
    }
}
