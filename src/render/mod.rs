// src/render/mod.rs
//! Render transforms: one profile in, four document shapes out

pub mod doctree;
pub mod docx;
pub mod html;
pub mod markdown;
pub mod preview;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::types::{CareerProfile, ExperienceItem};

/// The four layout variants. Closed set; every transform dispatches on it
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Minimal,
    Creative,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Modern,
        TemplateId::Classic,
        TemplateId::Minimal,
        TemplateId::Creative,
    ];
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Minimal => "minimal",
            TemplateId::Creative => "creative",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TemplateId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Ok(TemplateId::Modern),
            "classic" => Ok(TemplateId::Classic),
            "minimal" => Ok(TemplateId::Minimal),
            "creative" => Ok(TemplateId::Creative),
            other => bail!("unknown template '{}'", other),
        }
    }
}

/// Document sections, in canonical order. Every transform renders the same
/// included set in this relative order; only labels, styling and column
/// placement vary by template. Variant order follows canonical order, so
/// comparisons can split a section run into column regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Publications,
    Conferences,
}

pub const SECTION_ORDER: [Section; 8] = [
    Section::Summary,
    Section::Experience,
    Section::Education,
    Section::Skills,
    Section::Projects,
    Section::Certifications,
    Section::Publications,
    Section::Conferences,
];

/// Whether a section has anything to show. Blank-only text counts as empty.
pub fn section_has_content(profile: &CareerProfile, section: Section) -> bool {
    match section {
        Section::Summary => !profile.summary.trim().is_empty(),
        Section::Experience => !profile.experience.is_empty(),
        Section::Education => !profile.education.is_empty(),
        Section::Skills => !profile.skills.is_empty(),
        Section::Projects => !profile.projects.is_empty(),
        Section::Certifications => !profile.certifications.is_empty(),
        Section::Publications => !profile.publications.is_empty(),
        Section::Conferences => !profile.conferences.is_empty(),
    }
}

/// The sections every transform renders for this profile, in canonical order.
/// This is the shared suppression contract: all four output shapes consult
/// this one helper, so they can never disagree on the section set.
pub fn included_sections(profile: &CareerProfile) -> Vec<Section> {
    SECTION_ORDER
        .iter()
        .copied()
        .filter(|section| section_has_content(profile, *section))
        .collect()
}

/// "2021 – Present" style range, shared by every transform.
pub fn date_range(exp: &ExperienceItem) -> String {
    format!("{} – {}", exp.start_date, exp.end_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_profile_includes_core_sections_in_order() {
        let profile = CareerProfile::starter();
        assert_eq!(
            included_sections(&profile),
            vec![
                Section::Summary,
                Section::Experience,
                Section::Education,
                Section::Skills,
            ]
        );
    }

    #[test]
    fn test_blank_summary_counts_as_empty() {
        let mut profile = CareerProfile::starter();
        profile.summary = "   ".to_string();
        assert!(!section_has_content(&profile, Section::Summary));
        assert!(!included_sections(&profile).contains(&Section::Summary));
    }

    #[test]
    fn test_populated_optional_sections_join_in_canonical_position() {
        let mut profile = CareerProfile::starter();
        profile.projects.push(crate::types::Project::new("Sidecar"));
        profile
            .publications
            .push(crate::types::Publication::new());
        let sections = included_sections(&profile);
        assert_eq!(
            sections,
            vec![
                Section::Summary,
                Section::Experience,
                Section::Education,
                Section::Skills,
                Section::Projects,
                Section::Publications,
            ]
        );
    }

    #[test]
    fn test_template_id_parses_all_known_names() {
        for id in TemplateId::ALL {
            assert_eq!(id.to_string().parse::<TemplateId>().unwrap(), id);
        }
        assert!("brutalist".parse::<TemplateId>().is_err());
    }
}
