// src/render/preview.rs
//! Preview tree: the structured visual form behind the on-screen and HTML views

use serde::{Deserialize, Serialize};

use crate::render::{date_range, included_sections, Section, TemplateId};
use crate::types::CareerProfile;

/// Render-ready visual tree for one template. Variants differ in header
/// treatment, section labels and column split; the linearized section order
/// is canonical for every variant, which keeps the HTML wrapping consistent
/// with the Markdown and document-tree outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewDoc {
    pub template: TemplateId,
    pub header: HeaderBlock,
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub links: Vec<LinkEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    Full,
    Main,
    Side,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub column: Column,
    pub sections: Vec<SectionBlock>,
}

/// One rendered section. `label` is the variant's heading text; `None` means
/// the variant shows the content without a heading (minimal's summary).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBlock {
    pub section: Section,
    pub label: Option<String>,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SectionBody {
    Paragraph(String),
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    SkillGroups(Vec<SkillGroupEntry>),
    Projects(Vec<ProjectEntry>),
    Certifications(Vec<CertificationEntry>),
    Publications(Vec<PublicationEntry>),
    Conferences(Vec<ConferenceEntry>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub date_range: String,
    pub location: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroupEntry {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationEntry {
    pub title: String,
    pub publisher: String,
    pub date: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConferenceEntry {
    pub name: String,
    pub event: String,
    pub date: String,
}

impl PreviewDoc {
    /// Sections in document order, across all regions.
    pub fn sections(&self) -> Vec<Section> {
        self.regions
            .iter()
            .flat_map(|r| r.sections.iter().map(|b| b.section))
            .collect()
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.sections().contains(&section)
    }
}

/// Builds the preview tree for the selected template.
pub fn build_preview(profile: &CareerProfile, template: TemplateId) -> PreviewDoc {
    let labeler: fn(Section) -> Option<&'static str> = match template {
        TemplateId::Modern => modern_label,
        TemplateId::Classic => classic_label,
        TemplateId::Minimal => minimal_label,
        TemplateId::Creative => creative_label,
    };

    let blocks: Vec<SectionBlock> = included_sections(profile)
        .into_iter()
        .map(|section| SectionBlock {
            section,
            label: labeler(section).map(str::to_string),
            body: section_body(profile, section),
        })
        .collect();

    let regions = match template {
        // Two-column variants put everything up to Experience in the main
        // column and the rest in the sidebar, so document order stays
        // canonical.
        TemplateId::Modern | TemplateId::Creative => {
            let split = blocks
                .iter()
                .position(|b| b.section > Section::Experience)
                .unwrap_or(blocks.len());
            let (main, side) = blocks.split_at(split);
            let mut regions = vec![Region {
                column: Column::Main,
                sections: main.to_vec(),
            }];
            if !side.is_empty() {
                regions.push(Region {
                    column: Column::Side,
                    sections: side.to_vec(),
                });
            }
            regions
        }
        TemplateId::Classic | TemplateId::Minimal => vec![Region {
            column: Column::Full,
            sections: blocks,
        }],
    };

    PreviewDoc {
        template,
        header: HeaderBlock {
            name: profile.basics.name.clone(),
            title: profile.basics.title.clone(),
            location: profile.basics.location.clone(),
            email: profile.basics.email.clone(),
            phone: profile.basics.phone.clone(),
            links: profile
                .basics
                .links
                .iter()
                .map(|l| LinkEntry {
                    label: l.label.clone(),
                    url: l.url.clone(),
                })
                .collect(),
        },
        regions,
    }
}

fn modern_label(section: Section) -> Option<&'static str> {
    Some(match section {
        Section::Summary => "Summary",
        Section::Experience => "Experience",
        Section::Education => "Education",
        Section::Skills => "Expertise",
        Section::Projects => "Selected Projects",
        Section::Certifications => "Certifications",
        Section::Publications => "Speaking & Writing",
        Section::Conferences => "Conferences",
    })
}

fn classic_label(section: Section) -> Option<&'static str> {
    Some(match section {
        Section::Summary => "Professional Summary",
        Section::Experience => "Experience",
        Section::Education => "Education",
        Section::Skills => "Skills",
        Section::Projects => "Projects",
        Section::Certifications => "Certifications",
        Section::Publications => "Publications",
        Section::Conferences => "Conferences",
    })
}

fn minimal_label(section: Section) -> Option<&'static str> {
    match section {
        // Minimal shows the summary as a bare centered block under the
        // header.
        Section::Summary => None,
        Section::Experience => Some("Experience"),
        Section::Education => Some("Education"),
        Section::Skills => Some("Expertise"),
        Section::Projects => Some("Projects"),
        Section::Certifications => Some("Certifications"),
        Section::Publications => Some("Publications"),
        Section::Conferences => Some("Conferences"),
    }
}

fn creative_label(section: Section) -> Option<&'static str> {
    Some(match section {
        Section::Summary => "Profile",
        Section::Experience => "Experience",
        Section::Education => "Education",
        Section::Skills => "Skills",
        Section::Projects => "Projects",
        Section::Certifications => "Certifications",
        Section::Publications => "Publications",
        Section::Conferences => "Conferences",
    })
}

fn section_body(profile: &CareerProfile, section: Section) -> SectionBody {
    match section {
        Section::Summary => SectionBody::Paragraph(profile.summary.clone()),
        Section::Experience => SectionBody::Experience(
            profile
                .experience
                .iter()
                .map(|exp| ExperienceEntry {
                    company: exp.company.clone(),
                    role: exp.role.clone(),
                    date_range: date_range(exp),
                    location: exp.location.clone(),
                    bullets: exp.highlights.iter().map(|h| h.text.clone()).collect(),
                })
                .collect(),
        ),
        Section::Education => SectionBody::Education(
            profile
                .education
                .iter()
                .map(|edu| EducationEntry {
                    institution: edu.institution.clone(),
                    degree: edu.degree.clone(),
                    year: edu.year.clone(),
                })
                .collect(),
        ),
        Section::Skills => SectionBody::SkillGroups(
            profile
                .skills
                .iter()
                .map(|grp| SkillGroupEntry {
                    name: grp.name.clone(),
                    items: grp.items.clone(),
                })
                .collect(),
        ),
        Section::Projects => SectionBody::Projects(
            profile
                .projects
                .iter()
                .map(|proj| ProjectEntry {
                    name: proj.name.clone(),
                    description: proj.description.clone(),
                    url: proj.url.clone(),
                    bullets: proj.highlights.clone(),
                })
                .collect(),
        ),
        Section::Certifications => SectionBody::Certifications(
            profile
                .certifications
                .iter()
                .map(|cert| CertificationEntry {
                    name: cert.name.clone(),
                    issuer: cert.issuer.clone(),
                    date: cert.date.clone(),
                })
                .collect(),
        ),
        Section::Publications => SectionBody::Publications(
            profile
                .publications
                .iter()
                .map(|publication| PublicationEntry {
                    title: publication.title.clone(),
                    publisher: publication.publisher.clone(),
                    date: publication.date.clone(),
                    url: publication.url.clone(),
                })
                .collect(),
        ),
        Section::Conferences => SectionBody::Conferences(
            profile
                .conferences
                .iter()
                .map(|conf| ConferenceEntry {
                    name: conf.name.clone(),
                    event: conf.event.clone(),
                    date: conf.date.clone(),
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_matches_the_shared_section_contract() {
        let mut profile = CareerProfile::starter();
        profile.projects.push(crate::types::Project::new("Aux"));
        let expected = included_sections(&profile);
        for template in TemplateId::ALL {
            let doc = build_preview(&profile, template);
            assert_eq!(doc.sections(), expected, "template {}", template);
        }
    }

    #[test]
    fn test_empty_experience_renders_no_experience_block_in_any_variant() {
        let mut profile = CareerProfile::starter();
        profile.experience.clear();
        for template in TemplateId::ALL {
            let doc = build_preview(&profile, template);
            assert!(!doc.has_section(Section::Experience), "template {}", template);
            assert!(doc.has_section(Section::Skills));
        }
    }

    #[test]
    fn test_variant_labels() {
        let profile = CareerProfile::starter();
        let modern = build_preview(&profile, TemplateId::Modern);
        let skills = modern
            .regions
            .iter()
            .flat_map(|r| &r.sections)
            .find(|b| b.section == Section::Skills)
            .unwrap();
        assert_eq!(skills.label.as_deref(), Some("Expertise"));

        let classic = build_preview(&profile, TemplateId::Classic);
        assert_eq!(
            classic.regions[0].sections[0].label.as_deref(),
            Some("Professional Summary")
        );

        let minimal = build_preview(&profile, TemplateId::Minimal);
        assert_eq!(minimal.regions[0].sections[0].label, None);

        let creative = build_preview(&profile, TemplateId::Creative);
        assert_eq!(
            creative.regions[0].sections[0].label.as_deref(),
            Some("Profile")
        );
    }

    #[test]
    fn test_two_column_variants_split_after_experience() {
        let profile = CareerProfile::starter();
        let doc = build_preview(&profile, TemplateId::Modern);
        assert_eq!(doc.regions.len(), 2);
        assert_eq!(doc.regions[0].column, Column::Main);
        assert_eq!(
            doc.regions[0]
                .sections
                .iter()
                .map(|b| b.section)
                .collect::<Vec<_>>(),
            vec![Section::Summary, Section::Experience]
        );
        assert_eq!(doc.regions[1].column, Column::Side);
        assert_eq!(
            doc.regions[1]
                .sections
                .iter()
                .map(|b| b.section)
                .collect::<Vec<_>>(),
            vec![Section::Education, Section::Skills]
        );
    }

    #[test]
    fn test_single_column_variants_use_one_full_region() {
        let profile = CareerProfile::starter();
        for template in [TemplateId::Classic, TemplateId::Minimal] {
            let doc = build_preview(&profile, template);
            assert_eq!(doc.regions.len(), 1);
            assert_eq!(doc.regions[0].column, Column::Full);
        }
    }

    #[test]
    fn test_experience_entries_carry_formatted_dates() {
        let doc = build_preview(&CareerProfile::starter(), TemplateId::Classic);
        let exp = doc
            .regions[0]
            .sections
            .iter()
            .find(|b| b.section == Section::Experience)
            .unwrap();
        match &exp.body {
            SectionBody::Experience(entries) => {
                assert_eq!(entries[0].date_range, "2021 – Present");
                assert_eq!(entries[0].bullets.len(), 3);
            }
            other => panic!("unexpected body {:?}", other),
        }
    }
}
