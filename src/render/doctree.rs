// src/render/doctree.rs
//! Portable document tree: the DOCX-shaped output as pure data

use serde::{Deserialize, Serialize};

use crate::render::{date_range, included_sections, Section};
use crate::types::CareerProfile;

/// Heading/paragraph/run tree with every style attribute carried as data.
/// Nothing here is computed at write time; the DOCX packer only translates
/// these attributes into markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocTree {
    pub styles: Vec<NamedStyle>,
    pub blocks: Vec<DocBlock>,
}

/// Named paragraph styles, mirroring the classic resume look: 11pt Calibri
/// body, 24pt centered name, 12pt all-caps section headings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedStyle {
    pub id: String,
    pub name: String,
    pub font: String,
    pub size_half_points: u32,
    pub bold: bool,
    pub all_caps: bool,
    pub centered: bool,
    pub line_spacing: Option<u32>,
    pub spacing_after: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocBlock {
    Heading(DocHeading),
    Paragraph(DocParagraph),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocHeading {
    pub level: HeadingLevel,
    pub text: String,
    /// Which document section this heading opens; the name heading has none.
    pub section: Option<Section>,
    pub bottom_border: bool,
    pub spacing_before: Option<u32>,
    pub spacing_after: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocParagraph {
    pub runs: Vec<DocRun>,
    pub centered: bool,
    /// Right-aligned tab stop at the text edge; runs with `tab_before` jump
    /// to it.
    pub right_tab_stop: bool,
    pub bullet: bool,
    pub spacing_before: Option<u32>,
    pub spacing_after: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub size_half_points: Option<u32>,
    pub color: Option<String>,
    pub tab_before: bool,
    pub break_before: bool,
}

impl DocRun {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            ..Self::default()
        }
    }
}

impl DocTree {
    /// Sections opened by heading nodes, in document order.
    pub fn sections(&self) -> Vec<Section> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                DocBlock::Heading(h) => h.section,
                DocBlock::Paragraph(_) => None,
            })
            .collect()
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.sections().contains(&section)
    }
}

fn section_heading(section: Section) -> DocHeading {
    let text = match section {
        Section::Summary => "Professional Summary",
        Section::Experience => "Experience",
        Section::Education => "Education",
        Section::Skills => "Skills",
        Section::Projects => "Projects",
        Section::Certifications => "Certifications",
        Section::Publications => "Publications",
        Section::Conferences => "Conferences",
    };
    DocHeading {
        level: HeadingLevel::H2,
        text: text.to_string(),
        section: Some(section),
        bottom_border: true,
        spacing_before: Some(200),
        spacing_after: Some(100),
    }
}

fn default_styles() -> Vec<NamedStyle> {
    vec![
        NamedStyle {
            id: "Normal".to_string(),
            name: "Normal".to_string(),
            font: "Calibri".to_string(),
            size_half_points: 22,
            bold: false,
            all_caps: false,
            centered: false,
            line_spacing: Some(240),
            spacing_after: None,
        },
        NamedStyle {
            id: "Heading1".to_string(),
            name: "Heading 1".to_string(),
            font: "Calibri".to_string(),
            size_half_points: 48,
            bold: true,
            all_caps: false,
            centered: true,
            line_spacing: None,
            spacing_after: Some(100),
        },
        NamedStyle {
            id: "Heading2".to_string(),
            name: "Heading 2".to_string(),
            font: "Calibri".to_string(),
            size_half_points: 24,
            bold: true,
            all_caps: true,
            centered: false,
            line_spacing: None,
            spacing_after: None,
        },
    ]
}

/// Builds the document tree for the profile: header block, then the included
/// sections in canonical order, all styling declarative on runs.
pub fn render_doctree(profile: &CareerProfile) -> DocTree {
    let mut blocks = Vec::new();

    blocks.push(DocBlock::Heading(DocHeading {
        level: HeadingLevel::H1,
        text: profile.basics.name.clone(),
        section: None,
        bottom_border: false,
        spacing_before: None,
        spacing_after: None,
    }));

    blocks.push(DocBlock::Paragraph(DocParagraph {
        runs: vec![DocRun {
            text: profile.basics.title.clone(),
            size_half_points: Some(28),
            color: Some("555555".to_string()),
            ..DocRun::default()
        }],
        centered: true,
        spacing_after: Some(200),
        ..DocParagraph::default()
    }));

    let mut contact_runs = vec![DocRun::text(format!(
        "{} | {} | {}",
        profile.basics.location, profile.basics.email, profile.basics.phone
    ))];
    if !profile.basics.links.is_empty() {
        let labels = profile
            .basics
            .links
            .iter()
            .map(|l| l.label.as_str())
            .collect::<Vec<_>>()
            .join(" | ");
        contact_runs.push(DocRun::text(format!(" | {}", labels)));
    }
    blocks.push(DocBlock::Paragraph(DocParagraph {
        runs: contact_runs,
        centered: true,
        spacing_after: Some(400),
        ..DocParagraph::default()
    }));

    for section in included_sections(profile) {
        blocks.push(DocBlock::Heading(section_heading(section)));
        match section {
            Section::Summary => {
                blocks.push(DocBlock::Paragraph(DocParagraph {
                    runs: vec![DocRun::text(profile.summary.clone())],
                    ..DocParagraph::default()
                }));
            }
            Section::Experience => {
                for exp in &profile.experience {
                    blocks.push(DocBlock::Paragraph(DocParagraph {
                        runs: vec![
                            DocRun {
                                text: exp.company.clone(),
                                bold: true,
                                size_half_points: Some(24),
                                ..DocRun::default()
                            },
                            DocRun {
                                text: format!("{}  |  {}", exp.location, date_range(exp)),
                                tab_before: true,
                                ..DocRun::default()
                            },
                        ],
                        right_tab_stop: true,
                        spacing_before: Some(100),
                        ..DocParagraph::default()
                    }));
                    blocks.push(DocBlock::Paragraph(DocParagraph {
                        runs: vec![DocRun {
                            text: exp.role.clone(),
                            italic: true,
                            color: Some("333333".to_string()),
                            ..DocRun::default()
                        }],
                        spacing_after: Some(100),
                        ..DocParagraph::default()
                    }));
                    for hl in &exp.highlights {
                        blocks.push(DocBlock::Paragraph(DocParagraph {
                            runs: vec![DocRun::text(hl.text.clone())],
                            bullet: true,
                            ..DocParagraph::default()
                        }));
                    }
                }
            }
            Section::Education => {
                for edu in &profile.education {
                    blocks.push(DocBlock::Paragraph(DocParagraph {
                        runs: vec![
                            DocRun::bold(edu.institution.clone()),
                            DocRun {
                                text: edu.year.clone(),
                                tab_before: true,
                                ..DocRun::default()
                            },
                            DocRun {
                                text: edu.degree.clone(),
                                italic: true,
                                break_before: true,
                                ..DocRun::default()
                            },
                        ],
                        right_tab_stop: true,
                        spacing_before: Some(100),
                        spacing_after: Some(100),
                        ..DocParagraph::default()
                    }));
                }
            }
            Section::Skills => {
                for grp in &profile.skills {
                    blocks.push(DocBlock::Paragraph(DocParagraph {
                        runs: vec![
                            DocRun::bold(format!("{}: ", grp.name)),
                            DocRun::text(grp.items.join(", ")),
                        ],
                        ..DocParagraph::default()
                    }));
                }
            }
            Section::Projects => {
                for proj in &profile.projects {
                    let mut runs = vec![DocRun::bold(proj.name.clone())];
                    if let Some(url) = &proj.url {
                        runs.push(DocRun::text(format!(" ({})", url)));
                    }
                    runs.push(DocRun {
                        text: proj.description.clone(),
                        break_before: true,
                        ..DocRun::default()
                    });
                    blocks.push(DocBlock::Paragraph(DocParagraph {
                        runs,
                        spacing_before: Some(100),
                        spacing_after: Some(100),
                        ..DocParagraph::default()
                    }));
                }
            }
            Section::Certifications => {
                for cert in &profile.certifications {
                    blocks.push(DocBlock::Paragraph(DocParagraph {
                        runs: vec![
                            DocRun::bold(cert.name.clone()),
                            DocRun {
                                text: cert.date.clone(),
                                tab_before: true,
                                ..DocRun::default()
                            },
                            DocRun {
                                text: cert.issuer.clone(),
                                italic: true,
                                break_before: true,
                                ..DocRun::default()
                            },
                        ],
                        right_tab_stop: true,
                        spacing_before: Some(100),
                        spacing_after: Some(100),
                        ..DocParagraph::default()
                    }));
                }
            }
            Section::Publications => {
                for publication in &profile.publications {
                    let mut runs = vec![DocRun::bold(publication.title.clone())];
                    if let Some(url) = &publication.url {
                        runs.push(DocRun::text(format!(" ({})", url)));
                    }
                    runs.push(DocRun {
                        text: publication.date.clone(),
                        tab_before: true,
                        ..DocRun::default()
                    });
                    runs.push(DocRun {
                        text: publication.publisher.clone(),
                        italic: true,
                        break_before: true,
                        ..DocRun::default()
                    });
                    blocks.push(DocBlock::Paragraph(DocParagraph {
                        runs,
                        right_tab_stop: true,
                        spacing_before: Some(100),
                        spacing_after: Some(100),
                        ..DocParagraph::default()
                    }));
                }
            }
            Section::Conferences => {
                for conf in &profile.conferences {
                    blocks.push(DocBlock::Paragraph(DocParagraph {
                        runs: vec![
                            DocRun::bold(conf.name.clone()),
                            DocRun {
                                text: conf.date.clone(),
                                tab_before: true,
                                ..DocRun::default()
                            },
                            DocRun {
                                text: conf.event.clone(),
                                italic: true,
                                break_before: true,
                                ..DocRun::default()
                            },
                        ],
                        right_tab_stop: true,
                        spacing_before: Some(100),
                        spacing_after: Some(100),
                        ..DocParagraph::default()
                    }));
                }
            }
        }
    }

    DocTree {
        styles: default_styles(),
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_follow_the_shared_contract() {
        let mut profile = CareerProfile::starter();
        profile
            .certifications
            .push(crate::types::Certification::new());
        let tree = render_doctree(&profile);
        assert_eq!(tree.sections(), included_sections(&profile));
    }

    #[test]
    fn test_empty_experience_has_no_heading_node() {
        let mut profile = CareerProfile::starter();
        profile.experience.clear();
        let tree = render_doctree(&profile);
        assert!(!tree.has_section(Section::Experience));
        assert!(tree
            .blocks
            .iter()
            .all(|b| !matches!(b, DocBlock::Heading(h) if h.text == "Experience")));
    }

    #[test]
    fn test_company_runs_are_bold_and_dates_sit_behind_a_right_tab() {
        let tree = render_doctree(&CareerProfile::starter());
        let company_para = tree
            .blocks
            .iter()
            .find_map(|b| match b {
                DocBlock::Paragraph(p) if p.runs.first().map(|r| r.text.as_str()) == Some("Linear Orbital") => {
                    Some(p)
                }
                _ => None,
            })
            .unwrap();
        assert!(company_para.right_tab_stop);
        assert!(company_para.runs[0].bold);
        assert!(company_para.runs[1].tab_before);
        assert_eq!(company_para.runs[1].text, "Remote, AU  |  2021 – Present");
    }

    #[test]
    fn test_role_runs_are_italic() {
        let tree = render_doctree(&CareerProfile::starter());
        let role_para = tree
            .blocks
            .iter()
            .find_map(|b| match b {
                DocBlock::Paragraph(p)
                    if p.runs.first().map(|r| r.text.as_str())
                        == Some("Senior Frontend Engineer") =>
                {
                    Some(p)
                }
                _ => None,
            })
            .unwrap();
        assert!(role_para.runs[0].italic);
        assert_eq!(role_para.runs[0].color.as_deref(), Some("333333"));
    }

    #[test]
    fn test_highlights_become_bullet_paragraphs() {
        let tree = render_doctree(&CareerProfile::starter());
        let bullets = tree
            .blocks
            .iter()
            .filter(|b| matches!(b, DocBlock::Paragraph(p) if p.bullet))
            .count();
        assert_eq!(bullets, 5);
    }

    #[test]
    fn test_styles_carry_the_resume_look() {
        let tree = render_doctree(&CareerProfile::starter());
        let heading2 = tree.styles.iter().find(|s| s.id == "Heading2").unwrap();
        assert!(heading2.all_caps);
        assert!(heading2.bold);
        assert_eq!(heading2.size_half_points, 24);
        let normal = tree.styles.iter().find(|s| s.id == "Normal").unwrap();
        assert_eq!(normal.font, "Calibri");
        assert_eq!(normal.size_half_points, 22);
    }
}
