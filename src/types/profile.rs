// src/types/profile.rs
//! Career profile document model shared by history, rendering and exports

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Schema tag written into every profile. Not a mutation counter.
pub const PROFILE_VERSION: &str = "1.0";

// ===== Profile aggregate =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerProfile {
    pub profile_version: String,
    pub basics: Basics,
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub conferences: Vec<Conference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basics {
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub links: Vec<ContactLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    pub id: String,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<Metric>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conference {
    pub id: String,
    pub name: String,
    pub event: String,
    pub date: String,
}

// ===== Constructors =====

fn fresh_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

impl ExperienceItem {
    pub fn new() -> Self {
        Self {
            id: fresh_id("exp"),
            company: String::new(),
            role: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            location: String::new(),
            highlights: Vec::new(),
        }
    }
}

impl Default for ExperienceItem {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlight {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: fresh_id("h"),
            text: text.into(),
            tags: None,
            metrics: None,
        }
    }
}

impl EducationItem {
    pub fn new() -> Self {
        Self {
            id: fresh_id("edu"),
            institution: String::new(),
            degree: String::new(),
            year: String::new(),
        }
    }
}

impl Default for EducationItem {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: fresh_id("proj"),
            name: name.into(),
            description: String::new(),
            url: None,
            highlights: Vec::new(),
        }
    }
}

impl Certification {
    pub fn new() -> Self {
        Self {
            id: fresh_id("cert"),
            name: String::new(),
            issuer: String::new(),
            date: String::new(),
        }
    }
}

impl Default for Certification {
    fn default() -> Self {
        Self::new()
    }
}

impl Publication {
    pub fn new() -> Self {
        Self {
            id: fresh_id("pub"),
            title: String::new(),
            publisher: String::new(),
            date: String::new(),
            url: None,
        }
    }
}

impl Default for Publication {
    fn default() -> Self {
        Self::new()
    }
}

impl Conference {
    pub fn new() -> Self {
        Self {
            id: fresh_id("conf"),
            name: String::new(),
            event: String::new(),
            date: String::new(),
        }
    }
}

impl Default for Conference {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Starter profile =====

impl CareerProfile {
    /// Built-in starter profile used on first run and as the fallback when
    /// the stored slot cannot be parsed.
    pub fn starter() -> Self {
        Self {
            profile_version: PROFILE_VERSION.to_string(),
            basics: Basics {
                name: "Alex Sterling".to_string(),
                title: "Senior Product Engineer".to_string(),
                location: "Sydney, AU".to_string(),
                email: "alex.sterling@example.com".to_string(),
                phone: "+61 400 123 456".to_string(),
                links: vec![
                    ContactLink {
                        label: "LinkedIn".to_string(),
                        url: "#".to_string(),
                    },
                    ContactLink {
                        label: "GitHub".to_string(),
                        url: "#".to_string(),
                    },
                ],
            },
            summary: "Design-focused Product Engineer with 8+ years experience building \
                      scalable SaaS platforms. Specialist in React architectures and design \
                      systems. Proven track record of reducing technical debt by 40% while \
                      accelerating feature delivery speed."
                .to_string(),
            experience: vec![
                ExperienceItem {
                    id: "exp-1".to_string(),
                    company: "Linear Orbital".to_string(),
                    role: "Senior Frontend Engineer".to_string(),
                    start_date: "2021".to_string(),
                    end_date: "Present".to_string(),
                    location: "Remote, AU".to_string(),
                    highlights: vec![
                        Highlight {
                            id: "h1".to_string(),
                            text: "Architected the core design system used by 20+ engineering \
                                   squads, reducing UI shipping time by 30%."
                                .to_string(),
                            tags: None,
                            metrics: None,
                        },
                        Highlight {
                            id: "h2".to_string(),
                            text: "Led the migration of legacy Redux state to React Query, \
                                   improving application performance score from 65 to 98."
                                .to_string(),
                            tags: None,
                            metrics: None,
                        },
                        Highlight {
                            id: "h3".to_string(),
                            text: "Mentored 4 junior developers through to mid-level promotion \
                                   cycles."
                                .to_string(),
                            tags: None,
                            metrics: None,
                        },
                    ],
                },
                ExperienceItem {
                    id: "exp-2".to_string(),
                    company: "Atlassian".to_string(),
                    role: "Software Engineer II".to_string(),
                    start_date: "2018".to_string(),
                    end_date: "2021".to_string(),
                    location: "Sydney".to_string(),
                    highlights: vec![
                        Highlight {
                            id: "h4".to_string(),
                            text: "Developed key features for Jira Cloud next-gen projects \
                                   using React and GraphQL."
                                .to_string(),
                            tags: None,
                            metrics: None,
                        },
                        Highlight {
                            id: "h5".to_string(),
                            text: "Optimized CI/CD pipelines, cutting build times by 15 \
                                   minutes per deploy."
                                .to_string(),
                            tags: None,
                            metrics: None,
                        },
                    ],
                },
            ],
            skills: vec![
                SkillGroup {
                    name: "Languages".to_string(),
                    items: vec![
                        "TypeScript".to_string(),
                        "JavaScript".to_string(),
                        "Rust".to_string(),
                        "Python".to_string(),
                    ],
                },
                SkillGroup {
                    name: "Frontend".to_string(),
                    items: vec![
                        "React".to_string(),
                        "Next.js".to_string(),
                        "Tailwind".to_string(),
                        "Three.js".to_string(),
                    ],
                },
                SkillGroup {
                    name: "Infrastructure".to_string(),
                    items: vec![
                        "AWS".to_string(),
                        "Terraform".to_string(),
                        "Docker".to_string(),
                    ],
                },
            ],
            education: vec![EducationItem {
                id: "edu-1".to_string(),
                institution: "UNSW Sydney".to_string(),
                degree: "Bachelor of Computer Science".to_string(),
                year: "2017".to_string(),
            }],
            projects: Vec::new(),
            certifications: Vec::new(),
            publications: Vec::new(),
            conferences: Vec::new(),
            linkedin_context: None,
        }
    }

    pub fn linkedin_context_text(&self) -> &str {
        self.linkedin_context.as_deref().unwrap_or("")
    }
}

impl Default for CareerProfile {
    fn default() -> Self {
        Self::starter()
    }
}

// ===== Partial shapes returned by the text service =====

/// Partial profile parsed out of free-form resume text. Every field is
/// optional; missing fields fall back to the starter profile during merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    #[serde(default)]
    pub profile_version: Option<String>,
    #[serde(default)]
    pub basics: Option<BasicsDraft>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Option<Vec<ExperienceItem>>,
    #[serde(default)]
    pub skills: Option<Vec<SkillGroup>>,
    #[serde(default)]
    pub education: Option<Vec<EducationItem>>,
    #[serde(default)]
    pub projects: Option<Vec<Project>>,
    #[serde(default)]
    pub certifications: Option<Vec<Certification>>,
    #[serde(default)]
    pub publications: Option<Vec<Publication>>,
    #[serde(default)]
    pub conferences: Option<Vec<Conference>>,
    #[serde(default)]
    pub linkedin_context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicsDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub links: Option<Vec<ContactLink>>,
}

/// Skill groups and projects extracted from pasted LinkedIn context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedInsights {
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl ProfileDraft {
    /// Overlays the draft on the starter profile. Scalar fields fall back to
    /// the starter, list sections come from the draft or stay empty, and an
    /// already-captured LinkedIn context wins over a parsed one.
    pub fn into_profile(self, existing_linkedin: Option<String>) -> CareerProfile {
        let base = CareerProfile::starter();
        let basics = match self.basics {
            Some(draft) => Basics {
                name: draft.name.unwrap_or(base.basics.name),
                title: draft.title.unwrap_or(base.basics.title),
                location: draft.location.unwrap_or(base.basics.location),
                email: draft.email.unwrap_or(base.basics.email),
                phone: draft.phone.unwrap_or(base.basics.phone),
                links: draft.links.unwrap_or(base.basics.links),
            },
            None => base.basics,
        };
        let linkedin_context = existing_linkedin
            .filter(|s| !s.is_empty())
            .or(self.linkedin_context);

        let mut profile = CareerProfile {
            profile_version: self.profile_version.unwrap_or(base.profile_version),
            basics,
            summary: self.summary.unwrap_or(base.summary),
            experience: self.experience.unwrap_or_default(),
            skills: self.skills.unwrap_or_default(),
            education: self.education.unwrap_or_default(),
            projects: self.projects.unwrap_or_default(),
            certifications: self.certifications.unwrap_or_default(),
            publications: self.publications.unwrap_or_default(),
            conferences: self.conferences.unwrap_or_default(),
            linkedin_context,
        };
        assign_missing_ids(&mut profile);
        profile
    }
}

/// Shape coercion for model output: any list item that arrived without an id
/// gets one assigned here, keeping ids unique within their lists.
pub fn assign_missing_ids(profile: &mut CareerProfile) {
    for exp in &mut profile.experience {
        if exp.id.is_empty() {
            exp.id = fresh_id("exp");
        }
        for hl in &mut exp.highlights {
            if hl.id.is_empty() {
                hl.id = fresh_id("h");
            }
        }
    }
    for edu in &mut profile.education {
        if edu.id.is_empty() {
            edu.id = fresh_id("edu");
        }
    }
    for proj in &mut profile.projects {
        if proj.id.is_empty() {
            proj.id = fresh_id("proj");
        }
    }
    for cert in &mut profile.certifications {
        if cert.id.is_empty() {
            cert.id = fresh_id("cert");
        }
    }
    for publication in &mut profile.publications {
        if publication.id.is_empty() {
            publication.id = fresh_id("pub");
        }
    }
    for conf in &mut profile.conferences {
        if conf.id.is_empty() {
            conf.id = fresh_id("conf");
        }
    }
}
