// src/render/markdown.rs
//! Markdown serialization of a profile

use crate::render::{date_range, included_sections, Section};
use crate::types::CareerProfile;

/// Renders the profile as a Markdown document: name line, title, contact and
/// links lines, then the included sections in canonical order. Section
/// headers appear only when the section has content.
pub fn render_markdown(profile: &CareerProfile) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", profile.basics.name));
    md.push_str(&format!("**{}**\n\n", profile.basics.title));
    md.push_str(&format!(
        "{} • {} • {}\n\n",
        profile.basics.location, profile.basics.email, profile.basics.phone
    ));

    if !profile.basics.links.is_empty() {
        let links = profile
            .basics
            .links
            .iter()
            .map(|l| format!("[{}]({})", l.label, l.url))
            .collect::<Vec<_>>()
            .join(" • ");
        md.push_str(&format!("{}\n\n", links));
    }

    for section in included_sections(profile) {
        match section {
            Section::Summary => {
                md.push_str(&format!("## Summary\n\n{}\n\n", profile.summary));
            }
            Section::Experience => {
                md.push_str("## Experience\n\n");
                for exp in &profile.experience {
                    md.push_str(&format!("### {}\n", exp.role));
                    md.push_str(&format!(
                        "**{}** | {} | {}\n\n",
                        exp.company,
                        date_range(exp),
                        exp.location
                    ));
                    for hl in &exp.highlights {
                        md.push_str(&format!("- {}\n", hl.text));
                    }
                    md.push('\n');
                }
            }
            Section::Education => {
                md.push_str("## Education\n\n");
                for edu in &profile.education {
                    md.push_str(&format!("**{}**\n", edu.institution));
                    md.push_str(&format!("{}, {}\n\n", edu.degree, edu.year));
                }
            }
            Section::Skills => {
                md.push_str("## Skills\n\n");
                for grp in &profile.skills {
                    md.push_str(&format!("- **{}:** {}\n", grp.name, grp.items.join(", ")));
                }
                md.push('\n');
            }
            Section::Projects => {
                md.push_str("## Projects\n\n");
                for proj in &profile.projects {
                    md.push_str(&format!("### {}\n", proj.name));
                    if let Some(url) = &proj.url {
                        md.push_str(&format!("[Link]({})\n\n", url));
                    }
                    md.push_str(&format!("{}\n\n", proj.description));
                }
            }
            Section::Certifications => {
                md.push_str("## Certifications\n\n");
                for cert in &profile.certifications {
                    md.push_str(&format!("**{}**\n", cert.name));
                    md.push_str(&format!("{}, {}\n\n", cert.issuer, cert.date));
                }
            }
            Section::Publications => {
                md.push_str("## Publications\n\n");
                for publication in &profile.publications {
                    md.push_str(&format!("**{}**\n", publication.title));
                    if let Some(url) = &publication.url {
                        md.push_str(&format!("[Link]({})\n", url));
                    }
                    md.push_str(&format!(
                        "{}, {}\n\n",
                        publication.publisher, publication.date
                    ));
                }
            }
            Section::Conferences => {
                md.push_str("## Conferences\n\n");
                for conf in &profile.conferences {
                    md.push_str(&format!("**{}**\n", conf.name));
                    md.push_str(&format!("{}, {}\n\n", conf.event, conf.date));
                }
            }
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_headers(md: &str) -> Vec<&str> {
        md.lines()
            .filter(|line| line.starts_with("## "))
            .map(|line| &line[3..])
            .collect()
    }

    #[test]
    fn test_starter_profile_emits_exactly_the_core_headers_in_order() {
        let md = render_markdown(&CareerProfile::starter());
        assert!(md.starts_with("# Alex Sterling\n"));
        assert_eq!(
            section_headers(&md),
            vec!["Summary", "Experience", "Education", "Skills"]
        );
    }

    #[test]
    fn test_experience_entry_format() {
        let md = render_markdown(&CareerProfile::starter());
        assert!(md.contains("### Senior Frontend Engineer\n"));
        assert!(md.contains("**Linear Orbital** | 2021 – Present | Remote, AU\n"));
        assert!(md.contains(
            "- Mentored 4 junior developers through to mid-level promotion cycles.\n"
        ));
    }

    #[test]
    fn test_skills_groups_render_as_labeled_lists() {
        let md = render_markdown(&CareerProfile::starter());
        assert!(md.contains("- **Languages:** TypeScript, JavaScript, Rust, Python\n"));
        assert!(md.contains("- **Infrastructure:** AWS, Terraform, Docker\n"));
    }

    #[test]
    fn test_empty_experience_suppresses_header() {
        let mut profile = CareerProfile::starter();
        profile.experience.clear();
        let md = render_markdown(&profile);
        assert!(!md.contains("## Experience"));
        assert!(md.contains("## Skills"));
    }

    #[test]
    fn test_no_links_suppresses_links_line() {
        let mut profile = CareerProfile::starter();
        profile.basics.links.clear();
        let md = render_markdown(&profile);
        assert!(!md.contains("[LinkedIn]"));
        assert!(md.contains("Sydney, AU • alex.sterling@example.com"));
    }

    #[test]
    fn test_project_with_url_gets_link_line() {
        let mut profile = CareerProfile::starter();
        let mut project = crate::types::Project::new("Orbit Tracker");
        project.description = "Satellite pass predictions.".to_string();
        project.url = Some("https://example.com/orbit".to_string());
        profile.projects.push(project);

        let md = render_markdown(&profile);
        assert!(md.contains("## Projects\n\n### Orbit Tracker\n"));
        assert!(md.contains("[Link](https://example.com/orbit)\n"));
        assert!(md.contains("Satellite pass predictions.\n"));
    }
}
