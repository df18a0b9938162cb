// src/render/html.rs
//! Standalone HTML export: serialized preview tree in a minimal shell

use crate::render::preview::{
    build_preview, Column, PreviewDoc, Region, SectionBlock, SectionBody,
};
use crate::render::{Section, TemplateId};
use crate::types::CareerProfile;

const PAGE_CSS: &str = r#"
  * { box-sizing: border-box; margin: 0; }
  body { background: #fff; padding: 2rem; font-family: 'Inter', 'Helvetica Neue', Arial, sans-serif; color: #1e293b; }
  .page { max-width: 800px; margin: 0 auto; }
  .resume { display: flex; flex-direction: column; gap: 2rem; padding: 3rem; box-shadow: 0 10px 40px rgba(15, 23, 42, 0.12); }
  .resume h1 { font-size: 2.25rem; letter-spacing: -0.01em; }
  .resume h2 { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.16em; color: #94a3b8; margin-bottom: 0.75rem; }
  .resume .title { color: #475569; margin-top: 0.25rem; }
  .resume .contact, .resume .links { font-size: 0.8rem; color: #64748b; margin-top: 0.5rem; }
  .resume .links a { color: inherit; margin-right: 0.75rem; }
  .columns { display: grid; grid-template-columns: 2fr 1fr; gap: 2rem; }
  .col.side { border-left: 1px solid #f1f5f9; padding-left: 2rem; }
  .sec { margin-bottom: 1.5rem; }
  .entry { margin-bottom: 1.15rem; }
  .entry-head { display: flex; justify-content: space-between; gap: 1rem; }
  .entry-head .company, .entry-head .institution, .entry-head .name { font-weight: 600; }
  .entry-head .meta { color: #64748b; font-size: 0.8rem; white-space: nowrap; }
  .role { font-style: italic; color: #334155; font-size: 0.9rem; margin: 0.15rem 0 0.35rem; }
  .degree { font-style: italic; color: #475569; font-size: 0.9rem; }
  ul { padding-left: 1.1rem; margin-top: 0.35rem; }
  li { font-size: 0.9rem; line-height: 1.55; margin-bottom: 0.3rem; }
  p.para { font-size: 0.95rem; line-height: 1.6; }
  .skill-group { font-size: 0.9rem; margin-bottom: 0.4rem; }
  .template-modern h1, .template-classic h1 { font-family: Georgia, 'Times New Roman', serif; }
  .template-classic header { text-align: center; }
  .template-classic h1 { text-transform: uppercase; letter-spacing: 0.08em; }
  .template-classic h2 { color: #1e293b; border-bottom: 1px solid #cbd5e1; padding-bottom: 0.25rem; font-family: Georgia, serif; letter-spacing: 0.05em; }
  .template-minimal header { text-align: center; }
  .template-minimal h1 { font-weight: 300; text-transform: uppercase; letter-spacing: 0.12em; font-size: 2.6rem; }
  .template-minimal .title { text-transform: uppercase; letter-spacing: 0.2em; font-size: 0.8rem; }
  .template-minimal h2 { text-align: center; letter-spacing: 0.2em; }
  .template-minimal .sec-summary p.para { text-align: center; max-width: 42rem; margin: 0 auto; }
  .template-creative header { background: #0f172a; color: #fff; padding: 2.5rem; border-radius: 0.5rem; }
  .template-creative header .title, .template-creative header .contact, .template-creative header .links { color: #cbd5e1; }
  .template-creative h2 { font-size: 1.05rem; text-transform: none; letter-spacing: 0; color: #0f172a; border-left: 4px solid #0ea5e9; padding-left: 0.6rem; }
  .template-creative .col.side h2 { font-size: 0.8rem; text-transform: uppercase; letter-spacing: 0.1em; color: #94a3b8; border-left: none; border-bottom: 1px solid #e2e8f0; padding: 0 0 0.4rem; }
  @media print {
    body { padding: 0; }
    .resume { box-shadow: none; padding: 0; }
  }
"#;

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn section_slug(section: Section) -> &'static str {
    match section {
        Section::Summary => "summary",
        Section::Experience => "experience",
        Section::Education => "education",
        Section::Skills => "skills",
        Section::Projects => "projects",
        Section::Certifications => "certifications",
        Section::Publications => "publications",
        Section::Conferences => "conferences",
    }
}

/// Serializes the preview tree to HTML markup (no document shell).
pub fn preview_markup(doc: &PreviewDoc) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<article class=\"resume template-{}\">\n",
        doc.template
    ));

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&doc.header.name)));
    html.push_str(&format!(
        "<p class=\"title\">{}</p>\n",
        escape_html(&doc.header.title)
    ));
    html.push_str(&format!(
        "<p class=\"contact\">{} • {} • {}</p>\n",
        escape_html(&doc.header.location),
        escape_html(&doc.header.email),
        escape_html(&doc.header.phone)
    ));
    if !doc.header.links.is_empty() {
        html.push_str("<p class=\"links\">");
        for link in &doc.header.links {
            html.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&link.url),
                escape_html(&link.label)
            ));
        }
        html.push_str("</p>\n");
    }
    html.push_str("</header>\n");

    let two_column = doc.regions.iter().any(|r| r.column == Column::Side);
    if two_column {
        html.push_str("<div class=\"columns\">\n");
    }
    for region in &doc.regions {
        write_region(&mut html, region);
    }
    if two_column {
        html.push_str("</div>\n");
    }

    html.push_str("</article>\n");
    html
}

fn write_region(html: &mut String, region: &Region) {
    let class = match region.column {
        Column::Full => "col full",
        Column::Main => "col main",
        Column::Side => "col side",
    };
    html.push_str(&format!("<div class=\"{}\">\n", class));
    for block in &region.sections {
        write_section(html, block);
    }
    html.push_str("</div>\n");
}

fn write_section(html: &mut String, block: &SectionBlock) {
    html.push_str(&format!(
        "<section class=\"sec sec-{}\">\n",
        section_slug(block.section)
    ));
    if let Some(label) = &block.label {
        html.push_str(&format!("<h2>{}</h2>\n", escape_html(label)));
    }
    match &block.body {
        SectionBody::Paragraph(text) => {
            html.push_str(&format!("<p class=\"para\">{}</p>\n", escape_html(text)));
        }
        SectionBody::Experience(entries) => {
            for entry in entries {
                html.push_str("<div class=\"entry\">\n");
                html.push_str(&format!(
                    "<div class=\"entry-head\"><span class=\"company\">{}</span><span class=\"meta\">{} • {}</span></div>\n",
                    escape_html(&entry.company),
                    escape_html(&entry.date_range),
                    escape_html(&entry.location)
                ));
                html.push_str(&format!(
                    "<p class=\"role\">{}</p>\n",
                    escape_html(&entry.role)
                ));
                if !entry.bullets.is_empty() {
                    html.push_str("<ul>\n");
                    for bullet in &entry.bullets {
                        html.push_str(&format!("<li>{}</li>\n", escape_html(bullet)));
                    }
                    html.push_str("</ul>\n");
                }
                html.push_str("</div>\n");
            }
        }
        SectionBody::Education(entries) => {
            for entry in entries {
                html.push_str("<div class=\"entry\">\n");
                html.push_str(&format!(
                    "<div class=\"entry-head\"><span class=\"institution\">{}</span><span class=\"meta\">{}</span></div>\n",
                    escape_html(&entry.institution),
                    escape_html(&entry.year)
                ));
                html.push_str(&format!(
                    "<p class=\"degree\">{}</p>\n",
                    escape_html(&entry.degree)
                ));
                html.push_str("</div>\n");
            }
        }
        SectionBody::SkillGroups(groups) => {
            for grp in groups {
                html.push_str(&format!(
                    "<p class=\"skill-group\"><strong>{}:</strong> {}</p>\n",
                    escape_html(&grp.name),
                    escape_html(&grp.items.join(", "))
                ));
            }
        }
        SectionBody::Projects(entries) => {
            for entry in entries {
                html.push_str("<div class=\"entry\">\n");
                match &entry.url {
                    Some(url) => html.push_str(&format!(
                        "<div class=\"entry-head\"><span class=\"name\"><a href=\"{}\">{}</a></span></div>\n",
                        escape_html(url),
                        escape_html(&entry.name)
                    )),
                    None => html.push_str(&format!(
                        "<div class=\"entry-head\"><span class=\"name\">{}</span></div>\n",
                        escape_html(&entry.name)
                    )),
                }
                html.push_str(&format!(
                    "<p class=\"para\">{}</p>\n",
                    escape_html(&entry.description)
                ));
                if !entry.bullets.is_empty() {
                    html.push_str("<ul>\n");
                    for bullet in &entry.bullets {
                        html.push_str(&format!("<li>{}</li>\n", escape_html(bullet)));
                    }
                    html.push_str("</ul>\n");
                }
                html.push_str("</div>\n");
            }
        }
        SectionBody::Certifications(entries) => {
            for entry in entries {
                html.push_str(&format!(
                    "<div class=\"entry\"><div class=\"entry-head\"><span class=\"name\">{}</span><span class=\"meta\">{}</span></div><p class=\"degree\">{}</p></div>\n",
                    escape_html(&entry.name),
                    escape_html(&entry.date),
                    escape_html(&entry.issuer)
                ));
            }
        }
        SectionBody::Publications(entries) => {
            for entry in entries {
                let title = match &entry.url {
                    Some(url) => format!(
                        "<a href=\"{}\">{}</a>",
                        escape_html(url),
                        escape_html(&entry.title)
                    ),
                    None => escape_html(&entry.title),
                };
                html.push_str(&format!(
                    "<div class=\"entry\"><div class=\"entry-head\"><span class=\"name\">{}</span><span class=\"meta\">{}</span></div><p class=\"degree\">{}</p></div>\n",
                    title,
                    escape_html(&entry.date),
                    escape_html(&entry.publisher)
                ));
            }
        }
        SectionBody::Conferences(entries) => {
            for entry in entries {
                html.push_str(&format!(
                    "<div class=\"entry\"><div class=\"entry-head\"><span class=\"name\">{}</span><span class=\"meta\">{}</span></div><p class=\"degree\">{}</p></div>\n",
                    escape_html(&entry.name),
                    escape_html(&entry.date),
                    escape_html(&entry.event)
                ));
            }
        }
    }
    html.push_str("</section>\n");
}

/// Renders the full standalone HTML document: preview markup wrapped in a
/// shell with the owner's name in the title and print-aware CSS embedded.
pub fn render_html(profile: &CareerProfile, template: TemplateId) -> String {
    let doc = build_preview(profile, template);
    let markup = preview_markup(&doc);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{} - Resume</title>\n\
         <style>{}</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"page\">\n{}</div>\n\
         </body>\n\
         </html>\n",
        escape_html(&profile.basics.name),
        PAGE_CSS,
        markup
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_carries_name_in_title() {
        let html = render_html(&CareerProfile::starter(), TemplateId::Modern);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Alex Sterling - Resume</title>"));
        assert!(html.contains("@media print"));
    }

    #[test]
    fn test_markup_reflects_template_labels() {
        let profile = CareerProfile::starter();
        let modern = render_html(&profile, TemplateId::Modern);
        assert!(modern.contains("template-modern"));
        assert!(modern.contains("<h2>Expertise</h2>"));

        let classic = render_html(&profile, TemplateId::Classic);
        assert!(classic.contains("<h2>Professional Summary</h2>"));
    }

    #[test]
    fn test_empty_experience_renders_no_experience_section_in_any_template() {
        let mut profile = CareerProfile::starter();
        profile.experience.clear();
        for template in TemplateId::ALL {
            let html = render_html(&profile, template);
            assert!(!html.contains("sec-experience"), "template {}", template);
            assert!(html.contains("sec-skills"));
        }
    }

    #[test]
    fn test_text_is_escaped() {
        let mut profile = CareerProfile::starter();
        profile.basics.name = "Ada & Co <Engineers>".to_string();
        let html = render_html(&profile, TemplateId::Classic);
        assert!(html.contains("Ada &amp; Co &lt;Engineers&gt;"));
        assert!(!html.contains("<Engineers>"));
    }

    #[test]
    fn test_no_links_means_no_links_line() {
        let mut profile = CareerProfile::starter();
        profile.basics.links.clear();
        let html = render_html(&profile, TemplateId::Modern);
        assert!(!html.contains("class=\"links\""));
    }

    #[test]
    fn test_two_column_templates_emit_columns_wrapper() {
        let profile = CareerProfile::starter();
        let modern = render_html(&profile, TemplateId::Modern);
        assert!(modern.contains("class=\"columns\""));
        let classic = render_html(&profile, TemplateId::Classic);
        assert!(!classic.contains("class=\"columns\""));
    }
}
