// src/edit.rs
//! Discrete edit operations over the profile, one history commit each

use crate::types::{
    CareerProfile, Certification, Conference, ContactLink, EducationItem, ExperienceItem,
    Highlight, Project, Publication, SkillGroup,
};

/// One discrete edit. Applying an edit builds a complete new snapshot; the
/// studio commits exactly one history entry per applied edit, which is the
/// coalescing granularity for undo/redo.
#[derive(Debug, Clone)]
pub enum ProfileEdit {
    SetName(String),
    SetTitle(String),
    SetLocation(String),
    SetEmail(String),
    SetPhone(String),
    AddLink { label: String, url: String },
    RemoveLink { label: String },
    SetSummary(String),
    SetLinkedinContext(String),
    AddExperience(ExperienceItem),
    UpdateExperience {
        id: String,
        company: Option<String>,
        role: Option<String>,
        start_date: Option<String>,
        end_date: Option<String>,
        location: Option<String>,
    },
    RemoveExperience { id: String },
    AddHighlight { experience_id: String, text: String },
    SetHighlightText {
        experience_id: String,
        highlight_id: String,
        text: String,
    },
    RemoveHighlight {
        experience_id: String,
        highlight_id: String,
    },
    AddSkillGroup { name: String, items: Vec<String> },
    RemoveSkillGroup { name: String },
    AddEducation(EducationItem),
    RemoveEducation { id: String },
    AddProject(Project),
    RemoveProject { id: String },
    AddCertification(Certification),
    RemoveCertification { id: String },
    AddPublication(Publication),
    RemovePublication { id: String },
    AddConference(Conference),
    RemoveConference { id: String },
}

/// Applies an edit to a snapshot, returning the next snapshot. The input is
/// never mutated. Edits addressing an unknown id leave the document as-is;
/// the resulting (identical) snapshot still gets its own history entry.
pub fn apply(profile: &CareerProfile, edit: ProfileEdit) -> CareerProfile {
    let mut next = profile.clone();
    match edit {
        ProfileEdit::SetName(name) => next.basics.name = name,
        ProfileEdit::SetTitle(title) => next.basics.title = title,
        ProfileEdit::SetLocation(location) => next.basics.location = location,
        ProfileEdit::SetEmail(email) => next.basics.email = email,
        ProfileEdit::SetPhone(phone) => next.basics.phone = phone,
        ProfileEdit::AddLink { label, url } => next.basics.links.push(ContactLink { label, url }),
        ProfileEdit::RemoveLink { label } => next.basics.links.retain(|l| l.label != label),
        ProfileEdit::SetSummary(summary) => next.summary = summary,
        ProfileEdit::SetLinkedinContext(context) => {
            next.linkedin_context = if context.is_empty() {
                None
            } else {
                Some(context)
            }
        }
        ProfileEdit::AddExperience(item) => next.experience.push(item),
        ProfileEdit::UpdateExperience {
            id,
            company,
            role,
            start_date,
            end_date,
            location,
        } => {
            if let Some(exp) = next.experience.iter_mut().find(|e| e.id == id) {
                if let Some(company) = company {
                    exp.company = company;
                }
                if let Some(role) = role {
                    exp.role = role;
                }
                if let Some(start_date) = start_date {
                    exp.start_date = start_date;
                }
                if let Some(end_date) = end_date {
                    exp.end_date = end_date;
                }
                if let Some(location) = location {
                    exp.location = location;
                }
            }
        }
        ProfileEdit::RemoveExperience { id } => next.experience.retain(|e| e.id != id),
        ProfileEdit::AddHighlight {
            experience_id,
            text,
        } => {
            if let Some(exp) = next.experience.iter_mut().find(|e| e.id == experience_id) {
                exp.highlights.push(Highlight::new(text));
            }
        }
        ProfileEdit::SetHighlightText {
            experience_id,
            highlight_id,
            text,
        } => {
            if let Some(hl) = next
                .experience
                .iter_mut()
                .find(|e| e.id == experience_id)
                .and_then(|e| e.highlights.iter_mut().find(|h| h.id == highlight_id))
            {
                hl.text = text;
            }
        }
        ProfileEdit::RemoveHighlight {
            experience_id,
            highlight_id,
        } => {
            if let Some(exp) = next.experience.iter_mut().find(|e| e.id == experience_id) {
                exp.highlights.retain(|h| h.id != highlight_id);
            }
        }
        ProfileEdit::AddSkillGroup { name, items } => {
            next.skills.push(SkillGroup { name, items })
        }
        ProfileEdit::RemoveSkillGroup { name } => next.skills.retain(|g| g.name != name),
        ProfileEdit::AddEducation(item) => next.education.push(item),
        ProfileEdit::RemoveEducation { id } => next.education.retain(|e| e.id != id),
        ProfileEdit::AddProject(project) => next.projects.push(project),
        ProfileEdit::RemoveProject { id } => next.projects.retain(|p| p.id != id),
        ProfileEdit::AddCertification(cert) => next.certifications.push(cert),
        ProfileEdit::RemoveCertification { id } => next.certifications.retain(|c| c.id != id),
        ProfileEdit::AddPublication(publication) => next.publications.push(publication),
        ProfileEdit::RemovePublication { id } => next.publications.retain(|p| p.id != id),
        ProfileEdit::AddConference(conf) => next.conferences.push(conf),
        ProfileEdit::RemoveConference { id } => next.conferences.retain(|c| c.id != id),
    }
    next
}
