// src/studio.rs
//! Application controller: owns history, derived state and assist tickets

use std::collections::HashMap;

use anyhow::{bail, Result};
use tracing::warn;

use crate::edit::{apply, ProfileEdit};
use crate::history::HistoryManager;
use crate::render::TemplateId;
use crate::types::{CareerProfile, JobBrief, LinkedInsights, ProfileDraft};

/// Which surface the user is working in. Leaving a surface drops its
/// outstanding assist tickets, so late responses get discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudioView {
    #[default]
    Editor,
    CoverLetter,
}

/// Operation kinds routed through the text service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistOp {
    Rewrite,
    Letter,
}

impl AssistOp {
    fn home_view(self) -> StudioView {
        match self {
            AssistOp::Rewrite => StudioView::Editor,
            AssistOp::Letter => StudioView::CoverLetter,
        }
    }
}

/// The piece of state an assist operation writes back to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssistTarget {
    Summary,
    Highlight {
        experience_id: String,
        highlight_id: String,
    },
    Letter,
}

/// Token for one outstanding assist call. A response is applied only while
/// its ticket is still the current one for its (operation, target) pair;
/// anything else resolves as stale and is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistTicket {
    op: AssistOp,
    target: AssistTarget,
    serial: u64,
}

impl AssistTicket {
    pub fn op(&self) -> AssistOp {
        self.op
    }

    pub fn target(&self) -> &AssistTarget {
        &self.target
    }
}

/// Top-level controller. The profile and its history are owned here
/// exclusively; every mutation routes through [`Studio::apply_edit`] or one
/// of the merge operations, each of which commits exactly one snapshot.
/// Template, view, job brief and the drafted letter are derived state and
/// stay outside undo history.
pub struct Studio {
    history: HistoryManager,
    view: StudioView,
    template: TemplateId,
    job_brief: Option<JobBrief>,
    letter: Option<String>,
    outstanding: HashMap<(AssistOp, AssistTarget), u64>,
    next_serial: u64,
}

impl Studio {
    pub fn new(profile: CareerProfile) -> Self {
        Self {
            history: HistoryManager::new(profile),
            view: StudioView::default(),
            template: TemplateId::default(),
            job_brief: None,
            letter: None,
            outstanding: HashMap::new(),
            next_serial: 0,
        }
    }

    // ===== Document & history =====

    /// The authoritative live document.
    pub fn current(&self) -> &CareerProfile {
        self.history.current()
    }

    /// Applies one discrete edit and commits it as one history entry.
    pub fn apply_edit(&mut self, edit: ProfileEdit) {
        let next = apply(self.current(), edit);
        self.history.commit(next);
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ===== Derived state =====

    pub fn view(&self) -> StudioView {
        self.view
    }

    /// Switches surfaces. Tickets belonging to the surface being left are
    /// dropped; their responses will resolve stale.
    pub fn set_view(&mut self, view: StudioView) {
        if view != self.view {
            self.outstanding.retain(|(op, _), _| op.home_view() == view);
            self.view = view;
        }
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    /// Template choice is presentation state, not document state; switching
    /// never touches undo history.
    pub fn set_template(&mut self, template: TemplateId) {
        self.template = template;
    }

    pub fn job_brief(&self) -> Option<&JobBrief> {
        self.job_brief.as_ref()
    }

    pub fn set_job_brief(&mut self, brief: JobBrief) {
        self.job_brief = Some(brief);
    }

    pub fn letter(&self) -> Option<&str> {
        self.letter.as_deref()
    }

    // ===== Assist tickets =====

    /// Issues a ticket for an assist call, enforcing at most one in-flight
    /// call per (operation, target).
    pub fn begin_assist(&mut self, op: AssistOp, target: AssistTarget) -> Result<AssistTicket> {
        let key = (op, target.clone());
        if self.outstanding.contains_key(&key) {
            bail!("an assist call is already in flight for this target");
        }
        self.next_serial += 1;
        self.outstanding.insert(key, self.next_serial);
        Ok(AssistTicket {
            op,
            target,
            serial: self.next_serial,
        })
    }

    pub fn assist_in_flight(&self, op: AssistOp, target: &AssistTarget) -> bool {
        self.outstanding.contains_key(&(op, target.clone()))
    }

    /// Drops the outstanding call for a target. A response holding the old
    /// ticket will be discarded when it resolves.
    pub fn cancel_assist(&mut self, op: AssistOp, target: &AssistTarget) {
        self.outstanding.remove(&(op, target.clone()));
    }

    /// The text currently backing a rewrite target.
    pub fn target_text(&self, target: &AssistTarget) -> Option<&str> {
        match target {
            AssistTarget::Summary => Some(self.current().summary.as_str()),
            AssistTarget::Highlight {
                experience_id,
                highlight_id,
            } => self
                .current()
                .experience
                .iter()
                .find(|exp| exp.id == *experience_id)
                .and_then(|exp| exp.highlights.iter().find(|hl| hl.id == *highlight_id))
                .map(|hl| hl.text.as_str()),
            AssistTarget::Letter => None,
        }
    }

    fn resolve_assist(&mut self, ticket: &AssistTicket) -> bool {
        let key = (ticket.op, ticket.target.clone());
        match self.outstanding.get(&key) {
            Some(&serial) if serial == ticket.serial => {
                self.outstanding.remove(&key);
                true
            }
            _ => false,
        }
    }

    /// Applies a finished rewrite. Commits at the history's current tip,
    /// whatever undo/redo happened while the call was outstanding. Returns
    /// false when the ticket is stale; nothing is committed then.
    pub fn apply_rewrite(&mut self, ticket: &AssistTicket, new_text: String) -> bool {
        if ticket.op != AssistOp::Rewrite || !self.resolve_assist(ticket) {
            warn!("Discarding stale rewrite response for {:?}", ticket.target);
            return false;
        }
        let edit = match &ticket.target {
            AssistTarget::Summary => ProfileEdit::SetSummary(new_text),
            AssistTarget::Highlight {
                experience_id,
                highlight_id,
            } => ProfileEdit::SetHighlightText {
                experience_id: experience_id.clone(),
                highlight_id: highlight_id.clone(),
                text: new_text,
            },
            AssistTarget::Letter => return false,
        };
        self.apply_edit(edit);
        true
    }

    /// Stores a finished letter draft. Returns false when the ticket is
    /// stale; the previous letter (if any) is left in place then.
    pub fn apply_letter(&mut self, ticket: &AssistTicket, letter: String) -> bool {
        if ticket.op != AssistOp::Letter || !self.resolve_assist(ticket) {
            warn!("Discarding stale letter response");
            return false;
        }
        self.letter = Some(letter);
        true
    }

    // ===== Merge operations =====

    /// Replaces the document with a parsed draft overlaid on the starter
    /// profile. An already-captured LinkedIn context survives the import.
    /// One commit.
    pub fn import_resume(&mut self, draft: ProfileDraft) {
        let existing = self.current().linkedin_context.clone();
        let profile = draft.into_profile(existing);
        self.history.commit(profile);
    }

    /// Saves pasted LinkedIn context without analysis. One commit.
    pub fn save_linkedin_context(&mut self, text: String) {
        self.apply_edit(ProfileEdit::SetLinkedinContext(text));
    }

    /// Saves pasted LinkedIn context and appends the extracted skill groups
    /// and projects. One commit, so one undo removes the whole merge.
    pub fn merge_linkedin_insights(&mut self, text: String, insights: LinkedInsights) {
        let mut next = self.current().clone();
        next.linkedin_context = if text.is_empty() { None } else { Some(text) };
        next.skills.extend(insights.skills);
        next.projects.extend(insights.projects);
        self.history.commit(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assist::{AssistService, TextModel};
    use crate::types::SkillGroup;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FailingModel;

    #[async_trait]
    impl TextModel for FailingModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("service unavailable"))
        }
    }

    #[test]
    fn test_company_edit_undo_redo_round_trip() {
        let mut studio = Studio::new(CareerProfile::starter());
        let before = studio.current().experience[0].company.clone();

        studio.apply_edit(ProfileEdit::UpdateExperience {
            id: "exp-1".to_string(),
            company: Some("Northwind Robotics".to_string()),
            role: None,
            start_date: None,
            end_date: None,
            location: None,
        });
        assert_eq!(studio.current().experience[0].company, "Northwind Robotics");

        assert!(studio.undo());
        assert_eq!(studio.current().experience[0].company, before);

        assert!(studio.redo());
        assert_eq!(studio.current().experience[0].company, "Northwind Robotics");
    }

    #[test]
    fn test_template_switch_is_not_undoable() {
        let mut studio = Studio::new(CareerProfile::starter());
        studio.set_template(TemplateId::Creative);
        assert!(!studio.can_undo());
        assert_eq!(studio.template(), TemplateId::Creative);

        studio.apply_edit(ProfileEdit::SetName("New Name".to_string()));
        studio.undo();
        assert_eq!(studio.template(), TemplateId::Creative);
    }

    #[test]
    fn test_at_most_one_in_flight_per_target() {
        let mut studio = Studio::new(CareerProfile::starter());
        let first = studio
            .begin_assist(AssistOp::Rewrite, AssistTarget::Summary)
            .unwrap();
        assert!(studio
            .begin_assist(AssistOp::Rewrite, AssistTarget::Summary)
            .is_err());

        // A different target is fine.
        let other = AssistTarget::Highlight {
            experience_id: "exp-1".to_string(),
            highlight_id: "h1".to_string(),
        };
        assert!(studio.begin_assist(AssistOp::Rewrite, other).is_ok());

        assert!(studio.apply_rewrite(&first, "Sharper summary.".to_string()));
        // The slot is free again.
        assert!(studio
            .begin_assist(AssistOp::Rewrite, AssistTarget::Summary)
            .is_ok());
    }

    #[test]
    fn test_leaving_the_view_discards_the_late_response() {
        let mut studio = Studio::new(CareerProfile::starter());
        let before = studio.current().summary.clone();

        let ticket = studio
            .begin_assist(AssistOp::Rewrite, AssistTarget::Summary)
            .unwrap();
        studio.set_view(StudioView::CoverLetter);

        assert!(!studio.apply_rewrite(&ticket, "Too late.".to_string()));
        assert_eq!(studio.current().summary, before);
        assert!(!studio.can_undo());
    }

    #[test]
    fn test_superseded_ticket_resolves_stale() {
        let mut studio = Studio::new(CareerProfile::starter());
        let first = studio
            .begin_assist(AssistOp::Rewrite, AssistTarget::Summary)
            .unwrap();
        studio.cancel_assist(AssistOp::Rewrite, &AssistTarget::Summary);
        let second = studio
            .begin_assist(AssistOp::Rewrite, AssistTarget::Summary)
            .unwrap();

        assert!(!studio.apply_rewrite(&first, "From the first call.".to_string()));
        assert!(studio.apply_rewrite(&second, "From the second call.".to_string()));
        assert_eq!(studio.current().summary, "From the second call.");
    }

    #[test]
    fn test_resolution_after_undo_commits_at_the_current_tip() {
        let mut studio = Studio::new(CareerProfile::starter());
        studio.apply_edit(ProfileEdit::SetTitle("Principal Engineer".to_string()));

        let ticket = studio
            .begin_assist(AssistOp::Rewrite, AssistTarget::Summary)
            .unwrap();
        assert!(studio.undo());
        assert!(studio.can_redo());

        // The in-flight call resolves after the undo: it appends after the
        // current tip and the redo branch is gone.
        assert!(studio.apply_rewrite(&ticket, "Resolved late.".to_string()));
        assert_eq!(studio.current().summary, "Resolved late.");
        assert_eq!(studio.current().basics.title, CareerProfile::starter().basics.title);
        assert!(!studio.can_redo());
    }

    #[tokio::test]
    async fn test_failed_rewrite_leaves_summary_unchanged() {
        let mut studio = Studio::new(CareerProfile::starter());
        let before = studio.current().summary.clone();

        let ticket = studio
            .begin_assist(AssistOp::Rewrite, AssistTarget::Summary)
            .unwrap();
        let service = AssistService::new(Arc::new(FailingModel));
        let text = studio.target_text(ticket.target()).unwrap().to_string();
        let rewritten = service
            .rewrite_section(
                &text,
                crate::assist::prompts::DEFAULT_TARGET_ROLE,
                Default::default(),
                &crate::assist::prompts::REWRITE_CONSTRAINTS,
                None,
            )
            .await;

        assert!(studio.apply_rewrite(&ticket, rewritten));
        assert_eq!(studio.current().summary, before);
    }

    #[test]
    fn test_import_keeps_existing_linkedin_context() {
        let mut studio = Studio::new(CareerProfile::starter());
        studio.save_linkedin_context("long-form posts".to_string());

        let draft = ProfileDraft {
            summary: Some("Imported summary.".to_string()),
            ..ProfileDraft::default()
        };
        studio.import_resume(draft);

        assert_eq!(studio.current().summary, "Imported summary.");
        assert_eq!(
            studio.current().linkedin_context.as_deref(),
            Some("long-form posts")
        );
        // Import itself is a single undoable step.
        assert!(studio.undo());
        assert_eq!(
            studio.current().summary,
            CareerProfile::starter().summary
        );
    }

    #[test]
    fn test_linkedin_merge_is_one_undoable_commit() {
        let mut studio = Studio::new(CareerProfile::starter());
        let skills_before = studio.current().skills.len();

        studio.merge_linkedin_insights(
            "posts".to_string(),
            LinkedInsights {
                skills: vec![SkillGroup {
                    name: "Cloud".to_string(),
                    items: vec!["AWS".to_string()],
                }],
                projects: Vec::new(),
            },
        );
        assert_eq!(studio.current().skills.len(), skills_before + 1);
        assert_eq!(studio.current().linkedin_context.as_deref(), Some("posts"));

        assert!(studio.undo());
        assert_eq!(studio.current().skills.len(), skills_before);
        assert!(studio.current().linkedin_context.is_none());
    }

    #[test]
    fn test_letter_applies_only_while_current() {
        let mut studio = Studio::new(CareerProfile::starter());
        studio.set_view(StudioView::CoverLetter);

        let ticket = studio
            .begin_assist(AssistOp::Letter, AssistTarget::Letter)
            .unwrap();
        studio.set_view(StudioView::Editor);
        assert!(!studio.apply_letter(&ticket, "Dear team".to_string()));
        assert!(studio.letter().is_none());

        studio.set_view(StudioView::CoverLetter);
        let ticket = studio
            .begin_assist(AssistOp::Letter, AssistTarget::Letter)
            .unwrap();
        assert!(studio.apply_letter(&ticket, "Dear team".to_string()));
        assert_eq!(studio.letter(), Some("Dear team"));
    }
}
