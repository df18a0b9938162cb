// src/types/mod.rs
//! Data types shared across the studio

pub mod job;
pub mod profile;

pub use job::{JobAnalysis, JobBrief, LetterTone, RewriteTone, Seniority};
pub use profile::{
    assign_missing_ids, Basics, BasicsDraft, CareerProfile, Certification, Conference,
    ContactLink, EducationItem, ExperienceItem, Highlight, LinkedInsights, Metric, ProfileDraft,
    Project, Publication, SkillGroup, PROFILE_VERSION,
};
