// src/lib.rs
//! Resume studio: profile model, bounded history, render transforms,
//! text-service assist and slot persistence

pub mod assist;
pub mod config;
pub mod edit;
pub mod history;
pub mod render;
pub mod store;
pub mod studio;
pub mod types;

pub use assist::{AssistService, ModelClient, TextModel};
pub use config::ConfigManager;
pub use edit::ProfileEdit;
pub use history::HistoryManager;
pub use render::TemplateId;
pub use store::ProfileStore;
pub use studio::{AssistOp, AssistTarget, AssistTicket, Studio, StudioView};
pub use types::{CareerProfile, JobBrief};
