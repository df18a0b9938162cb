// src/assist/mod.rs
//! External text service: client, prompts and fallback-wrapped operations

pub mod client;
pub mod prompts;
pub mod service;

pub use client::{ModelClient, TextModel};
pub use service::{AssistService, LETTER_EMPTY_FALLBACK, LETTER_ERROR_FALLBACK};
