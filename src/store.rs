// src/store.rs
//! Profile slot persistence and export file handling

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::warn;

use crate::types::CareerProfile;

const SLOT_FILE: &str = "profile.json";

/// Single-slot JSON persistence for the working profile.
pub struct ProfileStore {
    slot_path: PathBuf,
}

impl ProfileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            slot_path: data_dir.join(SLOT_FILE),
        }
    }

    pub fn slot_path(&self) -> &Path {
        &self.slot_path
    }

    /// Loads the saved profile. A missing or unreadable slot falls back to
    /// the starter profile; the slot itself is only rewritten on the next
    /// explicit save.
    pub async fn load_or_default(&self) -> CareerProfile {
        match tokio::fs::read_to_string(&self.slot_path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(profile) => profile,
                Err(err) => {
                    warn!("Saved profile is unreadable, starting fresh: {:#}", err);
                    CareerProfile::starter()
                }
            },
            Err(_) => CareerProfile::starter(),
        }
    }

    /// Saves the profile to the slot, creating the directory if needed.
    pub async fn save(&self, profile: &CareerProfile) -> Result<()> {
        if let Some(parent) = self.slot_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json =
            serde_json::to_string_pretty(profile).context("Failed to serialize profile")?;
        tokio::fs::write(&self.slot_path, json)
            .await
            .with_context(|| format!("Failed to write {}", self.slot_path.display()))?;
        Ok(())
    }
}

/// File name for a dated JSON backup of the profile.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("resume_profile_{}.json", date.format("%Y-%m-%d"))
}

/// File name for a rendered export, derived from the owner's name.
pub fn export_file_name(name: &str, extension: &str) -> String {
    let slug = name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_Resume.{}", slug, extension)
}

/// Writes export bytes into the directory, returning the full path.
pub async fn write_export(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        let mut profile = CareerProfile::starter();
        profile.basics.name = "Jordan Vale".to_string();
        store.save(&profile).await.unwrap();

        let loaded = store.load_or_default().await;
        assert_eq!(loaded, profile);
    }

    #[tokio::test]
    async fn test_missing_slot_falls_back_to_starter() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        let loaded = store.load_or_default().await;
        assert_eq!(loaded, CareerProfile::starter());
    }

    #[tokio::test]
    async fn test_corrupt_slot_falls_back_without_touching_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        tokio::fs::write(store.slot_path(), "{not valid json")
            .await
            .unwrap();

        let loaded = store.load_or_default().await;
        assert_eq!(loaded, CareerProfile::starter());

        let raw = tokio::fs::read_to_string(store.slot_path()).await.unwrap();
        assert_eq!(raw, "{not valid json");
    }

    #[tokio::test]
    async fn test_write_export_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports");
        let path = write_export(&target, "Alex_Sterling_Resume.md", b"# Alex")
            .await
            .unwrap();
        assert!(path.ends_with("exports/Alex_Sterling_Resume.md"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"# Alex");
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(
            export_file_name("Alex Sterling", "md"),
            "Alex_Sterling_Resume.md"
        );
        assert_eq!(
            export_file_name("Ana  de la Cruz", "docx"),
            "Ana_de_la_Cruz_Resume.docx"
        );
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(backup_file_name(date), "resume_profile_2025-03-09.json");
    }
}
