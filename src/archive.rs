//! Local encounter archive.
//!
//! Filesystem persistence for finished encounters, laid out as
//! `<root>/YYYY/MM/DD/<encounter_id>/` with three files per encounter:
//! `metadata.json`, `transcript.txt`, and `note.txt`. The only value
//! promised back to the pipeline is the opaque encounter id.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

use crate::pipeline::EncounterNote;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to create archive directory: {0}")]
    CreateDir(String),

    #[error("Failed to write archive file: {0}")]
    Write(String),

    #[error("Failed to serialize metadata: {0}")]
    Serialize(String),
}

/// Metadata stored alongside each archived encounter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub encounter_id: String,
    pub archived_at: String,
    pub detected_language: String,
    pub model_used: String,
    pub transcript_words: usize,
    pub note_chars: usize,
}

/// Date-tree encounter store rooted at a caller-chosen directory
pub struct EncounterArchive {
    root: PathBuf,
}

impl EncounterArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn encounter_dir(&self, date: &DateTime<Utc>, encounter_id: &str) -> PathBuf {
        self.root
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
            .join(format!("{:02}", date.day()))
            .join(encounter_id)
    }

    /// Store one encounter and return its opaque id
    pub fn store(&self, encounter: &EncounterNote) -> Result<String, ArchiveError> {
        let now = Utc::now();
        let id = encounter.encounter_id.to_string();
        let dir = self.encounter_dir(&now, &id);

        fs::create_dir_all(&dir).map_err(|e| ArchiveError::CreateDir(e.to_string()))?;

        let metadata = ArchiveMetadata {
            encounter_id: id.clone(),
            archived_at: now.to_rfc3339(),
            detected_language: encounter.detected_language.clone(),
            model_used: encounter.model_used.clone(),
            transcript_words: encounter.transcript.split_whitespace().count(),
            note_chars: encounter.note.chars().count(),
        };
        let json = serde_json::to_string_pretty(&metadata)
            .map_err(|e| ArchiveError::Serialize(e.to_string()))?;

        fs::write(dir.join("metadata.json"), json)
            .map_err(|e| ArchiveError::Write(e.to_string()))?;
        fs::write(dir.join("transcript.txt"), &encounter.transcript)
            .map_err(|e| ArchiveError::Write(e.to_string()))?;
        fs::write(dir.join("note.txt"), &encounter.note)
            .map_err(|e| ArchiveError::Write(e.to_string()))?;

        info!("Encounter {} archived to {:?}", id, dir);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_encounter() -> EncounterNote {
        EncounterNote {
            encounter_id: Uuid::new_v4(),
            detected_language: "en".to_string(),
            transcript: "[0.00s - 2.00s] : I have had chest pain since morning".to_string(),
            note: "\n📝 Chief Complaint\n: chest pain\n".to_string(),
            model_used: "llama3.1:8b".to_string(),
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    #[test]
    fn test_store_writes_all_files() {
        let dir = tempfile::tempdir().expect("Failed to create tempdir");
        let archive = EncounterArchive::new(dir.path());
        let encounter = sample_encounter();

        let id = archive.store(&encounter).expect("Store failed");
        assert_eq!(id, encounter.encounter_id.to_string());

        let now = Utc::now();
        let stored = archive.encounter_dir(&now, &id);
        assert!(stored.join("metadata.json").exists());

        let transcript =
            fs::read_to_string(stored.join("transcript.txt")).expect("read transcript");
        assert_eq!(transcript, encounter.transcript);

        let note = fs::read_to_string(stored.join("note.txt")).expect("read note");
        assert_eq!(note, encounter.note);
    }

    #[test]
    fn test_metadata_round_trip() {
        let dir = tempfile::tempdir().expect("Failed to create tempdir");
        let archive = EncounterArchive::new(dir.path());
        let encounter = sample_encounter();

        let id = archive.store(&encounter).expect("Store failed");
        let stored = archive.encounter_dir(&Utc::now(), &id);

        let json = fs::read_to_string(stored.join("metadata.json")).expect("read metadata");
        let metadata: ArchiveMetadata = serde_json::from_str(&json).expect("parse metadata");
        assert_eq!(metadata.encounter_id, id);
        assert_eq!(metadata.detected_language, "en");
        assert_eq!(metadata.transcript_words, 11);
        assert!(metadata.note_chars > 0);
    }
}
