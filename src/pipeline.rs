//! End-to-end encounter pipeline: audio file in, structured note out.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::audio::{self, MediaError};
use crate::llm_client::{GenerationError, OllamaClient};
use crate::note::{build_prompt, classify};
use crate::transcription::{assemble_transcript, TranscriptionError, WhisperProvider};

/// Any failure along the encounter chain. Transcription failures abort
/// before a prompt is built; generation failures abort before the
/// classifier runs.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Finished note for one encounter, with the provenance the archive keeps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterNote {
    pub encounter_id: Uuid,
    pub detected_language: String,
    pub transcript: String,
    pub note: String,
    pub model_used: String,
    pub generated_at: String,
}

/// Process-lifetime pipeline handles: the loaded Whisper model and the
/// Ollama client, created once at startup and threaded by reference into
/// each encounter.
pub struct ScribePipeline {
    whisper: WhisperProvider,
    llm: OllamaClient,
}

impl ScribePipeline {
    pub fn new(whisper: WhisperProvider, llm: OllamaClient) -> Self {
        Self { whisper, llm }
    }

    /// Run one encounter through the full chain: decode, transcribe,
    /// assemble, prompt, generate, classify.
    pub async fn process(&self, audio_path: &Path) -> Result<EncounterNote, PipelineError> {
        info!("Processing encounter audio {:?}", audio_path);

        let samples = audio::load_audio(audio_path)?;
        let output = self.whisper.transcribe(&samples)?;
        info!("Detected predominant language: {}", output.language);

        let transcript = assemble_transcript(&output.segments);
        if transcript.is_empty() {
            warn!(
                "No speech detected in {:?}; submitting empty conversation",
                audio_path
            );
        }
        debug!("Transcript:\n{}", transcript);

        let prompt = build_prompt(&transcript);
        let raw = self.llm.generate(&prompt).await?;
        let note = classify(&raw);

        info!(
            "Structured note generated: {} chars from {} segments",
            note.len(),
            output.segments.len()
        );

        Ok(EncounterNote {
            encounter_id: Uuid::new_v4(),
            detected_language: output.language,
            transcript,
            note,
            model_used: self.llm.model().to_string(),
            generated_at: Utc::now().to_rfc3339(),
        })
    }
}
