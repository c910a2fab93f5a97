use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::segment::Segment;

/// Beam width for decoding. Trades accuracy against latency; a fixed
/// constant, never derived per call.
const BEAM_SIZE: i32 = 5;

/// Errors from model loading or inference. Fatal to the current request,
/// not to the process.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("Model file not found: {0}")]
    ModelNotFound(String),

    #[error("Invalid model file: {0}")]
    InvalidModel(String),

    #[error("Failed to load Whisper model: {0}")]
    ModelLoad(String),

    #[error("Whisper inference failed: {0}")]
    Inference(String),
}

/// Result of transcribing one recording
pub struct TranscriptionOutput {
    /// Time-ordered, non-overlapping segments; empty when no speech was detected
    pub segments: Vec<Segment>,
    /// Detected predominant source language; informational only
    pub language: String,
}

/// Whisper transcription provider. Loaded once at startup and held for the
/// process lifetime.
pub struct WhisperProvider {
    ctx: WhisperContext,
    n_threads: i32,
}

impl WhisperProvider {
    /// Create a new WhisperProvider from a ggml model file path
    pub fn new(model_path: &Path, n_threads: i32) -> Result<Self, TranscriptionError> {
        Self::validate_model(model_path)?;

        info!("Loading Whisper model from {:?}", model_path);
        let path_str = model_path
            .to_str()
            .ok_or_else(|| TranscriptionError::InvalidModel("non-UTF-8 model path".to_string()))?;
        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| TranscriptionError::ModelLoad(e.to_string()))?;
        info!("Whisper model loaded");

        Ok(Self { ctx, n_threads })
    }

    /// Sanity-check the model file before handing it to whisper.cpp
    fn validate_model(path: &Path) -> Result<(), TranscriptionError> {
        if !path.exists() {
            return Err(TranscriptionError::ModelNotFound(format!("{:?}", path)));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| TranscriptionError::InvalidModel(e.to_string()))?;
        let size_mb = metadata.len() / (1024 * 1024);

        if size_mb < 30 {
            return Err(TranscriptionError::InvalidModel(format!(
                "Model file too small ({}MB). Expected at least 30MB for a valid Whisper model.",
                size_mb
            )));
        }
        if size_mb > 4000 {
            return Err(TranscriptionError::InvalidModel(format!(
                "Model file too large ({}MB). Expected at most 4000MB for a Whisper model.",
                size_mb
            )));
        }

        debug!("Model file validated: {}MB", size_mb);
        Ok(())
    }

    /// Transcribe a complete mono 16kHz recording into time-ordered segments.
    ///
    /// The spoken content is always translated into English regardless of
    /// source language; the detected source language is returned alongside
    /// the segments. Audio with no detected speech yields an empty segment
    /// list, not an error.
    pub fn transcribe(&self, samples: &[f32]) -> Result<TranscriptionOutput, TranscriptionError> {
        let start_time = std::time::Instant::now();
        debug!("Transcribing {} samples ({:.1}s)", samples.len(), samples.len() as f32 / 16000.0);

        let mut params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: BEAM_SIZE,
            patience: -1.0,
        });
        params.set_n_threads(self.n_threads);
        params.set_translate(true);
        params.set_language(Some("auto"));
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| TranscriptionError::Inference(format!("Failed to create state: {}", e)))?;

        state
            .full(params, samples)
            .map_err(|e| TranscriptionError::Inference(e.to_string()))?;

        let num_segments = state
            .full_n_segments()
            .map_err(|e| TranscriptionError::Inference(format!("Failed to get segment count: {}", e)))?;

        let mut segments = Vec::new();
        for i in 0..num_segments {
            let text = match state.full_get_segment_text(i) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping unreadable segment {}: {}", i, e);
                    continue;
                }
            };
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }

            // whisper.cpp reports timestamps in centiseconds
            let t0 = state
                .full_get_segment_t0(i)
                .map_err(|e| TranscriptionError::Inference(e.to_string()))?;
            let t1 = state
                .full_get_segment_t1(i)
                .map_err(|e| TranscriptionError::Inference(e.to_string()))?;

            segments.push(Segment::new(
                t0 as f32 / 100.0,
                t1 as f32 / 100.0,
                trimmed.to_string(),
            ));
        }

        let language = state
            .full_lang_id_from_state()
            .ok()
            .and_then(whisper_rs::get_lang_str)
            .unwrap_or("unknown")
            .to_string();

        info!(
            "Transcription complete in {:?}: {} segments, language \"{}\"",
            start_time.elapsed(),
            segments.len(),
            language
        );

        Ok(TranscriptionOutput { segments, language })
    }
}
