//! Audio front end: container decoding and resampling to Whisper's input format.

pub mod decoder;
pub mod resampler;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub use resampler::TARGET_SAMPLE_RATE;

/// Errors raised by the audio front end. All of these are fatal to the
/// current request, never to the process.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Audio file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Unsupported or malformed audio file: {0}")]
    UnsupportedFormat(String),

    #[error("No audio track in file")]
    NoAudioTrack,

    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Failed to resample audio: {0}")]
    Resample(String),
}

/// Decode an audio file and resample it to mono 16kHz f32.
///
/// A decodable file with no audio content yields an empty buffer.
pub fn load_audio(path: &Path) -> Result<Vec<f32>, MediaError> {
    let decoded = decoder::decode_audio_file(path)?;
    debug!(
        "Loaded {} samples at {} Hz from {:?}",
        decoded.samples.len(),
        decoded.sample_rate,
        path
    );

    resampler::resample_to_16k(&decoded.samples, decoded.sample_rate)
        .map_err(|e| MediaError::Resample(e.to_string()))
}
