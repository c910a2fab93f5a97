pub mod segment;
pub mod whisper_provider;

pub use segment::{assemble_transcript, Segment};
pub use whisper_provider::{TranscriptionError, TranscriptionOutput, WhisperProvider};
