use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A transcribed span of speech with second-based timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub id: Uuid,
    pub start: f32,
    pub end: f32,
    pub text: String,
}

impl Segment {
    pub fn new(start: f32, end: f32, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            text,
        }
    }

    pub fn duration(&self) -> f32 {
        (self.end - self.start).max(0.0)
    }
}

/// Render segments as a timestamped transcript, one line per segment.
///
/// Precondition: segments arrive in chronological order with start <= end;
/// ordering is preserved as given, never re-sorted.
pub fn assemble_transcript(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| format!("[{:.2}s - {:.2}s] : {}", s.start, s.end, s.text))
        .collect::<Vec<_>>()
        .join("\n")
}
