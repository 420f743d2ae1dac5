use serde::{Deserialize, Serialize};

/// A unit of transcribed text with its start/end time, as emitted by the
/// transcription engine. Immutable once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (always >= start)
    pub end: f64,
    /// Trimmed segment text, never empty
    pub text: String,
}

impl TranscriptSegment {
    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Everything recovered from one transcription run: the ordered segments,
/// the space-joined full text (continuation lines included), and how many
/// lines failed to parse and were skipped.
#[derive(Debug, Clone, Default)]
pub struct ParsedTranscript {
    /// Segments in source line order, assumed chronological
    pub segments: Vec<TranscriptSegment>,
    /// All text joined with single spaces and trimmed
    pub full_text: String,
    /// Number of malformed lines that were skipped
    pub skipped_lines: usize,
}

impl ParsedTranscript {
    /// Span from the first segment's start to the last segment's end, in
    /// seconds. Zero when there are no segments.
    pub fn span_secs(&self) -> f64 {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => last.end - first.start,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_duration() {
        let seg = TranscriptSegment {
            start: 1.5,
            end: 4.0,
            text: "hello".to_string(),
        };
        assert!((seg.duration() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_transcript_span() {
        let parsed = ParsedTranscript::default();
        assert_eq!(parsed.span_secs(), 0.0);
    }
}
