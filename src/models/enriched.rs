use serde::Serialize;

use super::FALLBACK_SPEAKER;

/// Transcript text attributed to one diarization interval. One of these
/// exists per interval, in interval order, even when no transcript segment
/// overlapped it (text is then empty).
#[derive(Debug, Clone, Serialize)]
pub struct FusedSegment {
    /// Speaker label from the diarization interval
    pub speaker: String,
    /// Interval start in seconds
    pub start: f64,
    /// Interval end in seconds
    pub end: f64,
    /// Space-joined, trimmed transcript text overlapping the interval
    pub text: String,
}

impl FusedSegment {
    /// The single-speaker fallback segment spanning the whole recording.
    pub fn full_recording(text: String, duration_secs: f64) -> Self {
        Self {
            speaker: FALLBACK_SPEAKER.to_string(),
            start: 0.0,
            end: duration_secs,
            text,
        }
    }
}

/// A named entity extracted from segment text.
///
/// Ordering and equality are over `(name, kind)`, which is what the
/// per-segment deduplication collapses on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Entity {
    /// The entity surface form, words joined with single spaces
    pub name: String,
    /// Entity class label (PERSON, ORGANIZATION, GPE)
    #[serde(rename = "type")]
    pub kind: String,
}

impl Entity {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// Terminal entity of the pipeline: a fused segment plus its extracted
/// keywords and entities. Returned to the caller in fused-segment order.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedSegment {
    pub speaker: String,
    pub start: f64,
    pub end: f64,
    pub text: String,
    /// Top-ranked keyword phrases, descending score, at most five
    pub keywords: Vec<String>,
    /// Deduplicated entities, sorted for deterministic output
    pub entities: Vec<Entity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_recording_fallback() {
        let seg = FusedSegment::full_recording("the whole thing".to_string(), 12.5);
        assert_eq!(seg.speaker, FALLBACK_SPEAKER);
        assert_eq!(seg.start, 0.0);
        assert!((seg.end - 12.5).abs() < 1e-9);
        assert_eq!(seg.text, "the whole thing");
    }

    #[test]
    fn test_entity_equality_is_name_and_kind() {
        let a = Entity::new("Paris", "GPE");
        let b = Entity::new("Paris", "GPE");
        let c = Entity::new("Paris", "PERSON");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_entity_serializes_type_field() {
        let json = serde_json::to_string(&Entity::new("Acme Corp", "ORGANIZATION")).unwrap();
        assert!(json.contains("\"type\":\"ORGANIZATION\""));
    }
}
