use crate::models::{EnrichedSegment, FusedSegment};
use crate::nlp::{extract_entities, KeywordExtractor};

/// Maximum number of ranked keyword phrases carried per segment.
pub const MAX_KEYWORDS: usize = 5;

/// Derive keywords and named entities for one fused segment.
///
/// A fresh extractor is built per call so no ranking state survives from a
/// previous segment. The input segment is not modified; the enriched segment
/// is a new value.
pub fn enrich_segment(segment: &FusedSegment) -> EnrichedSegment {
    let extractor = KeywordExtractor::new();
    let keywords = extractor.extract(&segment.text, MAX_KEYWORDS);
    let entities = extract_entities(&segment.text);

    EnrichedSegment {
        speaker: segment.speaker.clone(),
        start: segment.start,
        end: segment.end,
        text: segment.text.clone(),
        keywords,
        entities,
    }
}
