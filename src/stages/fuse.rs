use crate::models::{FusedSegment, SpeakerInterval, TranscriptSegment};

/// Attribute transcript segments to diarization intervals by temporal
/// overlap, producing exactly one [`FusedSegment`] per interval, in interval
/// order.
///
/// A transcript segment belongs to an interval when it is fully contained in
/// it, or, failing that, when the two ranges partially overlap. The two
/// checks are kept as distinct arms: their union is what defines
/// attribution, and the containment arm also admits zero-width segments
/// sitting exactly on an interval. Comparisons are strict, so a segment that
/// only touches an interval edge is not attributed to it.
///
/// Intervals may overlap each other, in which case a segment can appear in
/// more than one fused segment. A segment overlapping no interval is
/// excluded from all outputs. An interval with no overlapping text still
/// yields a fused segment with empty text.
pub fn fuse_segments(
    segments: &[TranscriptSegment],
    intervals: &[SpeakerInterval],
) -> Vec<FusedSegment> {
    intervals
        .iter()
        .map(|interval| {
            let mut parts: Vec<&str> = Vec::new();
            for segment in segments {
                if is_contained(segment, interval) {
                    parts.push(&segment.text);
                } else if is_overlapping(segment, interval) {
                    parts.push(&segment.text);
                }
            }
            FusedSegment {
                speaker: interval.speaker.clone(),
                start: interval.start,
                end: interval.end,
                text: parts.join(" ").trim().to_string(),
            }
        })
        .collect()
}

/// Fully contained: `[ts, te]` lies inside `[ds, de]`.
fn is_contained(segment: &TranscriptSegment, interval: &SpeakerInterval) -> bool {
    segment.start >= interval.start && segment.end <= interval.end
}

/// Partial overlap: the open ranges intersect.
fn is_overlapping(segment: &TranscriptSegment, interval: &SpeakerInterval) -> bool {
    segment.start < interval.end && segment.end > interval.start
}
