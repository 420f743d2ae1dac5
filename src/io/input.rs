use tracing::{debug, warn};

use crate::models::{ParsedTranscript, TranscriptSegment};

/// Parse the raw multi-line stdout of the transcription engine.
///
/// Lines starting with `[` are timestamped entries of the form
/// `[H:MM:SS.mmm --> H:MM:SS.mmm]  text`; anything else is a continuation
/// line whose text joins the full-text accumulator without creating a
/// segment. Parsing is best-effort: a malformed line is logged and skipped,
/// it never fails the whole run.
pub fn parse_transcript(raw: &str) -> ParsedTranscript {
    let mut segments = Vec::new();
    let mut pieces: Vec<&str> = Vec::new();
    let mut skipped_lines = 0;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            match parse_timestamped_line(line) {
                Some((start, end, text)) => {
                    if text.is_empty() {
                        debug!(start, end, "dropping empty-text segment");
                        continue;
                    }
                    pieces.push(text);
                    segments.push(TranscriptSegment {
                        start,
                        end,
                        text: text.to_string(),
                    });
                }
                None => {
                    warn!(line, "skipping malformed transcript line");
                    skipped_lines += 1;
                }
            }
        } else {
            pieces.push(line);
        }
    }

    ParsedTranscript {
        segments,
        full_text: pieces.join(" ").trim().to_string(),
        skipped_lines,
    }
}

/// Split a `[start --> end]text` line into its parts. `None` means the line
/// is malformed. A stamp pair with `end < start` also counts as malformed.
fn parse_timestamped_line(line: &str) -> Option<(f64, f64, &str)> {
    let (stamp_part, text_part) = line.split_once(']')?;
    let stamp = stamp_part.trim_matches(['[', ']']);
    let (start_str, end_str) = stamp.split_once(" --> ")?;

    let start = parse_timestamp(start_str.trim())?;
    let end = parse_timestamp(end_str.trim())?;
    if end < start {
        return None;
    }

    Some((start, end, text_part.trim()))
}

/// Convert an `H:MM:SS.mmm` stamp to total seconds: integer hours, integer
/// minutes, floating-point seconds.
pub fn parse_timestamp(stamp: &str) -> Option<f64> {
    let mut parts = stamp.split(':');
    let hours: u32 = parts.next()?.parse().ok()?;
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !seconds.is_finite() || seconds < 0.0 {
        return None;
    }

    Some(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
}
