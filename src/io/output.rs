use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::error::PipelineError;
use crate::models::EnrichedSegment;

/// Success response body: a human message plus the ordered enriched segments.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutput {
    pub message: String,
    /// RFC 3339 stamp of when processing finished
    pub processed_at: String,
    pub results: Vec<EnrichedSegment>,
}

/// Failure response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn from_error(err: &PipelineError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Write a value as pretty JSON to the given path, or to stdout when no path
/// is given.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create file: {:?}", path))?;
            serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value).context("Failed to write JSON")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_matches_contract() {
        let body = ErrorBody::from_error(&PipelineError::Conversion("bad codec".into()));
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"audio conversion failed: bad codec"}"#);
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let output = ProcessOutput {
            message: "File 'a.wav' processed successfully.".to_string(),
            processed_at: "2025-01-01T00:00:00+00:00".to_string(),
            results: vec![],
        };

        write_json(&output, Some(&path)).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("processed successfully"));
        assert!(content.contains("\"results\": []"));
    }
}
