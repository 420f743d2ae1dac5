use std::path::Path;

use crate::error::PipelineError;

/// Total duration of a WAV file in seconds, from its header.
pub fn wav_duration_secs(path: &Path) -> Result<f64, PipelineError> {
    let reader = hound::WavReader::open(path).map_err(|e| {
        PipelineError::Unknown(format!("failed to read wav {}: {e}", path.display()))
    })?;
    let spec = reader.spec();
    Ok(f64::from(reader.duration()) / f64::from(spec.sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_of_generated_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        // Half a second of silence at 16 kHz.
        for _ in 0..8_000 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        let duration = wav_duration_secs(&path).unwrap();
        assert!((duration - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = wav_duration_secs(Path::new("/nonexistent/audio.wav")).unwrap_err();
        assert_eq!(err.category(), "unknown");
    }
}
