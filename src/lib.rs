pub mod audio;
pub mod engines;
pub mod error;
pub mod io;
pub mod models;
pub mod nlp;
pub mod stages;

pub use engines::{DiarizerClient, DiarizerConfig, Engines, WhisperConfig, WhisperTranscriber};
pub use error::PipelineError;
pub use io::{parse_transcript, write_json, ErrorBody, ProcessOutput};
pub use models::{
    DiarizationOutcome, EnrichedSegment, Entity, FusedSegment, ParsedTranscript, SpeakerInterval,
    TranscriptSegment, FALLBACK_SPEAKER,
};
pub use nlp::{extract_entities, KeywordExtractor};
pub use stages::{
    assemble_speaker_segments, enrich_segment, fuse_segments, process_audio, PipelineConfig,
    MAX_KEYWORDS,
};
