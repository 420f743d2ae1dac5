pub mod enrich;
pub mod fuse;
pub mod pipeline;

pub use enrich::{enrich_segment, MAX_KEYWORDS};
pub use fuse::fuse_segments;
pub use pipeline::{assemble_speaker_segments, process_audio, PipelineConfig};
