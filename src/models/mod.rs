pub mod diarization;
pub mod enriched;
pub mod transcript;

pub use diarization::*;
pub use enriched::*;
pub use transcript::*;
