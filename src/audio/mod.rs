pub mod convert;
pub mod wav;

pub use convert::{convert_to_wav, denoise};
pub use wav::wav_duration_secs;
