pub mod input;
pub mod output;

pub use input::{parse_timestamp, parse_transcript};
pub use output::{write_json, ErrorBody, ProcessOutput};
