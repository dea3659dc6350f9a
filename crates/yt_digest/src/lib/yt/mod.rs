pub mod extractor;

use std::fmt;

pub use extractor::ScriptExtractor;

/// Outcome of transcript extraction. A missing transcript is data, not an error,
/// so callers can report it without unwinding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptResult {
    /// All snippet texts joined with single spaces, in source order
    Transcript(String),
    /// Diagnostic describing why no transcript could be produced
    Unavailable(String),
}

impl fmt::Display for TranscriptResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptResult::Transcript(text) => f.write_str(text),
            TranscriptResult::Unavailable(reason) => {
                write!(f, "transcript unavailable: {reason}")
            }
        }
    }
}
