/// A single timed caption fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptSnippet {
    pub text: String,
    /// Offset from the start of the video, in seconds.
    pub start: f64,
    /// Display duration, in seconds.
    pub duration: f64,
}

#[derive(Debug, Clone, Default)]
pub struct FetchedTranscript {
    pub video_id: String,
    /// Human readable track name, e.g. "Korean (auto-generated)"
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub snippets: Vec<TranscriptSnippet>,
}

impl FetchedTranscript {
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}
