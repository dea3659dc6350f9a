use std::sync::{Arc, Mutex};

use yt_transcript::{FetchedTranscript, TranscriptError, TranscriptSnippet, TranscriptSource};

#[derive(Debug, Clone, PartialEq)]
pub struct FetchCall {
    pub video_id: String,
    pub languages: Vec<String>,
}

#[derive(Clone)]
pub struct MockTranscriptSource {
    pub snippets: Vec<String>,
    pub calls: Arc<Mutex<Vec<FetchCall>>>,
    pub fail_with: Option<String>,
}

impl MockTranscriptSource {
    pub fn new(snippets: &[&str]) -> Self {
        Self {
            snippets: snippets.iter().map(|s| s.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::empty()
        }
    }
}

impl TranscriptSource for MockTranscriptSource {
    async fn fetch(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<FetchedTranscript, TranscriptError> {
        self.calls.lock().unwrap().push(FetchCall {
            video_id: video_id.to_string(),
            languages: languages.to_vec(),
        });

        if let Some(ref msg) = self.fail_with {
            return Err(TranscriptError::VideoUnplayable {
                reason: msg.clone(),
                sub_reasons: Vec::new(),
            });
        }

        Ok(FetchedTranscript {
            video_id: video_id.to_string(),
            language: "Korean".to_string(),
            language_code: "ko".to_string(),
            is_generated: false,
            snippets: self
                .snippets
                .iter()
                .enumerate()
                .map(|(i, text)| TranscriptSnippet {
                    text: text.clone(),
                    start: i as f64,
                    duration: 1.0,
                })
                .collect(),
        })
    }
}
