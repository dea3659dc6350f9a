use itertools::Itertools;
use yt_transcript::{TranscriptSnippet, TranscriptSource};

use crate::{error::Error, parser::VideoId, yt::TranscriptResult};

/// Turns a video URL into a flat transcript string.
#[derive(Debug)]
pub struct ScriptExtractor<T> {
    source: T,
    languages: Vec<String>,
}

impl<T> ScriptExtractor<T>
where
    T: TranscriptSource + Send + Sync,
{
    /// Korean first, English as fallback
    pub const DEFAULT_LANGUAGES: [&str; 2] = ["ko", "en"];
    pub const NO_CAPTION_DATA: &str = "no caption data";

    pub fn new(source: T) -> Self {
        Self {
            source,
            languages: Self::DEFAULT_LANGUAGES.map(String::from).to_vec(),
        }
    }

    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Extracts and flattens the transcript of the video `url` points to.
    ///
    /// Returns `Err` only when `url` is not a recognized video URL, in which
    /// case no request is made. Fetch failures are folded into
    /// [`TranscriptResult::Unavailable`].
    #[tracing::instrument(skip(self), fields(languages = ?self.languages))]
    pub async fn extract(&self, url: &str) -> Result<TranscriptResult, Error> {
        let video_id = VideoId::parse(url)
            .inspect_err(|e| tracing::error!(error = %e, "Unsupported URL format"))?;
        tracing::info!(%video_id, "Fetching transcript");

        let result = match self.source.fetch(&video_id, &self.languages).await {
            Ok(transcript) => {
                tracing::info!(
                    count = transcript.len(),
                    language_code = %transcript.language_code,
                    "Fetched transcript"
                );
                flatten_snippets(&transcript.snippets)
                    .map(TranscriptResult::Transcript)
                    .unwrap_or_else(|| {
                        tracing::warn!("Transcript contains no snippets");
                        TranscriptResult::Unavailable(Self::NO_CAPTION_DATA.into())
                    })
            }
            Err(e) => {
                tracing::error!(error = %e, %video_id, "Failed to fetch transcript");
                TranscriptResult::Unavailable(format!("{}: {e}", Self::NO_CAPTION_DATA))
            }
        };

        Ok(result)
    }
}

/// Joins snippet texts with a single space, preserving order.
/// `None` when there is nothing to join.
pub fn flatten_snippets(snippets: &[TranscriptSnippet]) -> Option<String> {
    if snippets.is_empty() {
        return None;
    }
    Some(snippets.iter().map(|s| s.text.as_str()).join(" "))
}
