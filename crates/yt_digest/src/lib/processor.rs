use yt_transcript::TranscriptSource;

use crate::{
    types::YouTubeSummaryResponse,
    yt::{ScriptExtractor, TranscriptResult},
    Summarizer, SummaryGenerator, SummaryResult,
};

pub mod builder;

/// Transcript extraction followed by summary generation, one URL at a time.
///
/// Holds no per-request state, so a single instance can be shared by every
/// request the server handles.
#[derive(Debug)]
pub struct SummaryPipeline<T, S>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    extractor: ScriptExtractor<T>,
    generator: SummaryGenerator<S>,
}

impl<T, S> SummaryPipeline<T, S>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn new(extractor: ScriptExtractor<T>, generator: SummaryGenerator<S>) -> Self {
        SummaryPipeline {
            extractor,
            generator,
        }
    }

    pub fn extractor(&self) -> &ScriptExtractor<T> {
        &self.extractor
    }

    /// Runs both stages for `url`. Generation is skipped when no transcript
    /// could be extracted.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self, url: &str) -> YouTubeSummaryResponse {
        let transcript = match self.extractor.extract(url).await {
            Ok(TranscriptResult::Transcript(text)) if !text.is_empty() => text,
            Ok(TranscriptResult::Transcript(_)) => {
                return Self::script_error("transcript is empty");
            }
            Ok(unavailable) => return Self::script_error(unavailable),
            Err(e) => return Self::script_error(e),
        };

        match self.generator.summarize(&transcript).await {
            SummaryResult::Success { result } => {
                tracing::info!("Summary pipeline completed");
                YouTubeSummaryResponse::success(result)
            }
            SummaryResult::Failed { exception_message } => {
                YouTubeSummaryResponse::summary_error(exception_message)
            }
        }
    }

    fn script_error(cause: impl std::fmt::Display) -> YouTubeSummaryResponse {
        tracing::warn!(%cause, "Transcript extraction failed");
        YouTubeSummaryResponse::script_error(format!("transcript extraction failed: {cause}"))
    }
}
