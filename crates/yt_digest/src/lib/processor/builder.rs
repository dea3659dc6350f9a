use std::time::Duration;

use yt_transcript::TranscriptSource;

use crate::{yt::ScriptExtractor, Summarizer, SummaryGenerator, SummaryPipeline};

#[derive(Debug)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub retry_delay: Duration,
}

pub struct SummaryPipelineBuilder<T = (), S = ()> {
    transcript_source: T,
    summarizer: S,
    languages: Option<Vec<String>>,
    retry_config: Option<RetryConfig>,
}

impl Default for SummaryPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryPipelineBuilder {
    pub fn new() -> Self {
        Self {
            transcript_source: (),
            summarizer: (),
            languages: None,
            retry_config: None,
        }
    }
}

impl<T, S> SummaryPipelineBuilder<T, S> {
    pub fn transcript_source<T2: TranscriptSource + Send + Sync + 'static>(
        self,
        transcript_source: T2,
    ) -> SummaryPipelineBuilder<T2, S> {
        SummaryPipelineBuilder {
            transcript_source,
            summarizer: self.summarizer,
            languages: self.languages,
            retry_config: self.retry_config,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> SummaryPipelineBuilder<T, S2> {
        SummaryPipelineBuilder {
            transcript_source: self.transcript_source,
            summarizer,
            languages: self.languages,
            retry_config: self.retry_config,
        }
    }

    /// Caption languages in order of preference
    pub fn languages<I, L>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_retries(mut self, max_retries: usize, retry_delay: Duration) -> Self {
        self.retry_config = Some(RetryConfig {
            max_retries,
            retry_delay,
        });
        self
    }
}

impl<T, S> SummaryPipelineBuilder<T, S>
where
    T: TranscriptSource + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    pub fn build(self) -> SummaryPipeline<T, S> {
        let mut extractor = ScriptExtractor::new(self.transcript_source);
        if let Some(languages) = self.languages {
            extractor = extractor.with_languages(languages);
        }

        let mut generator = SummaryGenerator::new(self.summarizer);
        if let Some(RetryConfig {
            max_retries,
            retry_delay,
        }) = self.retry_config
        {
            generator = generator
                .with_max_retries(max_retries)
                .with_retry_delay(retry_delay);
        }

        SummaryPipeline::new(extractor, generator)
    }
}
