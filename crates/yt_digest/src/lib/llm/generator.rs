use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use serde_json::Value;

use crate::{Summarizer, SummaryResult};

/// Produces a summary of a transcript, retrying failed generation calls with
/// a constant delay.
#[derive(Debug)]
pub struct SummaryGenerator<S> {
    summarizer: S,
    max_retries: usize,
    retry_delay: Duration,
}

impl<S> SummaryGenerator<S>
where
    S: Summarizer + Send + Sync,
{
    const DIRECTIVE: &str = include_str!("./prompts/summary.txt");

    pub const DEFAULT_MAX_RETRIES: usize = 2;
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

    pub fn new(summarizer: S) -> Self {
        Self {
            summarizer,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            retry_delay: Self::DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// The transcript is appended verbatim: no truncation, no chunking.
    pub fn build_prompt(text: &str) -> String {
        format!("{}{}", Self::DIRECTIVE, text)
    }

    #[tracing::instrument(skip_all, fields(transcript_len = text.len()))]
    pub async fn summarize(&self, text: &str) -> SummaryResult {
        let prompt = Self::build_prompt(text);
        let backoff = ConstantBuilder::default()
            .with_delay(self.retry_delay)
            .with_max_times(self.max_retries);

        let outcome = (|| self.summarizer.generate(&prompt))
            .retry(backoff)
            .notify(|err: &S::Error, dur: Duration| {
                tracing::warn!(
                    error = %err,
                    retry_delay = ?dur,
                    "Summary generation failed, retrying"
                );
            })
            .await;

        match outcome {
            Ok(text) => {
                tracing::info!(response_len = text.len(), "Summary generated");
                SummaryResult::Success {
                    result: decode_response(text),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, attempts = self.max_retries + 1, "Summary generation failed");
                SummaryResult::Failed {
                    exception_message: format!("gemini_api_error: {e}"),
                }
            }
        }
    }
}

/// Decodes the model output as JSON, keeping the raw text when it is not JSON.
fn decode_response(text: String) -> Value {
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Model response is not JSON, returning raw text");
            Value::String(text)
        }
    }
}
