use std::{fmt::Display, future::Future};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub trait Summarizer {
    type Error: Display + Send;

    /// Sends `prompt` to the generative model and returns the raw response text.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "response_status", rename_all = "snake_case")]
pub enum SummaryResult {
    /// `result` holds the decoded JSON payload, or the raw text when the model
    /// did not answer with JSON.
    Success { result: Value },
    #[serde(rename = "gemini_api_error")]
    Failed { exception_message: String },
}

impl SummaryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SummaryResult::Success { .. })
    }
}
