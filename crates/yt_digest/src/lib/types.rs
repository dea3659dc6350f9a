use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YouTubeUrlRequest {
    pub youtube_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    ScriptError,
    SummaryError,
}

/// Body of every `/youtube-summary` response. Failures are reported in
/// `response_status`, never through the HTTP status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YouTubeSummaryResponse {
    pub response_status: ResponseStatus,
    pub summary: Option<Value>,
    pub error_message: Option<String>,
}

impl YouTubeSummaryResponse {
    pub fn success(summary: Value) -> Self {
        Self {
            response_status: ResponseStatus::Success,
            summary: Some(summary),
            error_message: None,
        }
    }

    pub fn script_error(message: impl Into<String>) -> Self {
        Self {
            response_status: ResponseStatus::ScriptError,
            summary: None,
            error_message: Some(message.into()),
        }
    }

    pub fn summary_error(message: impl Into<String>) -> Self {
        Self {
            response_status: ResponseStatus::SummaryError,
            summary: None,
            error_message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_serializes_null_error() {
        let resp = YouTubeSummaryResponse::success(json!({"summary": "ok"}));
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "response_status": "success",
                "summary": {"summary": "ok"},
                "error_message": null
            })
        );
    }

    #[test]
    fn test_error_statuses_serialize_in_snake_case() {
        let resp = YouTubeSummaryResponse::script_error("boom");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"response_status": "script_error", "summary": null, "error_message": "boom"})
        );

        let resp = YouTubeSummaryResponse::summary_error("bang");
        assert_eq!(
            serde_json::to_value(&resp).unwrap()["response_status"],
            "summary_error"
        );
    }
}
