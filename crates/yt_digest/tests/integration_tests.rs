#[allow(dead_code)]
mod mocks;

use std::time::Duration;

use mocks::{summarizer::MockSummarizer, transcript_source::MockTranscriptSource};
use serde_json::json;
use yt_digest::{types::ResponseStatus, SummaryPipeline, SummaryPipelineBuilder};

fn pipeline(
    source: &MockTranscriptSource,
    summarizer: &MockSummarizer,
) -> SummaryPipeline<MockTranscriptSource, MockSummarizer> {
    SummaryPipelineBuilder::new()
        .transcript_source(source.clone())
        .summarizer(summarizer.clone())
        .build()
}

#[tokio::test]
async fn test_successful_summary() {
    let source = MockTranscriptSource::new(&["hello", "world"]);
    let summarizer = MockSummarizer::new(r#"{"summary": "ok"}"#);

    let response = pipeline(&source, &summarizer)
        .run("https://www.youtube.com/watch?v=ozW7y-y6Ymw")
        .await;

    assert_eq!(response.response_status, ResponseStatus::Success);
    assert_eq!(response.summary, Some(json!({"summary": "ok"})));
    assert_eq!(response.error_message, None);

    let calls = source.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].video_id, "ozW7y-y6Ymw");
    assert_eq!(calls[0].languages, vec!["ko", "en"]);

    let prompts = summarizer.calls.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].ends_with("Script: hello world"));
}

#[tokio::test]
async fn test_plain_text_summary_is_success() {
    let source = MockTranscriptSource::new(&["some", "words"]);
    let summarizer = MockSummarizer::new("A short plain summary.");

    let response = pipeline(&source, &summarizer)
        .run("https://youtu.be/abc123")
        .await;

    assert_eq!(response.response_status, ResponseStatus::Success);
    assert_eq!(response.summary, Some(json!("A short plain summary.")));
    assert_eq!(source.calls.lock().unwrap()[0].video_id, "abc123");
}

#[tokio::test]
async fn test_short_link_query_is_dropped() {
    let source = MockTranscriptSource::new(&["x"]);
    let summarizer = MockSummarizer::new("{}");

    pipeline(&source, &summarizer)
        .run("https://youtu.be/abc123?t=42")
        .await;

    assert_eq!(source.calls.lock().unwrap()[0].video_id, "abc123");
}

#[tokio::test]
async fn test_invalid_url_skips_fetch_and_generation() {
    let source = MockTranscriptSource::new(&["unused"]);
    let summarizer = MockSummarizer::new("{}");

    let response = pipeline(&source, &summarizer)
        .run("https://example.com/video")
        .await;

    assert_eq!(response.response_status, ResponseStatus::ScriptError);
    assert_eq!(response.summary, None);
    assert!(response
        .error_message
        .unwrap()
        .starts_with("transcript extraction failed:"));
    assert!(source.calls.lock().unwrap().is_empty());
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_no_snippets_is_script_error() {
    let source = MockTranscriptSource::empty();
    let summarizer = MockSummarizer::new("{}");

    let response = pipeline(&source, &summarizer)
        .run("https://www.youtube.com/watch?v=abc")
        .await;

    assert_eq!(response.response_status, ResponseStatus::ScriptError);
    assert_eq!(
        response.error_message.as_deref(),
        Some("transcript extraction failed: transcript unavailable: no caption data")
    );
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_blank_transcript_is_script_error() {
    let source = MockTranscriptSource::new(&[""]);
    let summarizer = MockSummarizer::new("{}");

    let response = pipeline(&source, &summarizer)
        .run("https://www.youtube.com/watch?v=abc")
        .await;

    assert_eq!(response.response_status, ResponseStatus::ScriptError);
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_fetch_failure_reports_cause() {
    let source = MockTranscriptSource::failing("members only");
    let summarizer = MockSummarizer::new("{}");

    let response = pipeline(&source, &summarizer)
        .run("https://www.youtube.com/watch?v=abc")
        .await;

    assert_eq!(response.response_status, ResponseStatus::ScriptError);
    let message = response.error_message.unwrap();
    assert!(message.contains("no caption data"));
    assert!(message.contains("members only"));
    assert_eq!(summarizer.call_count(), 0);
}

#[tokio::test]
async fn test_custom_languages_are_forwarded() {
    let source = MockTranscriptSource::new(&["bonjour"]);
    let summarizer = MockSummarizer::new("{}");

    SummaryPipelineBuilder::new()
        .transcript_source(source.clone())
        .summarizer(summarizer.clone())
        .languages(["fr", "en"])
        .build()
        .run("https://www.youtube.com/watch?v=abc")
        .await;

    assert_eq!(source.calls.lock().unwrap()[0].languages, vec!["fr", "en"]);
}

#[tokio::test(start_paused = true)]
async fn test_generation_failure_after_retries() {
    let source = MockTranscriptSource::new(&["hello"]);
    let summarizer = MockSummarizer::failing("quota exceeded");

    let response = pipeline(&source, &summarizer)
        .run("https://www.youtube.com/watch?v=abc")
        .await;

    assert_eq!(response.response_status, ResponseStatus::SummaryError);
    assert_eq!(response.summary, None);
    let message = response.error_message.unwrap();
    assert!(message.starts_with("gemini_api_error:"));
    assert!(message.contains("quota exceeded"));
    assert_eq!(summarizer.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_generation_recovers_on_last_attempt() {
    let source = MockTranscriptSource::new(&["hello"]);
    let summarizer = MockSummarizer::scripted(vec![
        Err("unavailable"),
        Err("unavailable"),
        Ok(r#"{"summary": "third time"}"#),
    ]);

    let response = pipeline(&source, &summarizer)
        .run("https://www.youtube.com/watch?v=abc")
        .await;

    assert_eq!(response.response_status, ResponseStatus::Success);
    assert_eq!(response.summary, Some(json!({"summary": "third time"})));
    assert_eq!(summarizer.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retry_count_is_configurable() {
    let source = MockTranscriptSource::new(&["hello"]);
    let summarizer = MockSummarizer::failing("down");

    let response = SummaryPipelineBuilder::new()
        .transcript_source(source.clone())
        .summarizer(summarizer.clone())
        .with_retries(0, Duration::from_millis(10))
        .build()
        .run("https://www.youtube.com/watch?v=abc")
        .await;

    assert_eq!(response.response_status, ResponseStatus::SummaryError);
    assert_eq!(summarizer.call_count(), 1);
}
