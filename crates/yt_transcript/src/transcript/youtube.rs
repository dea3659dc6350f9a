use std::sync::LazyLock;

use regex::Regex;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client, Response, StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    captions::parse_caption_document, transcript::TranscriptSource, FetchedTranscript,
    TranscriptError, WebshareProxyConfig,
};

static INNERTUBE_API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap());

static CONSENT_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name="v" value="(.*?)""#).unwrap());

/// Caption client backed by the public YouTube watch page and player API.
#[derive(Debug, Clone)]
pub struct YouTubeTranscriptClient {
    client: Client,
    base_url: String,
}

impl Default for YouTubeTranscriptClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YouTubeTranscriptClient {
    const DEFAULT_BASE_URL: &str = "https://www.youtube.com";
    const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
    const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

    const CONSENT_FORM_MARKER: &str = r#"action="https://consent.youtube.com/s""#;
    const RECAPTCHA_MARKER: &str = r#"class="g-recaptcha""#;
    const PO_TOKEN_MARKER: &str = "&exp=xpe";

    const BOT_CHECK_REASON: &str = "Sign in to confirm you’re not a bot";
    const AGE_RESTRICTED_REASON: &str = "This video may be inappropriate for some users.";
    const UNAVAILABLE_REASON: &str = "This video is unavailable";

    /// Client that connects to YouTube directly.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: Self::DEFAULT_BASE_URL.into(),
        }
    }

    /// Client that routes every request through the rotating proxy.
    ///
    /// Connections are not kept alive so consecutive requests can be served
    /// by different exit nodes.
    pub fn with_proxy(config: &WebshareProxyConfig) -> Result<Self, TranscriptError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONNECTION, HeaderValue::from_static("close"));

        let client = Client::builder()
            .proxy(config.to_proxy()?)
            .default_headers(headers)
            .pool_max_idle_per_host(0)
            .build()?;

        tracing::info!(
            endpoint = %config.endpoint(),
            locations = ?config.filter_ip_locations,
            "Transcript client configured with rotating proxy"
        );

        Ok(Self {
            client,
            base_url: Self::DEFAULT_BASE_URL.into(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[tracing::instrument(skip(self))]
    pub async fn fetch_transcript(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<FetchedTranscript, TranscriptError> {
        let html = self.fetch_video_html(video_id).await?;
        let api_key = Self::extract_innertube_api_key(&html, video_id)?;
        let player = self.fetch_player_response(video_id, &api_key).await?;

        if let Some(status) = &player.playability_status {
            Self::assert_playability(video_id, status)?;
        }

        let tracks = player
            .captions
            .and_then(|c| c.tracklist)
            .and_then(|t| t.caption_tracks)
            .ok_or_else(|| TranscriptError::TranscriptsDisabled(video_id.to_string()))?;

        let track = select_track(&tracks, languages)?;
        tracing::debug!(
            language_code = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        if track.base_url.contains(Self::PO_TOKEN_MARKER) {
            return Err(TranscriptError::PoTokenRequired(video_id.to_string()));
        }

        let track_url = track.base_url.replace("&fmt=srv3", "");
        let document = check_status(self.client.get(&track_url).send().await?)?
            .text()
            .await?;

        let snippets = parse_caption_document(&document);
        tracing::info!(count = snippets.len(), "Fetched caption snippets");

        Ok(FetchedTranscript {
            video_id: video_id.to_string(),
            language: track.display_name(),
            language_code: track.language_code.clone(),
            is_generated: track.is_generated(),
            snippets,
        })
    }

    /// Loads the watch page, accepting the cookie consent interstitial once if shown
    async fn fetch_video_html(&self, video_id: &str) -> Result<String, TranscriptError> {
        let html = self.get_watch_page(video_id, None).await?;
        if !html.contains(Self::CONSENT_FORM_MARKER) {
            return Ok(html);
        }

        tracing::debug!("Consent interstitial served, retrying with consent cookie");
        let token = CONSENT_VALUE_RE
            .captures(&html)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or(TranscriptError::ConsentCookieFailed)?;

        let html = self
            .get_watch_page(video_id, Some(&format!("CONSENT=YES+{token}")))
            .await?;
        if html.contains(Self::CONSENT_FORM_MARKER) {
            return Err(TranscriptError::ConsentCookieFailed);
        }

        Ok(html)
    }

    async fn get_watch_page(
        &self,
        video_id: &str,
        cookie: Option<&str>,
    ) -> Result<String, TranscriptError> {
        let mut request = self
            .client
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .header(header::ACCEPT_LANGUAGE, "en-US");

        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let resp = request
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to load watch page"))?;

        Ok(check_status(resp)?.text().await?)
    }

    fn extract_innertube_api_key(html: &str, video_id: &str) -> Result<String, TranscriptError> {
        if let Some(key) = INNERTUBE_API_KEY_RE
            .captures(html)
            .and_then(|cap| cap.get(1))
        {
            return Ok(key.as_str().to_string());
        }

        if html.contains(Self::RECAPTCHA_MARKER) {
            return Err(TranscriptError::IpBlocked);
        }

        Err(TranscriptError::DataUnparsable(video_id.to_string()))
    }

    async fn fetch_player_response(
        &self,
        video_id: &str,
        api_key: &str,
    ) -> Result<PlayerResponse, TranscriptError> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": Self::INNERTUBE_CLIENT_NAME,
                    "clientVersion": Self::INNERTUBE_CLIENT_VERSION
                }
            },
            "videoId": video_id
        });

        let resp = self
            .client
            .post(format!("{}/youtubei/v1/player", self.base_url))
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to call player endpoint"))?;

        let text = check_status(resp)?.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn assert_playability(video_id: &str, status: &PlayabilityStatus) -> Result<(), TranscriptError> {
        let reason = status.reason.as_deref().unwrap_or_default();

        match status.status.as_str() {
            "OK" => Ok(()),
            "LOGIN_REQUIRED" if reason == Self::BOT_CHECK_REASON => {
                Err(TranscriptError::RequestBlocked)
            }
            "LOGIN_REQUIRED" if reason == Self::AGE_RESTRICTED_REASON => {
                Err(TranscriptError::AgeRestricted(video_id.to_string()))
            }
            "ERROR" if reason == Self::UNAVAILABLE_REASON => {
                if video_id.starts_with("http://") || video_id.starts_with("https://") {
                    Err(TranscriptError::InvalidVideoId(video_id.to_string()))
                } else {
                    Err(TranscriptError::VideoUnavailable(video_id.to_string()))
                }
            }
            _ => Err(TranscriptError::VideoUnplayable {
                reason: reason.to_string(),
                sub_reasons: status.sub_reasons(),
            }),
        }
    }
}

impl TranscriptSource for YouTubeTranscriptClient {
    async fn fetch(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<FetchedTranscript, TranscriptError> {
        self.fetch_transcript(video_id, languages).await
    }
}

fn check_status(resp: Response) -> Result<Response, TranscriptError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(TranscriptError::IpBlocked);
    }
    if !status.is_success() {
        return Err(TranscriptError::Http {
            status: status.as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

/// Picks the track for the first requested language that has one.
/// A manually created track wins over an auto-generated one in the same language.
fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Result<&'a CaptionTrack, TranscriptError> {
    for language in languages {
        let manual = tracks
            .iter()
            .find(|t| !t.is_generated() && &t.language_code == language);
        let generated = || {
            tracks
                .iter()
                .find(|t| t.is_generated() && &t.language_code == language)
        };

        if let Some(track) = manual.or_else(generated) {
            return Ok(track);
        }
    }

    Err(TranscriptError::NoTranscriptFound {
        requested: languages.to_vec(),
        available: tracks.iter().map(|t| t.language_code.clone()).collect(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    #[serde(default)]
    playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayabilityStatus {
    status: String,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    error_screen: Option<Value>,
}

impl PlayabilityStatus {
    fn sub_reasons(&self) -> Vec<String> {
        self.error_screen
            .as_ref()
            .and_then(|screen| {
                screen["playerErrorMessageRenderer"]["subreason"]["runs"].as_array()
            })
            .map(|runs| {
                runs.iter()
                    .filter_map(|run| run["text"].as_str())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer", default)]
    tracklist: Option<CaptionTracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTracklist {
    #[serde(default)]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<TrackName>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    fn display_name(&self) -> String {
        self.name
            .as_ref()
            .and_then(|name| {
                name.simple_text.clone().or_else(|| {
                    name.runs
                        .as_ref()
                        .and_then(|runs| runs.first())
                        .map(|run| run.text.clone())
                })
            })
            .unwrap_or_else(|| self.language_code.clone())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackName {
    #[serde(default)]
    simple_text: Option<String>,
    #[serde(default)]
    runs: Option<Vec<TextRun>>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}
