//! # Transcript Module
//!
//! This module provides functionality for retrieving the caption tracks that
//! YouTube publishes for a video and turning them into ordered text snippets.
//!
//! Captions are looked up through the same player endpoint the mobile clients
//! use, optionally routed through a rotating residential proxy so requests are
//! not attributed to a single (and easily blocked) egress address.

mod captions;
mod domain;
mod error;
mod proxy;
mod transcript;

pub use captions::parse_caption_document;
pub use domain::{FetchedTranscript, TranscriptSnippet};
pub use error::TranscriptError;
pub use proxy::WebshareProxyConfig;
pub use transcript::youtube::YouTubeTranscriptClient;
pub use transcript::TranscriptSource;
