//! # Video URL Parser
//!
//! Derives the video identifier from the two URL shapes users paste:
//! `https://www.youtube.com/watch?v=<id>&...` and `https://youtu.be/<id>?...`.
//!
//! Matching is a plain substring scan, so the scheme and host are not
//! validated and any extra query parameters are discarded.

use std::{fmt, ops::Deref, str::FromStr};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    const WATCH_MARKER: &str = "watch?v=";
    const SHORT_LINK_MARKER: &str = "youtu.be/";

    /// Extracts the video id from `url`.
    ///
    /// # Returns
    /// * `Ok(VideoId)` for the text after the first `watch?v=` up to the next `&`
    ///   (or repeated marker), or else the text after `youtu.be/` up to the next `?`.
    /// * `Err(Error::InvalidVideoUrl)` when neither marker is present or the
    ///   extracted id is empty.
    pub fn parse(url: &str) -> Result<Self, Error> {
        let id = if let Some(rest) = url.split(Self::WATCH_MARKER).nth(1) {
            rest.split('&').next()
        } else if let Some(rest) = url.split(Self::SHORT_LINK_MARKER).nth(1) {
            rest.split('?').next()
        } else {
            None
        };

        match id {
            Some(id) if !id.is_empty() => Ok(VideoId(id.to_string())),
            _ => Err(Error::InvalidVideoUrl(url.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for VideoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Deref for VideoId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
