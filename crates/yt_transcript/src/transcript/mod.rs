use std::future::Future;

use crate::{FetchedTranscript, TranscriptError};

pub mod youtube;

pub trait TranscriptSource {
    /// Fetches the captions of `video_id` in the first available language of
    /// `languages` (ordered by preference).
    fn fetch(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> impl Future<Output = Result<FetchedTranscript, TranscriptError>> + Send;
}

impl<T: TranscriptSource + Send + Sync> TranscriptSource for &T {
    async fn fetch(
        &self,
        video_id: &str,
        languages: &[String],
    ) -> Result<FetchedTranscript, TranscriptError> {
        (**self).fetch(video_id, languages).await
    }
}
